use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use reputex::config::{BusinessProfile, Config};
use reputex::projection::{
    self, CrisisEvent, CrisisScenario, PlanInputs, ProjectionConfig, StarDistribution, StarMix,
    DEFAULT_INFLUX_RATING,
};
use reputex::session::{SimulationKey, SimulationOutput, SimulationSession};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_UNREACHABLE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve for the reviews and time needed to reach a target rating
    Plan {
        /// Desired average rating
        #[arg(short, long)]
        target: f64,

        /// Current total reviews
        #[arg(long)]
        reviews: Option<u64>,

        /// Current average rating
        #[arg(long)]
        rating: Option<f64>,

        /// Rating every new review is assumed to land at
        #[arg(long)]
        star_value: Option<f64>,

        /// Percentage of new reviews at 5 stars (remainder after --four-star is 3 stars)
        #[arg(long, requires = "four_star", conflicts_with = "star_value")]
        five_star: Option<u8>,

        /// Percentage of new reviews at 4 stars
        #[arg(long, requires = "five_star", conflicts_with = "star_value")]
        four_star: Option<u8>,

        /// Custom star distribution, e.g. "5:0.8,4:0.15,3:0.05"
        #[arg(long, conflicts_with_all = ["five_star", "four_star", "star_value"])]
        distribution: Option<StarDistribution>,

        /// Average new reviews per month (defaults to reviews / age)
        #[arg(long)]
        velocity: Option<f64>,

        /// Multiplier applied to the velocity
        #[arg(long)]
        growth: Option<f64>,

        /// Business age in months
        #[arg(long)]
        age: Option<u32>,
    },
    /// Simulate the rating impact of a burst of negative reviews
    Crisis {
        /// What set off the crisis (viral, policy, safety, misconduct, smear)
        #[arg(long, default_value = "viral")]
        event: CrisisEvent,

        /// Number of incoming negative reviews
        #[arg(long)]
        influx: u64,

        /// Rating of each incoming review
        #[arg(long, default_value_t = DEFAULT_INFLUX_RATING)]
        influx_rating: f64,

        /// How long the influx lasts (24h to 7d)
        #[arg(long, default_value = "48h", value_parser = humantime::parse_duration)]
        duration: Duration,

        /// Current total reviews
        #[arg(long)]
        reviews: Option<u64>,

        /// Current average rating
        #[arg(long)]
        rating: Option<f64>,
    },
    /// Show the default industry star breakdown for a review count
    Distribution {
        /// Total reviews
        #[arg(long)]
        reviews: Option<u64>,
    },
    /// Weighted star value of a 5/4/3-star mix
    Mix {
        /// Percentage of 5-star reviews
        #[arg(long, default_value_t = 80)]
        five_star: u8,

        /// Percentage of 4-star reviews (the rest are 3-star)
        #[arg(long, default_value_t = 15)]
        four_star: u8,
    },
    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "reputex")]
#[command(about = "Review-rating target planner", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/reputex/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "reputex=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_errors(heading: &str, errors: &[String], code: i32) -> ! {
    eprintln!("{}:", heading);
    for error in errors {
        eprintln!("  - {}", error);
    }
    std::process::exit(code);
}

fn fail(message: impl std::fmt::Display, code: i32) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

/// A CLI flag, or the config file's value, or an input error naming both.
fn require<T>(flag: Option<T>, configured: Option<T>, flag_name: &str, config_key: &str) -> T {
    flag.or(configured).unwrap_or_else(|| {
        fail(
            format!(
                "Missing {} (or business.{} in the config file)",
                flag_name, config_key
            ),
            EXIT_INPUT,
        )
    })
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = cli.command {
        let path = match config_path {
            Some(p) => p,
            None => match reputex::config::get_config_path() {
                Ok(p) => p,
                Err(e) => fail(format!("Config error: {:#}", e), EXIT_CONFIG),
            },
        };
        if let Err(e) = reputex::config::write_starter_config(&path, force) {
            fail(format!("Config error: {:#}", e), EXIT_CONFIG);
        }
        println!("Config written to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    let config: Config = match reputex::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => fail(format!("Config error: {:#}", e), EXIT_CONFIG),
    };

    let projection_config = config.projection.clone().unwrap_or_default();
    if let Err(errors) = projection::validate_projection_config(&projection_config) {
        report_errors("Projection config errors", &errors, EXIT_CONFIG);
    }
    let business = config.business.clone().unwrap_or_default();
    debug!(?business, ?projection_config, "effective configuration");

    let use_colors = reputex::output::should_use_colors();
    let mut session = SimulationSession::new();

    let code = match cli.command {
        Commands::Plan {
            target,
            reviews,
            rating,
            star_value,
            five_star,
            four_star,
            distribution,
            velocity,
            growth,
            age,
        } => {
            let star_value = resolve_star_value(
                &projection_config,
                star_value,
                five_star.zip(four_star),
                distribution,
            );
            let inputs = plan_inputs(
                &business,
                &projection_config,
                PlanFlags {
                    target,
                    reviews,
                    rating,
                    star_value,
                    velocity,
                    growth,
                    age,
                },
            );
            if let Err(errors) = projection::validate_plan_inputs(&inputs) {
                report_errors("Invalid input", &errors, EXIT_INPUT);
            }

            let key = session.record(SimulationOutput::Target(projection::build_plan(&inputs)));
            render_latest(&session, &key, cli.format, use_colors)
        }
        Commands::Crisis {
            event,
            influx,
            influx_rating,
            duration,
            reviews,
            rating,
        } => {
            let scenario = CrisisScenario {
                event,
                negative_influx: influx,
                influx_rating,
                duration,
                total_reviews: require(reviews, business.total_reviews, "--reviews", "total_reviews"),
                current_rating: require(rating, business.average_rating, "--rating", "average_rating"),
            };
            if let Err(errors) = projection::validate_crisis(&scenario) {
                report_errors("Invalid input", &errors, EXIT_INPUT);
            }

            let outcome = match projection::run_crisis(&scenario) {
                Ok(o) => o,
                Err(e) => fail(format!("Simulation failed: {}", e), EXIT_INPUT),
            };
            let key = session.record(SimulationOutput::Crisis(outcome));
            render_latest(&session, &key, cli.format, use_colors)
        }
        Commands::Distribution { reviews } => {
            let total = require(reviews, business.total_reviews, "--reviews", "total_reviews");
            let counts = projection::get_approximate_distribution(total);
            match cli.format {
                OutputFormat::Text => {
                    println!("{}", reputex::output::format_distribution(&counts, use_colors))
                }
                OutputFormat::Tsv => {
                    for (star, count) in counts.iter().rev() {
                        println!("{}\t{}", star, count);
                    }
                }
                OutputFormat::Json => print_json(&counts),
            }
            EXIT_SUCCESS
        }
        Commands::Mix {
            five_star,
            four_star,
        } => {
            let mix = match StarMix::from_percentages(five_star, four_star) {
                Ok(m) => m,
                Err(e) => fail(format!("Invalid input: {}", e), EXIT_INPUT),
            };
            match cli.format {
                OutputFormat::Text => println!("{}", reputex::output::format_mix(&mix)),
                OutputFormat::Tsv => println!(
                    "{}\t{}\t{}\t{:.4}",
                    mix.five_star,
                    mix.four_star,
                    mix.three_star(),
                    mix.weighted_star_value()
                ),
                OutputFormat::Json => print_json(&json!({
                    "mix": mix,
                    "three_star": mix.three_star(),
                    "weighted_star_value": mix.weighted_star_value(),
                })),
            }
            EXIT_SUCCESS
        }
        Commands::Init { .. } => unreachable!("handled before config load"),
    };

    std::process::exit(code);
}

struct PlanFlags {
    target: f64,
    reviews: Option<u64>,
    rating: Option<f64>,
    star_value: f64,
    velocity: Option<f64>,
    growth: Option<f64>,
    age: Option<u32>,
}

/// Custom distribution, then a 5/4/3 mix, then an explicit star value, then config.
fn resolve_star_value(
    config: &ProjectionConfig,
    star_value: Option<f64>,
    mix: Option<(u8, u8)>,
    distribution: Option<StarDistribution>,
) -> f64 {
    if let Some(dist) = distribution {
        return projection::calculate_weighted_star_value(&dist);
    }
    if let Some((five, four)) = mix {
        return match StarMix::from_percentages(five, four) {
            Ok(m) => m.weighted_star_value(),
            Err(e) => fail(format!("Invalid input: {}", e), EXIT_INPUT),
        };
    }
    star_value.unwrap_or_else(|| config.effective_star_value())
}

fn plan_inputs(business: &BusinessProfile, config: &ProjectionConfig, flags: PlanFlags) -> PlanInputs {
    let total_reviews = require(flags.reviews, business.total_reviews, "--reviews", "total_reviews");
    let age_months = require(flags.age, business.age_months, "--age", "age_months");
    let velocity = flags
        .velocity
        .or(business.monthly_velocity)
        .unwrap_or_else(|| total_reviews as f64 / age_months.max(1) as f64);

    PlanInputs {
        total_reviews,
        current_rating: require(flags.rating, business.average_rating, "--rating", "average_rating"),
        target_rating: flags.target,
        star_value: flags.star_value,
        velocity,
        growth_factor: flags.growth.or(config.growth_factor),
        age_months,
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match reputex::output::to_json(value) {
        Ok(s) => println!("{}", s),
        Err(e) => fail(format!("{:#}", e), EXIT_INPUT),
    }
}

/// Render the session's latest result for `key` and pick the exit code.
fn render_latest(
    session: &SimulationSession,
    key: &SimulationKey,
    format: OutputFormat,
    use_colors: bool,
) -> i32 {
    let Some(record) = session.latest(key) else {
        return EXIT_SUCCESS;
    };

    match &record.output {
        SimulationOutput::Target(plan) => {
            match format {
                OutputFormat::Text => println!("{}", reputex::output::format_plan(plan, use_colors)),
                OutputFormat::Tsv => println!("{}", reputex::output::format_plan_tsv(plan)),
                OutputFormat::Json => print_json(plan),
            }
            if plan.is_reachable() {
                EXIT_SUCCESS
            } else {
                EXIT_UNREACHABLE
            }
        }
        SimulationOutput::Crisis(outcome) => {
            match format {
                OutputFormat::Text => {
                    println!("{}", reputex::output::format_crisis(outcome, use_colors))
                }
                OutputFormat::Tsv => println!("{}", reputex::output::format_crisis_tsv(outcome)),
                OutputFormat::Json => print_json(outcome),
            }
            EXIT_SUCCESS
        }
    }
}
