//! Skill Calc CLI Tool
//!
//! Command-line front end for the TrueSkill engine. Ratings are given as
//! `MU:SIGMA`; a team is several ratings joined with `+`.
//!
//! Usage:
//!   cargo run --bin skill-calc -- adjust -e 25:8.333 -e 25:8.333
//!   cargo run --bin skill-calc -- adjust -e 25:8.3+27:5 -e 30:2 --draws true
//!   cargo run --bin skill-calc -- quality 25:8.333 30:4
//!   cargo run --bin skill-calc -- win-probability --team-a 30:2 --team-b 25:8.333
//!   cargo run --bin skill-calc -- conservative 30:2

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use factor_skill::config::AppConfig;
use factor_skill::{RatingCalculator, Rating, Team, TrueSkillCalculator};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "skill-calc",
    version,
    about = "Compute TrueSkill rating updates, match quality and win probabilities"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Draw probability override, in percent
    #[arg(long, value_name = "PERCENT")]
    draw_probability: Option<f64>,

    /// Print the effective configuration and exit
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Update ratings from a ranked result, best entrant first
    Adjust {
        /// Entrant as MU:SIGMA, or a team as MU:SIGMA+MU:SIGMA
        #[arg(short, long = "entrant", value_parser = parse_team, required = true)]
        entrants: Vec<TeamArg>,
        /// Draw flag per adjacent pair, comma separated
        #[arg(long, value_delimiter = ',', conflicts_with = "all_draw")]
        draws: Vec<bool>,
        /// Treat every adjacent pair as a draw
        #[arg(long)]
        all_draw: bool,
    },
    /// Match quality between two players
    Quality {
        #[arg(value_parser = parse_rating, num_args = 2, required = true)]
        ratings: Vec<Rating>,
    },
    /// Probability that team A outperforms team B
    WinProbability {
        #[arg(long, value_parser = parse_team)]
        team_a: TeamArg,
        #[arg(long, value_parser = parse_team)]
        team_b: TeamArg,
    },
    /// Conservative skill estimate for a rating
    Conservative {
        #[arg(value_parser = parse_rating)]
        rating: Rating,
    },
}

#[derive(Debug, Clone)]
struct TeamArg(Team);

fn parse_rating(value: &str) -> std::result::Result<Rating, String> {
    let (mu, sigma) = value
        .split_once(':')
        .ok_or_else(|| format!("expected MU:SIGMA, got '{}'", value))?;
    let mu: f64 = mu
        .trim()
        .parse()
        .map_err(|_| format!("invalid mean '{}'", mu))?;
    let sigma: f64 = sigma
        .trim()
        .parse()
        .map_err(|_| format!("invalid standard deviation '{}'", sigma))?;

    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(format!("standard deviation must be positive, got {}", sigma));
    }

    Ok(Rating::new(mu, sigma))
}

fn parse_team(value: &str) -> std::result::Result<TeamArg, String> {
    value
        .split('+')
        .map(parse_rating)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(TeamArg)
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from the environment and apply CLI overrides
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone();
    }

    if let Some(draw_probability) = cli.draw_probability {
        config.model.draw_probability_percent = draw_probability;
    }

    factor_skill::config::validate_config(&config)?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Commands, calculator: &TrueSkillCalculator) -> Result<()> {
    match command {
        Commands::Adjust {
            entrants,
            draws,
            all_draw,
        } => {
            let teams: Vec<Team> = entrants.into_iter().map(|team| team.0).collect();
            let draws = if all_draw || draws.is_empty() {
                vec![all_draw; teams.len().saturating_sub(1)]
            } else {
                draws
            };

            info!("Rating {} entrants", teams.len());
            let result = calculator.adjust_team_skills(&teams, &draws)?;
            print_json(&result)
        }
        Commands::Quality { ratings } => {
            let quality = calculator.match_quality(&ratings)?;
            print_json(&serde_json::json!({ "match_quality": quality }))
        }
        Commands::WinProbability { team_a, team_b } => {
            let probability = calculator.win_probability(&team_a.0, &team_b.0)?;
            print_json(&serde_json::json!({ "win_probability": probability }))
        }
        Commands::Conservative { rating } => {
            print_json(&serde_json::json!({
                "rating": rating,
                "conservative_skill": calculator.conservative_skill(&rating),
            }))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let calculator = TrueSkillCalculator::new(config.trueskill_config()?)
        .with_convergence(config.convergence)?;
    debug!("Using configuration: {}", calculator.config());

    if cli.dry_run {
        return print_json(&calculator.config());
    }

    match cli.command {
        Some(command) => run(command, &calculator),
        None => Err(anyhow!("No command given; see --help")),
    }
}
