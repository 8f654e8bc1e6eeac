pub mod commands;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "wellnest",
    about = "Wellnest recommendation CLI",
    long_about = "Generate personalized wellness recommendations from a profile and a daily check-in, and inspect catalog and configuration.",
    after_help = "Examples:\n  wellnest recommend --profile profile.json --mood 2 --energy 4 --notes \"stressed\"\n  wellnest recommend --profile profile.json --check-in today.json\n  wellnest doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Synthesize recommendations for one check-in and print them as JSON")]
    Recommend {
        #[arg(long, help = "Path to the user profile JSON")]
        profile: PathBuf,
        #[arg(long, help = "Path to a check-in JSON (otherwise built from the flags below)")]
        check_in: Option<PathBuf>,
        #[arg(long, help = "Mood on the 1-5 scale")]
        mood: Option<u8>,
        #[arg(long, help = "Energy on the 1-5 scale")]
        energy: Option<u8>,
        #[arg(long, help = "Blood sugar in mg/dL")]
        blood_sugar: Option<u32>,
        #[arg(long, default_value = "", help = "Free-text notes")]
        notes: String,
    },
    #[command(about = "Print the effective product catalog as JSON")]
    Catalog,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, credential presence, and catalog readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Recommend { profile, check_in, mood, energy, blood_sugar, notes } => {
            commands::recommend::run(commands::recommend::RecommendArgs {
                profile,
                check_in,
                mood,
                energy,
                blood_sugar,
                notes,
            })
        }
        Command::Catalog => commands::catalog::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
