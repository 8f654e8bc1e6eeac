use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use wellnest_agent::RecommendationRuntime;
use wellnest_core::config::{AppConfig, LoadOptions};
use wellnest_core::{ApplicationError, EnergyLevel, HealthLogEntry, MoodLevel, UserProfile};

use crate::commands::CommandResult;
use crate::logging::init_logging;

const COMMAND: &str = "recommend";

#[derive(Clone, Debug, Default)]
pub struct RecommendArgs {
    pub profile: PathBuf,
    pub check_in: Option<PathBuf>,
    pub mood: Option<u8>,
    pub energy: Option<u8>,
    pub blood_sugar: Option<u32>,
    pub notes: String,
}

pub fn run(args: RecommendArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };
    init_logging(&config);

    let (profile, entry) = match read_inputs(&args) {
        Ok(inputs) => inputs,
        Err(error) => {
            return CommandResult::failure(COMMAND, "input_validation", format!("{error:#}"), 3);
        }
    };

    let engine = match RecommendationRuntime::from_config(&config) {
        Ok(engine) => engine,
        Err(error) => {
            let exit_code = match &error {
                ApplicationError::Configuration(_) => 2,
                _ => 4,
            };
            return CommandResult::failure(
                COMMAND,
                error.error_class(),
                error.to_string(),
                exit_code,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                5,
            );
        }
    };

    let response = runtime.block_on(engine.synthesize(&profile, &entry));
    CommandResult::json(COMMAND, &response)
}

fn read_inputs(args: &RecommendArgs) -> Result<(UserProfile, HealthLogEntry)> {
    let profile: UserProfile = read_json(&args.profile)?;
    profile.validate()?;

    let entry = match &args.check_in {
        Some(path) => read_json(path)?,
        None => check_in_from_flags(args)?,
    };

    Ok((profile, entry))
}

fn check_in_from_flags(args: &RecommendArgs) -> Result<HealthLogEntry> {
    let mood = args.mood.context("--mood is required when --check-in is not given")?;
    let energy = args.energy.context("--energy is required when --check-in is not given")?;

    let mood = MoodLevel::try_from(mood)?;
    let energy = EnergyLevel::try_from(energy)?;
    Ok(HealthLogEntry::check_in(mood, energy, args.blood_sugar, args.notes.clone()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read `{}`", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("could not parse `{}`", path.display()))
}
