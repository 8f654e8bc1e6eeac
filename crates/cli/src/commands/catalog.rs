use wellnest_core::config::{AppConfig, LoadOptions};
use wellnest_core::{ApplicationError, Catalog};

use crate::commands::CommandResult;

const COMMAND: &str = "catalog";

pub fn run() -> CommandResult {
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

    match Catalog::from_config(&config.catalog) {
        Ok(catalog) => CommandResult::json(COMMAND, &catalog.entries()),
        Err(error) => {
            let error = ApplicationError::from(error);
            CommandResult::failure(COMMAND, error.error_class(), error.to_string(), 4)
        }
    }
}
