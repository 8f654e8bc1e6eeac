use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{scale} value {value} is outside the 1..=5 scale")]
    ScaleOutOfRange { scale: &'static str, value: u8 },
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("integration failure: {0}")]
    Integration(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::ScaleOutOfRange { .. })
            | Self::Domain(DomainError::InvalidProfile(_)) => "input_validation",
            Self::Domain(DomainError::InvalidCatalog(_)) => "catalog",
            Self::Integration(_) => "integration",
            Self::Configuration(_) => "config_validation",
        }
    }
}
