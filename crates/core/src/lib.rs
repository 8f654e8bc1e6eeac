//! Domain model, product catalog, error taxonomy and configuration for the
//! wellnest recommendation engine.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;

pub use catalog::Catalog;
pub use domain::check_in::{EnergyLevel, HealthLogEntry, MoodLevel};
pub use domain::product::{CatalogEntry, ProductId, ProductRecommendation, RecommendationSource};
pub use domain::profile::UserProfile;
pub use domain::recommendation::AiResponse;
pub use errors::{ApplicationError, DomainError};
