use serde::{Deserialize, Serialize};

use crate::domain::product::ProductRecommendation;

/// The assembled result of one synthesis call, handed to the caller for
/// display or persistence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse {
    pub health_tips: Vec<String>,
    pub mental_wellness_suggestions: Vec<String>,
    pub product_recommendations: Vec<ProductRecommendation>,
}
