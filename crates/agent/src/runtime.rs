use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};
use wellnest_core::config::AppConfig;
use wellnest_core::{AiResponse, ApplicationError, Catalog, HealthLogEntry, UserProfile};

use crate::fallback::fallback_response;
use crate::llm::{GatewayError, GeminiClient, LlmClient};
use crate::matcher::CatalogMatcher;
use crate::prompt::compose_request;
use crate::response::{parse_model_output, ParseError};

#[derive(Debug, Error)]
pub enum SynthesisFailure {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Terminal state of one synthesis call.
#[derive(Debug)]
pub enum SynthesisOutcome {
    Success(AiResponse),
    Fallback { reason: SynthesisFailure, response: AiResponse },
}

impl SynthesisOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn failure(&self) -> Option<&SynthesisFailure> {
        match self {
            Self::Success(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn response(&self) -> &AiResponse {
        match self {
            Self::Success(response) | Self::Fallback { response, .. } => response,
        }
    }

    pub fn into_response(self) -> AiResponse {
        match self {
            Self::Success(response) | Self::Fallback { response, .. } => response,
        }
    }
}

/// Stateless per call. The client and the catalog are shared read-only, so
/// concurrent `synthesize` calls are independent.
#[derive(Clone)]
pub struct RecommendationRuntime {
    client: Arc<dyn LlmClient>,
    catalog: Arc<Catalog>,
}

impl RecommendationRuntime {
    pub fn new(client: Arc<dyn LlmClient>, catalog: Arc<Catalog>) -> Self {
        Self { client, catalog }
    }

    /// Wires the Gemini client and the configured catalog. Fails only on
    /// configuration problems, never per call.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let client = GeminiClient::new(&config.llm)?;
        let catalog = Catalog::from_config(&config.catalog)?;
        info!(
            event_name = "system.runtime.ready",
            model = %config.llm.model,
            catalog_size = catalog.len(),
            "recommendation runtime constructed"
        );

        Ok(Self::new(Arc::new(client), Arc::new(catalog)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Always resolves to a displayable response.
    pub async fn synthesize(&self, profile: &UserProfile, entry: &HealthLogEntry) -> AiResponse {
        self.synthesize_with_outcome(profile, entry).await.into_response()
    }

    pub async fn synthesize_with_outcome(
        &self,
        profile: &UserProfile,
        entry: &HealthLogEntry,
    ) -> SynthesisOutcome {
        match self.attempt(profile, entry).await {
            Ok(response) => {
                info!(
                    event_name = "synthesis.completed",
                    correlation_id = %entry.id,
                    health_tips = response.health_tips.len(),
                    wellness_suggestions = response.mental_wellness_suggestions.len(),
                    product_recommendations = response.product_recommendations.len(),
                    "recommendations synthesized"
                );
                SynthesisOutcome::Success(response)
            }
            Err(reason) => {
                warn!(
                    event_name = "synthesis.fallback",
                    correlation_id = %entry.id,
                    reason = %reason,
                    "synthesis failed, serving fallback recommendations"
                );
                SynthesisOutcome::Fallback { reason, response: fallback_response() }
            }
        }
    }

    async fn attempt(
        &self,
        profile: &UserProfile,
        entry: &HealthLogEntry,
    ) -> Result<AiResponse, SynthesisFailure> {
        let request = compose_request(profile, entry);
        debug!(
            event_name = "synthesis.request_composed",
            correlation_id = %entry.id,
            prompt_chars = request.prompt.len(),
            "request composed"
        );

        let raw = self.client.generate(&request).await?;
        debug!(
            event_name = "synthesis.model_responded",
            correlation_id = %entry.id,
            response_chars = raw.len(),
            "model responded"
        );

        let suggestions = parse_model_output(&raw)?;
        let product_recommendations =
            CatalogMatcher::new(&self.catalog).recommend(&suggestions.product_categories);

        Ok(AiResponse {
            health_tips: suggestions.health_tips,
            mental_wellness_suggestions: suggestions.mental_wellness_suggestions,
            product_recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use wellnest_core::config::AppConfig;
    use wellnest_core::{
        ApplicationError, Catalog, CatalogEntry, EnergyLevel, HealthLogEntry, MoodLevel, ProductId,
        RecommendationSource, UserProfile,
    };

    use super::{RecommendationRuntime, SynthesisFailure, SynthesisOutcome};
    use crate::fallback::fallback_response;
    use crate::llm::{GatewayError, GenerationRequest, LlmClient};
    use crate::response::ParseError;

    const MODEL_BODY: &str = r#"{"healthTips":["a","b","c"],"mentalWellnessSuggestions":["d","e","f"],"productCategories":["Sleep Aid","Unknown"]}"#;

    enum Script {
        Reply(String),
        Fail,
    }

    struct ScriptedClient {
        script: Script,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedClient {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                script: Script::Reply(text.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                script: Script::Fail,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut last_prompt) = self.last_prompt.lock() {
                *last_prompt = Some(request.prompt.clone());
            }
            match &self.script {
                Script::Reply(text) => Ok(text.clone()),
                Script::Fail => Err(GatewayError::Status {
                    status: 429,
                    body: "quota exhausted".to_string(),
                }),
            }
        }
    }

    fn sleep_aid_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(vec![CatalogEntry {
            id: ProductId("p5".to_string()),
            name: "Weighted Blanket".to_string(),
            description: "Calming pressure for better sleep.".to_string(),
            category: "Sleep Aid".to_string(),
        }]))
    }

    fn profile() -> UserProfile {
        UserProfile {
            name: "Jane".to_string(),
            age: 30,
            height: 165.0,
            weight: 60.0,
            occupation: "Developer".to_string(),
        }
    }

    fn entry() -> HealthLogEntry {
        HealthLogEntry {
            id: "log-1".to_string(),
            date: "2024-05-01T08:00:00.000Z".to_string(),
            mood: MoodLevel::Unhappy,
            energy: EnergyLevel::High,
            blood_sugar: None,
            notes: "stressed".to_string(),
        }
    }

    #[tokio::test]
    async fn model_response_is_merged_with_catalog() {
        let client = ScriptedClient::replying(MODEL_BODY);
        let runtime = RecommendationRuntime::new(client.clone(), sleep_aid_catalog());

        let outcome = runtime.synthesize_with_outcome(&profile(), &entry()).await;
        assert!(!outcome.is_fallback());

        let response = outcome.into_response();
        assert_eq!(response.health_tips, vec!["a", "b", "c"]);
        assert_eq!(response.mental_wellness_suggestions, vec!["d", "e", "f"]);

        let recommendations = &response.product_recommendations;
        assert_eq!(recommendations.len(), 3);
        assert_eq!(recommendations[0].source, RecommendationSource::Internal);
        assert_eq!(recommendations[0].name, "Weighted Blanket");
        assert_eq!(recommendations[0].link, "/product/p5");
        assert_eq!(recommendations[1].source, RecommendationSource::External);
        assert_eq!(recommendations[1].category, "Sleep Aid");
        assert_eq!(recommendations[2].source, RecommendationSource::External);
        assert_eq!(recommendations[2].name, "Shop for Unknown");

        assert_eq!(client.calls(), 1);
        let prompt = client.last_prompt.lock().ok().and_then(|prompt| prompt.clone());
        assert!(prompt.is_some_and(|prompt| prompt.contains("- Mood: Unhappy")));
    }

    #[tokio::test]
    async fn gateway_failure_serves_exact_fallback() {
        let client = ScriptedClient::failing();
        let runtime = RecommendationRuntime::new(client.clone(), sleep_aid_catalog());

        let outcome = runtime.synthesize_with_outcome(&profile(), &entry()).await;
        assert!(matches!(
            outcome.failure(),
            Some(SynthesisFailure::Gateway(GatewayError::Status { status: 429, .. }))
        ));
        assert_eq!(outcome.response(), &fallback_response());
        assert_eq!(client.calls(), 1, "no retries after a failure");
    }

    #[tokio::test]
    async fn empty_model_output_serves_fallback() {
        let runtime =
            RecommendationRuntime::new(ScriptedClient::replying(""), sleep_aid_catalog());

        let outcome = runtime.synthesize_with_outcome(&profile(), &entry()).await;
        assert!(matches!(outcome.failure(), Some(SynthesisFailure::Parse(ParseError::Empty))));
        assert_eq!(runtime.synthesize(&profile(), &entry()).await, fallback_response());
    }

    #[tokio::test]
    async fn malformed_model_output_serves_fallback() {
        let runtime = RecommendationRuntime::new(
            ScriptedClient::replying(r#"{"healthTips":["only this"]}"#),
            sleep_aid_catalog(),
        );

        let outcome = runtime.synthesize_with_outcome(&profile(), &entry()).await;
        assert!(matches!(outcome, SynthesisOutcome::Fallback { .. }));
        assert_eq!(outcome.into_response(), fallback_response());
    }

    #[tokio::test]
    async fn fenced_model_output_matches_unfenced() {
        let fenced = format!("```json\n{MODEL_BODY}\n```");
        let fenced_runtime =
            RecommendationRuntime::new(ScriptedClient::replying(&fenced), sleep_aid_catalog());
        let plain_runtime =
            RecommendationRuntime::new(ScriptedClient::replying(MODEL_BODY), sleep_aid_catalog());

        assert_eq!(
            fenced_runtime.synthesize(&profile(), &entry()).await,
            plain_runtime.synthesize(&profile(), &entry()).await
        );
    }

    #[tokio::test]
    async fn concurrent_calls_are_independent() {
        let client = ScriptedClient::replying(MODEL_BODY);
        let runtime = RecommendationRuntime::new(client.clone(), sleep_aid_catalog());

        let (profile, entry) = (profile(), entry());
        let (first, second) = tokio::join!(
            runtime.synthesize(&profile, &entry),
            runtime.synthesize(&profile, &entry)
        );
        assert_eq!(first, second);
        assert_eq!(client.calls(), 2);
    }

    #[test]
    fn construction_without_credential_fails() {
        let result = RecommendationRuntime::from_config(&AppConfig::default());
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn construction_with_credential_uses_builtin_catalog() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("test-key".to_string().into());

        let runtime = RecommendationRuntime::from_config(&config).expect("runtime builds");
        assert_eq!(runtime.catalog().len(), 7);
    }
}
