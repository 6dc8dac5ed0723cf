//! Prompt, call, parse: one method per content type.

use std::sync::Arc;

use log::{debug, info};
use reqwest::Client;

use crate::backend::{with_backoff, Backend, BackoffConfig, LlmRequest, OllamaBackend};
use crate::client::LlmConfig;
use crate::content::{
    parse_destinations_with, parse_events_with, parse_foods_with, parse_itinerary_content_with,
    parse_places_with, DestinationRecord, EventRecord, FoodRecord, ItineraryStructure,
    ParserDefaults, PlaceRecord,
};
use crate::error::{ContentError, Result};
use crate::prompt;

/// Generates travel content from a model and parses it into records.
///
/// # Example
///
/// ```no_run
/// use travel_content::ContentGenerator;
///
/// # async fn run() -> travel_content::Result<()> {
/// let generator = ContentGenerator::new("http://localhost:11434", "llama3.2:3b");
/// let foods = generator.foods("Cebu", 3).await?;
/// for food in foods {
///     println!("{} ({})", food.name, food.price_range);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ContentGenerator {
    client: Client,
    base_url: String,
    model: String,
    backend: Arc<dyn Backend>,
    llm: LlmConfig,
    backoff: BackoffConfig,
    defaults: ParserDefaults,
}

impl ContentGenerator {
    /// A generator talking to Ollama at `base_url`.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            backend: Arc::new(OllamaBackend),
            llm: LlmConfig::default(),
            backoff: BackoffConfig::default(),
            defaults: ParserDefaults::default(),
        }
    }

    pub fn with_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_llm_config(mut self, config: LlmConfig) -> Self {
        self.llm = config;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_defaults(mut self, defaults: ParserDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn defaults(&self) -> &ParserDefaults {
        &self.defaults
    }

    pub async fn destinations(&self, count: usize) -> Result<Vec<DestinationRecord>> {
        let count_text = count.to_string();
        let text = self
            .generate("destinations", prompt::DESTINATIONS, &[("count", count_text.as_str())])
            .await?;
        Ok(parse_destinations_with(&text, count, &self.defaults))
    }

    pub async fn foods(&self, destination: &str, count: usize) -> Result<Vec<FoodRecord>> {
        let count_text = count.to_string();
        let vars = [("count", count_text.as_str()), ("destination", destination)];
        let text = self.generate("foods", prompt::FOODS, &vars).await?;
        Ok(parse_foods_with(&text, destination, count, &self.defaults))
    }

    pub async fn places(&self, destination: &str, count: usize) -> Result<Vec<PlaceRecord>> {
        let count_text = count.to_string();
        let vars = [("count", count_text.as_str()), ("destination", destination)];
        let text = self.generate("places", prompt::PLACES, &vars).await?;
        Ok(parse_places_with(&text, count, &self.defaults))
    }

    pub async fn events(&self, destination: &str, count: usize) -> Result<Vec<EventRecord>> {
        let count_text = count.to_string();
        let vars = [("count", count_text.as_str()), ("destination", destination)];
        let text = self.generate("events", prompt::EVENTS, &vars).await?;
        Ok(parse_events_with(&text, count, &self.defaults))
    }

    /// A `days`-day plan for `destination`. `days` must be at least 1.
    pub async fn itinerary(&self, destination: &str, days: u32) -> Result<ItineraryStructure> {
        if days == 0 {
            return Err(ContentError::InvalidConfig(
                "itinerary needs at least one day".into(),
            ));
        }
        let days_text = days.to_string();
        let vars = [("days", days_text.as_str()), ("destination", destination)];
        let text = self.generate("itinerary", prompt::ITINERARY, &vars).await?;
        Ok(parse_itinerary_content_with(&text, destination, &self.defaults))
    }

    async fn generate(&self, kind: &str, template: &str, vars: &[(&str, &str)]) -> Result<String> {
        if self.model.trim().is_empty() {
            return Err(ContentError::InvalidConfig("model name is empty".into()));
        }
        let request = LlmRequest {
            model: self.model.clone(),
            prompt: prompt::render(template, vars),
            config: self.llm.clone(),
        };

        info!("generating {kind} with {} ({})", self.model, self.backend.name());
        let response = with_backoff(
            &self.backend,
            &self.client,
            &self.base_url,
            &request,
            &self.backoff,
        )
        .await?;
        debug!("{kind}: received {} chars", response.text.len());
        Ok(response.text)
    }
}

impl std::fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("backend", &self.backend.name())
            .finish()
    }
}
