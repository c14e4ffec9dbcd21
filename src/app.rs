//! Application controller tying validation, the API call and rendering together.

use crate::api::{GenerationService, LyricsApiClient};
use crate::models::{Config, GenerateRequest, GenerateResponse, HealthStatus};
use crate::query::validate_query;
use crate::render;
use crate::view::{GenerateButton, Page, ResultsPanel};
use crate::{Error, Result};
use std::sync::Mutex;
use tracing::{error, info};

/// Re-enables the button when dropped, so a cancelled or panicking request
/// cannot leave it disabled.
struct InFlight<'a>(&'a GenerateButton);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}

/// Drives one generate action at a time and owns the visible output region.
pub struct App {
    service: Box<dyn GenerationService>,
    panel: ResultsPanel,
    button: GenerateButton,
    last_query: Mutex<String>,
}

impl App {
    /// Build an app around any generation service.
    ///
    /// This is primarily useful for tests and the offline preview mode.
    pub fn with_service(service: Box<dyn GenerationService>) -> Self {
        Self {
            service,
            panel: ResultsPanel::new(),
            button: GenerateButton::new(),
            last_query: Mutex::new(String::new()),
        }
    }

    /// Construct an app talking to the API named in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        info!("Using lyrics API at {}", config.api_base);
        let client = LyricsApiClient::new(config.api_base.clone(), config.timeout)?;
        Ok(Self::with_service(Box::new(client)))
    }

    /// Validate the prompt, call the API once and render the outcome.
    ///
    /// Validation failures never reach the network. Once the request starts,
    /// the button is disabled and re-enabled exactly once whatever happens.
    pub async fn generate(&self, raw_query: &str, top_k: u32) -> Result<GenerateResponse> {
        if !self.button.is_enabled() {
            info!("Generate already in flight, ignoring trigger");
            return Err(Error::Busy);
        }
        *self.last_query.lock().unwrap() = raw_query.to_string();

        let query = match validate_query(raw_query) {
            Ok(query) => query,
            Err(e) => {
                self.show_error(&e.to_string());
                return Err(e);
            }
        };

        if !self.button.try_begin() {
            info!("Generate already in flight, ignoring trigger");
            return Err(Error::Busy);
        }
        let _in_flight = InFlight(&self.button);

        self.panel.set_html(render::loading_html());

        let request = GenerateRequest { query, top_k };
        info!("Generating lyrics (top_k = {})", request.top_k);
        let outcome = self.service.generate(&request).await;

        match &outcome {
            Ok(response) => {
                info!(
                    "Received lyrics ({} chars, {} examples)",
                    response.lyrics.len(),
                    render::count_examples(&response.context)
                );
                self.panel.set_html(render::results_html(response));
            }
            Err(e) => {
                error!("Generation error: {}", e);
                self.show_error(&format!("Failed to generate lyrics: {}", e));
            }
        }

        outcome
    }

    /// Reset the results region to the welcome message.
    pub fn clear_error(&self) {
        self.panel.set_html(render::welcome_html());
    }

    pub async fn check_health(&self) -> Result<HealthStatus> {
        let health = self.service.health().await?;
        info!("API health: {} ({})", health.status, health.message);
        Ok(health)
    }

    pub fn panel(&self) -> &ResultsPanel {
        &self.panel
    }

    pub fn button(&self) -> &GenerateButton {
        &self.button
    }

    /// The full document for the current state.
    pub fn page_html(&self) -> String {
        let query = self.last_query.lock().unwrap().clone();
        Page {
            query: &query,
            button: &self.button,
            results: self.panel.html(),
        }
        .to_html()
    }

    fn show_error(&self, message: &str) {
        self.panel.set_html(render::error_html(message));
    }
}
