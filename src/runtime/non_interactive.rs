use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    app::Config,
    cli::OutputFormat,
    conversation::{LookupStatus, Message, Sender, Session},
    directions::{DirectionsService, HttpDirectionsClient},
};

/// Result of a one-shot route lookup
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub from: String,
    pub to: String,
    /// How the lookup settled
    pub status: LookupStatus,
    /// Full transcript, intro prompt included
    pub messages: Vec<Message>,
    pub metadata: ExecutionMetadata,
}

#[derive(Debug, Serialize)]
pub struct ExecutionMetadata {
    /// Directions endpoint that was queried
    pub endpoint: String,
    /// Execution time in milliseconds
    pub duration_ms: u128,
}

impl RouteResult {
    pub fn is_failure(&self) -> bool {
        self.status == LookupStatus::Failed
    }
}

/// Runs the conversation for a single from/to pair without a terminal UI
pub struct NonInteractiveRunner {
    service: Arc<dyn DirectionsService>,
    bot_name: String,
}

impl NonInteractiveRunner {
    /// Create a runner talking to the configured directions service
    pub fn new(config: &Config) -> Result<Self> {
        let client = HttpDirectionsClient::new(&config.service)?;
        Ok(Self::with_service(Arc::new(client), config.ui.bot_name.clone()))
    }

    pub fn with_service(service: Arc<dyn DirectionsService>, bot_name: String) -> Self {
        Self { service, bot_name }
    }

    /// Feed both locations through the conversation and collect the transcript
    pub async fn execute(&self, from: &str, to: &str) -> Result<RouteResult> {
        let start = Instant::now();
        let mut session = Session::new();

        session.submit(from, self.service.as_ref()).await;
        session.submit(to, self.service.as_ref()).await;

        // Only an empty location leaves the trip unsettled.
        let status = session.last_lookup().unwrap_or(LookupStatus::Failed);

        Ok(RouteResult {
            from: from.to_string(),
            to: to.to_string(),
            status,
            messages: session.messages().to_vec(),
            metadata: ExecutionMetadata {
                endpoint: self.service.endpoint(),
                duration_ms: start.elapsed().as_millis(),
            },
        })
    }

    /// Format the result according to the output format
    pub fn format_result(&self, result: &RouteResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_else(|e| {
                format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)
            }),
            OutputFormat::Text => {
                let mut output = String::new();
                for message in &result.messages {
                    let who = match message.sender {
                        Sender::User => "You",
                        Sender::Bot => self.bot_name.as_str(),
                    };
                    output.push_str(&format!("[{}] {}\n", who, message.text));
                }
                output
            }
        }
    }
}
