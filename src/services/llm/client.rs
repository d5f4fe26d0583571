use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::PlanError;

/// The external planning collaborator: goal + screen in, free-form text out.
#[async_trait]
pub trait Planner: Send + Sync {
    async fn request_plan(
        &self,
        preamble: &str,
        goal: &str,
        image_base64: &str,
    ) -> Result<String, PlanError>;
}

#[derive(Clone)]
pub struct PlanningService {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<serde_json::Value>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl PlanningService {
    pub fn new(config: &PlannerConfig) -> Self {
        let mut builder = Client::builder();
        // No timeout unless configured: a stalled planner blocks the cycle.
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Self {
            client: builder.build().unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl Planner for PlanningService {
    async fn request_plan(
        &self,
        preamble: &str,
        goal: &str,
        image_base64: &str,
    ) -> Result<String, PlanError> {
        let request_body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                json!({ "role": "system", "content": preamble }),
                json!({
                    "role": "user",
                    "content": [
                        { "type": "text", "text": goal },
                        {
                            "type": "image_url",
                            "image_url": { "url": format!("data:image/jpeg;base64,{}", image_base64) }
                        }
                    ]
                }),
            ],
            stream: false,
        };

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request_body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(PlanError::Status(response.status()));
        }

        let resp_json: ChatResponse = response.json().await?;
        let content = resp_json
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(PlanError::Empty)?;
        debug!("Planner replied with {} bytes", content.len());
        Ok(content.trim().to_string())
    }
}
