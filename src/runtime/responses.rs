//! Responses API runtime client.
//!
//! Drives a hosted agent over the vendor's Responses API with streaming
//! enabled, and maps the SSE event stream into [`AgentUpdate`]s. Text
//! and reasoning deltas and function-call items become structured
//! content items; every event is also carried as the update's raw
//! envelope so hosted-tool lifecycle events reach the translator's
//! secondary detection path.

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, info};

use crate::config::PlumeConfig;
use crate::error::{PlumeError, Result};
use crate::types::{AgentUpdate, ContentItem};

use super::{AgentRuntime, RunRequest};

/// HTTP client for the Responses API.
#[derive(Debug)]
pub struct ResponsesClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ResponsesClient {
    pub fn new(config: &PlumeConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| PlumeError::Configuration("OPENAI_API_KEY is not set".to_string()))?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|_| {
            PlumeError::Configuration("API key contains invalid header characters".to_string())
        })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn build_request_body(&self, request: &RunRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "input": request.input,
            "instructions": request.instructions,
            "stream": true,
        });
        let obj = body.as_object_mut().unwrap();
        if !request.tools.is_empty() {
            obj.insert("tools".into(), request.tools.clone().into());
        }
        if let Some(reasoning) = request.options.reasoning_options() {
            obj.insert("reasoning".into(), reasoning);
        }
        body
    }
}

/// Map one parsed SSE event into an update. The original event always
/// rides along as the raw envelope.
fn update_from_event(event: serde_json::Value) -> AgentUpdate {
    let kind = event.get("type").and_then(|t| t.as_str()).unwrap_or("");
    let mut contents = Vec::new();

    match kind {
        "response.output_text.delta" => {
            if let Some(delta) = event.get("delta").and_then(|d| d.as_str()) {
                if !delta.is_empty() {
                    contents.push(ContentItem::Text {
                        text: delta.to_string(),
                    });
                }
            }
        }
        "response.reasoning_summary_text.delta" => {
            if let Some(delta) = event.get("delta").and_then(|d| d.as_str()) {
                if !delta.is_empty() {
                    contents.push(ContentItem::TextReasoning {
                        text: delta.to_string(),
                    });
                }
            }
        }
        "response.output_item.added" => {
            if let Some(item) = event.get("item") {
                if item.get("type").and_then(|t| t.as_str()) == Some("function_call") {
                    let name = item
                        .get("name")
                        .and_then(|v| v.as_str())
                        .map(str::to_string);
                    let call_id = item
                        .get("call_id")
                        .and_then(|v| v.as_str())
                        .or_else(|| item.get("id").and_then(|v| v.as_str()))
                        .map(str::to_string);
                    contents.push(ContentItem::FunctionCall { name, call_id });
                }
            }
        }
        _ => {}
    }

    AgentUpdate {
        contents,
        text: None,
        raw: Some(event.into()),
    }
}

#[async_trait]
impl AgentRuntime for ResponsesClient {
    async fn run(&self, request: RunRequest) -> Result<BoxStream<'static, Result<AgentUpdate>>> {
        let body = self.build_request_body(&request);
        let url = format!("{}/responses", self.base_url);
        info!(run_id = %request.id, model = %self.model, "launching agent run");

        let resp = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(PlumeError::api(status, body_text));
        }

        let byte_stream = resp.bytes_stream();

        let stream = async_stream::stream! {
            let mut buffer = String::new();
            let mut pending_data: Vec<String> = Vec::new();
            let mut saw_done = false;
            futures::pin_mut!(byte_stream);

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(PlumeError::Network(e));
                        break;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    let line = line.trim_end_matches('\r');
                    if line.is_empty() {
                        if pending_data.is_empty() {
                            continue;
                        }
                        let data = pending_data.join("\n");
                        pending_data.clear();
                        if data == "[DONE]" {
                            saw_done = true;
                            break;
                        }
                        match serde_json::from_str::<serde_json::Value>(&data) {
                            Ok(event) => yield Ok(update_from_event(event)),
                            Err(e) => {
                                debug!(error = %e, "SSE payload parse failed");
                            }
                        }
                    } else if line.starts_with(':') {
                        continue;
                    } else if let Some(rest) = line.strip_prefix("data:") {
                        let rest = rest.strip_prefix(' ').unwrap_or(rest);
                        pending_data.push(rest.to_string());
                    }
                }

                if saw_done {
                    break;
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
