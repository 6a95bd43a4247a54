use crate::types::AnalyzeConfig;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

/// Errors raised by the inference service or the transport in front of it.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Cannot connect to Ollama at {endpoint}: {message}")]
    Request { endpoint: String, message: String },

    #[error("Ollama returned HTTP {status}: {message}")]
    Response { status: u16, message: String },

    #[error("Invalid response from Ollama: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Status code of a service-side error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Send one chat message with an attached image to `/api/chat`.
///
/// Returns the model's reply text exactly as received.
///
/// # Errors
///
/// - [`ServiceError::Request`] if the endpoint cannot be reached
/// - [`ServiceError::Response`] if Ollama answers with a non-2xx status
/// - [`ServiceError::InvalidResponse`] if the body has no `message.content`
pub async fn chat_with_image(
    client: &Client,
    config: &AnalyzeConfig,
    prompt: &str,
    image: &[u8],
) -> Result<String, ServiceError> {
    let image_b64 = base64::engine::general_purpose::STANDARD.encode(image);

    let body = json!({
        "model": config.model,
        "messages": [
            {
                "role": "user",
                "content": prompt,
                "images": [image_b64],
            }
        ],
        "stream": false,
    });

    let url = format!("{}/api/chat", config.endpoint);
    tracing::debug!(%url, model = %config.model, image_bytes = image.len(), "sending chat request");

    let mut req = client.post(&url).json(&body);
    if let Some(timeout) = config.timeout {
        req = req.timeout(timeout);
    }

    let resp = req.send().await.map_err(|e| ServiceError::Request {
        endpoint: config.endpoint.clone(),
        message: e.to_string(),
    })?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        return Err(ServiceError::Response {
            status,
            message: error_message(&text),
        });
    }

    let json: Value = resp
        .json()
        .await
        .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

    let content = json
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| ServiceError::InvalidResponse("missing message.content".to_string()))?;

    tracing::debug!(chars = content.len(), "received response");
    Ok(content.to_string())
}

/// Ollama reports failures as `{"error": "..."}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.trim().to_string(),
    }
}
