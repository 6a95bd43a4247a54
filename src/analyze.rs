use crate::client;
use crate::error::AnalyzeError;
use crate::types::{AnalyzeConfig, AnalyzeRequest};
use crate::validate;
use reqwest::Client;

/// Validate the image, send it with the prompt, and return the model's reply.
///
/// When `config.verify` is false only the existence and size checks run and
/// a corrupt file is left for the service to reject.
///
/// # Errors
///
/// Returns an [`AnalyzeError`] classified for display; see
/// [`AnalyzeError::user_message`].
pub async fn analyze_image(
    client: &Client,
    config: &AnalyzeConfig,
    request: &AnalyzeRequest,
) -> Result<String, AnalyzeError> {
    let path = request.image_path.as_path();

    let validated = if config.verify {
        validate::validate_image(path)?
    } else {
        validate::check_file(path)?
    };
    tracing::debug!(
        path = %validated.path.display(),
        size = validated.size,
        verified = config.verify,
        "image accepted"
    );

    let bytes = std::fs::read(path).map_err(|source| AnalyzeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    analyze_bytes(client, config, &request.prompt, &bytes).await
}

/// Send in-memory image bytes with a prompt (no file I/O, no validation).
pub async fn analyze_bytes(
    client: &Client,
    config: &AnalyzeConfig,
    prompt: &str,
    image: &[u8],
) -> Result<String, AnalyzeError> {
    client::chat_with_image(client, config, prompt, image)
        .await
        .map_err(|e| AnalyzeError::from_service(e, &config.model))
}
