use crate::types::MAX_IMAGE_BYTES;
use image::{ImageFormat, ImageReader};
use std::path::{Path, PathBuf};

/// An image that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedImage {
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Container format, when verification ran
    pub format: Option<ImageFormat>,
    /// `(width, height)`, when verification ran
    pub dimensions: Option<(u32, u32)>,
    /// Larger than [`MAX_IMAGE_BYTES`]; sent anyway
    pub oversized: bool,
}

/// Reasons an image is rejected before anything is sent.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Image file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid image file {}: {reason}", .path.display())]
    InvalidImage { path: PathBuf, reason: String },
}

/// Check that `path` is an existing, structurally sound image.
///
/// The format is sniffed from content (falling back to the extension) and
/// only the container header is decoded through [`ImageReader::into_dimensions`];
/// pixel data is never materialized. Damage past the header, such as a PNG
/// truncated inside its image data or with bad chunk checksums there, is not
/// detected and is left for the service to reject.
/// Files over [`MAX_IMAGE_BYTES`] pass with a warning.
///
/// # Errors
///
/// - [`ValidationError::NotFound`] if `path` is not an existing file
/// - [`ValidationError::InvalidImage`] if the decoder rejects the file
pub fn validate_image(path: &Path) -> Result<ValidatedImage, ValidationError> {
    let mut validated = check_file(path)?;

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| invalid(path, e))?;
    let format = reader.format();
    let (width, height) = reader.into_dimensions().map_err(|e| invalid(path, e))?;

    if width == 0 || height == 0 {
        return Err(ValidationError::InvalidImage {
            path: path.to_path_buf(),
            reason: format!("image has zero size ({}x{})", width, height),
        });
    }

    tracing::debug!(
        path = %path.display(),
        format = ?format,
        width,
        height,
        "image verified"
    );

    validated.format = format;
    validated.dimensions = Some((width, height));
    Ok(validated)
}

/// Existence and size checks only, without touching the image decoder.
pub fn check_file(path: &Path) -> Result<ValidatedImage, ValidationError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) if m.is_file() => m,
        _ => return Err(ValidationError::NotFound(path.to_path_buf())),
    };

    let size = metadata.len();
    let oversized = size > MAX_IMAGE_BYTES;
    if oversized {
        tracing::warn!(
            path = %path.display(),
            size,
            limit = MAX_IMAGE_BYTES,
            "image is larger than 10 MiB; the request may be slow or rejected"
        );
    }

    Ok(ValidatedImage {
        path: path.to_path_buf(),
        size,
        format: None,
        dimensions: None,
        oversized,
    })
}

fn invalid(path: &Path, err: impl std::fmt::Display) -> ValidationError {
    ValidationError::InvalidImage {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
