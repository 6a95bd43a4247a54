//! # llava-cli
//!
//! Send an image and a prompt to a local Ollama vision model and print the reply.
//!
//! The binary is a thin shell over this library:
//!
//! 1. [`validate::validate_image`] checks the file exists and that its
//!    container decodes (header only). Files over 10 MiB pass with a warning.
//! 2. [`client::chat_with_image`] posts one `user` message with the image
//!    attached to `/api/chat`.
//! 3. [`AnalyzeError`] classifies any failure into one line for standard
//!    error and an exit status.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llava_cli::{AnalyzeConfig, AnalyzeRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalyzeConfig::default();
//!     let client = reqwest::Client::new();
//!
//!     let reply = llava_cli::analyze_image(
//!         &client,
//!         &config,
//!         &AnalyzeRequest::new("photo.jpg").prompt("What breed is this cat?"),
//!     )
//!     .await?;
//!     println!("{}", reply);
//!
//!     Ok(())
//! }
//! ```

pub mod analyze;
pub mod cli;
pub mod client;
pub mod error;
pub mod logging;
pub mod types;
pub mod validate;

// Re-export main types at crate root
pub use analyze::{analyze_bytes, analyze_image};
pub use client::{chat_with_image, ServiceError};
pub use error::AnalyzeError;
pub use types::{
    AnalyzeConfig, AnalyzeRequest, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_PROMPT,
    MAX_IMAGE_BYTES,
};
pub use validate::{validate_image, ValidatedImage, ValidationError};
