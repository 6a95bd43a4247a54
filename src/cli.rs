use crate::analyze;
use crate::error::AnalyzeError;
use crate::types::{AnalyzeConfig, AnalyzeRequest, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_PROMPT};
use clap::{CommandFactory, Parser};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Analyze an image using the llava-phi3 model.
#[derive(Parser, Debug, Clone)]
#[command(name = "llava-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to the image file
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Prompt for the model
    #[arg(long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Enable verbose (debug) logging
    #[arg(long)]
    pub verbose: bool,

    /// Ollama endpoint
    #[arg(long, env = "OLLAMA_HOST", default_value = DEFAULT_ENDPOINT)]
    pub host: String,

    /// Vision model to query
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Skip image verification and let the service reject bad input
    #[arg(long)]
    pub no_verify: bool,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    pub fn config(&self) -> AnalyzeConfig {
        let mut config = AnalyzeConfig::with_model(&self.model)
            .endpoint(&self.host)
            .verify(!self.no_verify);
        if let Some(secs) = self.timeout {
            config = config.timeout(Duration::from_secs(secs));
        }
        config
    }

    /// `None` when no image was given.
    pub fn request(&self) -> Option<AnalyzeRequest> {
        self.image.as_ref().map(|image| {
            AnalyzeRequest::new(image)
                .prompt(&self.prompt)
                .verbose(self.verbose)
        })
    }
}

/// Outcome of one invocation, before it is written anywhere.
#[derive(Debug)]
pub enum Outcome {
    /// No image was given; show usage.
    Help,
    Reply(String),
    Failed {
        error: AnalyzeError,
        /// Verbosity of the request that failed
        verbose: bool,
    },
}

/// Run the analysis described by `cli`.
pub async fn execute(cli: &Cli) -> Outcome {
    let Some(request) = cli.request() else {
        return Outcome::Help;
    };
    let config = cli.config();
    tracing::debug!(
        endpoint = %config.endpoint,
        model = %config.model,
        image = %request.image_path.display(),
        "analyzing image"
    );

    let client = reqwest::Client::new();
    match analyze::analyze_image(&client, &config, &request).await {
        Ok(text) => Outcome::Reply(text),
        Err(error) => {
            tracing::debug!(error = ?error, "analysis failed");
            Outcome::Failed {
                error,
                verbose: request.verbose,
            }
        }
    }
}

/// Write an outcome to the given streams and return the exit status.
///
/// A failed write to `out` is itself a failure: one line goes to `err` and
/// the status is 1.
pub fn report(outcome: Outcome, out: &mut impl Write, err: &mut impl Write) -> u8 {
    let written = match &outcome {
        Outcome::Help => write!(out, "{}", Cli::command().render_help()).and_then(|_| out.flush()),
        Outcome::Reply(text) => writeln!(out, "{}", text).and_then(|_| out.flush()),
        Outcome::Failed { error, verbose } => {
            if let Err(e) = writeln!(err, "{}", error.user_message(*verbose)) {
                tracing::debug!(error = %e, "failed to write error message");
            }
            return error.exit_code();
        }
    };

    match written {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(error = %e, "failed to write output");
            if let Err(e) = writeln!(err, "Error: failed to write output: {}", e) {
                tracing::debug!(error = %e, "failed to write error message");
            }
            1
        }
    }
}
