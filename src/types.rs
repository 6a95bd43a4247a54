use std::path::PathBuf;
use std::time::Duration;

/// Prompt sent when none is given on the command line.
pub const DEFAULT_PROMPT: &str = "Describe this image:";

/// Vision model used for every request unless overridden.
pub const DEFAULT_MODEL: &str = "llava-phi3";

/// Local Ollama endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Files above this size (10 MiB) are still sent, but a warning is logged.
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Configuration for talking to the inference service.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Ollama API endpoint (e.g., "http://localhost:11434")
    pub endpoint: String,
    /// Vision model name (default: "llava-phi3")
    pub model: String,
    /// Request timeout (default: none, waits for the service)
    pub timeout: Option<Duration>,
    /// Verify the image structure before sending (default: true)
    pub verify: bool,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
            verify: true,
        }
    }
}

impl AnalyzeConfig {
    /// Create a new config with the given model name.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set the Ollama endpoint, resolved like `OLLAMA_HOST` (`gpu-box` becomes
    /// `http://gpu-box:11434`).
    pub fn endpoint(mut self, endpoint: impl AsRef<str>) -> Self {
        self.endpoint = normalize_endpoint(endpoint.as_ref());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable structural image verification.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

/// One invocation's worth of input, built from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub prompt: String,
    pub image_path: PathBuf,
    pub verbose: bool,
}

impl AnalyzeRequest {
    /// Request with the default prompt.
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            image_path: image_path.into(),
            verbose: false,
        }
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Port Ollama listens on when a host is given without one.
const DEFAULT_PORT: u16 = 11434;

/// Resolve a host value the way Ollama clients read `OLLAMA_HOST`.
///
/// Without a scheme the port defaults to 11434; with an explicit `http://`
/// or `https://` it defaults to 80 or 443. An empty host means `localhost`.
fn normalize_endpoint(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_ENDPOINT.to_string();
    }

    let (scheme, rest, default_port) = match trimmed.split_once("://") {
        Some(("https", rest)) => ("https", rest, 443),
        Some((scheme, rest)) => (scheme, rest, 80),
        None => ("http", trimmed, DEFAULT_PORT),
    };

    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    let (host, port) = split_host_port(authority);
    let host = if host.is_empty() { "localhost" } else { host };

    format!("{}://{}:{}{}", scheme, host, port.unwrap_or(default_port), path)
}

/// Split `host:port`, leaving bracketed IPv6 hosts intact.
fn split_host_port(authority: &str) -> (&str, Option<u16>) {
    match authority.rsplit_once(':') {
        Some((host, "")) => (host, None),
        Some((host, port)) => match port.parse::<u16>() {
            Ok(port) => (host, Some(port)),
            Err(_) => (authority, None),
        },
        None => (authority, None),
    }
}
