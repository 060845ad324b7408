use crate::api::CompositorError;

/// Default request timeout for the compositing call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Compositing endpoint settings.
#[derive(Debug, Clone)]
pub struct CompositorConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl CompositorConfig {
    /// Load from environment variables.
    ///
    /// | Env Var           | Default  |
    /// |-------------------|----------|
    /// | `AI_ENDPOINT`     | required |
    /// | `AI_API_KEY`      | required |
    /// | `AI_TIMEOUT_SECS` | `90`     |
    pub fn from_env() -> Result<Self, CompositorError> {
        let endpoint = std::env::var("AI_ENDPOINT")
            .map_err(|_| CompositorError::Config("AI_ENDPOINT must be set".into()))?;
        let api_key = std::env::var("AI_API_KEY")
            .map_err(|_| CompositorError::Config("AI_API_KEY must be set".into()))?;
        let timeout_secs = match std::env::var("AI_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                CompositorError::Config(format!("AI_TIMEOUT_SECS must be a number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            endpoint,
            api_key,
            timeout_secs,
        })
    }
}
