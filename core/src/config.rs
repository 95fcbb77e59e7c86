use anyhow::{Context, Result};
use tracing::{info, warn};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Process-wide settings, read once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub application_token: String,
    pub base_api_url: Option<String>,
    pub langflow_id: Option<String>,
    /// Flow run when the caller does not name one.
    pub flow_id: Option<String>,
    pub tavily_api_key: Option<String>,
    pub bind_addr: String,
}

impl FlowConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        // The token gates every outbound call, so without it we refuse to start.
        let application_token = get("APPLICATION_TOKEN")
            .context("APPLICATION_TOKEN environment variable must be set")?;
        // The rest may be absent; runs then fail per request instead.
        let base_api_url = get("BASE_API_URL");
        let langflow_id = get("LANGFLOW_ID");
        let flow_id = get("LANGFLOW_ENDPOINT").or_else(|| get("FLOW_ID"));
        let tavily_api_key = get("TAVILY_API_KEY");
        let bind_addr = get("GATEWAY_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        for (key, value) in [
            ("BASE_API_URL", &base_api_url),
            ("LANGFLOW_ID", &langflow_id),
            ("LANGFLOW_ENDPOINT / FLOW_ID", &flow_id),
        ] {
            if value.is_none() {
                warn!("{} is not set; flow runs will fail until it is", key);
            }
        }
        info!("Flow config loaded. Namespace: {:?}, flow: {:?}", langflow_id, flow_id);
        Ok(Self {
            application_token,
            base_api_url,
            langflow_id,
            flow_id,
            tavily_api_key,
            bind_addr,
        })
    }
}
