use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::config::FlowConfig;
use crate::error::{InvokeError, Result};
use crate::tweaks::{self, Tweaks};

/// Body of a flow run request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowPayload {
    pub input_value: String,
    pub output_type: String,
    pub input_type: String,
    pub tweaks: Tweaks,
}

/// Runs flows on the external workflow API.
///
/// Holds only read-only state; every call builds its payload from scratch.
pub struct FlowInvoker {
    client: Client,
    base_api_url: Option<String>,
    langflow_id: Option<String>,
    default_flow: Option<String>,
    defaults: Tweaks,
}

impl FlowInvoker {
    pub fn new(config: &FlowConfig) -> Self {
        Self {
            // No timeout: a run takes as long as the flow takes.
            client: Client::new(),
            base_api_url: config
                .base_api_url
                .as_deref()
                .map(|url| url.trim_end_matches('/').to_string()),
            langflow_id: config.langflow_id.clone(),
            default_flow: config.flow_id.clone(),
            defaults: tweaks::default_tweaks(config),
        }
    }

    pub fn defaults(&self) -> &Tweaks {
        &self.defaults
    }

    /// Address of the run endpoint for `endpoint`, or the configured default flow.
    pub fn run_url(&self, endpoint: Option<&str>) -> Result<String> {
        let base_api_url = self
            .base_api_url
            .as_deref()
            .ok_or_else(|| InvokeError::unconfigured("BASE_API_URL"))?;
        let langflow_id = self
            .langflow_id
            .as_deref()
            .ok_or_else(|| InvokeError::unconfigured("LANGFLOW_ID"))?;
        let endpoint = endpoint
            .or(self.default_flow.as_deref())
            .ok_or_else(|| InvokeError::unconfigured("flow id"))?;

        Ok(format!(
            "{}/lf/{}/api/v1/run/{}",
            base_api_url, langflow_id, endpoint
        ))
    }

    pub fn build_payload(
        &self,
        message: &str,
        output_type: &str,
        input_type: &str,
        overrides: Option<&Tweaks>,
    ) -> FlowPayload {
        FlowPayload {
            input_value: message.to_string(),
            output_type: output_type.to_string(),
            input_type: input_type.to_string(),
            tweaks: tweaks::merge(&self.defaults, overrides),
        }
    }

    /// Sends one run request and returns the parsed response body as-is.
    ///
    /// `endpoint` falls back to the configured default flow when `None`.
    pub async fn invoke(
        &self,
        message: &str,
        endpoint: Option<&str>,
        output_type: &str,
        input_type: &str,
        overrides: Option<&Tweaks>,
        application_token: Option<&str>,
    ) -> Result<Value> {
        // 1. Assemble the request
        let url = self.run_url(endpoint).inspect_err(|e| error!("{}", e))?;
        let payload = self.build_payload(message, output_type, input_type, overrides);

        // Headers go first so `json` does not add a second content type.
        let mut request = self.client.post(&url);
        if let Some(token) = application_token {
            request = request
                .bearer_auth(token)
                .header(CONTENT_TYPE, "application/json");
        }
        let request = request.json(&payload);

        info!("Running flow at {}", url);

        // 2. Send it
        let response = request.send().await.map_err(|e| {
            error!("Error making request: {}", e);
            InvokeError::transport(e)
        })?;

        // 3. Reject non-success statuses, surfacing the body to the operator
        let status_error = response.error_for_status_ref().err();
        if let Some(e) = status_error {
            error!("Error making request: {}", e);
            let text = response.text().await.ok();
            if let Some(text) = &text {
                error!("Response text: {}", text);
            }
            return Err(InvokeError::status(e, text));
        }

        // 4. Hand back the body untouched
        let body = response.json::<Value>().await.map_err(|e| {
            error!("Flow returned an unreadable body: {}", e);
            InvokeError::malformed(e)
        })?;

        info!("Flow run completed");
        Ok(body)
    }
}
