use thiserror::Error;

/// Failure of a flow run. Every cause (connectivity, HTTP status, body
/// decoding) collapses into the one variant so callers can treat it uniformly.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Langflow API error: {message}")]
    Downstream {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
        /// Body of a failed response, kept for operator diagnostics only.
        response_text: Option<String>,
    },
}

impl InvokeError {
    /// A setting the run address needs was never provided.
    pub fn unconfigured(setting: &str) -> Self {
        Self::Downstream {
            message: format!("{} is not configured", setting),
            source: None,
            response_text: None,
        }
    }

    pub fn transport(err: reqwest::Error) -> Self {
        Self::Downstream {
            message: err.to_string(),
            source: Some(err),
            response_text: None,
        }
    }

    pub fn status(err: reqwest::Error, response_text: Option<String>) -> Self {
        Self::Downstream {
            message: err.to_string(),
            source: Some(err),
            response_text,
        }
    }

    pub fn malformed(err: reqwest::Error) -> Self {
        Self::Downstream {
            message: format!("invalid response body: {}", err),
            source: Some(err),
            response_text: None,
        }
    }

    pub fn response_text(&self) -> Option<&str> {
        match self {
            Self::Downstream { response_text, .. } => response_text.as_deref(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InvokeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_prefixed() {
        let err = InvokeError::Downstream {
            message: "boom".to_string(),
            source: None,
            response_text: Some("{\"detail\":\"nope\"}".to_string()),
        };
        assert_eq!(err.to_string(), "Langflow API error: boom");
        assert_eq!(err.response_text(), Some("{\"detail\":\"nope\"}"));
    }
}
