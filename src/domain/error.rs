use thiserror::Error;

/// Errors surfaced by the chat handler and its collaborators.
///
/// Display text is the user-facing message verbatim; the HTTP layer adds the
/// status code via [`DomainError::status_code`].
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Configuration(String),

    /// A failure from the upstream LLM API. Carries the HTTP status returned
    /// by the provider when one was received.
    #[error("{message}")]
    Upstream {
        status: Option<u16>,
        message: String,
        details: Option<String>,
    },

    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn upstream(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
            details: None,
        }
    }

    pub fn upstream_with_details(
        status: Option<u16>,
        msg: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
            details: Some(details.into()),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code for this error: 400 for bad requests, the upstream
    /// status when one is known, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::Configuration(_) | Self::Internal(_) => 500,
            Self::Upstream { status, .. } => status.unwrap_or(500),
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Upstream { details, .. } => details.as_deref(),
            _ => None,
        }
    }

    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}
