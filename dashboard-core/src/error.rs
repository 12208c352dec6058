use thiserror::Error;

/// Failure of a single provider call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not complete.
    #[error("request to {provider} failed: {source}")]
    Network {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but was not the expected shape.
    #[error("unexpected response from {provider}: {detail}")]
    ResponseShape {
        provider: &'static str,
        detail: String,
    },

    /// The fetch task ended without producing a result (it panicked or was
    /// cancelled).
    #[error("fetch from {provider} did not finish: {detail}")]
    Aborted {
        provider: &'static str,
        detail: String,
    },
}

/// Coarse failure taxonomy, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    ResponseShape,
}

impl FetchError {
    pub fn network(provider: &'static str, source: reqwest::Error) -> Self {
        FetchError::Network { provider, source }
    }

    pub fn shape<S: Into<String>>(provider: &'static str, detail: S) -> Self {
        FetchError::ResponseShape {
            provider,
            detail: detail.into(),
        }
    }

    pub fn aborted<S: Into<String>>(provider: &'static str, detail: S) -> Self {
        FetchError::Aborted {
            provider,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Network { .. } | FetchError::Aborted { .. } => FailureKind::Network,
            FetchError::ResponseShape { .. } => FailureKind::ResponseShape,
        }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            FetchError::Network { provider, .. }
            | FetchError::ResponseShape { provider, .. }
            | FetchError::Aborted { provider, .. } => *provider,
        }
    }
}

/// Cap a response body for inclusion in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
