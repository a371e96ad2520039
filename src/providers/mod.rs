pub mod heygen;
pub mod llm;
pub mod n8n;
pub mod oauth;
pub mod youtube;

/// Errors from the outbound provider clients.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("{provider} returned {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The provider answered 2xx but the payload was not what we expect.
    #[error("malformed {provider} response: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },

    /// The stored OAuth grant for this provider is no longer valid.
    #[error("{provider} authorization expired")]
    AuthExpired { provider: &'static str },

    /// A required credential is not configured.
    #[error("missing credentials: {0}")]
    Credentials(&'static str),
}

/// Coarse phase a renderer reports for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// One status answer from a renderer, normalized across providers.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub phase: JobPhase,
    pub result_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub error: Option<String>,
}

/// Anything that can be polled for the status of a previously
/// submitted rendering job.
pub trait StatusSource: Send + Sync {
    fn fetch_status(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<StatusReport, ProviderError>> + Send;
}
