use thiserror::Error;

/// Everything that can go wrong between page load and delivery.
///
/// None of these ever reach the host page: every fallible step of the
/// pipeline catches them and turns them into a diagnostic.
#[derive(Error, Debug)]
pub enum BeaconError {
    #[error("No tracking code provided")]
    MissingTrackingCode,

    #[error("Element #{0} not found in the embedding page")]
    ElementNotFound(String),

    #[error("DOM lookup failed: {0}")]
    Dom(String),

    #[error("Timing data unavailable: {0}")]
    TimingUnavailable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status: {0}")]
    HttpStatus(u16),
}

pub type BeaconResult<T> = Result<T, BeaconError>;
