use thiserror::Error;

/// Errors returned by `connect`/`bind` setup paths.
///
/// Transport faults on an established session never surface here; they
/// are delivered to the event sink and terminate the session loop.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("socket setup failed: {0}")]
    Socket(#[from] std::io::Error),
    #[error("no free port in range {0}..{1}")]
    NoFreePort(u16, u16),
    #[error("invalid configuration: {0}")]
    Config(String),
}
