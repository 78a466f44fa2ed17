use anyhow::{Context, Result};
use jobs::api::rest::SERVICE_NAME;
use tokio::signal;

/// Process signal that asked the listener to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    Interrupt,
    Terminate,
}

impl StopSignal {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

/// Resolve with the first stop signal (Ctrl+C or SIGTERM) delivered.
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn stop_requested() -> Result<StopSignal> {
    let received = tokio::select! {
        result = signal::ctrl_c() => {
            result.context("failed to listen for Ctrl+C")?;
            StopSignal::Interrupt
        }
        result = terminate() => {
            result?;
            StopSignal::Terminate
        }
    };

    tracing::info!(
        service = SERVICE_NAME,
        signal = received.as_str(),
        "Stop signal received; draining in-flight requests"
    );
    Ok(received)
}

#[cfg(unix)]
async fn terminate() -> Result<()> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("failed to install SIGTERM handler")?
        .recv()
        .await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> Result<()> {
    std::future::pending::<Result<()>>().await
}
