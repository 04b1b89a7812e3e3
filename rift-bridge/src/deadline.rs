use std::time::Duration;

use tracing::warn;

use crate::backend::PipelineBackend;
use crate::error::Result;
use crate::handle::BridgeHandle;

/// Outcome of `execute_with_deadline`.
pub enum Deadline<B: PipelineBackend> {
    /// The native call returned in time; the handle comes back to the caller.
    Finished {
        handle: BridgeHandle<B>,
        result: Result<()>,
    },
    /// The deadline passed first. The native call cannot be interrupted, so
    /// it keeps running on the blocking pool and the handle is released
    /// (via `Drop`) whenever it returns.
    Expired,
}

impl<B: PipelineBackend> Deadline<B> {
    pub fn is_expired(&self) -> bool {
        matches!(self, Deadline::Expired)
    }

    pub fn into_parts(self) -> Option<(BridgeHandle<B>, Result<()>)> {
        match self {
            Deadline::Finished { handle, result } => Some((handle, result)),
            Deadline::Expired => None,
        }
    }
}

/// Run `execute_pipeline` on a blocking worker and race it against
/// `deadline`.
pub async fn execute_with_deadline<B>(
    mut handle: BridgeHandle<B>,
    input: String,
    deadline: Duration,
) -> Deadline<B>
where
    B: PipelineBackend + Send + 'static,
    B::Session: Send + 'static,
{
    let task = tokio::task::spawn_blocking(move || {
        let result = handle.execute_pipeline(&input);
        (handle, result)
    });

    match tokio::time::timeout(deadline, task).await {
        Ok(Ok((handle, result))) => Deadline::Finished { handle, result },
        Ok(Err(e)) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Ok(Err(e)) => {
            warn!("RIFT pipeline worker cancelled: {}", e);
            Deadline::Expired
        }
        Err(_) => {
            warn!(
                "RIFT pipeline exceeded {:?}; native call left running",
                deadline
            );
            Deadline::Expired
        }
    }
}
