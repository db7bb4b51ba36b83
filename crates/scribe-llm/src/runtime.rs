//! Bridge from the synchronous provider trait to async HTTP clients

use std::future::Future;

use crate::LlmError;

/// Drive `future` to completion from synchronous code
///
/// Inside a tokio runtime (e.g. on a `spawn_blocking` thread) the current
/// handle is reused; otherwise a single-threaded runtime is built for the
/// call. Must not be called from an async task itself.
pub(crate) fn block_on<F, T>(future: F) -> Result<T, LlmError>
where
    F: Future<Output = Result<T, LlmError>>,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle.block_on(future),
        Err(_) => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?
            .block_on(future),
    }
}
