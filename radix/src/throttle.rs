//! Process-wide admission gate for outbound calls.

use std::future::Future;

use tokio::sync::Mutex;

/// Serializes admitted tasks: at most one runs at a time, waiters are admitted in arrival
/// order. The gate is released when the task's future completes, whatever its output.
///
/// Owned by [`crate::Resolver`]; every HTTP call the resolver makes goes through `admit`.
#[derive(Debug, Default)]
pub struct RequestThrottle {
    gate: Mutex<()>,
}

impl RequestThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn admit<F, T>(&self, task: F) -> T
    where
        F: Future<Output = T>,
    {
        let _slot = self.gate.lock().await;
        task.await
    }
}
