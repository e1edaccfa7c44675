//! Cooperative cancellation for benchmark runs

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

/// A cloneable cancellation signal. Once cancelled it stays cancelled.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    /// Create a token that has not fired
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Fire the token. Every clone observes it.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Whether the token has fired
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once the token fires
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }

    /// Fire the token after `deadline`, from a background task
    pub fn cancel_after(&self, deadline: Duration) {
        let token = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            info!("Deadline of {:?} reached, cancelling run", deadline);
            token.cancel();
        });
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_is_shared_across_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());
        clone.cancelled().await;
    }

    #[tokio::test]
    async fn test_cancelled_wakes_waiter() {
        let token = CancelToken::new();
        let waiter = {
            let token = token.clone();
            tokio::spawn(async move { token.cancelled().await })
        };

        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancel_after_deadline() {
        let token = CancelToken::new();
        token.cancel_after(Duration::from_millis(20));
        assert!(!token.is_cancelled());

        tokio::time::timeout(Duration::from_secs(2), token.cancelled())
            .await
            .unwrap();
        assert!(token.is_cancelled());
    }
}
