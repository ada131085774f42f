//! Cooperative cancellation shared by every step of a command invocation.
//!
//! The process owns the single [`CancelSource`]; verbs, clients and the job
//! tracker only ever receive clones of its [`CancelSignal`].

use tokio::sync::watch;

/// Sending half; firing it is observed by every cloned [`CancelSignal`].
#[derive(Debug)]
pub struct CancelSource {
    tx: watch::Sender<bool>,
}

/// Receiving half handed down to the operations that may suspend.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSource {
    pub fn new() -> (Self, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancelSignal { rx })
    }

    pub fn cancel(&self) {
        // send_replace never fails, even with no live receivers.
        self.tx.send_replace(true);
    }
}

impl CancelSignal {
    /// Resolves once cancellation is requested (immediately if it already was).
    ///
    /// If the source is dropped without firing, this never resolves.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|fired| *fired).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
