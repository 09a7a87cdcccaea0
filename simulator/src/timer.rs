use std::time::Duration;
use tokio::{sync::oneshot, time::sleep};
use tracing::trace;

/// Delay between a roll request and its resolution.
///
/// At most one roll is pending at a time. Arming again, cancelling, or dropping
/// the timer cancels the pending roll so a stale timer never resolves. Arming
/// needs no runtime; the delay only runs while [PendingRoll::wait] is polled.
#[derive(Debug, Default)]
pub struct RollTimer {
    cancel: Option<oneshot::Sender<()>>,
}

/// Handle to an armed roll.
#[derive(Debug)]
pub struct PendingRoll {
    delay: Duration,
    cancelled: oneshot::Receiver<()>,
}

impl PendingRoll {
    /// Resolves to true once the delay elapses, false if the roll was cancelled.
    pub async fn wait(mut self) -> bool {
        tokio::select! {
            biased;
            _ = &mut self.cancelled => false,
            _ = sleep(self.delay) => true,
        }
    }
}

impl RollTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new delay, cancelling any roll still pending.
    pub fn arm(&mut self, delay: Duration) -> PendingRoll {
        self.cancel();
        let (tx, rx) = oneshot::channel();
        self.cancel = Some(tx);
        trace!(?delay, "armed roll timer");
        PendingRoll {
            delay,
            cancelled: rx,
        }
    }

    /// Cancel the pending roll, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.cancel.take() {
            Some(tx) if !tx.is_closed() => {
                let _ = tx.send(());
                trace!("cancelled roll timer");
                true
            }
            _ => false,
        }
    }

    /// Whether an armed roll is still held by a caller.
    pub fn is_pending(&self) -> bool {
        self.cancel.as_ref().is_some_and(|tx| !tx.is_closed())
    }
}
