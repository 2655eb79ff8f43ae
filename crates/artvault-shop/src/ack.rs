//! Simulated acknowledgments.
//!
//! Checkout and contact submission pretend to wait on a server, and the
//! newsletter confirmation stays visible for a while before it clears.
//! Each kind gets a tokio task that sleeps for its delay and then reports
//! on a channel; the storefront applies the terminal UI update when the
//! report is received. Only the UI update is deferred, never a cart
//! mutation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

/// What an acknowledgment confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AckKind {
    Checkout,
    ContactForm,
    Newsletter,
}

impl AckKind {
    pub const ALL: [AckKind; 3] = [AckKind::Checkout, AckKind::ContactForm, AckKind::Newsletter];

    pub fn as_str(&self) -> &'static str {
        match self {
            AckKind::Checkout => "checkout",
            AckKind::ContactForm => "contact-form",
            AckKind::Newsletter => "newsletter",
        }
    }
}

/// Cancel hook for one scheduled acknowledgment.
#[derive(Debug, Clone)]
pub struct AckHandle {
    kind: AckKind,
    generation: u64,
    abort: AbortHandle,
    cancelled: Arc<AtomicBool>,
}

impl AckHandle {
    pub fn kind(&self) -> AckKind {
        self.kind
    }

    /// Abort the delay. The completion will never be delivered.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Result of asking for an acknowledgment.
#[derive(Debug, Clone)]
pub enum Scheduled {
    /// A task is sleeping; the completion arrives through [`PendingAcks::next`].
    Deferred(AckHandle),
    /// No runtime to defer on; the caller should complete right away.
    Immediate,
    /// The same kind is already in flight.
    AlreadyPending,
}

/// In-flight acknowledgments, at most one per kind.
///
/// Every scheduling gets a fresh generation and its task reports
/// `(kind, generation)`. A report that was already queued when its
/// scheduling was cancelled or finished never matches a later one.
#[derive(Debug)]
pub struct PendingAcks {
    delay: Duration,
    delays: HashMap<AckKind, Duration>,
    generation: u64,
    tx: UnboundedSender<(AckKind, u64)>,
    rx: UnboundedReceiver<(AckKind, u64)>,
    pending: HashMap<AckKind, AckHandle>,
}

impl PendingAcks {
    /// Acknowledgments that all wait `delay`.
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            delays: HashMap::new(),
            generation: 0,
            tx,
            rx,
            pending: HashMap::new(),
        }
    }

    /// Use a different delay for one kind.
    pub fn with_delay(mut self, kind: AckKind, delay: Duration) -> Self {
        self.delays.insert(kind, delay);
        self
    }

    pub fn delay(&self, kind: AckKind) -> Duration {
        self.delays.get(&kind).copied().unwrap_or(self.delay)
    }

    /// Start the delay for `kind`.
    pub fn schedule(&mut self, kind: AckKind) -> Scheduled {
        if self.is_pending(kind) {
            return Scheduled::AlreadyPending;
        }
        let Ok(runtime) = Handle::try_current() else {
            return Scheduled::Immediate;
        };

        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        let delay = self.delay(kind);
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the storefront was dropped.
            let _ = tx.send((kind, generation));
        });

        let handle = AckHandle {
            kind,
            generation,
            abort: task.abort_handle(),
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        self.pending.insert(kind, handle.clone());
        Scheduled::Deferred(handle)
    }

    /// Cancel whatever is in flight for `kind` and start over.
    pub fn restart(&mut self, kind: AckKind) -> Scheduled {
        self.cancel(kind);
        self.schedule(kind)
    }

    pub fn is_pending(&self, kind: AckKind) -> bool {
        self.pending.get(&kind).is_some_and(|h| !h.is_cancelled())
    }

    /// Wait for the next completed acknowledgment.
    ///
    /// Reports from cancelled, finished or superseded schedulings are
    /// skipped. Pends forever when nothing is in flight.
    pub async fn next(&mut self) -> Option<AckKind> {
        loop {
            let (kind, generation) = self.rx.recv().await?;
            let current = self
                .pending
                .get(&kind)
                .is_some_and(|h| h.generation == generation && !h.is_cancelled());
            if current {
                return Some(kind);
            }
        }
    }

    /// Mark `kind` as delivered. Returns whether it was in flight.
    pub fn finish(&mut self, kind: AckKind) -> bool {
        match self.pending.remove(&kind) {
            Some(handle) => !handle.is_cancelled(),
            None => false,
        }
    }

    /// Cancel one kind. Returns whether anything was in flight.
    pub fn cancel(&mut self, kind: AckKind) -> bool {
        match self.pending.remove(&kind) {
            Some(handle) => {
                let was_live = !handle.is_cancelled();
                handle.cancel();
                was_live
            }
            None => false,
        }
    }

    /// Cancel everything in flight, returning the kinds that were live.
    pub fn cancel_all(&mut self) -> Vec<AckKind> {
        let mut cancelled: Vec<AckKind> = self
            .pending
            .drain()
            .filter_map(|(kind, handle)| {
                let was_live = !handle.is_cancelled();
                handle.cancel();
                was_live.then_some(kind)
            })
            .collect();
        cancelled.sort_by_key(|k| k.as_str());
        cancelled
    }
}

impl Drop for PendingAcks {
    fn drop(&mut self) {
        for handle in self.pending.values() {
            handle.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ack_arrives_after_delay() {
        let mut acks = PendingAcks::new(Duration::from_millis(1500));
        assert!(matches!(acks.schedule(AckKind::Checkout), Scheduled::Deferred(_)));
        assert!(acks.is_pending(AckKind::Checkout));

        let start = tokio::time::Instant::now();
        let kind = acks.next().await;
        assert_eq!(kind, Some(AckKind::Checkout));
        assert!(start.elapsed() >= Duration::from_millis(1500));

        assert!(acks.finish(AckKind::Checkout));
        assert!(!acks.is_pending(AckKind::Checkout));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_schedule_is_rejected() {
        let mut acks = PendingAcks::new(Duration::from_millis(100));
        acks.schedule(AckKind::ContactForm);
        assert!(matches!(acks.schedule(AckKind::ContactForm), Scheduled::AlreadyPending));
        assert!(matches!(acks.schedule(AckKind::Checkout), Scheduled::Deferred(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_ack_is_never_delivered() {
        let mut acks = PendingAcks::new(Duration::from_millis(100));
        let Scheduled::Deferred(handle) = acks.schedule(AckKind::Checkout) else {
            panic!("expected deferred ack");
        };
        acks.schedule(AckKind::ContactForm);
        handle.cancel();
        assert!(!acks.is_pending(AckKind::Checkout));

        assert_eq!(acks.next().await, Some(AckKind::ContactForm));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let mut acks = PendingAcks::new(Duration::from_millis(100));
        acks.schedule(AckKind::Checkout);
        acks.schedule(AckKind::ContactForm);

        let cancelled = acks.cancel_all();
        assert_eq!(cancelled, vec![AckKind::Checkout, AckKind::ContactForm]);
        assert!(!acks.is_pending(AckKind::Checkout));
        assert!(!acks.cancel(AckKind::Checkout));

        let waited = tokio::time::timeout(Duration::from_secs(5), acks.next()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_report_from_cancelled_scheduling_is_dropped() {
        let mut acks = PendingAcks::new(Duration::from_millis(1500));
        acks.schedule(AckKind::Checkout);

        // The task fires and queues its report, but nobody reads it.
        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert!(acks.cancel(AckKind::Checkout));
        assert!(matches!(acks.schedule(AckKind::Checkout), Scheduled::Deferred(_)));

        let start = tokio::time::Instant::now();
        assert_eq!(acks.next().await, Some(AckKind::Checkout));
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_supersedes_running_delay() {
        let mut acks = PendingAcks::new(Duration::from_millis(1000));
        acks.schedule(AckKind::Newsletter);
        tokio::time::sleep(Duration::from_millis(600)).await;

        let start = tokio::time::Instant::now();
        assert!(matches!(acks.restart(AckKind::Newsletter), Scheduled::Deferred(_)));
        assert_eq!(acks.next().await, Some(AckKind::Newsletter));
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_kind_delay() {
        let mut acks = PendingAcks::new(Duration::from_millis(1500))
            .with_delay(AckKind::Newsletter, Duration::from_millis(4000));
        assert_eq!(acks.delay(AckKind::Checkout), Duration::from_millis(1500));
        assert_eq!(acks.delay(AckKind::Newsletter), Duration::from_millis(4000));

        acks.schedule(AckKind::Newsletter);
        acks.schedule(AckKind::Checkout);
        assert_eq!(acks.next().await, Some(AckKind::Checkout));
        acks.finish(AckKind::Checkout);

        let start = tokio::time::Instant::now();
        assert_eq!(acks.next().await, Some(AckKind::Newsletter));
        assert!(start.elapsed() >= Duration::from_millis(2500));
    }

    #[test]
    fn test_immediate_outside_runtime() {
        let mut acks = PendingAcks::new(Duration::from_millis(100));
        assert!(matches!(acks.schedule(AckKind::Checkout), Scheduled::Immediate));
        assert!(!acks.is_pending(AckKind::Checkout));
    }
}
