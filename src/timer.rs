use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::runtime::GameEvent;

/// Handle to a repeating tick source. Cancelling is idempotent.
pub trait TickHandle: Send {
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

/// Starts repeating tick sources tagged with a session generation
pub trait TickScheduler: Send {
    fn schedule(&self, generation: u64, period: Duration) -> Box<dyn TickHandle>;
}

/// Background thread that posts `GameEvent::Tick` into the event channel
pub struct ThreadScheduler {
    tx: Sender<GameEvent>,
}

impl ThreadScheduler {
    pub fn new(tx: Sender<GameEvent>) -> Self {
        Self { tx }
    }
}

impl TickScheduler for ThreadScheduler {
    fn schedule(&self, generation: u64, period: Duration) -> Box<dyn TickHandle> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let tx = self.tx.clone();

        thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::Acquire) {
                break;
            }
            if tx.send(GameEvent::Tick { generation }).is_err() {
                break;
            }
        });

        Box::new(ThreadTick { cancelled })
    }
}

struct ThreadTick {
    cancelled: Arc<AtomicBool>,
}

impl TickHandle for ThreadTick {
    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
    }

    fn is_active(&self) -> bool {
        !self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for ThreadTick {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Scheduler for tests: never fires, but tracks how many handles are live
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    active: Arc<AtomicUsize>,
    scheduled: Arc<AtomicUsize>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles scheduled and not yet cancelled
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Total handles ever scheduled
    pub fn scheduled(&self) -> usize {
        self.scheduled.load(Ordering::SeqCst)
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&self, _generation: u64, _period: Duration) -> Box<dyn TickHandle> {
        self.scheduled.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_add(1, Ordering::SeqCst);
        Box::new(ManualTick {
            active: Arc::clone(&self.active),
            live: true,
        })
    }
}

struct ManualTick {
    active: Arc<AtomicUsize>,
    live: bool,
}

impl TickHandle for ManualTick {
    fn cancel(&mut self) {
        if self.live {
            self.live = false;
            self.active.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn is_active(&self) -> bool {
        self.live
    }
}

impl Drop for ManualTick {
    fn drop(&mut self) {
        self.cancel();
    }
}
