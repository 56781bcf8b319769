//! Clock and timer seam.
//!
//! The widget reads timestamps and waits on ticks only through [`Scheduler`], so
//! tests can drive the thinking indicator and retry delays without real time.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use chat_api::Sleep;
use time::{OffsetDateTime, UtcOffset};

pub trait Scheduler: Sleep {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock at a fixed offset, tokio timers.
///
/// The local offset can only be read reliably while the process is still single
/// threaded, so [`TokioScheduler::local`] must run before the runtime starts.
#[derive(Debug, Clone, Copy)]
pub struct TokioScheduler {
    offset: UtcOffset,
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::with_offset(UtcOffset::UTC)
    }
}

impl TokioScheduler {
    pub fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Captures the local offset, falling back to UTC when it is unknown.
    pub fn local() -> Self {
        match UtcOffset::current_local_offset() {
            Ok(offset) => Self::with_offset(offset),
            Err(err) => {
                tracing::debug!(error = %err, "local UTC offset unavailable; using UTC");
                Self::default()
            }
        }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl Sleep for TokioScheduler {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

#[derive(Debug)]
struct ManualState {
    now: OffsetDateTime,
    sleeps: Vec<Duration>,
}

/// Virtual clock. Every sleep completes on first poll and advances the clock by
/// the requested duration.
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new(start: OffsetDateTime) -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualState {
                now: start,
                sleeps: Vec::new(),
            })),
        }
    }

    pub fn set_now(&self, now: OffsetDateTime) {
        self.state.borrow_mut().now = now;
    }

    pub fn advance(&self, duration: Duration) {
        let mut state = self.state.borrow_mut();
        state.now += duration;
    }

    /// Every duration slept so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.borrow().sleeps.clone()
    }
}

impl Sleep for ManualScheduler {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        ManualSleep {
            state: Rc::clone(&self.state),
            duration,
            done: false,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> OffsetDateTime {
        self.state.borrow().now
    }
}

struct ManualSleep {
    state: Rc<RefCell<ManualState>>,
    duration: Duration,
    done: bool,
}

impl Future for ManualSleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if !self.done {
            self.done = true;
            let duration = self.duration;
            let mut state = self.state.borrow_mut();
            state.now += duration;
            state.sleeps.push(duration);
        }
        Poll::Ready(())
    }
}
