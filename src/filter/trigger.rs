//! Trigger decisions and the state they drive.

use crate::camera::{Frame, ImageBatch};
use crate::clock::Clock;
use crate::config::FilterConfig;
use crate::constants::CLASSIFICATION_TOP_N;
use crate::error::Result;
use crate::filter::{BufferedEntry, DispatchQueue, ThresholdMap, WindowBuffer};
use crate::inference::InferenceProvider;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, trace};

/// Decides whether frames are forwarded and manages the trailing window.
///
/// A positive trigger pushes the capture-through deadline to `now + window`
/// and releases everything still in the window buffer into the dispatch
/// queue. Frames that arrive before the deadline are forwarded without
/// moving it again. Anything else is suppressed and may be deposited into
/// the window buffer by the caller.
///
/// Inference runs outside the state lock; only the bookkeeping that follows
/// is serialized.
pub struct TriggerController {
    classifications: ThresholdMap,
    objects: ThresholdMap,
    window: TimeDelta,
    vision: Arc<dyn InferenceProvider>,
    clock: Arc<dyn Clock>,
    state: Mutex<TriggerState>,
}

struct TriggerState {
    capture_until: DateTime<Utc>,
    buffer: WindowBuffer,
    queue: DispatchQueue,
}

impl TriggerController {
    /// Create a controller for the thresholds and window in `config`.
    pub fn new(
        config: &FilterConfig,
        vision: Arc<dyn InferenceProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let window = config.window();
        Self {
            classifications: config.classifications.clone(),
            objects: config.objects.clone(),
            window,
            vision,
            clock,
            state: Mutex::new(TriggerState {
                capture_until: DateTime::<Utc>::MIN_UTC,
                buffer: WindowBuffer::new(window),
                queue: DispatchQueue::new(),
            }),
        }
    }

    /// Decide whether `frame` should be forwarded.
    ///
    /// Provider errors are returned as-is and leave all state untouched.
    pub async fn evaluate(&self, frame: &Frame) -> Result<bool> {
        if !self.classifications.is_empty() {
            let results = self
                .vision
                .classifications(frame, CLASSIFICATION_TOP_N)
                .await?;

            if self.classifications.keep(&results) {
                info!(
                    "Keeping frame '{}' with classifications [{}]",
                    frame.name(),
                    join(&results)
                );
                self.promote();
                return Ok(true);
            }
        }

        if !self.objects.is_empty() {
            let results = self.vision.detections(frame).await?;

            if self.objects.keep(&results) {
                info!(
                    "Keeping frame '{}' with objects [{}]",
                    frame.name(),
                    join(&results)
                );
                self.promote();
                return Ok(true);
            }
        }

        // Forward inside an earlier trigger's window, but don't extend it.
        let capture_until = self.lock().capture_until;
        if self.clock.now() < capture_until {
            trace!(
                "Forwarding frame '{}' inside trigger window (until {})",
                frame.name(),
                capture_until
            );
            return Ok(true);
        }

        Ok(false)
    }

    /// Extend the deadline and release the window buffer into the queue.
    pub fn promote(&self) {
        let now = self.clock.now();
        let mut state = self.lock();

        state.capture_until = now
            .checked_add_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        state.buffer.prune(now);

        let released = state.buffer.take_all();
        if !released.is_empty() {
            debug!("Releasing {} buffered batch(es)", released.len());
        }
        state.queue.extend(released);
    }

    /// Hold a suppressed batch in the window buffer.
    ///
    /// Does nothing when the window is zero.
    pub fn deposit(&self, batch: ImageBatch) {
        let now = self.clock.now();
        self.lock().deposit(BufferedEntry::new(batch), now);
    }

    /// Pop the oldest released batch.
    pub fn drain_one(&self) -> Option<BufferedEntry> {
        self.lock().queue.pop_front()
    }

    /// Deposit `batch`, then pop the oldest released batch, in one critical
    /// section.
    pub fn deposit_and_drain(&self, batch: ImageBatch) -> Option<BufferedEntry> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.deposit(BufferedEntry::new(batch), now);
        state.queue.pop_front()
    }

    /// Current capture-through deadline.
    pub fn capture_until(&self) -> DateTime<Utc> {
        self.lock().capture_until
    }

    /// Number of batches waiting in the dispatch queue.
    pub fn queued_len(&self) -> usize {
        self.lock().queue.len()
    }

    /// Number of batches held in the window buffer.
    pub fn buffered_len(&self) -> usize {
        self.lock().buffer.len()
    }

    fn lock(&self) -> MutexGuard<'_, TriggerState> {
        // State is only touched by non-panicking list operations, so a
        // poisoned lock still guards consistent data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TriggerState {
    fn deposit(&mut self, entry: BufferedEntry, now: DateTime<Utc>) {
        if !self.buffer.is_enabled() {
            return;
        }
        self.buffer.prune(now);
        trace!("Buffering batch captured at {}", entry.captured_at);
        self.buffer.push(entry);
    }
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
