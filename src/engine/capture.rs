// Capture-to-processing frame handoff
//
// Lock-free SPSC ring buffer between an optional capture thread and the
// single processing consumer. Capture never blocks: when the queue is
// full the incoming frame is dropped and counted. The consumer drains to
// the most recent observation, so stale frames are discarded rather than
// queued unboundedly; every discard is counted for telemetry.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::warn;
use rtrb::{Consumer, Producer, RingBuffer};

use crate::engine::source::{FrameObservation, ObservationSource};
use crate::error::CameraError;

/// Default handoff capacity; small on purpose so the consumer always works
/// on fresh frames
pub const DEFAULT_HANDOFF_CAPACITY: usize = 4;

/// Create a bounded capture handoff
///
/// # Panics
/// Panics if capacity is 0.
pub fn capture_handoff(capacity: usize) -> (CaptureProducer, CaptureConsumer) {
    assert!(capacity > 0, "capacity must be greater than 0");
    let (producer, consumer) = RingBuffer::new(capacity);
    (
        CaptureProducer {
            producer,
            dropped: 0,
        },
        CaptureConsumer {
            consumer,
            discarded: 0,
        },
    )
}

/// Capture-thread side of the handoff
pub struct CaptureProducer {
    producer: Producer<FrameObservation>,
    dropped: u64,
}

impl CaptureProducer {
    /// Offer an observation without blocking
    ///
    /// # Returns
    /// `true` when the observation was enqueued, `false` when the queue
    /// was full and the observation was dropped.
    pub fn offer(&mut self, observation: FrameObservation) -> bool {
        match self.producer.push(observation) {
            Ok(()) => true,
            Err(_) => {
                self.dropped += 1;
                false
            }
        }
    }

    /// Observations dropped because the queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Processing-thread side of the handoff
pub struct CaptureConsumer {
    consumer: Consumer<FrameObservation>,
    discarded: u64,
}

impl CaptureConsumer {
    /// Drain the queue and return the most recent observation
    ///
    /// Older queued observations are discarded and counted; `None` when
    /// nothing has arrived since the last call.
    pub fn latest(&mut self) -> Option<FrameObservation> {
        let mut latest = None;
        while let Ok(observation) = self.consumer.pop() {
            if latest.is_some() {
                self.discarded += 1;
            }
            latest = Some(observation);
        }
        latest
    }

    /// Stale observations discarded in favor of fresher ones
    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}

/// Poll interval while waiting for the capture thread to deliver a frame
const POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Observation source that moves capture onto its own thread
///
/// The inner source runs on a dedicated thread and pushes observations
/// through the bounded handoff; this wrapper is the single consumer on
/// the processing side, so smoothing state is never touched from two
/// threads. Overflow drops frames instead of blocking capture; drops are
/// reported through `dropped_frames` so the session can surface them.
pub struct ThreadedSource {
    consumer: CaptureConsumer,
    handle: Option<JoinHandle<Result<(), CameraError>>>,
    stop: Arc<AtomicBool>,
    done: Arc<AtomicBool>,
    capture_drops: Arc<AtomicU64>,
}

impl ThreadedSource {
    /// Spawn the capture thread over an inner source
    pub fn spawn<S>(mut inner: S, capacity: usize) -> Self
    where
        S: ObservationSource + Send + 'static,
    {
        let (mut producer, consumer) = capture_handoff(capacity);
        let stop = Arc::new(AtomicBool::new(false));
        let done = Arc::new(AtomicBool::new(false));
        let capture_drops = Arc::new(AtomicU64::new(0));

        let thread_stop = Arc::clone(&stop);
        let thread_done = Arc::clone(&done);
        let thread_drops = Arc::clone(&capture_drops);

        let handle = thread::spawn(move || {
            let result = loop {
                if thread_stop.load(Ordering::Acquire) {
                    break Ok(());
                }
                match inner.next_observation() {
                    Ok(Some(observation)) => {
                        if !producer.offer(observation) {
                            thread_drops.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                    Ok(None) => break Ok(()),
                    Err(err) => break Err(err),
                }
            };
            inner.release();
            thread_done.store(true, Ordering::Release);
            result
        });

        Self {
            consumer,
            handle: Some(handle),
            stop,
            done,
            capture_drops,
        }
    }

    fn join_capture_thread(&mut self) -> Result<(), CameraError> {
        match self.handle.take() {
            Some(handle) => match handle.join() {
                Ok(result) => result,
                Err(_) => {
                    warn!("[Capture] Capture thread panicked");
                    Err(CameraError::Backend {
                        details: "capture thread panicked".to_string(),
                    })
                }
            },
            None => Ok(()),
        }
    }
}

impl ObservationSource for ThreadedSource {
    fn next_observation(&mut self) -> Result<Option<FrameObservation>, CameraError> {
        loop {
            if let Some(observation) = self.consumer.latest() {
                return Ok(Some(observation));
            }
            if self.done.load(Ordering::Acquire) {
                // Drain anything that arrived before the thread finished
                if let Some(observation) = self.consumer.latest() {
                    return Ok(Some(observation));
                }
                return self.join_capture_thread().map(|()| None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn release(&mut self) {
        self.stop.store(true, Ordering::Release);
        let _ = self.join_capture_thread();
    }

    fn dropped_frames(&self) -> u64 {
        self.capture_drops.load(Ordering::Relaxed) + self.consumer.discarded()
    }
}

impl Drop for ThreadedSource {
    fn drop(&mut self) {
        self.release();
    }
}
