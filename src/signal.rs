//! Abort flag and progress cell shared between a host and a running engine.
//!
//! Both are plain relaxed atomics: they carry no ordering with respect to
//! image data, and an engine may observe an abort request late. The host may
//! write the flag and read the progress from any thread while a run is in
//! progress.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use enough::{Stop, StopReason};

/// Cooperative cancellation request, polled by the engine at its own
/// checkpoints.
#[derive(Debug, Default)]
pub struct AbortFlag(AtomicBool);

impl AbortFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Ask the engine to stop at its next checkpoint.
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Stop for AbortFlag {
    fn check(&self) -> Result<(), StopReason> {
        if self.is_aborted() {
            Err(StopReason::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Fractional progress written by the engine; no frequency or monotonicity
/// guarantee.
#[derive(Debug, Default)]
pub struct Progress(AtomicU32);

impl Progress {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}
