//! Platform abstraction layer
//!
//! Contracts for what the host provides:
//! - Time (monotonic milliseconds)
//! - Viewport dimensions
//! - A surface that draws finished frames

use std::cell::Cell;
use std::time::Instant;

use crate::renderer::Frame;
use crate::sim::Viewport;

/// Monotonic clock in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from process-local origin
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock advanced by hand (headless runs, tests)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Current playfield size
pub trait ViewportSource {
    fn viewport(&self) -> Viewport;
}

impl ViewportSource for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}

/// Receives one finished frame per refresh
pub trait Surface {
    fn present(&mut self, frame: &Frame);
}

/// Surface that draws nothing
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn present(&mut self, _frame: &Frame) {}
}
