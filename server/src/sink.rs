//! Frame consumers (§4.5: "publishes the frame to whatever consumer is
//! registered"). Relocated out of the model crate: `tapelight-composer`'s
//! teacher ancestor defined an `OutputDriver` trait for hardware LED
//! strips, but writing frames out is an application concern, not a model
//! one, so it lives here instead.

use tapelight_composer::Rgb;

/// Something that can receive a rendered frame once per tick.
pub trait FrameSink {
    fn publish(&mut self, frame: Vec<Rgb>);
}

/// A sink with nowhere real to send frames: logs a frame count periodically
/// so a headless run still shows signs of life.
pub struct LoggingSink {
    tick: u64,
    log_every: u64,
}

impl LoggingSink {
    #[must_use]
    pub fn new(log_every: u64) -> Self {
        Self { tick: 0, log_every: log_every.max(1) }
    }
}

impl FrameSink for LoggingSink {
    fn publish(&mut self, frame: Vec<Rgb>) {
        self.tick += 1;
        if self.tick % self.log_every == 0 {
            tracing::trace!(tick = self.tick, leds = frame.len(), "frame published");
        }
    }
}
