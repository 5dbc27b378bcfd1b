//! The render clock task (C8): ticks at a configurable `fps`, advancing and
//! rendering the shared [`Scene`], and publishing frames to a consumer.
//!
//! Drift-corrected by construction: a `tokio::time::interval` with
//! `MissedTickBehavior::Delay` resumes the cadence after a stall instead of
//! bursting to catch up, without hand-rolled `Instant` bookkeeping.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use tapelight_composer::{Rgb, Scene};

/// Shared, lock-free knobs the OSC/CLI layer can adjust without touching
/// the model lock: current fps and the paused flag.
pub struct ClockControl {
    fps: AtomicU32,
    paused: AtomicBool,
}

impl ClockControl {
    #[must_use]
    pub fn new(initial_fps: u32) -> Self {
        Self {
            fps: AtomicU32::new(initial_fps),
            paused: AtomicBool::new(false),
        }
    }

    pub fn set_fps(&self, fps: u32) {
        self.fps.store(fps, Ordering::Relaxed);
    }

    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps.load(Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }
}

/// Run the render loop until the process is asked to shut down.
///
/// Each tick: take the lock, `scene.update(dt)` + `scene.render()`, copy the
/// frame out, release, then hand the frame to `publish` (§5). While paused,
/// `dt` is zero but `render()` still runs so late-joining consumers see the
/// last state (§4.8).
pub async fn run<F>(scene: Arc<Mutex<Scene>>, control: Arc<ClockControl>, mut publish: F)
where
    F: FnMut(Vec<Rgb>),
{
    let mut current_fps = control.fps();
    let mut interval = tokio::time::interval(tick_duration(current_fps));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let fps = control.fps();
        if fps != current_fps {
            current_fps = fps;
            interval = tokio::time::interval(tick_duration(current_fps));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            debug!(fps = current_fps, "clock rate changed");
        }

        let dt = if control.is_paused() {
            0.0
        } else {
            1.0 / current_fps.max(1) as f32
        };

        let frame = {
            let mut scene = scene.lock().await;
            scene.update(dt);
            scene.render()
        };

        publish(frame);
    }
}

fn tick_duration(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
}
