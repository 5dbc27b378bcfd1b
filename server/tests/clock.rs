//! Render clock cadence/pause control and frame publishing (C8).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use tapelight_composer::Scene;
use tapelight_server::clock::{self, ClockControl};

#[test]
fn control_tracks_fps_and_pause_state() {
    let control = ClockControl::new(60);
    assert_eq!(control.fps(), 60);
    assert!(!control.is_paused());

    control.set_fps(30);
    control.set_paused(true);
    assert_eq!(control.fps(), 30);
    assert!(control.is_paused());
}

#[tokio::test]
async fn run_advances_and_publishes_frames() {
    let mut scene = Scene::new(1);
    scene.add_effect(1, 4, 200);
    let scene = Arc::new(Mutex::new(scene));
    let control = Arc::new(ClockControl::new(200));

    let frames = Arc::new(std::sync::Mutex::new(Vec::new()));
    let frames_clone = Arc::clone(&frames);

    let handle = tokio::spawn({
        let scene = Arc::clone(&scene);
        let control = Arc::clone(&control);
        async move {
            clock::run(scene, control, move |frame| {
                frames_clone.lock().unwrap().push(frame);
            })
            .await;
        }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.abort();

    assert!(!frames.lock().unwrap().is_empty());
}
