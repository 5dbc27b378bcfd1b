//! Frame sink consumers (§4.5).

use tapelight_composer::Rgb;
use tapelight_server::sink::{FrameSink, LoggingSink};

#[test]
fn logging_sink_accepts_frames_without_panicking() {
    let mut sink = LoggingSink::new(1);
    sink.publish(vec![Rgb { r: 0, g: 0, b: 0 }; 4]);
    sink.publish(vec![]);
}
