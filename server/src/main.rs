use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tapelight_composer::{Scene, SegmentConfig};

use tapelight_server::cli::Cli;
use tapelight_server::sink::{FrameSink, LoggingSink};
use tapelight_server::{clock, error, osc, persistence};

const EXIT_CONFIG_ERROR: i32 = 1;
const EXIT_BIND_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    info!(fps = cli.fps, led_count = cli.led_count, osc_ip = %cli.osc_ip, osc_port = cli.osc_port, "starting");

    let scene = match load_initial_scene(&cli) {
        Ok(scene) => scene,
        Err(err) => {
            error!(%err, "failed to initialize scene");
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let scene = Arc::new(Mutex::new(scene));
    let control = Arc::new(clock::ClockControl::new(cli.fps));

    let bind_addr = SocketAddr::from((cli.osc_ip, cli.osc_port));
    let osc_scene = Arc::clone(&scene);
    let osc_task = tokio::spawn(async move {
        if let Err(err) = osc::serve(osc_scene, bind_addr).await {
            error!(%err, "OSC task exited");
            std::process::exit(EXIT_BIND_ERROR);
        }
    });

    let clock_scene = Arc::clone(&scene);
    let clock_control = Arc::clone(&control);
    let mut sink: Box<dyn FrameSink + Send> = Box::new(LoggingSink::new(u64::from(cli.fps.max(1))));
    let clock_task = tokio::spawn(async move {
        clock::run(clock_scene, clock_control, move |frame| sink.publish(frame)).await;
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("received shutdown signal");
        }
        _ = osc_task => {}
        _ = clock_task => {}
    }

    info!("shutdown complete");
}

fn load_initial_scene(cli: &Cli) -> Result<Scene, error::PersistError> {
    if let Some(path) = &cli.config_file {
        if path.exists() {
            info!(path = %path.display(), "loading scene from config file");
            return persistence::load(path);
        }
        info!(path = %path.display(), "config file not found, creating default scene");
    }
    Ok(build_default_scene(cli.led_count, cli.fps))
}

/// Build the default scene: 8 effects of 3 segments each, staggered across
/// the strip. Grounded on the source's `create_default_effects`/
/// `create_default_segments`; `DEFAULT_MOVE_SPEED`/`DEFAULT_LENGTH`/
/// `DEFAULT_DIMMER_TIME` weren't present in the retrieved source, so this
/// uses the same conservative defaults as `SegmentConfig::default()`.
fn build_default_scene(led_count: u32, fps: u32) -> Scene {
    const EFFECT_COUNT: u32 = 8;
    const SEGMENTS_PER_EFFECT: u32 = 3;
    const DEFAULT_MOVE_SPEED: f32 = 10.0;

    let mut scene = Scene::new(1);
    let center_position = (led_count / 2) as f32;

    for effect_id in 1..=EFFECT_COUNT {
        scene.add_effect(effect_id, led_count, fps);
        let effect = scene.effect_mut(effect_id).expect("just inserted");

        for i in 1..=SEGMENTS_PER_EFFECT {
            let signed_speed = if i % 2 == 0 { DEFAULT_MOVE_SPEED } else { -DEFAULT_MOVE_SPEED };
            let config = SegmentConfig {
                color: [
                    (i % 6) as i32,
                    ((i + 1) % 6) as i32,
                    ((i + 2) % 6) as i32,
                    ((i + 3) % 6) as i32,
                ],
                move_speed: signed_speed,
                move_range: [0.0, (led_count.saturating_sub(1)) as f32],
                initial_position: center_position - 30.0 + (i as f32) * 30.0,
                ..SegmentConfig::default()
            };
            effect.add_segment(i, config);
        }
    }

    scene
}
