//! Command-line surface (§6). Deliberately thin: everything a running
//! server does beyond startup is OSC-driven, not flag-driven.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "tapelight-server", about = "Real-time LED tape light effect engine")]
pub struct Cli {
    /// Render clock rate.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Number of addressable LEDs on the strip.
    #[arg(long = "led-count", default_value_t = 225)]
    pub led_count: u32,

    /// Address the OSC socket binds to.
    #[arg(long = "osc-ip", default_value_t = Ipv4Addr::new(127, 0, 0, 1))]
    pub osc_ip: Ipv4Addr,

    /// Port the OSC socket binds to.
    #[arg(long = "osc-port", default_value_t = 5005)]
    pub osc_port: u16,

    /// Load a scene JSON document at startup.
    #[arg(long = "config-file")]
    pub config_file: Option<PathBuf>,

    /// Run headless: renderer and OSC only, no local preview.
    #[arg(long = "no-gui")]
    pub no_gui: bool,
}
