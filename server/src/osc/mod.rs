//! OSC control plane (C6): address parsing, value coercion, and the
//! receive task that applies writes to the shared [`Scene`].

pub mod address;
pub mod coerce;
pub mod init_reply;

use std::net::SocketAddr;
use std::sync::Arc;

use rosc::{OscPacket, OscType};
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use tapelight_composer::{Scene, SegmentConfig};

use address::Address;

const AUTO_CREATE_LED_COUNT: u32 = 225;
const AUTO_CREATE_FPS: u32 = 60;

/// Bind the OSC socket and run the receive loop until the process is asked
/// to shut down. Each datagram is handled inline: the model lock is taken
/// once per message regardless of how many logical workers exist, which is
/// enough to satisfy the "workers MUST serialize their effect" requirement
/// in spec §5 without an actual worker pool.
pub async fn serve(scene: Arc<Mutex<Scene>>, bind_addr: SocketAddr) -> std::io::Result<()> {
    let socket = UdpSocket::bind(bind_addr).await?;
    info!(%bind_addr, "OSC socket bound");

    let mut buf = [0u8; 4096];
    loop {
        let (len, sender) = socket.recv_from(&mut buf).await?;
        let packet = match rosc::decoder::decode_udp(&buf[..len]) {
            Ok((_, packet)) => packet,
            Err(err) => {
                warn!(?err, "failed to decode OSC packet");
                continue;
            }
        };
        handle_packet(&scene, &socket, sender, packet).await;
    }
}

async fn handle_packet(scene: &Arc<Mutex<Scene>>, socket: &UdpSocket, sender: SocketAddr, packet: OscPacket) {
    match packet {
        OscPacket::Message(message) => handle_message(scene, socket, sender, &message.addr, &message.args).await,
        OscPacket::Bundle(bundle) => {
            // Spec §4.6.1: no bundles are produced or consumed; unwrap
            // defensively rather than silently dropping real messages.
            for content in bundle.content {
                Box::pin(handle_packet(scene, socket, sender, content)).await;
            }
        }
    }
}

async fn handle_message(
    scene: &Arc<Mutex<Scene>>,
    socket: &UdpSocket,
    sender: SocketAddr,
    addr: &str,
    args: &[OscType],
) {
    let Some(parsed) = address::parse(addr) else {
        warn!(address = addr, "unrecognized OSC address");
        return;
    };

    match parsed {
        Address::SegmentParam {
            effect_id,
            segment_id,
            param,
        } => {
            let mut scene = scene.lock().await;
            let Some(effect) = scene.effect_mut(effect_id) else {
                warn!(effect_id, segment_id, "effect not found, discarding");
                return;
            };
            if effect.segment(segment_id).is_none() {
                warn!(effect_id, segment_id, "segment not found, discarding");
                return;
            }
            if let Err(err) = coerce::apply(effect, segment_id, &param, args) {
                warn!(effect_id, segment_id, %param, %err, "rejected parameter update");
            }
        }
        Address::ObjectParam {
            effect_id,
            segment_id,
            param,
        } => {
            let mut scene = scene.lock().await;
            let effect = scene.effect_or_create(effect_id, AUTO_CREATE_LED_COUNT, AUTO_CREATE_FPS);
            if effect.segment(segment_id).is_none() {
                debug!(effect_id, segment_id, "segment not found, creating it");
                effect.add_segment(segment_id, SegmentConfig::default());
            }
            if let Err(err) = coerce::apply(effect, segment_id, &param, args) {
                warn!(effect_id, segment_id, %param, %err, "rejected parameter update");
            }
        }
        Address::Palette(name) => {
            let flat = match args.first() {
                Some(OscType::Array(arr)) => arr
                    .content
                    .iter()
                    .map(|v| match v {
                        OscType::Int(i) => Some(*i),
                        OscType::Float(f) => Some(*f as i32),
                        _ => None,
                    })
                    .collect::<Option<Vec<i32>>>(),
                _ => args
                    .iter()
                    .map(|v| match v {
                        OscType::Int(i) => Some(*i),
                        OscType::Float(f) => Some(*f as i32),
                        _ => None,
                    })
                    .collect::<Option<Vec<i32>>>(),
            };
            let Some(flat) = flat else {
                warn!(palette = name.as_str(), "invalid palette color data");
                return;
            };
            let mut scene = scene.lock().await;
            if let Err(err) = scene.update_palette(name, &flat) {
                warn!(palette = name.as_str(), %err, "rejected palette update");
            }
        }
        Address::RequestInit => {
            if !matches!(args.first(), Some(OscType::Int(1))) {
                return;
            }
            let messages = {
                let scene = scene.lock().await;
                init_reply::build(&scene)
            };
            for message in messages {
                let packet = OscPacket::Message(message);
                match rosc::encoder::encode(&packet) {
                    Ok(bytes) => {
                        if let Err(err) = socket.send_to(&bytes, sender).await {
                            warn!(%err, "failed to send init reply message");
                        }
                    }
                    Err(err) => warn!(%err, "failed to encode init reply message"),
                }
            }
        }
    }
}
