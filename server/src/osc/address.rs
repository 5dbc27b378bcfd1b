//! OSC address grammar (§4.6.2): parses a dot-free, slash-separated OSC
//! address string into one of the four recognized families. Anything else
//! is `None` — the caller logs and discards.

use tapelight_composer::PaletteName;

/// Which parameter family an `/effect/{E}/segment|object/{S}/{param}`
/// address targets, and whether it auto-materializes its effect/segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// `/effect/{E}/segment/{S}/{param}` — no auto-create.
    SegmentParam {
        effect_id: u32,
        segment_id: u32,
        param: String,
    },
    /// `/effect/{E}/object/{S}/{param}` — auto-creates missing `E`/`S`.
    ObjectParam {
        effect_id: u32,
        segment_id: u32,
        param: String,
    },
    /// `/palette/{X}`.
    Palette(PaletteName),
    /// `/request/init`.
    RequestInit,
}

/// Parse an OSC address string into a recognized family.
#[must_use]
pub fn parse(address: &str) -> Option<Address> {
    let parts: Vec<&str> = address.split('/').filter(|s| !s.is_empty()).collect();

    match parts.as_slice() {
        ["effect", effect_id, kind @ ("segment" | "object"), segment_id, param] => {
            let effect_id = effect_id.parse().ok()?;
            let segment_id = segment_id.parse().ok()?;
            let param = (*param).to_string();
            Some(if *kind == "segment" {
                Address::SegmentParam {
                    effect_id,
                    segment_id,
                    param,
                }
            } else {
                Address::ObjectParam {
                    effect_id,
                    segment_id,
                    param,
                }
            })
        }
        ["palette", name] => PaletteName::parse(name).map(Address::Palette),
        ["request", "init"] => Some(Address::RequestInit),
        _ => None,
    }
}
