//! Parameter value coercion (§4.6.3/§4.6.6): turns one OSC argument into
//! one or more `ParameterUpdate`s applied to a segment.

use rosc::OscType;
use serde_json::Value;
use tapelight_composer::{Effect, ParameterUpdate, ValidationError};

use crate::error::OscError;

/// Apply an OSC parameter write to segment `segment_id` of `effect`.
///
/// `param` is the address's final path component (e.g. `"color"`,
/// `"move_speed"`). `args` is the message's argument list; only the first
/// argument is consulted, matching the source's `value = args[0]`.
pub fn apply(effect: &mut Effect, segment_id: u32, param: &str, args: &[OscType]) -> Result<(), OscError> {
    let arg = args.first().ok_or_else(|| OscError::MissingArgument {
        address: param.to_string(),
    })?;
    let value = osc_to_json(arg)?;

    match param {
        "color" => apply_color_group(effect, segment_id, &value),
        "position" => apply_position_group(effect, segment_id, &value),
        "span" => apply_span_group(effect, segment_id, &value),
        other => {
            let update = direct_update(other, &value)?;
            effect
                .update_segment_param(segment_id, update)
                .map_err(OscError::from)
        }
    }
}

/// Convert a single OSC argument into JSON, decoding JSON-encoded strings
/// per the coercion pipeline's first step (§4.6.6).
fn osc_to_json(arg: &OscType) -> Result<Value, OscError> {
    Ok(match arg {
        OscType::Int(i) => Value::from(*i),
        OscType::Long(i) => Value::from(*i),
        OscType::Float(f) => json_number(f64::from(*f)),
        OscType::Double(f) => json_number(*f),
        OscType::Bool(b) => Value::Bool(*b),
        OscType::String(s) => serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.clone())),
        OscType::Array(arr) => {
            let items: Result<Vec<Value>, OscError> = arr.content.iter().map(osc_to_json).collect();
            Value::Array(items?)
        }
        other => {
            return Err(OscError::Coercion {
                param: String::new(),
                reason: format!("unsupported OSC argument type: {other:?}"),
            })
        }
    })
}

fn json_number(f: f64) -> Value {
    serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
}

fn expect_i32(value: &Value, field: &'static str) -> Result<i32, OscError> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .map(|v| v as i32)
        .ok_or_else(|| coercion_error(field, value))
}

fn expect_u32(value: &Value, field: &'static str) -> Result<u32, OscError> {
    value
        .as_u64()
        .or_else(|| value.as_f64().map(|f| f as u64))
        .map(|v| v as u32)
        .ok_or_else(|| coercion_error(field, value))
}

fn expect_f32(value: &Value, field: &'static str) -> Result<f32, OscError> {
    value
        .as_f64()
        .map(|f| f as f32)
        .ok_or_else(|| coercion_error(field, value))
}

/// Accepts a native JSON bool or the `0`/`1` ints OSC clients commonly send
/// in place of a bool (mirrors the `gradient`/`fade` handling in the grouped
/// `color`/`span` dict schemas, §4.6.3).
fn expect_bool(value: &Value, field: &'static str) -> Result<bool, OscError> {
    value
        .as_bool()
        .or_else(|| value.as_i64().map(|v| v == 1))
        .ok_or_else(|| coercion_error(field, value))
}

fn coercion_error(field: &'static str, value: &Value) -> OscError {
    OscError::Coercion {
        param: field.to_string(),
        reason: format!("could not interpret {value} as {field}"),
    }
}

fn expect_array<'a>(value: &'a Value, field: &'static str) -> Result<&'a [Value], OscError> {
    value.as_array().map(Vec::as_slice).ok_or_else(|| coercion_error(field, value))
}

fn fixed_i32_array<const N: usize>(value: &Value, field: &'static str) -> Result<[i32; N], OscError> {
    let arr = expect_array(value, field)?;
    if arr.len() != N {
        return Err(OscError::Coercion {
            param: field.to_string(),
            reason: format!("expected {N} elements, got {}", arr.len()),
        });
    }
    let mut out = [0i32; N];
    for (i, v) in arr.iter().enumerate() {
        out[i] = expect_i32(v, field)?;
    }
    Ok(out)
}

fn fixed_f32_array<const N: usize>(value: &Value, field: &'static str) -> Result<[f32; N], OscError> {
    let arr = expect_array(value, field)?;
    if arr.len() != N {
        return Err(OscError::Coercion {
            param: field.to_string(),
            reason: format!("expected {N} elements, got {}", arr.len()),
        });
    }
    let mut out = [0f32; N];
    for (i, v) in arr.iter().enumerate() {
        out[i] = expect_f32(v, field)?;
    }
    Ok(out)
}

fn fixed_u32_array<const N: usize>(value: &Value, field: &'static str) -> Result<[u32; N], OscError> {
    let arr = expect_array(value, field)?;
    if arr.len() != N {
        return Err(OscError::Coercion {
            param: field.to_string(),
            reason: format!("expected {N} elements, got {}", arr.len()),
        });
    }
    let mut out = [0u32; N];
    for (i, v) in arr.iter().enumerate() {
        out[i] = expect_u32(v, field)?;
    }
    Ok(out)
}

/// `color` grouped schema: `colors`, then `speed`, then `gradient` (§4.6.3).
fn apply_color_group(effect: &mut Effect, segment_id: u32, value: &Value) -> Result<(), OscError> {
    if let Value::Object(map) = value {
        if let Some(colors) = map.get("colors") {
            let c = fixed_i32_array::<4>(colors, "color")?;
            update(effect, segment_id, ParameterUpdate::Color(c))?;
        }
        if let Some(speed) = map.get("speed") {
            update(
                effect,
                segment_id,
                ParameterUpdate::MoveSpeed(expect_f32(speed, "move_speed")?),
            )?;
        }
        if let Some(gradient) = map.get("gradient") {
            let enabled = gradient.as_i64().map(|v| v == 1).unwrap_or(gradient.as_bool().unwrap_or(false));
            update(effect, segment_id, ParameterUpdate::Gradient(enabled))?;
        }
        Ok(())
    } else if let Value::Array(_) = value {
        let c = fixed_i32_array::<4>(value, "color")?;
        update(effect, segment_id, ParameterUpdate::Color(c))
    } else {
        Err(coercion_error("color", value))
    }
}

/// `position` grouped schema: `initial_position` (sets both
/// `initial_position` and `current_position`), `speed`, `range`, `interval`.
fn apply_position_group(effect: &mut Effect, segment_id: u32, value: &Value) -> Result<(), OscError> {
    let Value::Object(map) = value else {
        return Err(coercion_error("position", value));
    };

    if let Some(pos) = map.get("initial_position") {
        let p = expect_f32(pos, "initial_position")?;
        update(effect, segment_id, ParameterUpdate::InitialPosition(p))?;
        update(effect, segment_id, ParameterUpdate::CurrentPosition(p))?;
    }
    if let Some(speed) = map.get("speed") {
        update(
            effect,
            segment_id,
            ParameterUpdate::MoveSpeed(expect_f32(speed, "move_speed")?),
        )?;
    }
    if let Some(range) = map.get("range") {
        if range.as_array().is_some_and(|a| a.len() == 2) {
            let r = fixed_f32_array::<2>(range, "move_range")?;
            update(effect, segment_id, ParameterUpdate::MoveRange(r))?;
        }
    }
    if let Some(interval) = map.get("interval") {
        update(
            effect,
            segment_id,
            ParameterUpdate::PositionInterval(expect_u32(interval, "position_interval")?),
        )?;
    }
    Ok(())
}

/// `span` grouped schema: `span` (length = `[S/3, S/3, S/3]`, integer
/// division), `range`, `speed`, `interval`, `gradient_colors`, `fade`.
fn apply_span_group(effect: &mut Effect, segment_id: u32, value: &Value) -> Result<(), OscError> {
    let Value::Object(map) = value else {
        return Err(coercion_error("span", value));
    };

    if let Some(span) = map.get("span") {
        let s = expect_u32(span, "length")? / 3;
        update(effect, segment_id, ParameterUpdate::Length([s, s, s]))?;
    }
    if let Some(range) = map.get("range") {
        if range.as_array().is_some_and(|a| a.len() == 2) {
            let r = fixed_f32_array::<2>(range, "span_range")?;
            update(effect, segment_id, ParameterUpdate::SpanRange(r))?;
        }
    }
    if let Some(speed) = map.get("speed") {
        update(
            effect,
            segment_id,
            ParameterUpdate::SpanSpeed(expect_f32(speed, "span_speed")?),
        )?;
    }
    if let Some(interval) = map.get("interval") {
        update(
            effect,
            segment_id,
            ParameterUpdate::SpanInterval(expect_u32(interval, "span_interval")?),
        )?;
    }
    if let Some(gradient_colors) = map.get("gradient_colors") {
        if gradient_colors.as_array().is_some() {
            let g = fixed_i32_array::<3>(gradient_colors, "gradient_colors")?;
            update(effect, segment_id, ParameterUpdate::GradientColors(g))?;
        }
    }
    if let Some(fade) = map.get("fade") {
        let enabled = fade.as_i64().map(|v| v == 1).unwrap_or(fade.as_bool().unwrap_or(false));
        update(effect, segment_id, ParameterUpdate::Fade(enabled))?;
    }
    Ok(())
}

/// Any parameter name not in `{color, position, span}` maps directly onto
/// one `ParameterUpdate` variant (§4.6.3 "any other" row).
fn direct_update(param: &str, value: &Value) -> Result<ParameterUpdate, OscError> {
    Ok(match param {
        "transparency" => ParameterUpdate::Transparency(fixed_f32_array::<4>(value, "transparency")?),
        "length" => ParameterUpdate::Length(fixed_u32_array::<3>(value, "length")?),
        "move_speed" => ParameterUpdate::MoveSpeed(expect_f32(value, "move_speed")?),
        "move_range" => ParameterUpdate::MoveRange(fixed_f32_array::<2>(value, "move_range")?),
        "initial_position" => ParameterUpdate::InitialPosition(expect_f32(value, "initial_position")?),
        "current_position" => ParameterUpdate::CurrentPosition(expect_f32(value, "current_position")?),
        "is_edge_reflect" => ParameterUpdate::IsEdgeReflect(expect_bool(value, "is_edge_reflect")?),
        "dimmer_time" => ParameterUpdate::DimmerTime(fixed_u32_array::<5>(value, "dimmer_time")?),
        "gradient" => ParameterUpdate::Gradient(expect_bool(value, "gradient")?),
        "gradient_colors" => ParameterUpdate::GradientColors(fixed_i32_array::<3>(value, "gradient_colors")?),
        "fade" => ParameterUpdate::Fade(expect_bool(value, "fade")?),
        "position_interval" => ParameterUpdate::PositionInterval(expect_u32(value, "position_interval")?),
        "span_range" => ParameterUpdate::SpanRange(fixed_f32_array::<2>(value, "span_range")?),
        "span_speed" => ParameterUpdate::SpanSpeed(expect_f32(value, "span_speed")?),
        "span_interval" => ParameterUpdate::SpanInterval(expect_u32(value, "span_interval")?),
        unknown => return Err(ValidationError::UnknownParameter(unknown.to_string()).into()),
    })
}

fn update(effect: &mut Effect, segment_id: u32, update: ParameterUpdate) -> Result<(), OscError> {
    effect.update_segment_param(segment_id, update).map_err(OscError::from)
}
