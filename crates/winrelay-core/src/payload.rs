//! Inbound message envelope, command names, and payload decoding.
//!
//! Every payload-bearing command decodes its `data` field here. Decoding
//! is all-or-nothing: a payload is either fully valid or rejected with a
//! [`DecodeError`], so callers never mutate state from a partial record.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scale::GeometryUpdate;
use crate::visual::TransparencyUpdate;

/// A message delivered by the launched application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Command name, e.g. `"SetWindow"`.
    pub command: String,
    /// Command-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Message {
    pub fn new(command: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            command: command.into(),
            data,
        }
    }
}

/// Recognised window commands. Aliases map to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    /// `BeginListeningWindow`: reserved, no effect.
    BeginListening,
    /// `StopListeningWindow`: reserved, no effect.
    StopListening,
    /// `RestoreWindowState` / `RestoreWindow`.
    Restore,
    /// `SetWindow`.
    SetGeometry,
    /// `SetWindowTitle`.
    SetTitle,
    /// `SaveWindowState` / `SetWindowDefault`.
    SaveState,
    /// `SetWindowTransparency`.
    SetTransparency,
}

impl WindowCommand {
    /// Maps a command name to a variant. Names are case-sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "BeginListeningWindow" => Some(Self::BeginListening),
            "StopListeningWindow" => Some(Self::StopListening),
            "RestoreWindowState" | "RestoreWindow" => Some(Self::Restore),
            "SetWindow" => Some(Self::SetGeometry),
            "SetWindowTitle" => Some(Self::SetTitle),
            "SaveWindowState" | "SetWindowDefault" => Some(Self::SaveState),
            "SetWindowTransparency" => Some(Self::SetTransparency),
            _ => None,
        }
    }
}

/// Why a payload was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The message carried no `data` field.
    Missing,
    /// `data` was JSON `null`.
    Null,
    /// `data` did not match the expected schema.
    Malformed(String),
    /// The color string is not a 24-bit hex value.
    InvalidColor(String),
    /// A scale reference dimension was zero, negative, or not finite.
    InvalidScale(f64),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "payload is missing"),
            Self::Null => write!(f, "payload is null"),
            Self::Malformed(e) => write!(f, "malformed payload: {e}"),
            Self::InvalidColor(c) => write!(f, "invalid color {c:?}, expected RRGGBB"),
            Self::InvalidScale(v) => write!(f, "invalid scale reference dimension {v}"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Geometry payload of `SetWindow`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeometryPayload {
    reset: Option<bool>,
    scale_width: Option<f64>,
    scale_height: Option<f64>,
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
}

/// Title payload of `SetWindowTitle`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct TitlePayload {
    name: Option<String>,
}

/// Transparency payload of `SetWindowTransparency`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct TransparencyPayload {
    transparency: Option<u8>,
    color: Option<String>,
}

/// A decoded `SetWindow` request.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryRequest {
    /// `reset: true`: behave like `RestoreWindowState`.
    Reset,
    Update(GeometryUpdate),
}

/// Deserializes `data` into `T`, rejecting absent and `null` payloads.
pub fn decode<T: DeserializeOwned>(data: Option<&Value>) -> Result<T, DecodeError> {
    match data {
        None => Err(DecodeError::Missing),
        Some(Value::Null) => Err(DecodeError::Null),
        Some(value) => {
            T::deserialize(value).map_err(|e| DecodeError::Malformed(e.to_string()))
        }
    }
}

/// Decodes a `SetWindow` payload.
///
/// `reset` wins over every other field. Otherwise the supplied scale
/// reference dimensions must be positive and finite.
pub fn decode_geometry(data: Option<&Value>) -> Result<GeometryRequest, DecodeError> {
    let payload: GeometryPayload = decode(data)?;
    if payload.reset == Some(true) {
        return Ok(GeometryRequest::Reset);
    }

    for dimension in [payload.scale_width, payload.scale_height].into_iter().flatten() {
        if !dimension.is_finite() || dimension <= 0.0 {
            return Err(DecodeError::InvalidScale(dimension));
        }
    }

    Ok(GeometryRequest::Update(GeometryUpdate {
        x: payload.x,
        y: payload.y,
        width: payload.width,
        height: payload.height,
        scale_width: payload.scale_width,
        scale_height: payload.scale_height,
    }))
}

/// Decodes a `SetWindowTitle` payload into the requested name, if any.
pub fn decode_title(data: Option<&Value>) -> Result<Option<String>, DecodeError> {
    let payload: TitlePayload = decode(data)?;
    Ok(payload.name)
}

/// Decodes a `SetWindowTransparency` payload.
pub fn decode_transparency(data: Option<&Value>) -> Result<TransparencyUpdate, DecodeError> {
    let payload: TransparencyPayload = decode(data)?;
    let color_key = payload.color.as_deref().map(parse_color).transpose()?;

    Ok(TransparencyUpdate {
        transparency: payload.transparency,
        color_key,
    })
}

/// Parses `RRGGBB` (optionally prefixed with `#` or `0x`) into `0xRRGGBB`.
pub fn parse_color(s: &str) -> Result<u32, DecodeError> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let valid = !digits.is_empty()
        && digits.len() <= 6
        && digits.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(DecodeError::InvalidColor(s.to_string()));
    }

    u32::from_str_radix(digits, 16).map_err(|_| DecodeError::InvalidColor(s.to_string()))
}
