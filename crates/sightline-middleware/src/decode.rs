//! Transport frame decoding.
//!
//! The sensor unit transmits one JSON object per frame with centimeter
//! ranges and a heading angle:
//!
//! ```json
//! {"obstacleCM": 48, "trenchCM": 230, "angle": 95.5}
//! ```
//!
//! Missing numeric fields default to 0; centimeter fields are converted to
//! meters. A frame that is not UTF-8 or not valid JSON is rejected - the
//! caller drops it, logs the failure, and leaves the canonical state
//! untouched. A malformed frame is never fatal.

use serde::Deserialize;
use sightline_types::{Reading, SightError};

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(rename = "obstacleCM", default)]
    obstacle_cm: f64,
    #[serde(rename = "trenchCM", default)]
    trench_cm: f64,
    #[serde(default)]
    angle: f64,
}

/// Decode one transport frame into a validated [`Reading`].
pub fn decode_frame(frame: &[u8]) -> Result<Reading, SightError> {
    let text = std::str::from_utf8(frame)
        .map_err(|e| SightError::Decode(format!("frame is not UTF-8: {e}")))?;
    let raw: RawFrame =
        serde_json::from_str(text).map_err(|e| SightError::Decode(e.to_string()))?;
    Ok(Reading::from_centimeters(
        raw.obstacle_cm,
        raw.trench_cm,
        raw.angle,
    ))
}
