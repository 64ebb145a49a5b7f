//! Encoded polyline codec.
//!
//! Routing providers return geometry in the Google encoded polyline format
//! (precision 5). Each coordinate is stored as a delta from the previous one,
//! zig-zag encoded and split into 5-bit chunks offset by 63 into printable
//! ASCII.

use crate::domain::Coordinate;

/// Scale factor for precision-5 polylines.
const FACTOR: f64 = 1e5;

/// Errors from decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// Input ended in the middle of a value
    #[error("polyline truncated at byte {offset}")]
    Truncated { offset: usize },

    /// Byte outside the polyline alphabet
    #[error("invalid polyline character at byte {offset}")]
    InvalidCharacter { offset: usize },

    /// A single value used more chunks than fit in 64 bits
    #[error("polyline value overflows at byte {offset}")]
    Overflow { offset: usize },

    /// Decoded point is not a valid coordinate
    #[error("polyline point {index} is out of range")]
    OutOfRange { index: usize },
}

/// Decode a precision-5 encoded polyline into `(latitude, longitude)` points.
///
/// # Examples
///
/// ```
/// use fuel_planner::route::polyline;
///
/// let points = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert!((points[0].latitude() - 38.5).abs() < 1e-9);
/// assert!((points[0].longitude() + 120.2).abs() < 1e-9);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut offset = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut points = Vec::new();

    while offset < bytes.len() {
        lat += next_value(bytes, &mut offset)?;
        lon += next_value(bytes, &mut offset)?;

        let point = Coordinate::new(lat as f64 / FACTOR, lon as f64 / FACTOR).map_err(|_| {
            PolylineError::OutOfRange {
                index: points.len(),
            }
        })?;
        points.push(point);
    }

    Ok(points)
}

/// Encode points as a precision-5 polyline.
pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for point in points {
        let lat = (point.latitude() * FACTOR).round() as i64;
        let lon = (point.longitude() * FACTOR).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

/// Read one zig-zag encoded value starting at `offset`.
fn next_value(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*offset)
            .ok_or(PolylineError::Truncated { offset: *offset })?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter { offset: *offset });
        }
        if shift > 55 {
            return Err(PolylineError::Overflow { offset: *offset });
        }

        let chunk = i64::from(byte - 63);
        *offset += 1;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push(char::from((0x20 | (v & 0x1f)) as u8 + 63));
        v >>= 5;
    }
    out.push(char::from(v as u8 + 63));
}
