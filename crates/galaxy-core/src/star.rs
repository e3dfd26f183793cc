use serde::{Deserialize, Serialize};

use crate::memory::layout::star;

/// One decoded entry of the star table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StarRecord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub name: String,
}

impl StarRecord {
    /// Build a record from raw coordinates.
    ///
    /// Coordinates are whole numbers stored as `f32`; the fractional part is
    /// discarded, never rounded.
    pub fn from_raw(x: f32, y: f32, z: f32, name: String) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
            z: z as i32,
            name,
        }
    }
}

/// Whether a raw name-length field is in the accepted range
#[inline]
pub fn is_valid_name_length(len: u16) -> bool {
    (star::MIN_NAME_LENGTH..=star::MAX_NAME_LENGTH).contains(&len)
}

/// Decode name bytes as ASCII.
///
/// Bytes outside ASCII become `?` and trailing NULs are dropped. Returns
/// `None` for names that are blank after decoding.
pub fn decode_name(bytes: &[u8]) -> Option<String> {
    let name: String = bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect();
    let name = name.trim_end_matches('\0');

    if name.trim().is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
