//! Synthetic star tables for scan tests

use crate::memory::layout::star;
use crate::star::StarRecord;

/// Encode one entry the way the host lays it out
pub fn encode_star(x: f32, y: f32, z: f32, name: &str) -> [u8; star::ENTRY_SIZE as usize] {
    let mut entry = [0u8; star::ENTRY_SIZE as usize];
    entry[0..4].copy_from_slice(&x.to_le_bytes());
    entry[4..8].copy_from_slice(&y.to_le_bytes());
    entry[8..12].copy_from_slice(&z.to_le_bytes());
    entry[12..14].copy_from_slice(&(name.len() as u16).to_le_bytes());
    entry[14..14 + name.len()].copy_from_slice(name.as_bytes());
    entry
}

enum Segment {
    Stars(usize),
    Invalid(usize),
}

/// Builds a byte image of a star table.
///
/// The first star carries the landmark; star `i` otherwise looks like
/// [`GalaxyBuilder::expected_star`]. Trailing padding keeps the final entries
/// clear of the walk limit.
pub struct GalaxyBuilder {
    landmark: String,
    leading: usize,
    segments: Vec<Segment>,
}

impl GalaxyBuilder {
    pub const TRAILING_PADDING: usize = 64;

    pub fn new(landmark: &str) -> Self {
        Self {
            landmark: landmark.to_string(),
            leading: 0,
            segments: Vec::new(),
        }
    }

    /// Zero bytes before the first entry
    pub fn leading(mut self, bytes: usize) -> Self {
        self.leading = bytes;
        self
    }

    pub fn stars(mut self, count: usize) -> Self {
        self.segments.push(Segment::Stars(count));
        self
    }

    /// Entries with a zero name-length field
    pub fn invalid(mut self, count: usize) -> Self {
        self.segments.push(Segment::Invalid(count));
        self
    }

    pub fn expected_star(landmark: &str, index: usize) -> StarRecord {
        let name = if index == 0 {
            landmark.to_string()
        } else {
            format!("Star-{:05}", index)
        };
        StarRecord {
            x: index as i32,
            y: -(index as i32) * 2,
            z: (index % 100) as i32 - 50,
            name,
        }
    }

    pub fn build(self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.leading];
        let mut index = 0usize;
        for segment in &self.segments {
            match *segment {
                Segment::Stars(count) => {
                    for _ in 0..count {
                        let expected = Self::expected_star(&self.landmark, index);
                        bytes.extend_from_slice(&encode_star(
                            expected.x as f32 + 0.25,
                            expected.y as f32,
                            expected.z as f32,
                            &expected.name,
                        ));
                        index += 1;
                    }
                }
                Segment::Invalid(count) => {
                    bytes.resize(bytes.len() + count * star::ENTRY_SIZE as usize, 0);
                }
            }
        }
        bytes.resize(bytes.len() + Self::TRAILING_PADDING, 0);
        bytes
    }
}
