// filepath: src/overlay/result.rs
//! Captured decode shown while scanning is paused

use crate::draw::buffer_len;

/// An image held by the overlay while a decode result is on screen.
///
/// The tracker owns at most one at a time. Whatever the image holds is
/// released when it is dropped, either on replacement, on resume or when
/// the tracker goes away.
pub trait ResultImage: Send {
    fn dimensions(&self) -> (u32, u32);
}

/// Plain RGBA capture of the decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Snapshot {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), buffer_len(width, height));
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A snapshot filled with a single color
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = color
            .iter()
            .copied()
            .cycle()
            .take(buffer_len(width, height))
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl ResultImage for Snapshot {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_snapshot_fills_every_pixel() {
        let snap = Snapshot::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(snap.dimensions(), (3, 2));
        assert_eq!(snap.pixels().len(), 24);
        assert!(snap.pixels().chunks_exact(4).all(|p| p == [1, 2, 3, 4]));
    }
}
