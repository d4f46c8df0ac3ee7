// filepath: src/geometry.rs
//! Viewfinder geometry
//!
//! Points in preview space, framing rectangles, the preview-to-display
//! mapping and the laser line's sawtooth motion. Nothing here draws.

use crate::error::{Error, Result};

/// Distance the laser moves down the viewfinder on every tick
pub const LASER_STEP: i32 = 5;

/// A candidate point in camera preview pixels, relative to the preview
/// framing rect's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with a positive width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramingRect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl FramingRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Result<Self> {
        if right <= left || bottom <= top {
            return Err(Error::InvalidRect {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Build a rect from its origin and size
    pub fn from_origin(left: i32, top: i32, width: u32, height: u32) -> Result<Self> {
        Self::new(left, top, left + width as i32, top + height as i32)
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.left as f32 + self.width() as f32 / 2.0,
            self.top as f32 + self.height() as f32 / 2.0,
        )
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Maps preview-space points onto the display-space viewfinder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewMapping {
    scale_x: f32,
    scale_y: f32,
    offset_x: f32,
    offset_y: f32,
}

impl PreviewMapping {
    /// Only the size ratio between the two rects matters for scaling; the
    /// display rect's origin is the translation.
    pub fn new(display: &FramingRect, preview: &FramingRect) -> Self {
        Self {
            scale_x: display.width() as f32 / preview.width() as f32,
            scale_y: display.height() as f32 / preview.height() as f32,
            offset_x: display.left() as f32,
            offset_y: display.top() as f32,
        }
    }

    pub fn scale(&self) -> (f32, f32) {
        (self.scale_x, self.scale_y)
    }

    /// Map to whole display pixels, truncating toward zero after scaling
    pub fn map_to_pixel(&self, point: Point) -> (i32, i32) {
        (
            self.offset_x as i32 + (point.x * self.scale_x) as i32,
            self.offset_y as i32 + (point.y * self.scale_y) as i32,
        )
    }
}

/// Laser line position, measured down from the viewfinder's top edge.
///
/// Moves in a sawtooth: it starts at the vertical midpoint, steps down by
/// a fixed amount every tick and jumps back to the top once a step would
/// carry it past the bottom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaserScan {
    offset: Option<i32>,
    step: i32,
}

impl LaserScan {
    /// Steps below one are raised to one so the laser always moves down
    pub fn new(step: i32) -> Self {
        Self {
            offset: None,
            step: step.max(1),
        }
    }

    /// Resume the sawtooth from a known offset
    pub fn starting_at(offset: i32, step: i32) -> Self {
        Self {
            offset: Some(offset),
            ..Self::new(step)
        }
    }

    /// Offset to draw at for a viewfinder of the given height without moving
    pub fn current(&self, height: i32) -> i32 {
        self.offset.unwrap_or(height / 2)
    }

    pub fn advance(&mut self, height: i32) -> i32 {
        let next = self.current(height) + self.step;
        let next = if next > height { 0 } else { next };
        self.offset = Some(next);
        next
    }
}
