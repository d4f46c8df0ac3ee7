// filepath: src/overlay/frame.rs
use crate::geometry::Point;

/// Everything the renderer needs to know about one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    /// Trail from the tick before, drawn at half size and opacity
    pub previous_points: Vec<Point>,
    /// Points reported since the previous tick, in arrival order
    pub points_to_draw: Vec<Point>,
    /// Laser offset from the viewfinder's top edge
    pub laser_offset: i32,
    pub show_result: bool,
    pub phase: u64,
}

impl RenderFrame {
    /// Whether there is anything to draw besides the viewfinder and laser
    pub fn has_markers(&self) -> bool {
        !self.points_to_draw.is_empty() || !self.previous_points.is_empty()
    }
}
