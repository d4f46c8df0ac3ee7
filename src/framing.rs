// filepath: src/framing.rs
//! Where the viewfinder sits
//!
//! The overlay needs the viewfinder in two coordinate spaces every tick: on
//! the display, and in the camera preview the decoder works on. Either may
//! be unavailable until the camera session settles.

use log::warn;

use crate::geometry::FramingRect;

/// The viewfinder in display space and in preview space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    pub display: FramingRect,
    pub preview: FramingRect,
}

/// Supplies the current framing to the render loop
pub trait FramingSource: Send {
    /// `None` until both rects are known; the tick is skipped meanwhile
    fn framing(&self) -> Option<Framing>;

    /// The drawing surface changed size
    fn display_resized(&mut self, _width: u32, _height: u32) {
        // Default implementation: framing does not depend on the display size
    }
}

/// Framing handed in from outside, e.g. by a camera manager that already
/// computed both rects
#[derive(Debug, Clone, Default)]
pub struct FixedFraming {
    framing: Option<Framing>,
}

impl FixedFraming {
    pub fn new(framing: Framing) -> Self {
        Self {
            framing: Some(framing),
        }
    }

    /// A source that is not ready yet
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn set(&mut self, framing: Option<Framing>) {
        self.framing = framing;
    }
}

impl FramingSource for FixedFraming {
    fn framing(&self) -> Option<Framing> {
        self.framing
    }
}

const MIN_FRAME_WIDTH: u32 = 240;
const MAX_FRAME_WIDTH: u32 = 1200;
const MIN_FRAME_HEIGHT: u32 = 240;
const MAX_FRAME_HEIGHT: u32 = 675;

/// 5/8 of the available size, kept within [min, max]
fn desired_dimension(resolution: u32, min: u32, max: u32) -> u32 {
    (resolution * 5 / 8).clamp(min, max)
}

/// Centers a viewfinder on the display and projects it into the preview
#[derive(Debug, Clone, Default)]
pub struct CameraFraming {
    screen: Option<(u32, u32)>,
    preview: Option<(u32, u32)>,
}

impl CameraFraming {
    pub fn new(screen: (u32, u32), preview: (u32, u32)) -> Self {
        Self {
            screen: Some(screen),
            preview: Some(preview),
        }
    }

    /// Called once the camera reports its preview size
    pub fn set_preview_resolution(&mut self, preview: Option<(u32, u32)>) {
        self.preview = preview;
    }

    pub fn set_screen_resolution(&mut self, screen: Option<(u32, u32)>) {
        self.screen = screen;
    }
}

impl FramingSource for CameraFraming {
    fn framing(&self) -> Option<Framing> {
        let (screen_w, screen_h) = self.screen?;
        let (preview_w, preview_h) = self.preview?;
        if screen_w == 0 || screen_h == 0 {
            return None;
        }

        let width = desired_dimension(screen_w, MIN_FRAME_WIDTH, MAX_FRAME_WIDTH);
        let height = desired_dimension(screen_h, MIN_FRAME_HEIGHT, MAX_FRAME_HEIGHT);
        let left = (screen_w as i32 - width as i32) / 2;
        let top = (screen_h as i32 - height as i32) / 2;
        let display = FramingRect::from_origin(left, top, width, height).ok()?;

        let project = |v: i32, camera: u32, screen: u32| {
            (v as i64 * camera as i64 / screen as i64) as i32
        };
        let preview = match FramingRect::new(
            project(display.left(), preview_w, screen_w),
            project(display.top(), preview_h, screen_h),
            project(display.right(), preview_w, screen_w),
            project(display.bottom(), preview_h, screen_h),
        ) {
            Ok(rect) => rect,
            Err(e) => {
                warn!("Preview {preview_w}x{preview_h} too small for viewfinder: {e}");
                return None;
            }
        };

        Some(Framing { display, preview })
    }

    fn display_resized(&mut self, width: u32, height: u32) {
        self.screen = Some((width, height));
    }
}
