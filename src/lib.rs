pub mod app;
pub mod config;
pub mod draw;
pub mod error;
pub mod framing;
pub mod geometry;
pub mod host;
pub mod overlay;
pub mod render;

// Re-export for hosts embedding the overlay
pub use crate::app::{DecoderEvent, ScannerApp};
pub use crate::draw::Canvas;
pub use crate::error::{Error, Result};
pub use crate::framing::{Framing, FramingSource};
pub use crate::geometry::{FramingRect, Point, PreviewMapping};
pub use crate::overlay::{OverlayTracker, RenderFrame, ResultImage};
