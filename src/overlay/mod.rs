// filepath: src/overlay/mod.rs
//! Overlay state for the scanning screen
//!
//! The tracker collects candidate points from the decoder, advances the
//! laser animation once per render tick and holds the frozen result while
//! a decode is on screen.

mod frame;
mod result;
mod tracker;

pub use frame::RenderFrame;
pub use result::{ResultImage, Snapshot};
pub use tracker::{OverlayTracker, MAX_RESULT_POINTS};
