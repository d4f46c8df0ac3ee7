// filepath: src/app.rs
//! Main application logic for scan-overlay
//!
//! Ties the tracker, the framing source and the renderer together around
//! one RGBA surface. The host calls `tick` once per render cycle and feeds
//! decoder events in between.

use log::{debug, info};
use std::sync::Arc;

use crate::config::OverlayConfig;
use crate::draw::{buffer_len, Canvas};
use crate::framing::FramingSource;
use crate::geometry::Point;
use crate::overlay::{OverlayTracker, Snapshot};
use crate::render::{Invalidation, OverlayRenderer};

/// What the decoding pipeline reports back to the scanning screen
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// A feature point that might belong to a barcode
    CandidatePoint(Point),
    /// A barcode was decoded from this frame; freeze on it
    Decoded(Snapshot),
    /// Go back to live scanning
    Resume,
}

pub struct ScannerApp {
    tracker: Arc<OverlayTracker>,
    framing: Box<dyn FramingSource>,
    renderer: OverlayRenderer,
    surface: Vec<u8>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    ticks_rendered: u64,
    ticks_skipped: u64,
    last_invalidation: Option<Invalidation>,
}

impl ScannerApp {
    pub fn new(
        config: &OverlayConfig,
        framing: Box<dyn FramingSource>,
        width: u32,
        height: u32,
    ) -> Self {
        info!("Creating {width}x{height} overlay surface");
        Self {
            tracker: Arc::new(OverlayTracker::with_laser_step(config.animation.laser_step)),
            framing,
            renderer: OverlayRenderer::new(config),
            surface: vec![0; buffer_len(width, height)],
            width,
            height,
            ticks_rendered: 0,
            ticks_skipped: 0,
            last_invalidation: None,
        }
    }

    /// Handle for the decoder thread to report candidate points on
    pub fn tracker(&self) -> Arc<OverlayTracker> {
        Arc::clone(&self.tracker)
    }

    /// Run one render cycle. Returns `None` when the framing is not ready
    /// yet, in which case nothing is drawn and the tracker is left alone.
    pub fn tick(&mut self) -> Option<Invalidation> {
        let Some(framing) = self.framing.framing() else {
            debug!("tick() called before framing is ready, skipping");
            self.ticks_skipped += 1;
            return None;
        };

        let frame = self.tracker.advance_tick(&framing.display);
        let mut canvas = Canvas::new(&mut self.surface, self.width, self.height);
        let invalidation = self.renderer.render(&mut canvas, &frame, &framing);

        self.ticks_rendered += 1;
        self.last_invalidation = Some(invalidation);
        Some(invalidation)
    }

    pub fn handle_decoder_event(&mut self, event: DecoderEvent) {
        match event {
            DecoderEvent::CandidatePoint(point) => self.tracker.add_possible_point(point),
            DecoderEvent::Decoded(snapshot) => {
                info!("Barcode decoded, freezing overlay");
                self.tracker.set_result(Box::new(snapshot));
            }
            DecoderEvent::Resume => {
                info!("Resuming live scanning");
                self.tracker.clear_result();
            }
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        info!("Resizing overlay surface to {width}x{height}");
        self.width = width;
        self.height = height;
        self.surface = vec![0; buffer_len(width, height)];
        self.framing.display_resized(width, height);
    }

    pub fn surface(&self) -> &[u8] {
        &self.surface
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn ticks_rendered(&self) -> u64 {
        self.ticks_rendered
    }

    pub fn ticks_skipped(&self) -> u64 {
        self.ticks_skipped
    }

    pub fn last_invalidation(&self) -> Option<Invalidation> {
        self.last_invalidation
    }

    pub fn palette(&self) -> &crate::config::Palette {
        self.renderer.palette()
    }
}
