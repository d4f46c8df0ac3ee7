// filepath: src/overlay/tracker.rs
//! Overlay state tracker
//!
//! Shared between the decoder, which reports candidate points from its own
//! thread, and the render loop, which takes them once per tick. One mutex
//! guards all of it so a tick's swap never races an append.

use log::debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::geometry::{FramingRect, LaserScan, Point, LASER_STEP};
use crate::overlay::{RenderFrame, ResultImage};

/// Most candidate points held between two ticks
pub const MAX_RESULT_POINTS: usize = 20;

#[derive(Default)]
struct OverlayState {
    current_points: Vec<Point>,
    previous_points: Vec<Point>,
    animation_phase: u64,
    laser: LaserScan,
    frozen_result: Option<Box<dyn ResultImage>>,
}

pub struct OverlayTracker {
    state: Mutex<OverlayState>,
}

impl OverlayTracker {
    pub fn new() -> Self {
        Self::with_laser_step(LASER_STEP)
    }

    pub fn with_laser_step(step: i32) -> Self {
        Self {
            state: Mutex::new(OverlayState {
                current_points: Vec::with_capacity(5),
                laser: LaserScan::new(step),
                ..Default::default()
            }),
        }
    }

    // A panic on another thread leaves nothing half-written here, so a
    // poisoned lock is still usable.
    fn state(&self) -> MutexGuard<'_, OverlayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a candidate point for the next tick.
    ///
    /// Once the queue is full it is cut back to its newest half before the
    /// point is appended.
    pub fn add_possible_point(&self, point: Point) {
        let mut state = self.state();
        let points = &mut state.current_points;
        if points.len() >= MAX_RESULT_POINTS {
            let excess = points.len() - MAX_RESULT_POINTS / 2;
            points.drain(..excess);
        }
        points.push(point);
    }

    /// Take this tick's points and move the animation forward
    pub fn advance_tick(&self, viewfinder: &FramingRect) -> RenderFrame {
        let mut state = self.state();

        let points_to_draw = std::mem::take(&mut state.current_points);
        let previous_points = if points_to_draw.is_empty() {
            std::mem::take(&mut state.previous_points)
        } else {
            std::mem::replace(&mut state.previous_points, points_to_draw.clone())
        };

        state.animation_phase += 1;
        let show_result = state.frozen_result.is_some();
        let laser_offset = if show_result {
            state.laser.current(viewfinder.height())
        } else {
            state.laser.advance(viewfinder.height())
        };

        RenderFrame {
            previous_points,
            points_to_draw,
            laser_offset,
            show_result,
            phase: state.animation_phase,
        }
    }

    /// Freeze the overlay on a decoded image, releasing any earlier one.
    ///
    /// Images are released with the lock dropped, so a release may call
    /// back into the tracker.
    pub fn set_result(&self, image: Box<dyn ResultImage>) {
        let previous = self.state().frozen_result.take();
        Self::release(previous);

        debug!("Holding result image {:?}", image.dimensions());
        // another set_result may have landed in between
        let displaced = self.state().frozen_result.replace(image);
        Self::release(displaced);
    }

    /// Release the held result and go back to live scanning
    pub fn clear_result(&self) {
        let image = self.state().frozen_result.take();
        Self::release(image);
    }

    fn release(image: Option<Box<dyn ResultImage>>) {
        if let Some(image) = image {
            debug!("Releasing result image {:?}", image.dimensions());
            drop(image);
        }
    }

    pub fn has_result(&self) -> bool {
        self.state().frozen_result.is_some()
    }

    pub fn result_dimensions(&self) -> Option<(u32, u32)> {
        self.state()
            .frozen_result
            .as_ref()
            .map(|image| image.dimensions())
    }

    /// Points queued since the last tick
    pub fn pending_points(&self) -> Vec<Point> {
        self.state().current_points.clone()
    }

    /// Trail carried into the next tick
    pub fn previous_points(&self) -> Vec<Point> {
        self.state().previous_points.clone()
    }

    pub fn animation_phase(&self) -> u64 {
        self.state().animation_phase
    }
}

impl Default for OverlayTracker {
    fn default() -> Self {
        Self::new()
    }
}
