// filepath: src/render.rs
//! Paints the scanning overlay
//!
//! Takes one tick's `RenderFrame` and the current framing and draws the
//! tinted mask, the viewfinder with its corner horns, the laser band and
//! the candidate point markers onto a `Canvas`.

use log::trace;
use std::time::Duration;

use crate::config::{MarkerConfig, OverlayConfig, Palette, ViewfinderConfig};
use crate::draw::{BlendMode, Canvas, RectF};
use crate::framing::Framing;
use crate::geometry::{FramingRect, Point, PreviewMapping};
use crate::overlay::RenderFrame;

/// Region the host should redraw, and when
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    pub region: FramingRect,
    pub after: Duration,
}

pub struct OverlayRenderer {
    palette: Palette,
    viewfinder: ViewfinderConfig,
    markers: MarkerConfig,
    tick_interval: Duration,
}

fn with_alpha(color: [u8; 4], alpha: u8) -> [u8; 4] {
    [color[0], color[1], color[2], alpha]
}

impl OverlayRenderer {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            palette: config.palette(),
            viewfinder: config.viewfinder.clone(),
            markers: config.markers.clone(),
            tick_interval: config.animation.tick_interval(),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn render(&self, canvas: &mut Canvas, frame: &RenderFrame, framing: &Framing) -> Invalidation {
        let display = framing.display;
        let rect = RectF::new(
            display.left() as f32,
            display.top() as f32,
            display.right() as f32,
            display.bottom() as f32,
        );
        let tint = if frame.show_result {
            self.palette.result
        } else {
            self.palette.mask
        };

        canvas.fill(tint);
        canvas.fill_round_rect(rect, self.viewfinder.corner_radius, tint, BlendMode::Clear);
        self.draw_horns(canvas, rect);

        let vf = &self.viewfinder;
        canvas.stroke_round_rect(
            rect,
            vf.corner_radius,
            vf.border_width,
            self.palette.border,
            BlendMode::DstOver,
        );
        // close the gap between the border and the mask
        canvas.stroke_round_rect(
            rect.inset(-vf.gap_width / 2.0),
            vf.corner_radius,
            vf.gap_width,
            tint,
            BlendMode::DstOver,
        );

        if !frame.show_result {
            self.draw_laser(canvas, rect, frame.laser_offset);
        }
        if frame.has_markers() {
            self.draw_markers(canvas, frame, framing);
        }

        trace!(
            "Rendered tick {} ({} points, {} trail)",
            frame.phase,
            frame.points_to_draw.len(),
            frame.previous_points.len()
        );

        Invalidation {
            region: display,
            after: self.tick_interval,
        }
    }

    /// Corner brackets: a thick rounded outline with the middle of every
    /// edge cut away, plus a rounded cap slid under each horn's end.
    fn draw_horns(&self, canvas: &mut Canvas, rect: RectF) {
        let vf = &self.viewfinder;
        let half = vf.horn_width / 2.0;
        let reach = vf.horn_length;
        let cap = vf.horn_cap_length / 2.0;
        let color = self.palette.horn;

        canvas.stroke_round_rect(rect, vf.corner_radius, vf.horn_width, color, BlendMode::Src);
        canvas.fill_rect(
            RectF::new(rect.left + reach, rect.top - half, rect.right - reach, rect.bottom + half),
            color,
            BlendMode::Clear,
        );
        canvas.fill_rect(
            RectF::new(rect.left - half, rect.top + reach, rect.right + half, rect.bottom - reach),
            color,
            BlendMode::Clear,
        );

        for y in [rect.top, rect.bottom] {
            for x in [rect.left + reach, rect.right - reach] {
                let cap_rect = RectF::new(x - cap, y - half, x + cap, y + half);
                canvas.fill_round_rect(cap_rect, vf.corner_radius, color, BlendMode::DstOver);
            }
        }
        for x in [rect.left, rect.right] {
            for y in [rect.top + reach, rect.bottom - reach] {
                let cap_rect = RectF::new(x - half, y - cap, x + half, y + cap);
                canvas.fill_round_rect(cap_rect, vf.corner_radius, color, BlendMode::DstOver);
            }
        }
    }

    fn draw_laser(&self, canvas: &mut Canvas, rect: RectF, offset: i32) {
        let thickness = self.viewfinder.laser_thickness;
        let above = (thickness / 2.0).floor();
        let center = rect.top + offset as f32;
        let band = RectF::new(
            rect.left + 1.0,
            center - above,
            rect.right - 1.0,
            center - above + thickness,
        );
        // stay inside the border at the top and bottom of the sweep
        let visible = band.intersect(&rect.inset(self.viewfinder.border_width / 2.0));
        canvas.fill_gradient_band(visible, (band.left, band.right), self.palette.laser, BlendMode::Src);
    }

    fn draw_markers(&self, canvas: &mut Canvas, frame: &RenderFrame, framing: &Framing) {
        let mapping = PreviewMapping::new(&framing.display, &framing.preview);
        let size = self.markers.point_size;
        let opacity = self.markers.opacity;
        let color = self.palette.result_point;

        let mut draw = |points: &[Point], radius: f32, alpha: u8| {
            for point in points {
                let (x, y) = mapping.map_to_pixel(*point);
                canvas.fill_circle(
                    x as f32,
                    y as f32,
                    radius,
                    with_alpha(color, alpha),
                    BlendMode::SrcOver,
                );
            }
        };

        draw(&frame.points_to_draw, size, opacity);
        draw(&frame.previous_points, size / 2.0, opacity / 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: u32 = 300;

    fn framing() -> Framing {
        Framing {
            display: FramingRect::new(50, 50, 250, 250).unwrap(),
            preview: FramingRect::new(0, 0, 200, 200).unwrap(),
        }
    }

    fn render(frame: &RenderFrame) -> (Vec<u8>, Invalidation) {
        let renderer = OverlayRenderer::new(&OverlayConfig::default());
        let mut buffer = vec![0u8; (SIZE * SIZE * 4) as usize];
        let invalidation = {
            let mut canvas = Canvas::new(&mut buffer, SIZE, SIZE);
            renderer.render(&mut canvas, frame, &framing())
        };
        (buffer, invalidation)
    }

    fn pixel(buffer: &mut [u8], x: i32, y: i32) -> [u8; 4] {
        Canvas::new(buffer, SIZE, SIZE).pixel(x, y).unwrap()
    }

    fn live_frame() -> RenderFrame {
        RenderFrame {
            laser_offset: 10,
            phase: 1,
            ..Default::default()
        }
    }

    #[test]
    fn mask_outside_clear_inside() {
        let (mut buf, invalidation) = render(&live_frame());
        let palette = Palette::default();
        assert_eq!(pixel(&mut buf, 5, 5), palette.mask);
        assert_eq!(pixel(&mut buf, 290, 150), palette.mask);
        assert_eq!(pixel(&mut buf, 150, 150), [0, 0, 0, 0]);
        assert_eq!(invalidation.region, framing().display);
        assert_eq!(invalidation.after, Duration::from_millis(16));
    }

    #[test]
    fn horns_at_corners_border_between() {
        let (mut buf, _) = render(&live_frame());
        let palette = Palette::default();
        assert_eq!(pixel(&mut buf, 70, 50), palette.horn);
        assert_eq!(pixel(&mut buf, 50, 70), palette.horn);
        assert_eq!(pixel(&mut buf, 150, 50), palette.border);
        assert_eq!(pixel(&mut buf, 250, 150), palette.border);
    }

    #[test]
    fn laser_band_follows_offset() {
        let (mut buf, _) = render(&live_frame());
        let laser = pixel(&mut buf, 150, 60);
        assert!(laser[3] > 240, "laser alpha {}", laser[3]);
        assert_eq!(&laser[..3], &Palette::default().laser[1][..3]);
        assert_eq!(pixel(&mut buf, 150, 70), [0, 0, 0, 0]);
    }

    #[test]
    fn laser_at_top_stays_inside_viewfinder() {
        let frame = RenderFrame {
            laser_offset: 0,
            ..live_frame()
        };
        let (mut buf, _) = render(&frame);
        let palette = Palette::default();
        assert_eq!(pixel(&mut buf, 150, 47), palette.mask);
        assert_eq!(pixel(&mut buf, 150, 50), palette.border);
        assert_eq!(pixel(&mut buf, 70, 49), palette.horn);
        assert!(pixel(&mut buf, 150, 52)[3] > 240);
    }

    #[test]
    fn laser_at_bottom_stays_inside_viewfinder() {
        let frame = RenderFrame {
            laser_offset: 200,
            ..live_frame()
        };
        let (mut buf, _) = render(&frame);
        let palette = Palette::default();
        assert_eq!(pixel(&mut buf, 150, 252), palette.mask);
        assert_eq!(pixel(&mut buf, 150, 250), palette.border);
        assert_eq!(pixel(&mut buf, 70, 251), palette.horn);
        assert!(pixel(&mut buf, 150, 247)[3] > 240);
    }

    #[test]
    fn frozen_result_swaps_tint_and_hides_laser() {
        let frame = RenderFrame {
            show_result: true,
            ..live_frame()
        };
        let (mut buf, _) = render(&frame);
        assert_eq!(pixel(&mut buf, 5, 5), Palette::default().result);
        assert_eq!(pixel(&mut buf, 150, 60), [0, 0, 0, 0]);
    }

    #[test]
    fn markers_and_trail() {
        let frame = RenderFrame {
            points_to_draw: vec![Point::new(20.0, 20.0)],
            previous_points: vec![Point::new(40.0, 40.0)],
            ..live_frame()
        };
        let (mut buf, _) = render(&frame);
        let color = Palette::default().result_point;
        assert_eq!(pixel(&mut buf, 70, 70), with_alpha(color, 0xa0));
        assert_eq!(pixel(&mut buf, 90, 90), with_alpha(color, 0x50));
        // trail markers are half the size
        assert_eq!(pixel(&mut buf, 90, 95), [0, 0, 0, 0]);
        assert_ne!(pixel(&mut buf, 70, 75), [0, 0, 0, 0]);
    }
}
