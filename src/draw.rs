// filepath: src/draw.rs
//! Drawing utilities for scan-overlay
//!
//! A small software canvas over an RGBA buffer with just the shapes the
//! viewfinder overlay needs: rectangles, rounded rectangles, circles and a
//! horizontal gradient band. Every shape takes a blend mode so the overlay
//! can punch holes into the mask and slide strokes underneath each other.

/// How a shape's color combines with what is already on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Replace the destination
    Src,
    /// Normal alpha compositing, source on top
    SrcOver,
    /// Source goes underneath the destination
    DstOver,
    /// Make the covered pixels fully transparent
    Clear,
}

/// Rectangle with fractional edges, used for shape bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Overlap of two rects; empty when they do not meet
    pub fn intersect(&self, other: &RectF) -> Self {
        Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    /// Grow (or shrink, for negative amounts) on every side
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    fn contains_rounded(&self, x: f32, y: f32, radius: f32) -> bool {
        if x < self.left || x >= self.right || y < self.top || y >= self.bottom {
            return false;
        }
        let radius = radius.min(self.width() / 2.0).min(self.height() / 2.0);
        if radius <= 0.0 {
            return true;
        }
        let cx = x.clamp(self.left + radius, self.right - radius);
        let cy = y.clamp(self.top + radius, self.bottom - radius);
        let (dx, dy) = (x - cx, y - cy);
        dx * dx + dy * dy <= radius * radius
    }
}

/// Bytes needed for an RGBA buffer of the given size
pub fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

/// Combine one source pixel into a destination pixel
pub fn blend(dst: [u8; 4], src: [u8; 4], mode: BlendMode) -> [u8; 4] {
    match mode {
        BlendMode::Src => src,
        BlendMode::Clear => [0, 0, 0, 0],
        BlendMode::SrcOver => composite(src, dst),
        BlendMode::DstOver => composite(dst, src),
    }
}

// Porter-Duff "over" on straight (non-premultiplied) alpha
fn composite(top: [u8; 4], bottom: [u8; 4]) -> [u8; 4] {
    let ta = top[3] as f32 / 255.0;
    let ba = bottom[3] as f32 / 255.0;
    let out_a = ta + ba * (1.0 - ta);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (top[i] as f32 * ta + bottom[i] as f32 * ba * (1.0 - ta)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    out
}

fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t).round() as u8;
    }
    out
}

/// Canvas abstraction over an RGBA pixel buffer
pub struct Canvas<'a> {
    buffer: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    /// Create a new canvas from a raw buffer
    pub fn new(buffer: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert!(buffer.len() >= buffer_len(width, height));
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Get the width of the canvas
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height of the canvas
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read back a pixel
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.buffer[idx..idx + 4]);
        Some(out)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        (idx + 3 < self.buffer.len()).then_some(idx)
    }

    fn put(&mut self, x: i32, y: i32, color: [u8; 4], mode: BlendMode) {
        if let Some(idx) = self.index(x, y) {
            let mut dst = [0u8; 4];
            dst.copy_from_slice(&self.buffer[idx..idx + 4]);
            self.buffer[idx..idx + 4].copy_from_slice(&blend(dst, color, mode));
        }
    }

    /// Visit every pixel whose center lies in `bounds` and passes `inside`
    fn shade<F, C>(&mut self, bounds: RectF, mode: BlendMode, inside: F, mut color: C)
    where
        F: Fn(f32, f32) -> bool,
        C: FnMut(f32, f32) -> [u8; 4],
    {
        if bounds.is_empty() {
            return;
        }
        let x_start = (bounds.left.floor() as i32).max(0);
        let y_start = (bounds.top.floor() as i32).max(0);
        let x_end = (bounds.right.ceil() as i32).min(self.width as i32);
        let y_end = (bounds.bottom.ceil() as i32).min(self.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                if inside(px, py) {
                    let c = color(px, py);
                    self.put(x, y, c, mode);
                }
            }
        }
    }

    /// Overwrite the whole canvas with one color
    pub fn fill(&mut self, color: [u8; 4]) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    /// Draw a filled rectangle
    pub fn fill_rect(&mut self, rect: RectF, color: [u8; 4], mode: BlendMode) {
        self.fill_round_rect(rect, 0.0, color, mode);
    }

    /// Draw a filled rectangle with circular corners
    pub fn fill_round_rect(&mut self, rect: RectF, radius: f32, color: [u8; 4], mode: BlendMode) {
        self.shade(
            rect,
            mode,
            |x, y| rect.contains_rounded(x, y, radius),
            |_, _| color,
        );
    }

    /// Outline a rounded rectangle with a stroke centered on its edge
    pub fn stroke_round_rect(
        &mut self,
        rect: RectF,
        radius: f32,
        stroke_width: f32,
        color: [u8; 4],
        mode: BlendMode,
    ) {
        let half = stroke_width / 2.0;
        let outer = rect.inset(-half);
        let inner = rect.inset(half);
        // square corners stay square on the outside too
        let outer_radius = if radius > 0.0 { radius + half } else { 0.0 };
        let inner_radius = (radius - half).max(0.0);
        self.shade(
            outer,
            mode,
            |x, y| {
                outer.contains_rounded(x, y, outer_radius)
                    && (inner.is_empty() || !inner.contains_rounded(x, y, inner_radius))
            },
            |_, _| color,
        );
    }

    /// Draw a filled circle
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: [u8; 4], mode: BlendMode) {
        if radius <= 0.0 {
            return;
        }
        let bounds = RectF::new(cx - radius, cy - radius, cx + radius, cy + radius);
        self.shade(
            bounds,
            mode,
            |x, y| {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= radius * radius
            },
            |_, _| color,
        );
    }

    /// Fill a rectangle with a left-to-right gradient through three colors
    /// placed at 0, 0.5 and 1 along `gradient_span`. Outside the span the end
    /// colors are held.
    pub fn fill_gradient_band(
        &mut self,
        rect: RectF,
        gradient_span: (f32, f32),
        stops: [[u8; 4]; 3],
        mode: BlendMode,
    ) {
        let (start, end) = gradient_span;
        let span = (end - start).max(f32::EPSILON);
        self.shade(
            rect,
            mode,
            |x, y| x >= rect.left && x < rect.right && y >= rect.top && y < rect.bottom,
            |x, _| {
                let t = ((x - start) / span).clamp(0.0, 1.0);
                if t < 0.5 {
                    lerp_color(stops[0], stops[1], t * 2.0)
                } else {
                    lerp_color(stops[1], stops[2], (t - 0.5) * 2.0)
                }
            },
        );
    }
}
