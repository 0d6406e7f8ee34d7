use crate::geometry::{self, Aabb};

// ============================================================================
// Colors
// ============================================================================

/// Linear RGB color with channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// RGB plus alpha; the alpha channel is only ever written by clears and
/// point writes, never by blending
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Quantize a [0, 1] channel to a byte
#[inline]
fn to_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], px: Rgba) {
    dest[0] = to_byte(px.a); // A
    dest[1] = to_byte(px.b); // B
    dest[2] = to_byte(px.g); // G
    dest[3] = to_byte(px.r); // R
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Float RGBA pixel buffer for software rendering.
///
/// Row 0 is the bottom of the picture; [`PixelBuffer::write_texture_bytes`]
/// flips rows for the top-down window texture.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixels: Vec<Rgba>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create an opaque black buffer
    ///
    /// # Panics
    /// Panics if either dimension is zero
    pub fn with_size(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "pixel buffer needs positive dimensions, got {}x{}",
            width,
            height
        );
        Self {
            pixels: vec![Rgba::new(0.0, 0.0, 0.0, 1.0); (width * height) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// Clear to a solid color, alpha included
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Set a single pixel (bounds checked), alpha becomes opaque
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            self.pixels[idx] = Rgba::new(color.r, color.g, color.b, 1.0);
        }
    }

    /// Blend `color` over the pixel with weight `alpha` (bounds checked).
    /// The destination alpha channel is left as it is.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            let px = &mut self.pixels[idx];
            let keep = 1.0 - alpha;
            px.r = px.r * keep + color.r * alpha;
            px.g = px.g * keep + color.g * alpha;
            px.b = px.b * keep + color.b * alpha;
        }
    }

    /// Read a pixel from the buffer (bounds checked)
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.pixel_index(x as u32, y as u32)])
        } else {
            None
        }
    }

    // ========================================================================
    // Anti-aliased SDF primitives
    // Composes: geometry AABB + SDF → coverage → blend_pixel
    // ========================================================================

    /// Blend `color` over every pixel of `aabb` weighted by the coverage of `sdf`
    fn fill_sdf(&mut self, aabb: Aabb, color: Rgb, sdf: impl Fn(f32, f32) -> f32) {
        for (x, y) in aabb.pixels() {
            let alpha = geometry::coverage(sdf(x as f32, y as f32));
            self.blend_pixel(x, y, color, alpha);
        }
    }

    /// Line segment `a-b` with round caps and half thickness `r`
    pub fn draw_line(&mut self, ax: f32, ay: f32, bx: f32, by: f32, r: f32, color: Rgb) {
        let aabb = geometry::capsule_aabb(ax, ay, bx, by, r, self.width, self.height);
        self.fill_sdf(aabb, color, |x, y| geometry::capsule_sdf(x, y, ax, ay, bx, by, r));
    }

    pub fn draw_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgb) {
        let aabb = geometry::circle_aabb(cx, cy, r, self.width, self.height);
        self.fill_sdf(aabb, color, |x, y| geometry::circle_sdf(x, y, cx, cy, r));
    }

    pub fn draw_box(&mut self, cx: f32, cy: f32, theta: f32, w: f32, h: f32, color: Rgb) {
        let aabb = geometry::box_aabb(cx, cy, theta, w, h, self.width, self.height);
        self.fill_sdf(aabb, color, |x, y| geometry::box_sdf(x, y, cx, cy, theta, w, h));
    }

    /// Box with corners rounded by radius `r`
    pub fn draw_filleted_box(
        &mut self,
        cx: f32,
        cy: f32,
        theta: f32,
        w: f32,
        h: f32,
        r: f32,
        color: Rgb,
    ) {
        let aabb = geometry::filleted_box_aabb(cx, cy, theta, w, h, self.width, self.height);
        self.fill_sdf(aabb, color, |x, y| {
            geometry::filleted_box_sdf(x, y, cx, cy, theta, w, h, r)
        });
    }

    // ========================================================================
    // Scratch copies
    // ========================================================================

    /// Copy the inclusive rectangle `rect` from `src` into `self`.
    ///
    /// Pixels are addressed as `x + y * stride` in both buffers; the stride is
    /// the window width, so both buffers must be window-sized.
    pub fn copy_region(&mut self, src: &PixelBuffer, rect: Aabb, stride: u32) {
        assert!(
            self.width == src.width && self.height == src.height && self.width == stride,
            "scratch copy needs window-sized buffers ({}x{} <- {}x{}, stride {})",
            self.width,
            self.height,
            src.width,
            src.height,
            stride
        );
        if rect.is_empty() {
            return;
        }
        let stride = stride as usize;
        let (x0, x1) = (rect.x0 as usize, rect.x1 as usize);
        for y in rect.y0 as usize..=rect.y1 as usize {
            let row = y * stride;
            self.pixels[row + x0..=row + x1].copy_from_slice(&src.pixels[row + x0..=row + x1]);
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Quantize into an RGBA8888 texture image, top row first
    pub fn write_texture_bytes(&self, out: &mut Vec<u8>) {
        let row_bytes = self.width as usize * 4;
        out.resize(row_bytes * self.height as usize, 0);
        for (dst_row, src_row) in out
            .chunks_exact_mut(row_bytes)
            .zip(self.pixels.chunks_exact(self.width as usize).rev())
        {
            for (dest, &px) in dst_row.chunks_exact_mut(4).zip(src_row) {
                write_pixel(dest, px);
            }
        }
    }
}
