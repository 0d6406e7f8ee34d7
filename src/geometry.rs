//! Signed distance functions and clipped bounding boxes for the 2D primitives
//!
//! Every primitive comes as a pair: an `*_aabb` function returning the integer
//! pixel rectangle that can receive non-zero coverage (clipped to the buffer),
//! and an `*_sdf` function that is negative inside, positive outside and zero
//! on the boundary.

/// Inclusive integer pixel rectangle `[x0, x1] × [y0, y1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub x0: i32,
    pub x1: i32,
    pub y0: i32,
    pub y1: i32,
}

impl Aabb {
    pub fn new(x0: i32, x1: i32, y0: i32, y1: i32) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// Build from float extents, clipped to a `width × height` buffer
    fn clipped(min_x: i32, max_x: i32, min_y: i32, max_y: i32, width: u32, height: u32) -> Self {
        Self {
            x0: min_x.max(0),
            x1: max_x.min(width as i32 - 1),
            y0: min_y.max(0),
            y1: max_y.min(height as i32 - 1),
        }
    }

    /// True when clipping left nothing to draw
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x0 > self.x1 || self.y0 > self.y1
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Iterate every pixel coordinate, row by row
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..=self.y1).flat_map(move |y| (x0..=x1).map(move |x| (x, y)))
    }
}

/// Anti-aliasing coverage for a signed distance: a one pixel wide ramp
/// centered on the boundary (0.5 exactly on it)
#[inline]
pub fn coverage(sdf: f32) -> f32 {
    (0.5 - sdf).clamp(0.0, 1.0)
}

// ============================================================================
// Line (capsule)
// ============================================================================

/// Distance to the segment `a-b` minus the half thickness `r`
pub fn capsule_sdf(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32, r: f32) -> f32 {
    let (pax, pay) = (px - ax, py - ay);
    let (bax, bay) = (bx - ax, by - ay);
    let len_sq = bax * bax + bay * bay;
    // Degenerate segment collapses to a circle around `a`
    let h = if len_sq > 0.0 {
        ((pax * bax + pay * bay) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (dx, dy) = (pax - bax * h, pay - bay * h);
    (dx * dx + dy * dy).sqrt() - r
}

pub fn capsule_aabb(ax: f32, ay: f32, bx: f32, by: f32, r: f32, width: u32, height: u32) -> Aabb {
    Aabb::clipped(
        (ax.min(bx) - r).floor() as i32,
        (ax.max(bx) + r).ceil() as i32,
        (ay.min(by) - r).floor() as i32,
        (ay.max(by) + r).ceil() as i32,
        width,
        height,
    )
}

// ============================================================================
// Circle
// ============================================================================

pub fn circle_sdf(x: f32, y: f32, cx: f32, cy: f32, r: f32) -> f32 {
    let (ux, uy) = (x - cx, y - cy);
    (ux * ux + uy * uy).sqrt() - r
}

pub fn circle_aabb(cx: f32, cy: f32, r: f32, width: u32, height: u32) -> Aabb {
    Aabb::clipped(
        (cx - r).floor() as i32 - 1,
        (cx + r).ceil() as i32 + 1,
        (cy - r).floor() as i32 - 1,
        (cy + r).ceil() as i32 + 1,
        width,
        height,
    )
}

// ============================================================================
// Box / filleted box
// ============================================================================

/// Box centered at `(cx, cy)`, rotated by `theta` radians, full size `w × h`
pub fn box_sdf(x: f32, y: f32, cx: f32, cy: f32, theta: f32, w: f32, h: f32) -> f32 {
    let (hw, hh) = (w * 0.5, h * 0.5);
    let (sin, cos) = theta.sin_cos();
    let (lx, ly) = (x - cx, y - cy);
    let dx = (lx * cos + ly * sin).abs() - hw;
    let dy = (ly * cos - lx * sin).abs() - hh;
    let (ox, oy) = (dx.max(0.0), dy.max(0.0));
    dx.max(dy).min(0.0) + (ox * ox + oy * oy).sqrt()
}

pub fn box_aabb(cx: f32, cy: f32, theta: f32, w: f32, h: f32, width: u32, height: u32) -> Aabb {
    let (hw, hh) = (w * 0.5, h * 0.5);
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let ex = hw * cos + hh * sin;
    let ey = hw * sin + hh * cos;
    Aabb::clipped(
        (cx - ex).floor() as i32 - 1,
        (cx + ex).ceil() as i32 + 1,
        (cy - ey).floor() as i32 - 1,
        (cy + ey).ceil() as i32 + 1,
        width,
        height,
    )
}

/// Rounded box: the box SDF of the rectangle inset by `r`, plus `r`
pub fn filleted_box_sdf(x: f32, y: f32, cx: f32, cy: f32, theta: f32, w: f32, h: f32, r: f32) -> f32 {
    box_sdf(x, y, cx, cy, theta, w - 2.0 * r, h - 2.0 * r) - r
}

/// The fillet only removes area, so the outer box bounds it
pub fn filleted_box_aabb(
    cx: f32,
    cy: f32,
    theta: f32,
    w: f32,
    h: f32,
    width: u32,
    height: u32,
) -> Aabb {
    box_aabb(cx, cy, theta, w, h, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_band() {
        assert_eq!(coverage(0.0), 0.5);
        assert_eq!(coverage(-0.5), 1.0);
        assert_eq!(coverage(-3.0), 1.0);
        assert_eq!(coverage(0.5), 0.0);
        assert_eq!(coverage(4.0), 0.0);
    }

    #[test]
    fn test_circle_sdf_sign() {
        assert!(circle_sdf(10.0, 10.0, 10.0, 10.0, 5.0) < 0.0);
        assert_eq!(circle_sdf(15.0, 10.0, 10.0, 10.0, 5.0), 0.0);
        assert!(circle_sdf(20.0, 10.0, 10.0, 10.0, 5.0) > 0.0);
    }

    #[test]
    fn test_circle_coverage_at_radius() {
        let (cx, cy, r) = (20.0, 20.0, 6.0);
        // Exactly on the boundary
        assert_eq!(coverage(circle_sdf(cx + r, cy, cx, cy, r)), 0.5);
        assert_eq!(coverage(circle_sdf(cx, cy - r, cx, cy, r)), 0.5);
        // One pixel or more inside
        assert_eq!(coverage(circle_sdf(cx + r - 1.0, cy, cx, cy, r)), 1.0);
        assert_eq!(coverage(circle_sdf(cx, cy, cx, cy, r)), 1.0);
        // One pixel or more outside
        assert_eq!(coverage(circle_sdf(cx + r + 1.0, cy, cx, cy, r)), 0.0);
        assert_eq!(coverage(circle_sdf(cx, cy + r + 3.0, cx, cy, r)), 0.0);
    }

    #[test]
    fn test_box_sdf_axis_aligned() {
        // 10x4 box at origin
        assert_eq!(box_sdf(0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 4.0), -2.0);
        assert_eq!(box_sdf(5.0, 0.0, 0.0, 0.0, 0.0, 10.0, 4.0), 0.0);
        assert_eq!(box_sdf(8.0, 0.0, 0.0, 0.0, 0.0, 10.0, 4.0), 3.0);
        // Corner distance is euclidean
        let d = box_sdf(8.0, 6.0, 0.0, 0.0, 0.0, 10.0, 4.0);
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_sdf_rotated_quarter_turn() {
        let theta = std::f32::consts::FRAC_PI_2;
        // A 10x4 box turned 90 degrees is 4 wide and 10 tall
        assert!(box_sdf(0.0, 5.0, 0.0, 0.0, theta, 10.0, 4.0).abs() < 1e-4);
        assert!(box_sdf(2.0, 0.0, 0.0, 0.0, theta, 10.0, 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_filleted_box_rounds_corners() {
        let sharp = box_sdf(5.0, 5.0, 0.0, 0.0, 0.0, 10.0, 10.0);
        let round = filleted_box_sdf(5.0, 5.0, 0.0, 0.0, 0.0, 10.0, 10.0, 2.0);
        assert_eq!(sharp, 0.0);
        assert!(round > 0.0, "corner should be carved away by the fillet");
        // Edge midpoints stay on the boundary
        assert!(filleted_box_sdf(5.0, 0.0, 0.0, 0.0, 0.0, 10.0, 10.0, 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_capsule_sdf() {
        // Horizontal segment from (0,0) to (10,0) with radius 1
        assert_eq!(capsule_sdf(5.0, 0.0, 0.0, 0.0, 10.0, 0.0, 1.0), -1.0);
        assert_eq!(capsule_sdf(5.0, 1.0, 0.0, 0.0, 10.0, 0.0, 1.0), 0.0);
        // Past the end cap
        assert_eq!(capsule_sdf(13.0, 0.0, 0.0, 0.0, 10.0, 0.0, 1.0), 2.0);
        // Degenerate segment behaves as a circle
        assert_eq!(capsule_sdf(3.0, 4.0, 0.0, 0.0, 0.0, 0.0, 1.0), 4.0);
    }

    #[test]
    fn test_aabb_clipped_to_buffer() {
        let aabb = circle_aabb(1.0, 1.0, 5.0, 100, 100);
        assert_eq!(aabb.x0, 0);
        assert_eq!(aabb.y0, 0);
        assert_eq!(aabb.x1, 7);
        assert_eq!(aabb.y1, 7);

        let aabb = circle_aabb(98.0, 50.0, 5.0, 100, 80);
        assert_eq!(aabb.x1, 99);

        let outside = circle_aabb(-50.0, -50.0, 5.0, 100, 100);
        assert!(outside.is_empty());
    }

    #[test]
    fn test_box_aabb_grows_when_rotated() {
        let flat = box_aabb(50.0, 50.0, 0.0, 20.0, 2.0, 200, 200);
        let turned = box_aabb(50.0, 50.0, std::f32::consts::FRAC_PI_4, 20.0, 2.0, 200, 200);
        assert!(turned.y1 - turned.y0 > flat.y1 - flat.y0);
    }

    #[test]
    fn test_aabb_pixels_row_major() {
        let aabb = Aabb::new(2, 3, 5, 6);
        let pts: Vec<_> = aabb.pixels().collect();
        assert_eq!(pts, vec![(2, 5), (3, 5), (2, 6), (3, 6)]);
        assert!(aabb.contains(3, 6));
        assert!(!aabb.contains(4, 6));
    }
}
