//! Scan-conversion primitives on the framebuffer
//!
//! Integer Bresenham lines, midpoint circles and scanline triangle fill.
//! Every write goes through the bounds-checked `set`, so partially
//! offscreen primitives clip instead of failing; span loops additionally
//! clamp their ranges so huge coordinates cannot stall a frame.

use super::texture::{Color, Texture};

impl Texture {
    /// Bresenham line from (x1,y1) to (x2,y2), both endpoints included
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.set(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Triangle outline: three lines
    pub fn draw_triangle(
        &mut self,
        p1: (i32, i32),
        p2: (i32, i32),
        p3: (i32, i32),
        color: Color,
    ) {
        self.draw_line(p1.0, p1.1, p2.0, p2.1, color);
        self.draw_line(p2.0, p2.1, p3.0, p3.1, color);
        self.draw_line(p3.0, p3.1, p1.0, p1.1, color);
    }

    /// Filled triangle via scanline spans.
    ///
    /// The points are sorted by y (stable), the triangle is split at the
    /// middle vertex, and each scanline spans between the long top-to-bottom
    /// edge and the short edge of its half. A half with no vertical extent
    /// contributes no scanlines of its own and is skipped.
    pub fn fill_triangle(
        &mut self,
        p1: (i32, i32),
        p2: (i32, i32),
        p3: (i32, i32),
        color: Color,
    ) {
        let mut pts = [p1, p2, p3];
        if pts[0].1 > pts[1].1 {
            pts.swap(0, 1);
        }
        if pts[1].1 > pts[2].1 {
            pts.swap(1, 2);
        }
        if pts[0].1 > pts[1].1 {
            pts.swap(0, 1);
        }
        let [top, mid, bot] = pts;

        let total_dy = (bot.1 - top.1) as f32;
        if total_dy == 0.0 {
            // all three on one scanline: the triangle is its own span
            let lo = top.0.min(mid.0).min(bot.0);
            let hi = top.0.max(mid.0).max(bot.0);
            self.hline(lo, hi, top.1, color);
            return;
        }
        let long_slope = (bot.0 - top.0) as f32 / total_dy;
        let long_x = |y: i32| top.0 as f32 + long_slope * (y - top.1) as f32;

        let top_dy = (mid.1 - top.1) as f32;
        if top_dy != 0.0 {
            let slope = (mid.0 - top.0) as f32 / top_dy;
            let y_start = top.1.max(0);
            let y_end = mid.1.min(self.height() as i32 - 1);
            for y in y_start..=y_end {
                let xa = long_x(y);
                let xb = top.0 as f32 + slope * (y - top.1) as f32;
                self.hline(xa.round() as i32, xb.round() as i32, y, color);
            }
        }

        let bot_dy = (bot.1 - mid.1) as f32;
        if bot_dy != 0.0 {
            let slope = (bot.0 - mid.0) as f32 / bot_dy;
            let y_start = mid.1.max(0);
            let y_end = bot.1.min(self.height() as i32 - 1);
            for y in y_start..=y_end {
                let xa = long_x(y);
                let xb = mid.0 as f32 + slope * (y - mid.1) as f32;
                self.hline(xa.round() as i32, xb.round() as i32, y, color);
            }
        }
    }

    /// Midpoint circle outline, 8-way symmetric
    pub fn draw_circle(&mut self, x: i32, y: i32, r: i32, color: Color) {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut cx = 0;
        let mut cy = r;

        self.set(x, y + r, color);
        self.set(x, y - r, color);
        self.set(x + r, y, color);
        self.set(x - r, y, color);

        while cx < cy {
            if f >= 0 {
                cy -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            cx += 1;
            ddf_x += 2;
            f += ddf_x;

            self.set(x + cx, y + cy, color);
            self.set(x - cx, y + cy, color);
            self.set(x + cx, y - cy, color);
            self.set(x - cx, y - cy, color);
            self.set(x + cy, y + cx, color);
            self.set(x - cy, y + cx, color);
            self.set(x + cy, y - cx, color);
            self.set(x - cy, y - cx, color);
        }
    }

    /// Filled circle: the midpoint walk, with each symmetric point pair
    /// widened into a horizontal span
    pub fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: Color) {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut cx = 0;
        let mut cy = r;

        self.hline(x - r, x + r, y, color);
        self.set(x, y + r, color);
        self.set(x, y - r, color);

        while cx < cy {
            if f >= 0 {
                cy -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            cx += 1;
            ddf_x += 2;
            f += ddf_x;

            self.hline(x - cx, x + cx, y + cy, color);
            self.hline(x - cx, x + cx, y - cy, color);
            self.hline(x - cy, x + cy, y + cx, color);
            self.hline(x - cy, x + cy, y - cx, color);
        }
    }

    /// Horizontal span, clamped to the texture before iterating
    fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Color) {
        if y < 0 || y >= self.height() as i32 {
            return;
        }
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let lo = lo.max(0);
        let hi = hi.min(self.width() as i32 - 1);
        for x in lo..=hi {
            self.set(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(tex: &Texture) -> Vec<(i32, i32)> {
        let mut cells = Vec::new();
        for y in 0..tex.height() as i32 {
            for x in 0..tex.width() as i32 {
                if tex.get(x, y) != Color::BLACK {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn test_horizontal_line_exact_cells() {
        let mut tex = Texture::new(5, 1);
        tex.draw_line(0, 0, 4, 0, Color::WHITE);
        assert_eq!(lit(&tex), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_line_includes_both_endpoints() {
        let mut tex = Texture::new(8, 8);
        tex.draw_line(1, 2, 6, 5, Color::WHITE);
        assert_ne!(tex.get(1, 2), Color::BLACK);
        assert_ne!(tex.get(6, 5), Color::BLACK);
    }

    #[test]
    fn test_line_order_independent() {
        let mut forward = Texture::new(10, 10);
        let mut backward = Texture::new(10, 10);
        forward.draw_line(0, 0, 9, 4, Color::WHITE);
        backward.draw_line(9, 4, 0, 0, Color::WHITE);
        assert_eq!(lit(&forward).len(), lit(&backward).len());
        for cell in lit(&forward) {
            assert_ne!(backward.get(cell.0, cell.1), Color::BLACK);
        }
    }

    #[test]
    fn test_degenerate_line_is_one_pixel() {
        let mut tex = Texture::new(5, 5);
        tex.draw_line(2, 2, 2, 2, Color::WHITE);
        assert_eq!(lit(&tex), vec![(2, 2)]);
    }

    #[test]
    fn test_diagonal_line() {
        let mut tex = Texture::new(4, 4);
        tex.draw_line(0, 0, 3, 3, Color::WHITE);
        assert_eq!(lit(&tex), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_triangle_outline_touches_vertices() {
        let mut tex = Texture::new(12, 12);
        tex.draw_triangle((1, 1), (10, 2), (5, 9), Color::WHITE);
        assert_ne!(tex.get(1, 1), Color::BLACK);
        assert_ne!(tex.get(10, 2), Color::BLACK);
        assert_ne!(tex.get(5, 9), Color::BLACK);
        assert_eq!(tex.get(5, 5), Color::BLACK);
    }

    #[test]
    fn test_fill_triangle_covers_interior() {
        let mut tex = Texture::new(12, 10);
        tex.fill_triangle((1, 1), (9, 2), (4, 8), Color::WHITE);
        // an interior cell
        assert_ne!(tex.get(4, 3), Color::BLACK);
        // far corner stays out
        assert_eq!(tex.get(11, 9), Color::BLACK);
    }

    #[test]
    fn test_fill_triangle_flat_top() {
        let mut tex = Texture::new(10, 10);
        tex.fill_triangle((2, 2), (8, 2), (5, 7), Color::WHITE);
        for x in 2..=8 {
            assert_ne!(tex.get(x, 2), Color::BLACK);
        }
        assert_ne!(tex.get(5, 6), Color::BLACK);
        assert_eq!(tex.get(0, 0), Color::BLACK);
    }

    #[test]
    fn test_fill_triangle_flat_bottom() {
        let mut tex = Texture::new(10, 10);
        tex.fill_triangle((5, 1), (2, 6), (8, 6), Color::WHITE);
        for x in 2..=8 {
            assert_ne!(tex.get(x, 6), Color::BLACK);
        }
        assert_ne!(tex.get(5, 1), Color::BLACK);
    }

    #[test]
    fn test_fill_triangle_collinear_is_span() {
        let mut tex = Texture::new(12, 6);
        tex.fill_triangle((2, 3), (8, 3), (5, 3), Color::WHITE);
        let cells = lit(&tex);
        assert_eq!(cells.len(), 7);
        assert!(cells.iter().all(|&(_, y)| y == 3));
    }

    #[test]
    fn test_fill_triangle_clips_offscreen() {
        let mut tex = Texture::new(6, 6);
        tex.fill_triangle((-5, -5), (10, -2), (3, 9), Color::WHITE);
        // no panic, and the onscreen part exists
        assert!(!lit(&tex).is_empty());
        let mut far = Texture::new(6, 6);
        far.fill_triangle((100, 100), (110, 100), (105, 110), Color::WHITE);
        assert!(lit(&far).is_empty());
    }

    #[test]
    fn test_draw_circle_cardinal_points() {
        let mut tex = Texture::new(11, 11);
        tex.draw_circle(5, 5, 3, Color::WHITE);
        assert_ne!(tex.get(5, 2), Color::BLACK);
        assert_ne!(tex.get(5, 8), Color::BLACK);
        assert_ne!(tex.get(2, 5), Color::BLACK);
        assert_ne!(tex.get(8, 5), Color::BLACK);
        // outline only: the center stays dark
        assert_eq!(tex.get(5, 5), Color::BLACK);
    }

    #[test]
    fn test_fill_circle_rotational_symmetry() {
        let mut tex = Texture::new(11, 11);
        tex.fill_circle(5, 5, 3, Color::WHITE);
        let cells = lit(&tex);
        assert!(!cells.is_empty());
        for &(x, y) in &cells {
            // quarter turn about the center
            let rx = 5 + (y - 5);
            let ry = 5 - (x - 5);
            assert_ne!(tex.get(rx, ry), Color::BLACK, "missing ({}, {})", rx, ry);
        }
        assert_ne!(tex.get(5, 5), Color::BLACK);
    }
}
