// Software drawing primitives for the softbuffer framebuffer (u32 per pixel,
// 0x00RRGGBB), plus the fit-to-viewport size computation.

pub const BG_COLOR: [u8; 4] = [31, 31, 31, 255];
pub const VIEWPORT_COLOR: [u8; 4] = [128, 128, 128, 255];

/// Substitute for a non-positive viewport dimension.
pub const FALLBACK_VIEWPORT: u32 = 100;

/// Horizontal advance of one glyph at scale 1 (5 pixels + 1 spacing).
pub const GLYPH_ADVANCE: u32 = 6;
pub const GLYPH_HEIGHT: u32 = 7;

// 5x7 bitmap font for ASCII 32..=126, one byte per column, LSB = top row.
static FONT_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], [0x00, 0x00, 0x5F, 0x00, 0x00], [0x00, 0x07, 0x00, 0x07, 0x00], [0x14, 0x7F, 0x14, 0x7F, 0x14],
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], [0x23, 0x13, 0x08, 0x64, 0x62], [0x36, 0x49, 0x55, 0x22, 0x50], [0x00, 0x05, 0x03, 0x00, 0x00],
    [0x00, 0x1C, 0x22, 0x41, 0x00], [0x00, 0x41, 0x22, 0x1C, 0x00], [0x14, 0x08, 0x3E, 0x08, 0x14], [0x08, 0x08, 0x3E, 0x08, 0x08],
    [0x00, 0x50, 0x30, 0x00, 0x00], [0x08, 0x08, 0x08, 0x08, 0x08], [0x00, 0x60, 0x60, 0x00, 0x00], [0x20, 0x10, 0x08, 0x04, 0x02],
    [0x3E, 0x51, 0x49, 0x45, 0x3E], [0x00, 0x42, 0x7F, 0x40, 0x00], [0x42, 0x61, 0x51, 0x49, 0x46], [0x21, 0x41, 0x45, 0x4B, 0x31],
    [0x18, 0x14, 0x12, 0x7F, 0x10], [0x27, 0x45, 0x45, 0x45, 0x39], [0x3C, 0x4A, 0x49, 0x49, 0x30], [0x01, 0x71, 0x09, 0x05, 0x03],
    [0x36, 0x49, 0x49, 0x49, 0x36], [0x06, 0x49, 0x49, 0x29, 0x1E], [0x00, 0x36, 0x36, 0x00, 0x00], [0x00, 0x56, 0x36, 0x00, 0x00],
    [0x08, 0x14, 0x22, 0x41, 0x00], [0x14, 0x14, 0x14, 0x14, 0x14], [0x00, 0x41, 0x22, 0x14, 0x08], [0x02, 0x01, 0x51, 0x09, 0x06],
    [0x3E, 0x41, 0x5D, 0x55, 0x1E], [0x7E, 0x11, 0x11, 0x11, 0x7E], [0x7F, 0x49, 0x49, 0x49, 0x36], [0x3E, 0x41, 0x41, 0x41, 0x22],
    [0x7F, 0x41, 0x41, 0x22, 0x1C], [0x7F, 0x49, 0x49, 0x49, 0x41], [0x7F, 0x09, 0x09, 0x09, 0x01], [0x3E, 0x41, 0x49, 0x49, 0x7A],
    [0x7F, 0x08, 0x08, 0x08, 0x7F], [0x00, 0x41, 0x7F, 0x41, 0x00], [0x20, 0x40, 0x41, 0x3F, 0x01], [0x7F, 0x08, 0x14, 0x22, 0x41],
    [0x7F, 0x40, 0x40, 0x40, 0x40], [0x7F, 0x02, 0x0C, 0x02, 0x7F], [0x7F, 0x04, 0x08, 0x10, 0x7F], [0x3E, 0x41, 0x41, 0x41, 0x3E],
    [0x7F, 0x09, 0x09, 0x09, 0x06], [0x3E, 0x41, 0x51, 0x21, 0x5E], [0x7F, 0x09, 0x19, 0x29, 0x46], [0x46, 0x49, 0x49, 0x49, 0x31],
    [0x01, 0x01, 0x7F, 0x01, 0x01], [0x3F, 0x40, 0x40, 0x40, 0x3F], [0x1F, 0x20, 0x40, 0x20, 0x1F], [0x3F, 0x40, 0x38, 0x40, 0x3F],
    [0x63, 0x14, 0x08, 0x14, 0x63], [0x07, 0x08, 0x70, 0x08, 0x07], [0x61, 0x51, 0x49, 0x45, 0x43], [0x00, 0x7F, 0x41, 0x41, 0x00],
    [0x02, 0x04, 0x08, 0x10, 0x20], [0x00, 0x41, 0x41, 0x7F, 0x00], [0x04, 0x02, 0x01, 0x02, 0x04], [0x40, 0x40, 0x40, 0x40, 0x40],
    [0x00, 0x01, 0x02, 0x04, 0x00], [0x20, 0x54, 0x54, 0x54, 0x78], [0x7F, 0x48, 0x44, 0x44, 0x38], [0x38, 0x44, 0x44, 0x44, 0x20],
    [0x38, 0x44, 0x44, 0x48, 0x7F], [0x38, 0x54, 0x54, 0x54, 0x18], [0x08, 0x7E, 0x09, 0x01, 0x02], [0x0C, 0x52, 0x52, 0x52, 0x3E],
    [0x7F, 0x08, 0x04, 0x04, 0x78], [0x00, 0x44, 0x7D, 0x40, 0x00], [0x20, 0x40, 0x44, 0x3D, 0x00], [0x7F, 0x10, 0x28, 0x44, 0x00],
    [0x00, 0x41, 0x7F, 0x40, 0x00], [0x7C, 0x04, 0x18, 0x04, 0x78], [0x7C, 0x08, 0x04, 0x04, 0x78], [0x38, 0x44, 0x44, 0x44, 0x38],
    [0x7C, 0x14, 0x14, 0x14, 0x08], [0x08, 0x14, 0x14, 0x18, 0x7C], [0x7C, 0x08, 0x04, 0x04, 0x08], [0x48, 0x54, 0x54, 0x54, 0x20],
    [0x04, 0x3F, 0x44, 0x40, 0x20], [0x3C, 0x40, 0x40, 0x20, 0x7C], [0x1C, 0x20, 0x40, 0x20, 0x1C], [0x3C, 0x40, 0x30, 0x40, 0x3C],
    [0x44, 0x28, 0x10, 0x28, 0x44], [0x0C, 0x50, 0x50, 0x50, 0x3C], [0x44, 0x64, 0x54, 0x4C, 0x44], [0x00, 0x08, 0x36, 0x41, 0x00],
    [0x00, 0x00, 0x7F, 0x00, 0x00], [0x00, 0x41, 0x36, 0x08, 0x00], [0x10, 0x08, 0x08, 0x10, 0x08],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x as f64
            && py >= self.y as f64
            && px < self.x as f64 + self.w as f64
            && py < self.y as f64 + self.h as f64
    }
}

/// Pack RGB into softbuffer u32 format: 0x00RRGGBB.
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

fn unpack_rgb(v: u32) -> (u8, u8, u8) {
    ((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

fn blend(dst: u32, r: u8, g: u8, b: u8, a: u32) -> u32 {
    if a >= 255 {
        return rgb(r, g, b);
    }
    let inv = 255 - a;
    let (dr, dg, db) = unpack_rgb(dst);
    rgb(
        ((r as u32 * a + dr as u32 * inv) / 255) as u8,
        ((g as u32 * a + dg as u32 * inv) / 255) as u8,
        ((b as u32 * a + db as u32 * inv) / 255) as u8,
    )
}

fn draw_char(buf: &mut [u32], stride: u32, buf_h: u32, ch: char, px: i32, py: i32, scale: u32, color: (u8, u8, u8, u8)) {
    let idx = (ch as u32).wrapping_sub(32) as usize;
    let Some(glyph) = FONT_5X7.get(idx) else { return };
    for (col, &bits) in glyph.iter().enumerate() {
        for row in 0..GLYPH_HEIGHT {
            if bits & (1u8 << row) == 0 {
                continue;
            }
            let cell = Rect::new(
                px + (col as u32 * scale) as i32,
                py + (row * scale) as i32,
                scale,
                scale,
            );
            fill_rect(buf, stride, buf_h, cell, color);
        }
    }
}

/// Draw a string. Returns the x position after the last character.
pub fn draw_text(buf: &mut [u32], stride: u32, buf_h: u32, text: &str, px: i32, py: i32, scale: u32, color: (u8, u8, u8, u8)) -> i32 {
    let mut x = px;
    for ch in text.chars() {
        draw_char(buf, stride, buf_h, ch, x, py, scale, color);
        x += (GLYPH_ADVANCE * scale) as i32;
    }
    x
}

pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    (n * GLYPH_ADVANCE * scale).saturating_sub(scale)
}

/// Draw `text` centered inside `rect`.
pub fn draw_text_centered(buf: &mut [u32], stride: u32, buf_h: u32, text: &str, rect: Rect, scale: u32, color: (u8, u8, u8, u8)) {
    let tx = rect.x + (rect.w as i32 - text_width(text, scale) as i32) / 2;
    let ty = rect.y + (rect.h as i32 - (GLYPH_HEIGHT * scale) as i32) / 2;
    draw_text(buf, stride, buf_h, text, tx, ty, scale, color);
}

/// Fill a rectangle with a color (with alpha blending), clipped to the buffer.
pub fn fill_rect(buf: &mut [u32], stride: u32, buf_h: u32, rect: Rect, color: (u8, u8, u8, u8)) {
    let a = color.3 as u32;
    let x_start = rect.x.max(0) as u32;
    let y_start = rect.y.max(0) as u32;
    let x_end = (rect.x as i64 + rect.w as i64).clamp(0, stride as i64) as u32;
    let y_end = (rect.y as i64 + rect.h as i64).clamp(0, buf_h as i64) as u32;
    for y in y_start..y_end {
        for x in x_start..x_end {
            let off = (y * stride + x) as usize;
            buf[off] = blend(buf[off], color.0, color.1, color.2, a);
        }
    }
}

/// Largest size that fits `source` into the viewport while keeping its
/// aspect ratio.
///
/// Non-positive viewport dimensions are replaced by [`FALLBACK_VIEWPORT`].
/// Each axis is `floor(source * ratio)` where `ratio` is the smaller of the
/// two axis ratios; the floor is taken in integer arithmetic so the limiting
/// axis lands exactly on the viewport edge. A zero on either axis of the
/// result means the image must be drawn at its original size instead.
pub fn compute_fit(src_w: u32, src_h: u32, view_w: i64, view_h: i64) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (0, 0);
    }
    let clamp_view = |v: i64| -> u64 {
        if v <= 0 {
            FALLBACK_VIEWPORT as u64
        } else {
            v.min(u32::MAX as i64) as u64
        }
    };
    let (vw, vh) = (clamp_view(view_w), clamp_view(view_h));
    let (sw, sh) = (src_w as u64, src_h as u64);

    // vw / sw <= vh / sh  <=>  vw * sh <= vh * sw
    let (tw, th) = if vw * sh <= vh * sw {
        (vw, sh * vw / sw)
    } else {
        (sw * vh / sh, vh)
    };
    (tw as u32, th as u32)
}

/// Copy an RGBA image into `dst`, centered in `area` and clipped to it.
pub fn blit_centered(
    dst: &mut [u32], dst_w: u32, dst_h: u32,
    src: &[u8], src_w: u32, src_h: u32,
    area: Rect,
) {
    let x0 = area.x as i64 + (area.w as i64 - src_w as i64) / 2;
    let y0 = area.y as i64 + (area.h as i64 - src_h as i64) / 2;

    let dx_start = x0.max(area.x as i64).max(0);
    let dy_start = y0.max(area.y as i64).max(0);
    let dx_end = (x0 + src_w as i64).min(area.x as i64 + area.w as i64).min(dst_w as i64);
    let dy_end = (y0 + src_h as i64).min(area.y as i64 + area.h as i64).min(dst_h as i64);

    for dy in dy_start..dy_end {
        let sy = (dy - y0) as usize;
        for dx in dx_start..dx_end {
            let sx = (dx - x0) as usize;
            let si = (sy * src_w as usize + sx) * 4;
            let di = dy as usize * dst_w as usize + dx as usize;

            let sa = src[si + 3] as u32;
            if sa > 0 {
                dst[di] = blend(dst[di], src[si], src[si + 1], src[si + 2], sa);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_landscape_into_default_window() {
        assert_eq!(compute_fit(1920, 1080, 800, 600), (800, 450));
    }

    #[test]
    fn fit_uses_fallback_for_non_positive_viewport() {
        assert_eq!(compute_fit(100, 100, 0, 0), (100, 100));
        assert_eq!(compute_fit(100, 100, -20, -1), (100, 100));
        assert_eq!(compute_fit(200, 100, -5, 50), (100, 50));
    }

    #[test]
    fn fit_height_limited_portrait() {
        assert_eq!(compute_fit(100, 400, 800, 600), (150, 600));
    }

    #[test]
    fn fit_scales_small_images_up() {
        assert_eq!(compute_fit(50, 25, 800, 600), (800, 400));
    }

    #[test]
    fn fit_preserves_aspect_ratio_within_one_pixel() {
        for &(sw, sh, vw, vh) in &[(1234u32, 567u32, 640i64, 480i64), (3000, 2000, 333, 777), (7, 3, 1000, 1000)] {
            let (tw, th) = compute_fit(sw, sh, vw, vh);
            assert!(tw as i64 <= vw && th as i64 <= vh);
            assert!(tw as i64 == vw || th as i64 == vh);
            let expected_h = tw as f64 * sh as f64 / sw as f64;
            assert!((th as f64 - expected_h).abs() <= 1.0 + sh as f64 / sw as f64);
        }
    }

    #[test]
    fn fit_degenerate_results_are_zero() {
        assert_eq!(compute_fit(10_000, 1, 100, 100), (100, 0));
        assert_eq!(compute_fit(0, 50, 800, 600), (0, 0));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10, 20, 5, 5);
        assert!(r.contains(10.0, 20.0));
        assert!(r.contains(14.9, 24.9));
        assert!(!r.contains(15.0, 22.0));
        assert!(!r.contains(9.9, 22.0));
    }

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut buf = vec![0u32; 4 * 3];
        fill_rect(&mut buf, 4, 3, Rect::new(-2, 1, 4, 10), (255, 0, 0, 255));
        let red = rgb(255, 0, 0);
        assert_eq!(&buf[0..4], &[0, 0, 0, 0]);
        assert_eq!(&buf[4..8], &[red, red, 0, 0]);
        assert_eq!(&buf[8..12], &[red, red, 0, 0]);
    }

    #[test]
    fn blit_centers_opaque_pixels() {
        let mut buf = vec![0u32; 6 * 4];
        let src = [9u8, 8, 7, 255].repeat(2 * 2);
        blit_centered(&mut buf, 6, 4, &src, 2, 2, Rect::new(0, 0, 6, 4));
        let px = rgb(9, 8, 7);
        for y in 0..4 {
            for x in 0..6 {
                let inside = (2..4).contains(&x) && (1..3).contains(&y);
                assert_eq!(buf[y * 6 + x] == px, inside, "x={} y={}", x, y);
            }
        }
    }

    #[test]
    fn blit_clips_oversized_source_to_area() {
        let mut buf = vec![0u32; 4 * 4];
        let src = [1u8, 2, 3, 255].repeat(10 * 10);
        blit_centered(&mut buf, 4, 4, &src, 10, 10, Rect::new(0, 0, 4, 2));
        let px = rgb(1, 2, 3);
        assert!(buf[..8].iter().all(|&p| p == px));
        assert!(buf[8..].iter().all(|&p| p == 0));
    }

    #[test]
    fn text_width_matches_advance() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("Next", 2), 4 * 6 * 2 - 2);
    }
}
