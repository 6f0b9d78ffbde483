// Software drawing utilities.
// Visual effects provided here:
// 1) Solid polygons on an RGBA canvas (used for the built-in arrow glyph).
// 2) The cursor glyph stretched into the top-left corner of the overlay buffer.

use crate::types::{CursorBitmap, FrameBuffer};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Put a pixel on the canvas if (x,y) is inside bounds.
#[inline]
fn put_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height() {
        return;
    }
    img.put_pixel(x, y, color);
}

/// Fill a closed polygon with a scanline sweep (even-odd rule, pixel centres).
/// Visual: a solid shape with hard edges appears on the canvas.
pub fn fill_polygon(img: &mut RgbaImage, points: &[(i32, i32)], color: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }
    let min_y = points.iter().map(|p| p.1).min().unwrap_or(0);
    let max_y = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
    for y in min_y..max_y {
        let yc = y as f32 + 0.5;
        crossings.clear();

        for (i, &(x0, y0)) in points.iter().enumerate() {
            let (x1, y1) = points[(i + 1) % points.len()];
            let (fy0, fy1) = (y0 as f32, y1 as f32);
            // Half-open test so shared vertices are counted once.
            if (fy0 <= yc && yc < fy1) || (fy1 <= yc && yc < fy0) {
                let t = (yc - fy0) / (fy1 - fy0);
                crossings.push(x0 as f32 + t * (x1 - x0) as f32);
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil() as i32;
            let end = (span[1] - 0.5).ceil() as i32;
            for x in start..end {
                put_pixel(img, x, y, color);
            }
        }
    }
}

#[inline]
fn pack_argb(px: &Rgba<u8>) -> u32 {
    let [r, g, b, a] = px.0;
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Stretch the glyph to `side × side` and copy it into the top-left of `fb`.
/// Everything outside that square is left fully transparent.
/// Visual: the enlarged cursor, anchored at the window's upper-left corner.
pub fn blit_stretched(fb: &mut FrameBuffer, bitmap: &CursorBitmap, side: u32) {
    fb.clear();
    if side == 0 {
        return;
    }
    let scaled = imageops::resize(bitmap.image(), side, side, FilterType::Nearest);
    let w = (side as usize).min(fb.width);
    let h = (side as usize).min(fb.height);

    for y in 0..h {
        let row = &mut fb.pixels[y * fb.width..y * fb.width + w];
        for (x, out) in row.iter_mut().enumerate() {
            *out = pack_argb(scaled.get_pixel(x as u32, y as u32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn fills_axis_aligned_square() {
        let mut img = RgbaImage::new(10, 10);
        fill_polygon(&mut img, &[(2, 2), (6, 2), (6, 6), (2, 6)], RED);

        let filled = img.pixels().filter(|p| **p == RED).count();
        assert_eq!(filled, 16);
        assert_eq!(*img.get_pixel(2, 2), RED);
        assert_eq!(*img.get_pixel(5, 5), RED);
        assert_eq!(img.get_pixel(6, 6).0[3], 0);
    }

    #[test]
    fn clips_shapes_outside_canvas() {
        let mut img = RgbaImage::new(4, 4);
        fill_polygon(&mut img, &[(-10, -10), (20, -10), (20, 20), (-10, 20)], RED);
        assert!(img.pixels().all(|p| *p == RED));
    }

    #[test]
    fn blit_fills_only_the_top_left_square() {
        let bitmap = CursorBitmap::new(RgbaImage::from_pixel(4, 4, RED));
        let mut fb = FrameBuffer::new(16, 16);
        fb.pixels.fill(0xFFFF_FFFF);

        blit_stretched(&mut fb, &bitmap, 8);

        assert_eq!(fb.pixels[0], 0xFFFF_0000);
        assert_eq!(fb.pixels[7 * 16 + 7], 0xFFFF_0000);
        assert_eq!(fb.pixels[8], 0);
        assert_eq!(fb.pixels[8 * 16], 0);
        assert_eq!(fb.pixels[15 * 16 + 15], 0);
    }

    #[test]
    fn blit_larger_than_buffer_is_clipped() {
        let bitmap = CursorBitmap::new(RgbaImage::from_pixel(2, 2, RED));
        let mut fb = FrameBuffer::new(4, 4);
        blit_stretched(&mut fb, &bitmap, 9);
        assert!(fb.pixels.iter().all(|&p| p == 0xFFFF_0000));
    }
}
