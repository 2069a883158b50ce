use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::config::Rgba8;
use crate::geometry::Rect;

/// Straight-alpha source-over of `src` onto `dst`, with `src` alpha scaled by `coverage`.
#[inline]
pub fn blend_pixel(dst: &mut Rgba<u8>, src: Rgba8, coverage: f32) {
    let sa = (src[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    for c in 0..3 {
        let sc = src[c] as f32;
        let dc = dst[c] as f32;
        let v = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Blend a single color at integer coordinates, ignoring anything off-canvas.
#[inline]
pub fn blend_at(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba8, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    blend_pixel(canvas.get_pixel_mut(x as u32, y as u32), color, coverage);
}

/// Largest rect with the source aspect ratio that fits inside `bounds`, centered.
pub fn fit_contain(src_width: u32, src_height: u32, bounds: Rect) -> Rect {
    if src_width == 0 || src_height == 0 {
        return Rect::new(bounds.center().x, bounds.center().y, 0.0, 0.0);
    }
    let scale = (bounds.width / src_width as f64).min(bounds.height / src_height as f64);
    let w = src_width as f64 * scale;
    let h = src_height as f64 * scale;
    Rect::new(
        bounds.x + (bounds.width - w) / 2.0,
        bounds.y + (bounds.height - h) / 2.0,
        w,
        h,
    )
}

/// Resample the part of `overlay` that lands inside `clip` when stretched over `target`.
///
/// Returns the sprite and its top-left pixel position, or `None` when nothing is visible.
/// Only the visible window is resized, so a huge off-canvas target stays cheap.
pub fn resample_clipped(
    overlay: &DynamicImage,
    target: Rect,
    clip: Rect,
) -> Option<(RgbaImage, i64, i64)> {
    let (tx0, ty0) = (target.x.round(), target.y.round());
    let (tx1, ty1) = (target.right().round(), target.bottom().round());
    let (tw, th) = (tx1 - tx0, ty1 - ty0);
    if !(tw >= 1.0 && th >= 1.0) {
        return None;
    }

    let vx0 = tx0.max(clip.x.floor());
    let vy0 = ty0.max(clip.y.floor());
    let vx1 = tx1.min(clip.right().ceil());
    let vy1 = ty1.min(clip.bottom().ceil());
    if vx1 - vx0 < 1.0 || vy1 - vy0 < 1.0 {
        return None;
    }

    let rgba = overlay.to_rgba8();
    let (sw, sh) = (rgba.width() as f64, rgba.height() as f64);
    if sw < 1.0 || sh < 1.0 {
        return None;
    }
    let out_w = (vx1 - vx0) as u32;
    let out_h = (vy1 - vy0) as u32;

    if vx0 == tx0 && vy0 == ty0 && vx1 == tx1 && vy1 == ty1 {
        if rgba.width() == out_w && rgba.height() == out_h {
            return Some((rgba, vx0 as i64, vy0 as i64));
        }
        let sprite = imageops::resize(&rgba, out_w, out_h, FilterType::Triangle);
        return Some((sprite, vx0 as i64, vy0 as i64));
    }

    let sx0 = ((vx0 - tx0) / tw * sw).floor().clamp(0.0, sw - 1.0);
    let sy0 = ((vy0 - ty0) / th * sh).floor().clamp(0.0, sh - 1.0);
    let sx1 = ((vx1 - tx0) / tw * sw).ceil().clamp(sx0 + 1.0, sw);
    let sy1 = ((vy1 - ty0) / th * sh).ceil().clamp(sy0 + 1.0, sh);
    let window = imageops::crop_imm(
        &rgba,
        sx0 as u32,
        sy0 as u32,
        (sx1 - sx0) as u32,
        (sy1 - sy0) as u32,
    )
    .to_image();
    let sprite = imageops::resize(&window, out_w, out_h, FilterType::Triangle);
    Some((sprite, vx0 as i64, vy0 as i64))
}

/// Source-over `sprite` onto `canvas` with its top-left at (`x`, `y`), clipped to the canvas.
pub fn blit(canvas: &mut RgbaImage, sprite: &RgbaImage, x: i64, y: i64) {
    let cw = canvas.width() as i64;
    let ch = canvas.height() as i64;
    let col_start = (-x).max(0);
    let row_start = (-y).max(0);
    let col_end = (cw - x).min(sprite.width() as i64);
    let row_end = (ch - y).min(sprite.height() as i64);

    for row in row_start..row_end {
        for col in col_start..col_end {
            let src = sprite.get_pixel(col as u32, row as u32).0;
            let dst = canvas.get_pixel_mut((x + col) as u32, (y + row) as u32);
            blend_pixel(dst, src, 1.0);
        }
    }
}

/// Signed distance from `(px, py)` to a rounded rectangle; negative inside.
fn rounded_rect_distance(rect: Rect, radius: f64, px: f64, py: f64) -> f64 {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let c = rect.center();
    let qx = (px - c.x).abs() - (rect.width / 2.0 - r);
    let qy = (py - c.y).abs() - (rect.height / 2.0 - r);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

/// Pixel bounds of `rect` grown by `pad`, clipped to the canvas.
fn clipped_bounds(canvas: &RgbaImage, rect: Rect, pad: f64) -> (i64, i64, i64, i64) {
    let x0 = ((rect.x - pad).floor() as i64).max(0);
    let y0 = ((rect.y - pad).floor() as i64).max(0);
    let x1 = ((rect.right() + pad).ceil() as i64).min(canvas.width() as i64);
    let y1 = ((rect.bottom() + pad).ceil() as i64).min(canvas.height() as i64);
    (x0, y0, x1, y1)
}

/// Anti-aliased filled rounded rectangle.
pub fn fill_rounded_rect(canvas: &mut RgbaImage, rect: Rect, radius: f64, color: Rgba8) {
    let (x0, y0, x1, y1) = clipped_bounds(canvas, rect, 1.0);
    for y in y0..y1 {
        for x in x0..x1 {
            let d = rounded_rect_distance(rect, radius, x as f64 + 0.5, y as f64 + 0.5);
            let coverage = (0.5 - d).clamp(0.0, 1.0) as f32;
            if coverage > 0.0 {
                blend_pixel(canvas.get_pixel_mut(x as u32, y as u32), color, coverage);
            }
        }
    }
}

/// Anti-aliased outline centered on the rounded rectangle's edge.
pub fn stroke_rounded_rect(
    canvas: &mut RgbaImage,
    rect: Rect,
    radius: f64,
    line_width: f64,
    color: Rgba8,
) {
    let half = line_width / 2.0;
    let (x0, y0, x1, y1) = clipped_bounds(canvas, rect, half + 1.0);
    for y in y0..y1 {
        for x in x0..x1 {
            let d = rounded_rect_distance(rect, radius, x as f64 + 0.5, y as f64 + 0.5);
            let coverage = (half + 0.5 - d.abs()).clamp(0.0, 1.0) as f32;
            if coverage > 0.0 {
                blend_pixel(canvas.get_pixel_mut(x as u32, y as u32), color, coverage);
            }
        }
    }
}
