use image::RgbaImage;
use ndarray::Array2;
use rayon::prelude::*;

use crate::config::ShadowConfig;
use crate::consts::{PARALLEL_PIXEL_THRESHOLD, SHADOW_BLUR_TO_SIGMA};

use super::blend::blend_at;

/// Draw a blurred drop shadow of `sprite`'s alpha, as if the sprite sat at (`x`, `y`).
pub fn draw_drop_shadow(
    canvas: &mut RgbaImage,
    sprite: &RgbaImage,
    x: i64,
    y: i64,
    style: &ShadowConfig,
) {
    if !style.enabled || style.color[3] == 0 {
        return;
    }

    let sigma = style.blur * SHADOW_BLUR_TO_SIGMA;
    let pad = if sigma > 0.0 { (sigma * 3.0).ceil() as usize } else { 0 };
    let (sw, sh) = (sprite.width() as usize, sprite.height() as usize);

    let mut mask = Array2::<f32>::zeros((sh + 2 * pad, sw + 2 * pad));
    for (col, row, px) in sprite.enumerate_pixels() {
        mask[[row as usize + pad, col as usize + pad]] = px[3] as f32 / 255.0;
    }
    let mask = if sigma > 0.0 {
        gaussian_blur_array(&mask, sigma)
    } else {
        mask
    };

    let origin_x = x - pad as i64 + style.offset_x;
    let origin_y = y - pad as i64 + style.offset_y;
    for ((row, col), &a) in mask.indexed_iter() {
        if a > 1.0 / 512.0 {
            blend_at(canvas, origin_x + col as i64, origin_y + row as i64, style.color, a);
        }
    }
}

/// Separable Gaussian blur of a mask. Edges clamp to the nearest sample.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let kernel = make_gaussian_kernel(sigma);
    let row_pass = convolve_rows(data, &kernel);
    convolve_cols(&row_pass, &kernel)
}

fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

fn collect_rows(rows: Vec<Vec<f32>>, h: usize, w: usize) -> Array2<f32> {
    let flat: Vec<f32> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((h, w), flat).unwrap_or_else(|_| Array2::zeros((h, w)))
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let row_at = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_col = (col as isize + ki as isize - radius as isize)
                        .clamp(0, w as isize - 1) as usize;
                    sum += data[[row, src_col]] * kv;
                }
                sum
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(row_at).collect()
    } else {
        (0..h).map(row_at).collect()
    };
    collect_rows(rows, h, w)
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let row_at = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_row = (row as isize + ki as isize - radius as isize)
                        .clamp(0, h as isize - 1) as usize;
                    sum += data[[src_row, col]] * kv;
                }
                sum
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(row_at).collect()
    } else {
        (0..h).map(row_at).collect()
    };
    collect_rows(rows, h, w)
}
