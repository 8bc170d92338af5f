/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
use rasterwarp_common::ranges::LinearRange;
use tracing::debug;

use crate::errors::{transform_failure, Result};
use crate::transform::Transformer;
use crate::types::{Rect, ResampleAlg};

const EDGE_SAMPLES: usize = 21;
const TOTAL_POINTS: usize = EDGE_SAMPLES * 4;
const MIN_SURVIVING_POINTS: usize = 10;

/// samples 21 evenly-spaced points per edge of `dst` (top, bottom, left, right - 84 total),
/// inverse-transforms them, and returns the smallest source rectangle containing the
/// surviving points, padded by the resampling half-width and clamped to `(src_w, src_h)`.
///
/// fewer than 10 surviving points is a `TransformFailure`; partial failure with at least 10
/// survivors is logged and otherwise tolerated.
pub fn compute_source_window(
    dst: Rect,
    src_w: i64,
    src_h: i64,
    resample_alg: ResampleAlg,
    transformer: &dyn Transformer,
) -> Result<Rect> {
    let ts: LinearRange<f64> = LinearRange::new(0.0, 0.05, EDGE_SAMPLES);

    let mut xs = Vec::with_capacity(TOTAL_POINTS);
    let mut ys = Vec::with_capacity(TOTAL_POINTS);
    for t in ts.as_iter() {
        let t = if t > 0.99 { 1.0 } else { t };
        let dx = dst.x as f64 + t * dst.w as f64;
        let dy = dst.y as f64 + t * dst.h as f64;

        // top edge
        xs.push(dx);
        ys.push(dst.y as f64);
        // bottom edge
        xs.push(dx);
        ys.push((dst.y + dst.h) as f64);
        // left edge
        xs.push(dst.x as f64);
        ys.push(dy);
        // right edge
        xs.push((dst.x + dst.w) as f64);
        ys.push(dy);
    }
    assert_eq!(xs.len(), TOTAL_POINTS, "edge sampling must produce exactly 84 points");

    let mut zs = vec![0.0; TOTAL_POINTS];
    let mut success = vec![false; TOTAL_POINTS];

    if !transformer.transform(true, &mut xs, &mut ys, &mut zs, &mut success) {
        return Err(transform_failure("transformer rejected the whole edge-sample batch"));
    }

    let surviving = success.iter().filter(|&&ok| ok).count();
    let failures = TOTAL_POINTS - surviving;

    if failures > TOTAL_POINTS - MIN_SURVIVING_POINTS {
        return Err(transform_failure(format!(
            "only {surviving} of {TOTAL_POINTS} edge sample points transformed successfully"
        )));
    }
    if failures > 0 {
        debug!(failures, surviving, "some edge sample points failed to transform, continuing with survivors");
    }

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for i in 0..TOTAL_POINTS {
        if success[i] {
            min_x = min_x.min(xs[i]);
            max_x = max_x.max(xs[i]);
            min_y = min_y.min(ys[i]);
            max_y = max_y.max(ys[i]);
        }
    }

    let r = resample_alg.half_width();

    // additive to both origin and size - a known quirk, see design notes §9 open question 1.
    let sx = (min_x.floor() as i64 + r).max(0);
    let sy = (min_y.floor() as i64 + r).max(0);
    let sw = (src_w - sx).min(max_x.ceil() as i64 - sx + r);
    let sh = (src_h - sy).min(max_y.ceil() as i64 - sy + r);

    Ok(Rect::new(sx, sy, sw, sh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::IdentityTransformer;

    #[test]
    fn edge_sampling_produces_exactly_84_points() {
        // identity transform keeps min/max equal to the destination rect itself
        let dst = Rect::new(10, 10, 20, 20);
        let window = compute_source_window(dst, 1000, 1000, ResampleAlg::Nearest, &IdentityTransformer).unwrap();
        assert_eq!(window, Rect::new(10, 10, 20, 20));
    }

    #[test]
    fn cubic_half_width_pads_additively() {
        // a transformer whose inverse-projected AABB over the 84 edge points is exactly
        // [100.3, 200.7] x [50.2, 60.9], matching the literal end-to-end scenario in §8.
        struct Fixed;
        impl Transformer for Fixed {
            fn transform(&self, _dst_to_src: bool, x: &mut [f64], y: &mut [f64], _z: &mut [f64], success: &mut [bool]) -> bool {
                let n = x.len();
                for i in 0..n {
                    let t = i as f64 / (n - 1) as f64;
                    x[i] = 100.3 + (200.7 - 100.3) * t;
                    y[i] = 50.2 + (60.9 - 50.2) * t;
                }
                success.fill(true);
                true
            }
        }
        let dst = Rect::new(0, 0, 64, 64);
        let window = compute_source_window(dst, 300, 300, ResampleAlg::Cubic, &Fixed).unwrap();
        assert_eq!(window, Rect::new(102, 52, 101, 11));
    }

    #[test]
    fn too_many_failures_is_transform_failure() {
        struct MostlyFail;
        impl Transformer for MostlyFail {
            fn transform(&self, _dst_to_src: bool, _x: &mut [f64], _y: &mut [f64], _z: &mut [f64], success: &mut [bool]) -> bool {
                success.fill(false);
                success[0] = true;
                true
            }
        }
        let dst = Rect::new(0, 0, 100, 100);
        let err = compute_source_window(dst, 1000, 1000, ResampleAlg::Nearest, &MostlyFail).unwrap_err();
        assert!(matches!(err, crate::errors::WarpError::TransformFailure(_)));
    }

    #[test]
    fn exactly_ten_surviving_points_succeeds() {
        struct ExactlyTen;
        impl Transformer for ExactlyTen {
            fn transform(&self, _dst_to_src: bool, x: &mut [f64], y: &mut [f64], _z: &mut [f64], success: &mut [bool]) -> bool {
                success.fill(false);
                for i in 0..10 {
                    success[i] = true;
                    x[i] = 5.0 + i as f64;
                    y[i] = 5.0 + i as f64;
                }
                true
            }
        }
        let dst = Rect::new(0, 0, 100, 100);
        let window = compute_source_window(dst, 1000, 1000, ResampleAlg::Nearest, &ExactlyTen).unwrap();
        assert_eq!(window, Rect::new(5, 5, 9, 9));
    }
}
