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
use tracing::{debug, warn};

use crate::errors::Result;
use crate::estimator::compute_source_window;
use crate::options::WarpOptions;
use crate::progress::ProgressWindow;
use crate::rasterio::RasterIo;
use crate::region::warp_region;
use crate::types::Rect;

/// per-pixel bit cost on the source side, per §4.3.
fn src_bits_per_pixel(opts: &WarpOptions) -> u32 {
    let band_count = opts.band_count() as u32;
    let mut bits = opts.working_type.bits() * band_count;
    if opts.mask_generators.unified_src_density {
        bits += 32;
    }
    if opts.mask_generators.band_src_valid || !opts.src_no_data.is_empty() {
        bits += band_count;
    }
    if opts.mask_generators.unified_src_valid {
        bits += 1;
    }
    bits
}

/// per-pixel bit cost on the destination side, per §4.3.
fn dst_bits_per_pixel(opts: &WarpOptions) -> u32 {
    let band_count = opts.band_count() as u32;
    let mut bits = opts.working_type.bits() * band_count;
    if opts.mask_generators.dst_density {
        bits += 32;
    }
    if opts.mask_generators.dst_valid || !opts.dst_no_data.is_empty() {
        bits += band_count;
    }
    bits
}

fn estimated_bytes(opts: &WarpOptions, src: Rect, dst: Rect) -> f64 {
    let src_bytes = src_bits_per_pixel(opts) as f64 * src.area() as f64 / 8.0;
    let dst_bytes = dst_bits_per_pixel(opts) as f64 * dst.area() as f64 / 8.0;
    src_bytes + dst_bytes
}

/// recursively subdivides `dst` until each leaf's estimated memory cost (source + destination
/// + masks) fits the configured budget, or until both dimensions have shrunk to 2 pixels or
/// less, then executes each leaf via the region executor. `progress` starts at the caller's
/// window and is halved on every split, restored after both halves complete - see §4.3 and the
/// `ProgressWindow` documentation for the composition contract.
pub fn chunk_and_warp(
    opts: &WarpOptions,
    src_io: &dyn RasterIo,
    dst_io: &dyn RasterIo,
    dst: Rect,
    progress: ProgressWindow,
) -> Result<()> {
    let (src_w, src_h) = src_io.raster_size();
    let src = compute_source_window(dst, src_w, src_h, opts.resample_alg, opts.transformer.as_ref())?;

    let bytes = estimated_bytes(opts, src, dst);
    let can_split = dst.w > 2 || dst.h > 2;

    if bytes > opts.memory_budget_bytes && can_split {
        let (lower, upper) = split_longer_dimension(dst);
        debug!(?lower, ?upper, bytes, budget = opts.memory_budget_bytes, "splitting chunk over budget");

        let (lo_progress, hi_progress) = progress.split();
        chunk_and_warp(opts, src_io, dst_io, lower, lo_progress)?;
        chunk_and_warp(opts, src_io, dst_io, upper, hi_progress)?;
        return Ok(());
    }

    if bytes > opts.memory_budget_bytes {
        warn!(bytes, budget = opts.memory_budget_bytes, "chunk at 2x2 floor still exceeds memory budget, executing anyway");
    }

    warp_region(opts, src_io, dst_io, src, dst, progress)
}

fn split_longer_dimension(dst: Rect) -> (Rect, Rect) {
    if dst.w >= dst.h {
        let c1 = dst.w / 2;
        let c2 = dst.w - c1;
        (Rect::new(dst.x, dst.y, c1, dst.h), Rect::new(dst.x + c1, dst.y, c2, dst.h))
    } else {
        let c1 = dst.h / 2;
        let c2 = dst.h - c1;
        (Rect::new(dst.x, dst.y, dst.w, c1), Rect::new(dst.x, dst.y + c1, dst.w, c2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_picks_longer_dimension() {
        let (lo, hi) = split_longer_dimension(Rect::new(0, 0, 10, 4));
        assert_eq!(lo, Rect::new(0, 0, 5, 4));
        assert_eq!(hi, Rect::new(5, 0, 5, 4));

        let (lo, hi) = split_longer_dimension(Rect::new(0, 0, 4, 10));
        assert_eq!(lo, Rect::new(0, 0, 4, 5));
        assert_eq!(hi, Rect::new(0, 5, 4, 5));
    }

    #[test]
    fn split_tiles_exactly_with_no_gap_or_overlap() {
        let dst = Rect::new(3, 7, 11, 4);
        let (lo, hi) = split_longer_dimension(dst);
        assert_eq!(lo.area() + hi.area(), dst.area());
        assert_eq!(lo.x, dst.x);
        assert_eq!(hi.x + hi.w, dst.x + dst.w);
    }
}
