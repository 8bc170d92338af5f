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
use tracing::error;

use crate::errors::Result;
use crate::estimator::compute_source_window;
use crate::kernel::{DefaultKernel, WarpKernel, WarpKernelCall};
use crate::mask::MaskSet;
use crate::options::WarpOptions;
use crate::progress::ProgressWindow;
use crate::rasterio::RasterIo;
use crate::types::{Rect, WorkingType};

/// stages source-band buffers, materializes the mask planes §4.5 calls for, and invokes the
/// warp kernel against the caller-owned destination buffer. `src` may be the zero rect, in
/// which case it is computed from `dst` via the estimator.
///
/// `dst_buf` must already hold `word_size(working_type) * dst.w * dst.h * band_count` bytes,
/// band-planar - the precondition documented (but historically unenforced) for this call; this
/// rewrite enforces it (see design notes §9, open question 3).
pub fn warp_region_to_buffer(
    opts: &WarpOptions,
    src_io: &dyn RasterIo,
    src: Rect,
    dst: Rect,
    dst_buf: &mut [u8],
    progress: ProgressWindow,
) -> Result<()> {
    let band_count = opts.band_count();
    let word = opts.working_type.bytes();

    let plane_bytes = word * (dst.w as usize) * (dst.h as usize);
    let expected_len = plane_bytes * band_count;
    if dst_buf.len() != expected_len {
        return Err(crate::errors::WarpError::Internal(
            "destination buffer length does not match working type * window * band count",
        ));
    }

    let src = if src.is_empty() {
        let (src_w, src_h) = src_io.raster_size();
        compute_source_window(dst, src_w, src_h, opts.resample_alg, opts.transformer.as_ref())?
    } else {
        src
    };

    let src_plane_bytes = word * (src.w as usize) * (src.h as usize);
    let mut src_bands: Vec<Vec<u8>> = Vec::with_capacity(band_count);
    for &band in &opts.src_bands {
        let mut plane = vec![0u8; src_plane_bytes];
        if let Err(e) = src_io.read(band, src, &mut plane, opts.working_type) {
            error!(error = %e, band, "failed to read source band into warp buffer");
            return Err(e);
        }
        src_bands.push(plane);
    }

    let mut masks = MaskSet::new(band_count);

    if !opts.src_no_data.is_empty() {
        for band_idx in 0..band_count {
            let no_data = opts.src_no_data.at(band_idx);
            let mask = masks.ensure_band_src_valid(band_idx, src.w as usize, src.h as usize)?;
            clear_no_data_pixels(mask, &src_bands[band_idx], src.w as usize, src.h as usize, opts.working_type, no_data);
        }
    }
    if opts.mask_generators.unified_src_valid {
        masks.create_kernel_mask(crate::mask::MaskName::UnifiedSrcValid, None, src.w as usize, src.h as usize)?;
    }
    if opts.mask_generators.unified_src_density {
        masks.create_kernel_mask(crate::mask::MaskName::UnifiedSrcDensity, None, src.w as usize, src.h as usize)?;
    }
    if opts.mask_generators.dst_valid {
        masks.create_kernel_mask(crate::mask::MaskName::DstValid, None, dst.w as usize, dst.h as usize)?;
    }
    if opts.mask_generators.dst_density {
        masks.create_kernel_mask(crate::mask::MaskName::DstDensity, None, dst.w as usize, dst.h as usize)?;
    }

    let mut dst_band_refs: Vec<&mut [u8]> = dst_buf.chunks_mut(plane_bytes).collect();

    let kernel = DefaultKernel;
    let mut call = WarpKernelCall {
        resample_alg: opts.resample_alg,
        working_type: opts.working_type,
        band_count,
        src_window: src,
        dst_window: dst,
        src_bands: &src_bands,
        dst_bands: &mut dst_band_refs,
        masks: &mut masks,
        progress,
    };

    let progress_handle = opts.progress.clone();
    let mut report = move |fraction: f64| -> bool {
        let mut sink = progress_handle.lock().expect("progress sink mutex poisoned");
        sink.report(fraction, "warping")
    };

    kernel.run(&mut call, &mut report)
}

/// clears the per-band source-valid mask bit at every pixel whose working-type value equals
/// `no_data` under exact comparison.
fn clear_no_data_pixels(
    mask: &mut crate::mask::BitMask,
    band: &[u8],
    w: usize,
    h: usize,
    ty: WorkingType,
    no_data: crate::types::Complex,
) {
    let word = ty.bytes();
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * word;
            let bytes = &band[off..off + word];
            if sample_equals(bytes, ty, no_data) {
                mask.set(x, y, false);
            }
        }
    }
}

fn sample_equals(bytes: &[u8], ty: WorkingType, no_data: crate::types::Complex) -> bool {
    use WorkingType::*;
    match ty {
        Byte => bytes[0] as f64 == no_data.re,
        UInt16 => u16::from_ne_bytes(bytes.try_into().unwrap()) as f64 == no_data.re,
        Int16 => i16::from_ne_bytes(bytes.try_into().unwrap()) as f64 == no_data.re,
        UInt32 => u32::from_ne_bytes(bytes.try_into().unwrap()) as f64 == no_data.re,
        Int32 => i32::from_ne_bytes(bytes.try_into().unwrap()) as f64 == no_data.re,
        Float32 => f32::from_ne_bytes(bytes.try_into().unwrap()) as f64 == no_data.re,
        Float64 => f64::from_ne_bytes(bytes.try_into().unwrap()) == no_data.re,
        CInt16 => {
            let re = i16::from_ne_bytes(bytes[0..2].try_into().unwrap()) as f64;
            let im = i16::from_ne_bytes(bytes[2..4].try_into().unwrap()) as f64;
            re == no_data.re && im == no_data.im
        }
        CInt32 => {
            let re = i32::from_ne_bytes(bytes[0..4].try_into().unwrap()) as f64;
            let im = i32::from_ne_bytes(bytes[4..8].try_into().unwrap()) as f64;
            re == no_data.re && im == no_data.im
        }
        CFloat32 => {
            let re = f32::from_ne_bytes(bytes[0..4].try_into().unwrap()) as f64;
            let im = f32::from_ne_bytes(bytes[4..8].try_into().unwrap()) as f64;
            re == no_data.re && im == no_data.im
        }
        CFloat64 => {
            let re = f64::from_ne_bytes(bytes[0..8].try_into().unwrap());
            let im = f64::from_ne_bytes(bytes[8..16].try_into().unwrap());
            re == no_data.re && im == no_data.im
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_clears_matching_byte_pixel() {
        // 4x4 single-band byte source, no-data = 0, pixel (0,0) is 0, rest are 5
        let mut band = vec![5u8; 16];
        band[0] = 0;
        let mut mask = crate::mask::BitMask::new_all_valid(4, 4);
        clear_no_data_pixels(&mut mask, &band, 4, 4, WorkingType::Byte, crate::types::Complex::real(0.0));
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(mask.get(3, 3));
    }
}
