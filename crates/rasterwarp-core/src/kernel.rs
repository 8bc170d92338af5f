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
use crate::errors::Result;
use crate::mask::MaskSet;
use crate::progress::ProgressWindow;
use crate::types::{Rect, ResampleAlg, WorkingType};

/// everything the buffer executor hands to the low-level warp kernel: band buffers, window
/// geometry, the resampling algorithm, and the mask planes the kernel should consult/update.
/// this is `WarpKernelCall` from §3 - it owns the source-band buffers and the mask planes,
/// and borrows the destination buffer from the region executor.
pub struct WarpKernelCall<'a> {
    pub resample_alg: ResampleAlg,
    pub working_type: WorkingType,
    pub band_count: usize,
    pub src_window: Rect,
    pub dst_window: Rect,
    pub src_bands: &'a [Vec<u8>],
    pub dst_bands: &'a mut [&'a mut [u8]],
    pub masks: &'a mut MaskSet,
    pub progress: ProgressWindow,
}

/// the low-level resampling collaborator. given fully resident source and destination
/// buffers and masks, fills every destination pixel. computing the actual filter
/// coefficients is entirely the implementor's concern - out of scope for this crate's core.
pub trait WarpKernel {
    fn run(&self, call: &mut WarpKernelCall, report_progress: &mut dyn FnMut(f64) -> bool) -> Result<()>;
}

/// a real, if simple, nearest/bilinear/cubic kernel so the engine can be exercised end to end
/// without a production-grade resampler plugged in. per-pixel math mirrors the textbook
/// nearest/bilinear/cubic-convolution formulas used by other pixel resamplers in this
/// workspace's reference pack.
pub struct DefaultKernel;

impl DefaultKernel {
    fn sample_band(&self, band: &[u8], sw: usize, sh: usize, ty: WorkingType, sx: f64, sy: f64, alg: ResampleAlg) -> f64 {
        match alg {
            ResampleAlg::Nearest => {
                let x = (sx.round() as i64).clamp(0, sw as i64 - 1) as usize;
                let y = (sy.round() as i64).clamp(0, sh as i64 - 1) as usize;
                read_sample(band, sw, ty, x, y)
            }
            ResampleAlg::Bilinear => {
                let x0 = sx.floor().clamp(0.0, (sw - 1) as f64);
                let y0 = sy.floor().clamp(0.0, (sh - 1) as f64);
                let x1 = (x0 + 1.0).min((sw - 1) as f64);
                let y1 = (y0 + 1.0).min((sh - 1) as f64);
                let fx = sx - x0;
                let fy = sy - y0;
                let v00 = read_sample(band, sw, ty, x0 as usize, y0 as usize);
                let v10 = read_sample(band, sw, ty, x1 as usize, y0 as usize);
                let v01 = read_sample(band, sw, ty, x0 as usize, y1 as usize);
                let v11 = read_sample(band, sw, ty, x1 as usize, y1 as usize);
                let top = v00 * (1.0 - fx) + v10 * fx;
                let bottom = v01 * (1.0 - fx) + v11 * fx;
                top * (1.0 - fy) + bottom * fy
            }
            ResampleAlg::Cubic => {
                // cubic convolution along each axis with a=-0.5, falling back to the nearest
                // in-bounds sample at the footprint edges.
                let gx = sx.floor();
                let gy = sy.floor();
                let fx = sx - gx;
                let fy = sy - gy;
                let mut rows = [0.0f64; 4];
                for j in -1..=2i64 {
                    let y = (gy as i64 + j).clamp(0, sh as i64 - 1) as usize;
                    let mut samples = [0.0f64; 4];
                    for i in -1..=2i64 {
                        let x = (gx as i64 + i).clamp(0, sw as i64 - 1) as usize;
                        samples[(i + 1) as usize] = read_sample(band, sw, ty, x, y);
                    }
                    rows[(j + 1) as usize] = cubic_interp(samples, fx);
                }
                cubic_interp(rows, fy)
            }
        }
    }
}

fn cubic_weight(t: f64) -> f64 {
    let a = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        (a + 2.0) * t.powi(3) - (a + 3.0) * t.powi(2) + 1.0
    } else if t < 2.0 {
        a * t.powi(3) - 5.0 * a * t.powi(2) + 8.0 * a * t - 4.0 * a
    } else {
        0.0
    }
}

fn cubic_interp(samples: [f64; 4], frac: f64) -> f64 {
    let w0 = cubic_weight(frac + 1.0);
    let w1 = cubic_weight(frac);
    let w2 = cubic_weight(frac - 1.0);
    let w3 = cubic_weight(frac - 2.0);
    samples[0] * w0 + samples[1] * w1 + samples[2] * w2 + samples[3] * w3
}

fn read_sample(band: &[u8], w: usize, ty: WorkingType, x: usize, y: usize) -> f64 {
    let word = ty.bytes();
    let off = (y * w + x) * word;
    let bytes = &band[off..off + word];
    match ty {
        WorkingType::Byte => bytes[0] as f64,
        WorkingType::UInt16 => u16::from_ne_bytes(bytes.try_into().unwrap()) as f64,
        WorkingType::Int16 => i16::from_ne_bytes(bytes.try_into().unwrap()) as f64,
        WorkingType::UInt32 => u32::from_ne_bytes(bytes.try_into().unwrap()) as f64,
        WorkingType::Int32 => i32::from_ne_bytes(bytes.try_into().unwrap()) as f64,
        WorkingType::Float32 => f32::from_ne_bytes(bytes.try_into().unwrap()) as f64,
        WorkingType::Float64 => f64::from_ne_bytes(bytes.try_into().unwrap()),
        // complex types: real component only for the default kernel's (real-valued) sampling
        WorkingType::CInt16 => i16::from_ne_bytes(bytes[0..2].try_into().unwrap()) as f64,
        WorkingType::CInt32 => i32::from_ne_bytes(bytes[0..4].try_into().unwrap()) as f64,
        WorkingType::CFloat32 => f32::from_ne_bytes(bytes[0..4].try_into().unwrap()) as f64,
        WorkingType::CFloat64 => f64::from_ne_bytes(bytes[0..8].try_into().unwrap()),
    }
}

fn write_sample(band: &mut [u8], w: usize, ty: WorkingType, x: usize, y: usize, v: f64) {
    let word = ty.bytes();
    let off = (y * w + x) * word;
    let bytes = &mut band[off..off + word];
    match ty {
        WorkingType::Byte => bytes[0] = v.clamp(0.0, 255.0) as u8,
        WorkingType::UInt16 => bytes.copy_from_slice(&(v.clamp(0.0, u16::MAX as f64) as u16).to_ne_bytes()),
        WorkingType::Int16 => bytes.copy_from_slice(&(v as i16).to_ne_bytes()),
        WorkingType::UInt32 => bytes.copy_from_slice(&(v.clamp(0.0, u32::MAX as f64) as u32).to_ne_bytes()),
        WorkingType::Int32 => bytes.copy_from_slice(&(v as i32).to_ne_bytes()),
        WorkingType::Float32 => bytes.copy_from_slice(&(v as f32).to_ne_bytes()),
        WorkingType::Float64 => bytes.copy_from_slice(&v.to_ne_bytes()),
        WorkingType::CInt16 => bytes[0..2].copy_from_slice(&(v as i16).to_ne_bytes()),
        WorkingType::CInt32 => bytes[0..4].copy_from_slice(&(v as i32).to_ne_bytes()),
        WorkingType::CFloat32 => bytes[0..4].copy_from_slice(&(v as f32).to_ne_bytes()),
        WorkingType::CFloat64 => bytes[0..8].copy_from_slice(&v.to_ne_bytes()),
    }
}

impl WarpKernel for DefaultKernel {
    fn run(&self, call: &mut WarpKernelCall, report_progress: &mut dyn FnMut(f64) -> bool) -> Result<()> {
        let sw = call.src_window.w as usize;
        let sh = call.src_window.h as usize;
        let dw = call.dst_window.w as usize;
        let dh = call.dst_window.h as usize;

        // scale factors mapping destination-local pixel centers onto source-window-local
        // coordinates; this is a minimal stand-in for whatever the real transformer-driven
        // per-pixel inverse mapping would be.
        let scale_x = if dw > 0 { sw as f64 / dw as f64 } else { 0.0 };
        let scale_y = if dh > 0 { sh as f64 / dh as f64 } else { 0.0 };

        for band_idx in 0..call.band_count {
            let src_band = &call.src_bands[band_idx];
            let valid = call.masks.band_src_valid.get(band_idx).and_then(|m| m.as_ref());

            for dy in 0..dh {
                let sy = ((dy as f64 + 0.5) * scale_y - 0.5).clamp(0.0, (sh.max(1) - 1) as f64);
                for dx in 0..dw {
                    let sx = ((dx as f64 + 0.5) * scale_x - 0.5).clamp(0.0, (sw.max(1) - 1) as f64);

                    let nearest_x = (sx.round() as usize).min(sw.saturating_sub(1));
                    let nearest_y = (sy.round() as usize).min(sh.saturating_sub(1));
                    if let Some(mask) = valid {
                        if !mask.get(nearest_x, nearest_y) {
                            continue;
                        }
                    }

                    let v = self.sample_band(src_band, sw, sh, call.working_type, sx, sy, call.resample_alg);
                    write_sample(call.dst_bands[band_idx], dw, call.working_type, dx, dy, v);
                }
            }

            let frac = (band_idx + 1) as f64 / call.band_count.max(1) as f64;
            if !report_progress(call.progress.global(frac)) {
                return Err(crate::errors::WarpError::Aborted);
            }
        }
        Ok(())
    }
}
