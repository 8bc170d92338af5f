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
use rasterwarp_common::clampi;
use tracing::error;

use crate::buffer::warp_region_to_buffer;
use crate::errors::{config_invalid, Result};
use crate::options::WarpOptions;
use crate::progress::ProgressWindow;
use crate::rasterio::RasterIo;
use crate::types::{Complex, Rect, WorkingType};

/// allocates the destination buffer for one chunk, applies the `INIT_DEST` fill policy
/// (§4.4), dispatches to the buffer executor, and writes the result back. every exit path
/// frees the buffer (it's an owned `Vec`, dropped on return).
pub fn warp_region(
    opts: &WarpOptions,
    src_io: &dyn RasterIo,
    dst_io: &dyn RasterIo,
    src: Rect,
    dst: Rect,
    progress: ProgressWindow,
) -> Result<()> {
    let band_count = opts.band_count();
    let word = opts.working_type.bytes();
    let plane_bytes = word * (dst.w as usize) * (dst.h as usize);
    let total_bytes = plane_bytes * band_count;

    let mut dst_buf = vec![0u8; total_bytes];

    match init_dest_value(opts) {
        InitDest::ReadBack => {
            for (i, &band) in opts.dst_bands.iter().enumerate() {
                let plane = &mut dst_buf[i * plane_bytes..(i + 1) * plane_bytes];
                dst_io.read(band, dst, plane, opts.working_type).map_err(|e| {
                    error!(error = %e, band, "failed to read back destination band for in-place warp");
                    e
                })?;
            }
        }
        InitDest::Fill(values) => {
            for (i, plane_fill) in values.into_iter().enumerate() {
                let plane = &mut dst_buf[i * plane_bytes..(i + 1) * plane_bytes];
                fill_plane(plane, opts.working_type, plane_fill);
            }
        }
    }

    let result = warp_region_to_buffer(opts, src_io, src, dst, &mut dst_buf, progress);

    if result.is_err() {
        if let Err(ref e) = result {
            error!(error = %e, ?dst, "warp_region_to_buffer failed");
        }
        return result;
    }

    for (i, &band) in opts.dst_bands.iter().enumerate() {
        let plane = &dst_buf[i * plane_bytes..(i + 1) * plane_bytes];
        dst_io.write(band, dst, plane, opts.working_type).map_err(|e| {
            error!(error = %e, band, "failed to write destination band back");
            e
        })?;
    }

    Ok(())
}

enum InitDest {
    ReadBack,
    Fill(Vec<Complex>),
}

fn init_dest_value(opts: &WarpOptions) -> InitDest {
    let Some(raw) = opts.string_options.get("INIT_DEST") else {
        return InitDest::ReadBack;
    };

    let band_count = opts.band_count();
    let mut values = Vec::with_capacity(band_count);
    for i in 0..band_count {
        let value = if raw == "NO_DATA" {
            if !opts.dst_no_data.is_empty() {
                opts.dst_no_data.at(i)
            } else {
                parse_complex("NO_DATA").unwrap_or(Complex::real(0.0))
            }
        } else {
            parse_complex(raw).unwrap_or(Complex::real(0.0))
        };
        values.push(value);
    }
    InitDest::Fill(values)
}

/// parses `"a"`, `"a+bi"`/`"a-bi"`, or `"a,b"` into a `Complex`. anything unparseable falls
/// back to a real zero - the region executor treats a malformed literal as "no fill value",
/// matching the tolerant parsing the original option string documents.
fn parse_complex(raw: &str) -> Option<Complex> {
    if let Some((re, im)) = raw.split_once(',') {
        return Some(Complex {
            re: re.trim().parse().ok()?,
            im: im.trim().parse().ok()?,
        });
    }
    if let Some(stripped) = raw.strip_suffix('i') {
        let stripped = stripped.trim();
        if let Some(pos) = stripped.rfind(['+', '-']).filter(|&p| p > 0) {
            let (re, im) = stripped.split_at(pos);
            return Some(Complex {
                re: re.trim().parse().ok()?,
                im: im.trim().parse().ok()?,
            });
        }
        return Some(Complex { re: 0.0, im: stripped.parse().ok()? });
    }
    raw.trim().parse().ok().map(Complex::real)
}

fn fill_plane(plane: &mut [u8], ty: WorkingType, value: Complex) {
    if ty.is_byte() {
        let v = clampi(value.re as i64, 0, 255) as u8;
        plane.fill(v);
        return;
    }
    if value.re == 0.0 && value.im == 0.0 {
        plane.fill(0);
        return;
    }
    write_broadcast(plane, ty, value);
}

/// broadcasts a scalar (real, or complex when `ty.is_complex()`) into every pixel of `plane`.
fn write_broadcast(plane: &mut [u8], ty: WorkingType, value: Complex) {
    use WorkingType::*;
    let word = ty.bytes();
    let n = plane.len() / word;

    macro_rules! broadcast_real {
        ($t:ty, $conv:expr) => {{
            let v: $t = $conv(value.re);
            let bytes = v.to_ne_bytes();
            for i in 0..n {
                plane[i * word..(i + 1) * word].copy_from_slice(&bytes);
            }
        }};
    }

    match ty {
        Byte => unreachable!("byte path handled by fill_plane"),
        UInt16 => broadcast_real!(u16, |r: f64| r.clamp(0.0, u16::MAX as f64) as u16),
        Int16 => broadcast_real!(i16, |r: f64| r.clamp(i16::MIN as f64, i16::MAX as f64) as i16),
        UInt32 => broadcast_real!(u32, |r: f64| r.clamp(0.0, u32::MAX as f64) as u32),
        Int32 => broadcast_real!(i32, |r: f64| r.clamp(i32::MIN as f64, i32::MAX as f64) as i32),
        Float32 => broadcast_real!(f32, |r: f64| r as f32),
        Float64 => broadcast_real!(f64, |r: f64| r),
        CInt16 => {
            let re = value.re as i16;
            let im = value.im as i16;
            let mut bytes = [0u8; 4];
            bytes[0..2].copy_from_slice(&re.to_ne_bytes());
            bytes[2..4].copy_from_slice(&im.to_ne_bytes());
            for i in 0..n {
                plane[i * word..(i + 1) * word].copy_from_slice(&bytes);
            }
        }
        CInt32 => {
            let re = value.re as i32;
            let im = value.im as i32;
            let mut bytes = [0u8; 8];
            bytes[0..4].copy_from_slice(&re.to_ne_bytes());
            bytes[4..8].copy_from_slice(&im.to_ne_bytes());
            for i in 0..n {
                plane[i * word..(i + 1) * word].copy_from_slice(&bytes);
            }
        }
        CFloat32 => {
            let re = value.re as f32;
            let im = value.im as f32;
            let mut bytes = [0u8; 8];
            bytes[0..4].copy_from_slice(&re.to_ne_bytes());
            bytes[4..8].copy_from_slice(&im.to_ne_bytes());
            for i in 0..n {
                plane[i * word..(i + 1) * word].copy_from_slice(&bytes);
            }
        }
        CFloat64 => {
            let re = value.re;
            let im = value.im;
            let mut bytes = [0u8; 16];
            bytes[0..8].copy_from_slice(&re.to_ne_bytes());
            bytes[8..16].copy_from_slice(&im.to_ne_bytes());
            for i in 0..n {
                plane[i * word..(i + 1) * word].copy_from_slice(&bytes);
            }
        }
    }
}

/// surfaces a config error for callers that want to validate `INIT_DEST` eagerly rather than
/// discover a parse failure mid-fill. not used by `warp_region` itself (which tolerates a
/// malformed literal by falling back to zero), but kept for CLI-side validation.
pub fn validate_init_dest(raw: &str) -> Result<()> {
    if raw == "NO_DATA" {
        return Ok(());
    }
    parse_complex(raw)
        .map(|_| ())
        .ok_or_else(|| config_invalid(format!("INIT_DEST value {raw:?} is not a valid complex literal")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_fill_clamps_to_range() {
        let mut plane = vec![0u8; 4];
        fill_plane(&mut plane, WorkingType::Byte, Complex::real(500.0));
        assert_eq!(plane, vec![255, 255, 255, 255]);

        let mut plane = vec![0u8; 4];
        fill_plane(&mut plane, WorkingType::Byte, Complex::real(-7.0));
        assert_eq!(plane, vec![0, 0, 0, 0]);
    }

    #[test]
    fn float32_fill_broadcasts_real_component() {
        let mut plane = vec![0u8; 4 * 4]; // 4 pixels, f32
        fill_plane(&mut plane, WorkingType::Float32, Complex { re: 3.5, im: 2.0 });
        for chunk in plane.chunks(4) {
            let v = f32::from_ne_bytes(chunk.try_into().unwrap());
            assert_eq!(v, 3.5);
        }
    }

    #[test]
    fn parse_complex_handles_plain_real() {
        assert_eq!(parse_complex("3.5"), Some(Complex::real(3.5)));
    }

    #[test]
    fn parse_complex_handles_comma_form() {
        assert_eq!(parse_complex("3.5,2.0"), Some(Complex { re: 3.5, im: 2.0 }));
    }
}
