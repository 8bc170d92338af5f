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
use crate::errors::{Result, WarpError};

/// a packed 1-bit-per-pixel validity mask, `ceil(w*h/8)` bytes, row-major, LSB-first within
/// each byte. mirrors the byte layout `odin_image::mask::Mask` uses for its `BitSet` backing,
/// but owns a plain `Vec<u8>` so the byte contract (default-fill, exact size) is explicit
/// rather than inherited from a generic bitset crate.
#[derive(Debug, Clone)]
pub struct BitMask {
    w: usize,
    h: usize,
    bytes: Vec<u8>,
}

impl BitMask {
    pub fn byte_len(w: usize, h: usize) -> usize {
        (w * h).div_ceil(8)
    }

    /// all-valid mask: every bit set (0xFF fill), per the §3 default-fill table.
    pub fn new_all_valid(w: usize, h: usize) -> Self {
        BitMask { w, h, bytes: vec![0xFF; Self::byte_len(w, h)] }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        let idx = y * self.w + x;
        (self.bytes[idx / 8] & (1 << (idx % 8))) != 0
    }

    pub fn set(&mut self, x: usize, y: usize, valid: bool) {
        let idx = y * self.w + x;
        if valid {
            self.bytes[idx / 8] |= 1 << (idx % 8);
        } else {
            self.bytes[idx / 8] &= !(1 << (idx % 8));
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// a packed 32-bit-float-per-pixel density plane, `w*h*4` bytes, row-major. default fill is
/// all-zero per the §3 table.
#[derive(Debug, Clone)]
pub struct DensityPlane {
    w: usize,
    h: usize,
    values: Vec<f32>,
}

impl DensityPlane {
    pub fn byte_len(w: usize, h: usize) -> usize {
        w * h * 4
    }

    pub fn new_zero(w: usize, h: usize) -> Self {
        DensityPlane { w, h, values: vec![0.0; w * h] }
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.w + x]
    }

    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.values[y * self.w + x] = v;
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.w, self.h)
    }
}

/// which named plane a `create_kernel_mask` call targets. `BandSrcValid` is the only one that
/// needs a band index; the kernel call descriptor lazily allocates the whole per-band array
/// on first touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskName {
    BandSrcValid,
    UnifiedSrcValid,
    UnifiedSrcDensity,
    DstValid,
    DstDensity,
}

/// owns the (at most) five mask planes for one kernel call. planes are created on demand via
/// `ensure_*`, matching the "allocate and default-fill on first touch, no-op if already
/// present" contract of §4.5.
#[derive(Debug, Default)]
pub struct MaskSet {
    pub band_src_valid: Vec<Option<BitMask>>,
    pub unified_src_valid: Option<BitMask>,
    pub unified_src_density: Option<DensityPlane>,
    pub dst_valid: Option<BitMask>,
    pub dst_density: Option<DensityPlane>,
}

impl MaskSet {
    pub fn new(band_count: usize) -> Self {
        MaskSet {
            band_src_valid: vec![None; band_count],
            ..Default::default()
        }
    }

    pub fn ensure_band_src_valid(&mut self, band: usize, w: usize, h: usize) -> Result<&mut BitMask> {
        let slot = self
            .band_src_valid
            .get_mut(band)
            .ok_or(WarpError::Internal("band index out of range for BandSrcValid mask"))?;
        if slot.is_none() {
            *slot = Some(BitMask::new_all_valid(w, h));
        }
        Ok(slot.as_mut().unwrap())
    }

    pub fn ensure_unified_src_valid(&mut self, w: usize, h: usize) -> &mut BitMask {
        self.unified_src_valid.get_or_insert_with(|| BitMask::new_all_valid(w, h))
    }

    pub fn ensure_unified_src_density(&mut self, w: usize, h: usize) -> &mut DensityPlane {
        self.unified_src_density.get_or_insert_with(|| DensityPlane::new_zero(w, h))
    }

    pub fn ensure_dst_valid(&mut self, w: usize, h: usize) -> &mut BitMask {
        self.dst_valid.get_or_insert_with(|| BitMask::new_all_valid(w, h))
    }

    pub fn ensure_dst_density(&mut self, w: usize, h: usize) -> &mut DensityPlane {
        self.dst_density.get_or_insert_with(|| DensityPlane::new_zero(w, h))
    }

    /// the §4.5 `create_kernel_mask(name, band?)` contract as one entry point: allocates and
    /// default-fills the named plane if absent, no-ops if already present. `band` is required
    /// (and validated) only for `BandSrcValid`. unlike the original's stringly-typed name
    /// argument, `MaskName` is an exhaustive enum, so "unknown name" can't reach this function
    /// at all - the type system subsumes that branch of the original contract.
    pub fn create_kernel_mask(&mut self, name: MaskName, band: Option<usize>, w: usize, h: usize) -> Result<()> {
        match name {
            MaskName::BandSrcValid => {
                let band = band.ok_or(WarpError::Internal("BandSrcValid mask requires a band index"))?;
                self.ensure_band_src_valid(band, w, h)?;
            }
            MaskName::UnifiedSrcValid => {
                self.ensure_unified_src_valid(w, h);
            }
            MaskName::UnifiedSrcDensity => {
                self.ensure_unified_src_density(w, h);
            }
            MaskName::DstValid => {
                self.ensure_dst_valid(w, h);
            }
            MaskName::DstDensity => {
                self.ensure_dst_density(w, h);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmask_byte_len_rounds_up() {
        assert_eq!(BitMask::byte_len(3, 3), 2); // 9 bits -> 2 bytes
        assert_eq!(BitMask::byte_len(4, 2), 1); // 8 bits -> 1 byte
    }

    #[test]
    fn bitmask_defaults_all_valid() {
        let m = BitMask::new_all_valid(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                assert!(m.get(x, y));
            }
        }
    }

    #[test]
    fn bitmask_clear_single_pixel() {
        let mut m = BitMask::new_all_valid(4, 4);
        m.set(0, 0, false);
        assert!(!m.get(0, 0));
        assert!(m.get(1, 0));
    }

    #[test]
    fn density_plane_defaults_zero() {
        let d = DensityPlane::new_zero(2, 2);
        assert_eq!(d.get(0, 0), 0.0);
        assert_eq!(d.get(1, 1), 0.0);
    }

    #[test]
    fn ensure_band_src_valid_is_idempotent() {
        let mut ms = MaskSet::new(2);
        {
            let m = ms.ensure_band_src_valid(0, 4, 4).unwrap();
            m.set(0, 0, false);
        }
        let m = ms.ensure_band_src_valid(0, 4, 4).unwrap();
        assert!(!m.get(0, 0));
    }
}
