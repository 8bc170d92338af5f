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
use crate::types::{Rect, WorkingType};

/// band-wise pixel access to source and destination datasets. band numbering is 1-based,
/// matching GDAL convention. reads and writes move `word_size(type) * window.w * window.h`
/// bytes, band-planar.
pub trait RasterIo {
    fn band_count(&self) -> usize;

    fn raster_size(&self) -> (i64, i64);

    fn is_band_writable(&self, band: usize) -> bool;

    fn read(&self, band: usize, window: Rect, buf: &mut [u8], ty: WorkingType) -> Result<()>;

    fn write(&self, band: usize, window: Rect, buf: &[u8], ty: WorkingType) -> Result<()>;
}

/// a GDAL-backed `RasterIo`. thin wrapper: all the error translation funnels through
/// `WarpError::IOFailure`, the only variant a real dataset failure should ever surface as.
pub struct GdalRasterIo {
    dataset: gdal::Dataset,
    writable: bool,
}

impl GdalRasterIo {
    pub fn open(path: &str, writable: bool) -> Result<Self> {
        let dataset = if writable {
            gdal::Dataset::open_ex(
                path,
                gdal::DatasetOptions {
                    open_flags: gdal::GdalOpenFlags::GDAL_OF_UPDATE,
                    ..Default::default()
                },
            )
        } else {
            gdal::Dataset::open(path)
        }
        .map_err(|e| WarpError::IOFailure(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;
        Ok(GdalRasterIo { dataset, writable })
    }
}

impl RasterIo for GdalRasterIo {
    fn band_count(&self) -> usize {
        self.dataset.raster_count() as usize
    }

    fn raster_size(&self) -> (i64, i64) {
        let (w, h) = self.dataset.raster_size();
        (w as i64, h as i64)
    }

    fn is_band_writable(&self, _band: usize) -> bool {
        self.writable
    }

    fn read(&self, band: usize, window: Rect, buf: &mut [u8], ty: WorkingType) -> Result<()> {
        let rasterband = self
            .dataset
            .rasterband(band as isize)
            .map_err(|e| WarpError::IOFailure(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;
        let word = ty.bytes();
        let expected = word * (window.w as usize) * (window.h as usize);
        if buf.len() < expected {
            return Err(WarpError::Internal("read buffer too small for window"));
        }
        let data = rasterband
            .read_as::<u8>(
                (window.x as isize, window.y as isize),
                (window.w as usize, window.h as usize),
                (window.w as usize, window.h as usize),
                None,
            )
            .map_err(|e| WarpError::IOFailure(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;
        buf[..data.data().len()].copy_from_slice(data.data());
        Ok(())
    }

    fn write(&self, band: usize, window: Rect, buf: &[u8], ty: WorkingType) -> Result<()> {
        if !self.writable {
            return Err(WarpError::ConfigInvalid(format!("destination band {band} is read-only")));
        }
        let rasterband = self
            .dataset
            .rasterband(band as isize)
            .map_err(|e| WarpError::IOFailure(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;
        let word = ty.bytes();
        let expected = word * (window.w as usize) * (window.h as usize);
        let mut owned = vec![0u8; expected];
        owned.copy_from_slice(&buf[..expected]);
        let data = gdal::raster::Buffer::new((window.w as usize, window.h as usize), owned);
        rasterband
            .write(
                (window.x as isize, window.y as isize),
                (window.w as usize, window.h as usize),
                &data,
            )
            .map_err(|e| WarpError::IOFailure(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))
    }
}
