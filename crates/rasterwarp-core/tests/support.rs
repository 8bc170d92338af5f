use std::cell::RefCell;

use rasterwarp_core::{RasterIo, Rect, WorkingType};

/// an in-memory `RasterIo` test double: one flat `Vec<u8>` per band, sized for the whole
/// raster. `read`/`write` do windowed row copies, mirroring what a real dataset driver does
/// without requiring a GDAL installation to run the §8 end-to-end scenarios.
pub struct InMemoryRasterIo {
    width: i64,
    height: i64,
    writable: bool,
    bands: RefCell<Vec<Vec<u8>>>,
    word: usize,
}

impl InMemoryRasterIo {
    pub fn new(width: i64, height: i64, band_count: usize, ty: WorkingType, writable: bool) -> Self {
        let word = ty.bytes();
        let bands = vec![vec![0u8; word * width as usize * height as usize]; band_count];
        InMemoryRasterIo { width, height, writable, bands: RefCell::new(bands), word }
    }

    pub fn fill_band(&self, band: usize, value: u8) {
        let mut bands = self.bands.borrow_mut();
        bands[band - 1].fill(value);
    }

    pub fn set_byte(&self, band: usize, x: i64, y: i64, value: u8) {
        let mut bands = self.bands.borrow_mut();
        let idx = (y * self.width + x) as usize;
        bands[band - 1][idx] = value;
    }

    pub fn get_byte(&self, band: usize, x: i64, y: i64) -> u8 {
        let bands = self.bands.borrow();
        let idx = (y * self.width + x) as usize;
        bands[band - 1][idx]
    }

    pub fn all_equal(&self, band: usize, value: u8) -> bool {
        self.bands.borrow()[band - 1].iter().all(|&b| b == value)
    }
}

impl RasterIo for InMemoryRasterIo {
    fn band_count(&self) -> usize {
        self.bands.borrow().len()
    }

    fn raster_size(&self) -> (i64, i64) {
        (self.width, self.height)
    }

    fn is_band_writable(&self, _band: usize) -> bool {
        self.writable
    }

    fn read(&self, band: usize, window: Rect, buf: &mut [u8], _ty: WorkingType) -> rasterwarp_core::Result<()> {
        let bands = self.bands.borrow();
        let plane = &bands[band - 1];
        let row_bytes = window.w as usize * self.word;
        for row in 0..window.h as usize {
            let src_y = window.y as usize + row;
            let src_off = (src_y * self.width as usize + window.x as usize) * self.word;
            let dst_off = row * row_bytes;
            buf[dst_off..dst_off + row_bytes].copy_from_slice(&plane[src_off..src_off + row_bytes]);
        }
        Ok(())
    }

    fn write(&self, band: usize, window: Rect, buf: &[u8], _ty: WorkingType) -> rasterwarp_core::Result<()> {
        let mut bands = self.bands.borrow_mut();
        let plane = &mut bands[band - 1];
        let row_bytes = window.w as usize * self.word;
        for row in 0..window.h as usize {
            let dst_y = window.y as usize + row;
            let dst_off = (dst_y * self.width as usize + window.x as usize) * self.word;
            let src_off = row * row_bytes;
            plane[dst_off..dst_off + row_bytes].copy_from_slice(&buf[src_off..src_off + row_bytes]);
        }
        Ok(())
    }
}
