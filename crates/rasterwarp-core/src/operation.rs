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

use crate::chunker::chunk_and_warp;
use crate::errors::Result;
use crate::options::{WarpOptions, WarpOptionsRequest};
use crate::progress::ProgressWindow;
use crate::rasterio::RasterIo;
use crate::types::Rect;

/// the Options Holder plus the single public entry point that wires the estimator, chunker,
/// region executor and buffer executor together (§2). `initialize`/`wipe` own the lifetime
/// of the validated options; `warp` may be called any number of times while options are held.
pub struct WarpOperation {
    options: Option<WarpOptions>,
}

impl WarpOperation {
    pub fn new() -> Self {
        WarpOperation { options: None }
    }

    pub fn initialize(&mut self, req: WarpOptionsRequest) -> Result<()> {
        let opts = WarpOptions::initialize(req)?;
        self.options = Some(opts);
        Ok(())
    }

    pub fn wipe(&mut self) {
        self.options = None;
    }

    pub fn options(&self) -> Option<&WarpOptions> {
        self.options.as_ref()
    }

    /// warps `dst_window` of the destination raster, recursively chunking as needed to stay
    /// under the configured memory budget. requires a prior successful `initialize`.
    pub fn warp(&self, src_io: &dyn RasterIo, dst_io: &dyn RasterIo, dst_window: Rect) -> Result<()> {
        let Some(opts) = &self.options else {
            return Err(crate::errors::config_invalid("warp called before initialize"));
        };
        let result = chunk_and_warp(opts, src_io, dst_io, dst_window, ProgressWindow::default());
        if let Err(ref e) = result {
            error!(error = %e, "warp operation failed");
        }
        result
    }
}

impl Default for WarpOperation {
    fn default() -> Self {
        Self::new()
    }
}
