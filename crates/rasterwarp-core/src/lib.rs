/*
 * Copyright (c) 2024, United States Government, as represented by the
 * Administrator of the National Aeronautics and Space Administration.
 * All rights reserved.
 *
 * The ODIN - Open Data Integration Framework is licensed under the
 * Apache License, Version 2.0 (the "License"); you may not use this file
 * except in compliance with the License. You may obtain a copy of the
 * License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */
#![allow(unused)]

//! recursive, memory-bounded warp orchestration: given a destination window, a coordinate
//! transformer, a raster I/O collaborator and a resampling kernel, this crate subdivides the
//! window until each piece fits a memory budget, stages source/destination buffers and mask
//! planes for each piece, and hands them to the kernel.

pub mod buffer;
pub mod chunker;
pub mod errors;
pub mod estimator;
pub mod kernel;
pub mod mask;
pub mod operation;
pub mod options;
pub mod progress;
pub mod rasterio;
pub mod transform;
pub mod types;

pub use errors::{Result, WarpError};
pub use operation::WarpOperation;
pub use options::{MaskGenerators, NoDataValues, WarpOptions, WarpOptionsRequest};
pub use progress::{NullProgress, ProgressSink, ProgressWindow};
pub use rasterio::{GdalRasterIo, RasterIo};
pub use transform::{IdentityTransformer, Transformer};
pub use types::{Complex, Rect, ResampleAlg, WorkingType};

// re-exported so downstream callers can build a `GdalRasterIo` without a direct `gdal`
// dependency of their own, the same convenience the teacher crate provides for its own
// GDAL wrapping.
pub use gdal::{self, Dataset, Driver, DriverManager};
