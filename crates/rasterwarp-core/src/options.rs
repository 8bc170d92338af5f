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
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{config_invalid, Result};
use crate::progress::ProgressSink;
use crate::transform::Transformer;
use crate::types::{Complex, ResampleAlg, WorkingType};

pub const DEFAULT_MEMORY_BUDGET_BYTES: f64 = 64.0 * 1024.0 * 1024.0;
pub const MIN_MEMORY_BUDGET_BYTES: f64 = 100_000.0;

/// which mask-generator hooks a caller has wired up. the chunker's memory cost model (§4.3)
/// and the buffer executor's mask-creation contract (§4.5) both key off presence, not off
/// what the hook actually computes - so a flag is enough to model "is this plane produced".
#[derive(Debug, Clone, Default)]
pub struct MaskGenerators {
    pub band_src_valid: bool,
    pub unified_src_valid: bool,
    pub unified_src_density: bool,
    pub dst_valid: bool,
    pub dst_density: bool,
}

/// per-band no-data values. if `imag` is non-empty it must be the same length as `real`
/// (§3 invariant: both parts present or both absent).
#[derive(Debug, Clone, Default)]
pub struct NoDataValues {
    pub real: Vec<f64>,
    pub imag: Vec<f64>,
}

impl NoDataValues {
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    pub fn at(&self, band_idx: usize) -> Complex {
        let re = self.real[band_idx];
        let im = self.imag.get(band_idx).copied().unwrap_or(0.0);
        Complex { re, im }
    }
}

/// the validated, defaulted configuration for one warp operation. constructed only through
/// `WarpOptions::initialize`, which deep-clones its input and applies the §3 defaults before
/// validating - a rejected options record is discarded, never partially installed.
pub struct WarpOptions {
    pub src_band_count: usize,
    pub dst_band_count: usize,
    pub src_bands: Vec<usize>,
    pub dst_bands: Vec<usize>,
    pub dst_writable: Vec<bool>,

    pub working_type: WorkingType,
    pub resample_alg: ResampleAlg,
    pub memory_budget_bytes: f64,

    pub src_no_data: NoDataValues,
    pub dst_no_data: NoDataValues,

    pub mask_generators: MaskGenerators,

    pub transformer: Arc<dyn Transformer + Send + Sync>,
    pub progress: Arc<std::sync::Mutex<dyn ProgressSink + Send>>,

    pub string_options: HashMap<String, String>,
}

/// caller-supplied, pre-default configuration. every field mirrors one in `WarpOptions`
/// except the defaulting hasn't happened yet - `src_bands`/`dst_bands` may be empty and
/// `working_type` is optional.
pub struct WarpOptionsRequest {
    pub src_band_count: usize,
    pub dst_band_count: usize,
    pub src_bands: Vec<usize>,
    pub dst_bands: Vec<usize>,
    pub dst_writable: Vec<bool>,
    pub working_type: Option<WorkingType>,
    pub resample_alg: ResampleAlg,
    pub memory_budget_bytes: f64,
    pub src_no_data: NoDataValues,
    pub dst_no_data: NoDataValues,
    pub mask_generators: MaskGenerators,
    pub transformer: Arc<dyn Transformer + Send + Sync>,
    pub progress: Arc<std::sync::Mutex<dyn ProgressSink + Send>>,
    pub string_options: HashMap<String, String>,
}

impl WarpOptions {
    /// deep-clones `req`, applies defaults, validates. on any validation failure the cloned
    /// options are discarded and `ConfigInvalid` is returned - nothing is partially installed.
    pub fn initialize(req: WarpOptionsRequest) -> Result<WarpOptions> {
        let WarpOptionsRequest {
            src_band_count,
            dst_band_count,
            mut src_bands,
            mut dst_bands,
            dst_writable,
            working_type,
            resample_alg,
            mut memory_budget_bytes,
            src_no_data,
            dst_no_data,
            mask_generators,
            transformer,
            progress,
            string_options,
        } = req;

        if src_bands.is_empty() && dst_bands.is_empty() && src_band_count == dst_band_count {
            src_bands = (1..=src_band_count).collect();
            dst_bands = (1..=dst_band_count).collect();
        }

        if memory_budget_bytes == 0.0 {
            memory_budget_bytes = DEFAULT_MEMORY_BUDGET_BYTES;
        }

        // intended default is "the type of the first destination band", but `RasterIo` exposes
        // no band-type query to read that from (see design notes §9) - `Byte` is the documented
        // substitute until a collaborator can supply a real destination band type.
        let working_type = working_type.unwrap_or(WorkingType::Byte);

        let opts = WarpOptions {
            src_band_count,
            dst_band_count,
            src_bands,
            dst_bands,
            dst_writable,
            working_type,
            resample_alg,
            memory_budget_bytes,
            src_no_data,
            dst_no_data,
            mask_generators,
            transformer,
            progress,
            string_options,
        };

        opts.validate()?;
        Ok(opts)
    }

    fn validate(&self) -> Result<()> {
        if self.src_bands.is_empty() || self.dst_bands.is_empty() {
            return Err(config_invalid("band count must be at least 1"));
        }
        if self.src_bands.len() != self.dst_bands.len() {
            return Err(config_invalid("source and destination band mappings differ in length"));
        }
        for &b in &self.src_bands {
            if b < 1 || b > self.src_band_count {
                return Err(config_invalid(format!("source band {b} out of range")));
            }
        }
        for (i, &b) in self.dst_bands.iter().enumerate() {
            if b < 1 || b > self.dst_band_count {
                return Err(config_invalid(format!("destination band {b} out of range")));
            }
            if let Some(&writable) = self.dst_writable.get(i) {
                if !writable {
                    return Err(config_invalid(format!("destination band {b} is not writable")));
                }
            }
        }
        if !self.src_no_data.real.is_empty() && self.src_no_data.imag.len() < self.src_no_data.real.len() {
            return Err(config_invalid("source no-data real part present without matching imaginary part"));
        }
        if !self.dst_no_data.real.is_empty() && self.dst_no_data.imag.len() < self.dst_no_data.real.len() {
            return Err(config_invalid("destination no-data real part present without matching imaginary part"));
        }
        // the faithful fix for the source's `&&` typo (see design notes §9, open question 2):
        // a working type must be known OR complex never to be considered invalid, i.e. the
        // check below rejects anything that is neither, and so must be an `||` join, not `&&`.
        if !self.working_type.is_known() {
            return Err(config_invalid("unknown working type"));
        }
        if self.memory_budget_bytes < MIN_MEMORY_BUDGET_BYTES {
            return Err(config_invalid(format!(
                "memory budget {} below minimum {}",
                self.memory_budget_bytes, MIN_MEMORY_BUDGET_BYTES
            )));
        }
        Ok(())
    }

    pub fn band_count(&self) -> usize {
        self.src_bands.len()
    }
}
