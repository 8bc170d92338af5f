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
use std::sync::{Arc, Mutex};

use clap::Parser;
use rasterwarp_core::{
    GdalRasterIo, IdentityTransformer, MaskGenerators, NoDataValues, RasterIo, ResampleAlg, Rect, WarpOperation,
    WarpOptionsRequest, WorkingType,
};
use tracing::info;

/// drives a `WarpOperation` over a whole destination raster from the command line. the
/// coordinate transform itself is out of scope for this engine (see the crate's design
/// notes), so this demo always uses the identity transform; a real deployment supplies its
/// own `Transformer` built from actual source/destination spatial references.
#[derive(Parser, Debug)]
#[command(name = "rasterwarp", about = "chunked warp orchestration demo")]
struct Cli {
    /// input raster path
    src_filename: String,

    /// output raster path (opened for update; must already exist with a matching band layout)
    dst_filename: String,

    /// resampling algorithm
    #[arg(long, value_enum, default_value = "nearest")]
    resample: ResampleArg,

    /// memory budget in bytes for the chunker (defaults to 64 MiB)
    #[arg(long)]
    memory_budget: Option<f64>,

    /// INIT_DEST option value (e.g. "NO_DATA" or a literal like "0" or "0,0")
    #[arg(long)]
    init_dest: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ResampleArg {
    Nearest,
    Bilinear,
    Cubic,
}

impl From<ResampleArg> for ResampleAlg {
    fn from(value: ResampleArg) -> Self {
        match value {
            ResampleArg::Nearest => ResampleAlg::Nearest,
            ResampleArg::Bilinear => ResampleAlg::Bilinear,
            ResampleArg::Cubic => ResampleAlg::Cubic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Cli::parse();

    let src_io = GdalRasterIo::open(&args.src_filename, false)?;
    let dst_io = GdalRasterIo::open(&args.dst_filename, true)?;

    let src_band_count = src_io.band_count();
    let dst_band_count = dst_io.band_count();
    let (dst_w, dst_h) = dst_io.raster_size();

    let mut string_options = HashMap::new();
    if let Some(init_dest) = args.init_dest {
        string_options.insert("INIT_DEST".to_string(), init_dest);
    }

    let mut op = WarpOperation::new();
    op.initialize(WarpOptionsRequest {
        src_band_count,
        dst_band_count,
        src_bands: Vec::new(),
        dst_bands: Vec::new(),
        dst_writable: vec![true; dst_band_count],
        working_type: Some(WorkingType::Byte),
        resample_alg: args.resample.into(),
        memory_budget_bytes: args.memory_budget.unwrap_or(0.0),
        src_no_data: NoDataValues::default(),
        dst_no_data: NoDataValues::default(),
        mask_generators: MaskGenerators::default(),
        transformer: Arc::new(IdentityTransformer),
        progress: Arc::new(Mutex::new(|fraction: f64, msg: &str| {
            info!(fraction, msg, "warp progress");
            true
        })),
        string_options,
    })?;

    info!(dst_w, dst_h, "starting warp");
    op.warp(&src_io, &dst_io, Rect::new(0, 0, dst_w, dst_h))?;
    info!("warp complete");

    Ok(())
}
