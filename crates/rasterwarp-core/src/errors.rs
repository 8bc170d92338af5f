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
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WarpError>;

/// the six error kinds a warp operation can fail with. callers match on kind, not message text.
#[derive(Error, Debug)]
pub enum WarpError {
    #[error("invalid warp configuration: {0}")]
    ConfigInvalid(String),

    #[error("out of memory: failed to allocate {0} bytes")]
    OutOfMemory(usize),

    #[error("raster I/O failure: {0}")]
    IOFailure(#[from] std::io::Error),

    #[error("transform failure: {0}")]
    TransformFailure(String),

    #[error("warp aborted by progress callback")]
    Aborted,

    #[error("internal error: {0}")]
    Internal(&'static str),
}

pub fn config_invalid<S: Into<String>>(msg: S) -> WarpError {
    WarpError::ConfigInvalid(msg.into())
}

pub fn transform_failure<S: Into<String>>(msg: S) -> WarpError {
    WarpError::TransformFailure(msg.into())
}
