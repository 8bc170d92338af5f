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

/// pixel word type the kernel and all intermediate buffers operate on. mirrors the subset
/// of GDALDataType this engine actually supports (band buffers are always band-major, one
/// of these types wide).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkingType {
    Byte,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
    CInt16,
    CInt32,
    CFloat32,
    CFloat64,
}

impl WorkingType {
    /// bit width of a single (possibly complex) sample
    pub fn bits(self) -> u32 {
        use WorkingType::*;
        match self {
            Byte => 8,
            UInt16 | Int16 => 16,
            UInt32 | Int32 | Float32 => 32,
            Float64 => 64,
            CInt16 => 32,
            CInt32 | CFloat32 => 64,
            CFloat64 => 128,
        }
    }

    pub fn bytes(self) -> usize {
        (self.bits() as usize) / 8
    }

    /// this is the check the source enforces with a `&&` that makes it a no-op; see §9 Open
    /// Question 2 of the design notes - the faithful rewrite uses `||` and is fixed on purpose.
    pub fn is_known(self) -> bool {
        matches!(
            self,
            WorkingType::Byte
                | WorkingType::UInt16
                | WorkingType::Int16
                | WorkingType::UInt32
                | WorkingType::Int32
                | WorkingType::Float32
                | WorkingType::Float64
                | WorkingType::CInt16
                | WorkingType::CInt32
                | WorkingType::CFloat32
                | WorkingType::CFloat64
        )
    }

    pub fn is_complex(self) -> bool {
        matches!(
            self,
            WorkingType::CInt16 | WorkingType::CInt32 | WorkingType::CFloat32 | WorkingType::CFloat64
        )
    }

    pub fn is_byte(self) -> bool {
        matches!(self, WorkingType::Byte)
    }
}

/// resampling kernel selector. the spec recognizes three algorithms; each carries a half-width
/// used to pad source windows in the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleAlg {
    Nearest,
    Bilinear,
    Cubic,
}

impl ResampleAlg {
    /// resampling footprint half-width in source pixels, used to pad estimated source windows.
    pub fn half_width(self) -> i64 {
        match self {
            ResampleAlg::Nearest => 0,
            ResampleAlg::Bilinear => 1,
            ResampleAlg::Cubic => 2,
        }
    }
}

/// axis-aligned integer pixel rectangle, used for both source and destination windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Rect { x, y, w, h }
    }

    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn area(self) -> i64 {
        self.w.max(0) * self.h.max(0)
    }
}

/// a real/imaginary scalar pair, used for no-data values and INIT_DEST fills. real-only
/// working types simply ignore `imag`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn real(re: f64) -> Self {
        Complex { re, im: 0.0 }
    }
}
