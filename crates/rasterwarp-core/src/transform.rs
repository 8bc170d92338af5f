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

/// the coordinate transformer collaborator. batches a set of points and transforms them in
/// place, direction controlled by `dst_to_src`. `x`, `y`, `z` and `success` must be the same
/// length; a point whose `success` entry comes back `false` has undefined `x`/`y`/`z`.
///
/// this engine always calls with `dst_to_src = true`. computing the transform itself (the
/// projection math, datum handling, etc) is entirely the implementor's concern.
pub trait Transformer {
    fn transform(
        &self,
        dst_to_src: bool,
        x: &mut [f64],
        y: &mut [f64],
        z: &mut [f64],
        success: &mut [bool],
    ) -> bool;
}

impl<F> Transformer for F
where
    F: Fn(bool, &mut [f64], &mut [f64], &mut [f64], &mut [bool]) -> bool,
{
    fn transform(
        &self,
        dst_to_src: bool,
        x: &mut [f64],
        y: &mut [f64],
        z: &mut [f64],
        success: &mut [bool],
    ) -> bool {
        self(dst_to_src, x, y, z, success)
    }
}

/// an identity transformer, useful for the round-trip tests in §8 and as a sanity baseline.
pub struct IdentityTransformer;

impl Transformer for IdentityTransformer {
    fn transform(
        &self,
        _dst_to_src: bool,
        _x: &mut [f64],
        _y: &mut [f64],
        _z: &mut [f64],
        success: &mut [bool],
    ) -> bool {
        success.fill(true);
        true
    }
}
