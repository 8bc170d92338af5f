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

/// caller-supplied progress sink. returning `false` requests cancellation; the kernel surfaces
/// this as `WarpError::Aborted`.
pub trait ProgressSink {
    fn report(&mut self, fraction: f64, message: &str) -> bool;
}

/// a sink that ignores all progress and never cancels, useful for tests and simple callers.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _fraction: f64, _message: &str) -> bool {
        true
    }
}

impl<F: FnMut(f64, &str) -> bool> ProgressSink for F {
    fn report(&mut self, fraction: f64, message: &str) -> bool {
        self(fraction, message)
    }
}

/// composes a local [0,1] progress value onto a global [base, base+scale] window. the chunker
/// halves `scale` on every recursive split and restores the saved pair after both halves
/// complete, so the full tree always sums back to [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressWindow {
    pub base: f64,
    pub scale: f64,
}

impl Default for ProgressWindow {
    fn default() -> Self {
        ProgressWindow { base: 0.0, scale: 1.0 }
    }
}

impl ProgressWindow {
    pub fn new(base: f64, scale: f64) -> Self {
        ProgressWindow { base, scale }
    }

    /// maps a local fraction in [0,1] (as reported by the kernel) to the global progress value.
    pub fn global(&self, local_fraction: f64) -> f64 {
        self.base + self.scale * local_fraction.clamp(0.0, 1.0)
    }

    /// the two halves produced by splitting the owning chunk in two.
    pub fn split(&self) -> (ProgressWindow, ProgressWindow) {
        let half = self.scale / 2.0;
        (
            ProgressWindow::new(self.base, half),
            ProgressWindow::new(self.base + half, half),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_maps_local_fraction_into_window() {
        let w = ProgressWindow::new(0.25, 0.5);
        assert_eq!(w.global(0.0), 0.25);
        assert_eq!(w.global(1.0), 0.75);
        assert_eq!(w.global(0.5), 0.5);
    }

    #[test]
    fn split_halves_scale_and_sums_to_whole() {
        let w = ProgressWindow::new(0.0, 1.0);
        let (lo, hi) = w.split();
        assert_eq!(lo.base, 0.0);
        assert_eq!(lo.scale, 0.5);
        assert_eq!(hi.base, 0.5);
        assert_eq!(hi.scale, 0.5);
    }
}
