//! Low-pass filter for orientation sensor angles
//!
//! Each raw sample is blended into the previous output:
//! `filtered' = α·raw + (1 − α)·filtered`. A small α favours history,
//! which hides sensor jitter at the cost of some lag.

use crate::angles::{AngleSource, AngleState};

/// Default smoothing constant
pub const DEFAULT_SMOOTHING_ALPHA: f32 = 0.1;

/// Sensor filter parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorParams {
    /// Weight given to each new raw sample, in (0, 1]
    pub alpha: f32,
}

impl Default for SensorParams {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_SMOOTHING_ALPHA,
        }
    }
}

/// Exponential low-pass filter over an angle pair
#[derive(Clone, Debug)]
pub struct SensorFilter {
    params: SensorParams,
    filtered: AngleState,
    samples: u64,
}

impl Default for SensorFilter {
    fn default() -> Self {
        Self::new(SensorParams::default())
    }
}

impl SensorFilter {
    /// Create a filter starting at (0, 0)
    pub fn new(params: SensorParams) -> Self {
        Self {
            params,
            filtered: AngleState::ZERO,
            samples: 0,
        }
    }

    /// Builder: set the smoothing constant
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.params.alpha = alpha;
        self
    }

    /// Blend one raw sample into the filter state and return the new output
    ///
    /// Values are taken as-is; no wrapping or clamping.
    pub fn update(&mut self, raw: AngleState) -> AngleState {
        let a = self.params.alpha;
        self.filtered.xw = a * raw.xw + (1.0 - a) * self.filtered.xw;
        self.filtered.yz = a * raw.yz + (1.0 - a) * self.filtered.yz;
        self.samples += 1;
        log::trace!("Sensor sample {:?} -> filtered {:?}", raw, self.filtered);
        self.filtered
    }

    /// Current filtered pair
    #[inline]
    pub fn filtered(&self) -> AngleState {
        self.filtered
    }

    /// Number of samples consumed so far
    #[inline]
    pub fn sample_count(&self) -> u64 {
        self.samples
    }

    /// Smoothing constant in use
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.params.alpha
    }

    /// Forget all history and return to (0, 0)
    pub fn reset(&mut self) {
        self.filtered = AngleState::ZERO;
        self.samples = 0;
    }

    /// Number of identical samples needed to bring the output within
    /// `tolerance` of the input, starting `distance` away
    ///
    /// The remaining gap after n samples is `distance·(1 − α)^n`.
    /// Returns `u32::MAX` when α ≤ 0 (the filter never moves).
    pub fn samples_to_converge(alpha: f32, distance: f32, tolerance: f32) -> u32 {
        let distance = distance.abs() as f64;
        let tolerance = tolerance.abs() as f64;
        if distance <= tolerance {
            return 0;
        }
        if alpha >= 1.0 {
            return 1;
        }
        if alpha <= 0.0 || tolerance == 0.0 {
            return u32::MAX;
        }
        let keep = 1.0 - alpha as f64;
        let n = (tolerance / distance).ln() / keep.ln();
        n.ceil().min(u32::MAX as f64) as u32
    }
}

impl AngleSource for SensorFilter {
    fn angles(&self) -> AngleState {
        self.filtered
    }
}
