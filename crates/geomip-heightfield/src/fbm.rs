//! Multi-octave fractal Brownian motion (fBm) height generator.
//!
//! Composites octaves of simplex noise so a height grid gets features at
//! many spatial frequencies, which exercises every mip level's error metric.

use noise::{NoiseFn, Simplex};

/// Configuration for multi-octave fBm noise.
#[derive(Clone, Debug)]
pub struct FbmParams {
    /// Seed for deterministic generation.
    pub seed: u32,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency of the first octave, in cycles per grid sample.
    pub base_frequency: f64,
    /// Amplitude of the first octave in world units.
    pub amplitude: f64,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.01,
            amplitude: 40.0,
        }
    }
}

/// Samples fBm over simplex noise in grid coordinates.
pub struct FbmHeights {
    noise: Simplex,
    params: FbmParams,
}

impl FbmHeights {
    /// Create a generator with the given parameters.
    pub fn new(params: FbmParams) -> Self {
        Self {
            noise: Simplex::new(params.seed),
            params,
        }
    }

    /// Height at `(x, z)`, within `[-max_amplitude, max_amplitude]`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total
    }

    /// Geometric sum of all octave amplitudes.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.params.amplitude;
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= self.params.persistence;
        }
        sum
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &FbmParams {
        &self.params
    }
}
