// Symbolic Aggregate approXimation (SAX) via sliding window
//
// Each window of the series is z-normalized, reduced by PAA to a handful of
// segments, and each segment is mapped to a letter using normal-distribution
// breakpoints. The per-window words, in window order, concatenate into the
// symbolic string that the mutator and shingle counter consume.
//
// Scientific Foundation:
// Lin, J., Keogh, E., Wei, L., & Lonardi, S. (2007). Experiencing SAX: a novel
// symbolic representation of time series. Data Mining and Knowledge Discovery.

pub mod breakpoints;
pub mod transform;

use crate::config::{NumerosityReduction, PipelineConfig};
use crate::error::{Result, ShingleError};

/// Parameters for windowed discretization
#[derive(Debug, Clone, PartialEq)]
pub struct DiscretizationParams {
    pub window_size: usize,
    pub paa_size: usize,
    pub alphabet_size: usize,
    pub normalization_threshold: f64,
    pub numerosity_reduction: NumerosityReduction,
}

impl From<&PipelineConfig> for DiscretizationParams {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            window_size: config.window_size,
            paa_size: config.paa_size,
            alphabet_size: config.alphabet_size,
            normalization_threshold: config.normalization_threshold,
            numerosity_reduction: config.numerosity_reduction,
        }
    }
}

/// Maps a numeric series to a symbolic string
///
/// Implementations must be deterministic: the same series and parameters
/// always yield the same string.
pub trait Discretizer {
    fn discretize(&self, series: &[f64], params: &DiscretizationParams) -> Result<String>;
}

/// Sliding-window SAX discretizer
#[derive(Debug, Clone, Copy, Default)]
pub struct SaxDiscretizer;

impl SaxDiscretizer {
    pub fn new() -> Self {
        Self
    }

    /// SAX word (as alphabet positions) for a single window
    pub fn window_word(window: &[f64], params: &DiscretizationParams, cuts: &[f64]) -> Vec<u8> {
        let normalized = transform::znorm(window, params.normalization_threshold);
        transform::paa(&normalized, params.paa_size)
            .into_iter()
            .map(|v| breakpoints::symbol_index(v, cuts) as u8)
            .collect()
    }
}

/// Two words are MINDIST-equivalent when no symbol pair is more than one region apart
fn mindist_is_zero(a: &[u8], b: &[u8]) -> bool {
    a.iter().zip(b).all(|(&x, &y)| x.abs_diff(y) <= 1)
}

impl Discretizer for SaxDiscretizer {
    fn discretize(&self, series: &[f64], params: &DiscretizationParams) -> Result<String> {
        let cuts = breakpoints::cuts(params.alphabet_size).ok_or_else(|| {
            ShingleError::Discretization(format!(
                "no breakpoints for alphabet size {}",
                params.alphabet_size
            ))
        })?;

        if params.paa_size == 0 || params.window_size < params.paa_size {
            return Err(ShingleError::Discretization(format!(
                "window size {} cannot hold {} PAA segments",
                params.window_size, params.paa_size
            )));
        }

        if series.len() < params.window_size {
            return Err(ShingleError::Discretization(format!(
                "series of length {} is shorter than window size {}",
                series.len(),
                params.window_size
            )));
        }

        if let Some(pos) = series.iter().position(|v| !v.is_finite()) {
            return Err(ShingleError::Discretization(format!(
                "non-finite value {} at position {}",
                series[pos], pos
            )));
        }

        let mut sax = String::with_capacity(
            (series.len() - params.window_size + 1) * params.paa_size,
        );
        let mut previous: Option<Vec<u8>> = None;

        for window in series.windows(params.window_size) {
            let word = Self::window_word(window, params, cuts);

            let keep = match (&previous, params.numerosity_reduction) {
                (None, _) | (_, NumerosityReduction::None) => true,
                (Some(prev), NumerosityReduction::Exact) => *prev != word,
                (Some(prev), NumerosityReduction::Mindist) => !mindist_is_zero(prev, &word),
            };

            if keep {
                sax.extend(word.iter().map(|&idx| char::from(b'a' + idx)));
                previous = Some(word);
            }
        }

        Ok(sax)
    }
}
