//! Rössler-attractor-driven mutation
//!
//! Each mutant integrates its own slightly detuned Rössler system
//!
//! ```text
//! x' = -y - z
//! y' = x + a y
//! z' = b + z (x - c)
//! ```
//!
//! and uses the normalized `x` trajectory, one sample per symbol, to nudge
//! symbols up or down the alphabet. The chaotic but bounded trajectory gives
//! perturbations that are locally correlated yet differ between mutants.
//! All randomness comes from an RNG seeded by the FNV-1a hash of the mutant
//! identifier, so output never depends on time or scheduling.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{mutant_id, MutantMap, Mutator};
use crate::config::MutationConfig;
use crate::error::{Result, ShingleError};
use crate::sax::transform::znorm;
use crate::shingle::Alphabet;

/// Trajectory samples beyond this magnitude push a symbol up or down
const NUDGE_THRESHOLD: f64 = 0.43;

/// Integration steps discarded before recording, to leave the transient
const BURN_IN_STEPS: usize = 200;

/// Rössler system parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosslerParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl RosslerParams {
    #[inline]
    fn derivative(&self, state: [f64; 3]) -> [f64; 3] {
        let [x, y, z] = state;
        [-y - z, x + self.a * y, self.b + z * (x - self.c)]
    }

    /// One classic fourth-order Runge-Kutta step
    fn rk4_step(&self, state: [f64; 3], h: f64) -> [f64; 3] {
        let add = |s: [f64; 3], k: [f64; 3], f: f64| {
            [s[0] + f * k[0], s[1] + f * k[1], s[2] + f * k[2]]
        };

        let k1 = self.derivative(state);
        let k2 = self.derivative(add(state, k1, h / 2.0));
        let k3 = self.derivative(add(state, k2, h / 2.0));
        let k4 = self.derivative(add(state, k3, h));

        let mut next = state;
        for i in 0..3 {
            next[i] += h / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
        }
        next
    }
}

/// A recorded integration step: time and state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Fixed-step integrator that records every step after burn-in
#[derive(Debug, Default)]
pub struct StepRecorder {
    steps: Vec<Step>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate from `initial` and record `count` steps of size `h`
    ///
    /// Any previously recorded steps are discarded.
    pub fn integrate(
        &mut self,
        params: &RosslerParams,
        initial: [f64; 3],
        h: f64,
        count: usize,
    ) -> &[Step] {
        self.steps.clear();
        self.steps.reserve(count);

        let mut state = initial;
        let mut t = 0.0;
        for _ in 0..BURN_IN_STEPS {
            state = params.rk4_step(state, h);
            t += h;
        }
        for _ in 0..count {
            state = params.rk4_step(state, h);
            t += h;
            self.steps.push(Step {
                t,
                x: state[0],
                y: state[1],
                z: state[2],
            });
        }
        &self.steps
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Mutator perturbing SAX strings along Rössler trajectories
///
/// # Example
/// ```
/// use shingler::config::MutationConfig;
/// use shingler::mutator::{Mutator, RosslerMutator};
///
/// let mutator = RosslerMutator::new(MutationConfig::default(), 5).unwrap();
/// let mutants = mutator.mutate("abcdeabcde", "1_0", 3).unwrap();
///
/// assert_eq!(mutants.len(), 3);
/// assert!(mutants.contains_key("1_0_2"));
/// assert!(mutants.values().all(|m| m.len() == 10));
/// ```
#[derive(Debug, Clone)]
pub struct RosslerMutator {
    config: MutationConfig,
    alphabet: Alphabet,
}

impl RosslerMutator {
    pub fn new(config: MutationConfig, alphabet_size: usize) -> Result<Self> {
        config.validate()?;
        let alphabet = Alphabet::new(alphabet_size)?;
        Ok(Self { config, alphabet })
    }

    /// Seed for mutant `id`: FNV-1a over the identifier bytes
    fn seed_for(id: &str) -> u64 {
        let mut hasher = fnv::FnvHasher::default();
        hasher.write(id.as_bytes());
        hasher.finish()
    }

    fn jitter(&self, rng: &mut StdRng, value: f64) -> f64 {
        let j = self.config.param_jitter;
        if j == 0.0 {
            return value;
        }
        value * rng.gen_range(1.0 - j..=1.0 + j)
    }

    fn mutate_one(&self, codes: &[usize], id: &str, recorder: &mut StepRecorder) -> String {
        let mut rng = StdRng::seed_from_u64(Self::seed_for(id));

        let params = RosslerParams {
            a: self.jitter(&mut rng, self.config.base_a),
            b: self.jitter(&mut rng, self.config.base_b),
            c: self.jitter(&mut rng, self.config.base_c),
        };
        let initial = [
            1.0 + rng.gen_range(-0.1..=0.1),
            1.0 + rng.gen_range(-0.1..=0.1),
            1.0 + rng.gen_range(-0.1..=0.1),
        ];

        let xs: Vec<f64> = recorder
            .integrate(&params, initial, self.config.step_size, codes.len())
            .iter()
            .map(|s| s.x)
            .collect();
        let xs = znorm(&xs, 1e-9);

        let top = self.alphabet.size() - 1;
        codes
            .iter()
            .zip(&xs)
            .map(|(&code, &x)| {
                let roll: f64 = rng.gen();
                let code = if roll >= self.config.mutation_rate {
                    code
                } else if x > NUDGE_THRESHOLD {
                    (code + 1).min(top)
                } else if x < -NUDGE_THRESHOLD {
                    code.saturating_sub(1)
                } else {
                    code
                };
                self.alphabet.symbols()[code]
            })
            .collect()
    }
}

impl Mutator for RosslerMutator {
    fn mutate(&self, base: &str, id_prefix: &str, count: usize) -> Result<MutantMap> {
        if base.is_empty() {
            return Err(ShingleError::Mutation(format!(
                "cannot mutate empty string for '{}'",
                id_prefix
            )));
        }

        let codes = base
            .chars()
            .enumerate()
            .map(|(pos, symbol)| {
                self.alphabet.index_of(symbol).ok_or_else(|| {
                    ShingleError::Mutation(format!(
                        "base string for '{}' has symbol '{}' at position {} outside the alphabet",
                        id_prefix, symbol, pos
                    ))
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        let mut recorder = StepRecorder::new();
        let mut mutants = MutantMap::new();
        for i in 0..count {
            let id = mutant_id(id_prefix, i);
            let mutant = self.mutate_one(&codes, &id, &mut recorder);
            mutants.insert(id, mutant);
        }
        Ok(mutants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn mutator() -> RosslerMutator {
        RosslerMutator::new(MutationConfig::default(), 5).unwrap()
    }

    #[test]
    fn test_ids_and_count() {
        let mutants = mutator().mutate("abcde", "3_7", 4).unwrap();
        let ids: Vec<&str> = mutants.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["3_7_0", "3_7_1", "3_7_2", "3_7_3"]);
    }

    #[test]
    fn test_length_and_alphabet_preserved() {
        let base = "abcdeaabcdeaeeddcc";
        let mutants = mutator().mutate(base, "1_0", 50).unwrap();
        for mutant in mutants.values() {
            assert_eq!(mutant.len(), base.len());
            assert!(mutant.chars().all(|c| ('a'..='e').contains(&c)));
        }
    }

    #[test]
    fn test_deterministic() {
        let base = "abcdeaabcdeaeeddcc";
        let m = mutator();
        assert_eq!(m.mutate(base, "2_5", 20).unwrap(), m.mutate(base, "2_5", 20).unwrap());
    }

    #[test]
    fn test_mutant_seeded_by_its_identifier() {
        let base = "abcdeaabcdeaeeddcc";
        let m = mutator();
        let few = m.mutate(base, "4_2", 3).unwrap();
        let many = m.mutate(base, "4_2", 8).unwrap();
        for (id, mutant) in &few {
            assert_eq!(many.get(id), Some(mutant));
        }
        assert_eq!(RosslerMutator::seed_for("4_2_1"), RosslerMutator::seed_for("4_2_1"));
        assert_ne!(RosslerMutator::seed_for("4_2_1"), RosslerMutator::seed_for("4_21"));
    }

    #[test]
    fn test_mutants_vary() {
        let base = "cccccccccccccccccccccccccccccc";
        let config = MutationConfig {
            mutation_rate: 1.0,
            ..Default::default()
        };
        let mutants = RosslerMutator::new(config, 5)
            .unwrap()
            .mutate(base, "1_0", 10)
            .unwrap();
        assert!(mutants.values().any(|m| m != base));
    }

    #[test]
    fn test_zero_rate_copies_base() {
        let config = MutationConfig {
            mutation_rate: 0.0,
            ..Default::default()
        };
        let base = "abcdeabcde";
        let mutants = RosslerMutator::new(config, 5).unwrap().mutate(base, "x", 5).unwrap();
        assert!(mutants.values().all(|m| m == base));
    }

    #[test]
    fn test_empty_base_is_upstream_error() {
        let err = mutator().mutate("", "1_0", 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(err.to_string().contains("1_0"));
    }

    #[test]
    fn test_foreign_symbol_rejected() {
        let err = mutator().mutate("abz", "1_0", 1).unwrap_err();
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_step_recorder_stays_on_attractor() {
        let params = RosslerParams {
            a: 0.2,
            b: 0.2,
            c: 5.0,
        };
        let mut recorder = StepRecorder::new();
        let steps = recorder.integrate(&params, [1.0, 1.0, 1.0], 0.05, 500);
        assert_eq!(steps.len(), 500);
        assert!(steps.windows(2).all(|w| w[1].t > w[0].t));
        assert!(steps.iter().all(|s| s.x.abs() < 50.0 && s.y.abs() < 50.0 && s.z.abs() < 100.0));
        assert_eq!(recorder.steps().len(), 500);
    }
}
