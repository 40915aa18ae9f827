// Mutant generation
//
// A mutator turns one SAX string into many perturbed variants keyed by
// `<id_prefix>_<i>`. The only contract the pipeline relies on: output is a
// pure function of (string, prefix, count), and identifiers are unique within
// a prefix, so globally unique prefixes give globally unique mutants.

mod rossler;

use std::collections::BTreeMap;

pub use rossler::{RosslerMutator, RosslerParams, Step, StepRecorder};

use crate::error::Result;

/// Mutant identifier to mutant string, iterated in identifier order
pub type MutantMap = BTreeMap<String, String>;

/// Generates perturbed variants of a symbolic string
pub trait Mutator {
    /// Produce `count` mutants of `base`, identified as `<id_prefix>_<i>`
    fn mutate(&self, base: &str, id_prefix: &str, count: usize) -> Result<MutantMap>;
}

/// Identifier of the `i`-th mutant generated from `id_prefix`
pub fn mutant_id(id_prefix: &str, i: usize) -> String {
    format!("{}_{}", id_prefix, i)
}
