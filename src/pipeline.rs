//! Pipeline orchestration
//!
//! corpus → discretize each series → mutate → shingle each mutant → aggregate.
//!
//! Series are processed class by class (label order), then by index, so logs
//! and any failure report are reproducible. The first error from any stage
//! aborts the run: a matrix missing some series would silently skew any
//! classifier trained on it.

use std::collections::BTreeMap;

use tracing::{debug, error, info};

use crate::aggregate::{CorpusSnapshot, ShingleAggregator};
use crate::config::PipelineConfig;
use crate::corpus::LabeledCorpus;
use crate::error::{Result, ShingleError};
use crate::json_output::RunSummary;
use crate::mutator::{MutantMap, Mutator};
use crate::sax::{DiscretizationParams, Discretizer};
use crate::shingle::ShingleIndex;

/// Snapshot ready for export, plus a summary of the run
#[derive(Debug)]
pub struct PipelineOutput {
    pub snapshot: CorpusSnapshot,
    pub summary: RunSummary,
}

/// End-to-end driver, generic over its discretizer and mutator
#[derive(Debug)]
pub struct Pipeline<D, M> {
    config: PipelineConfig,
    params: DiscretizationParams,
    index: ShingleIndex,
    discretizer: D,
    mutator: M,
}

/// Key of the `index`-th series of `class`
pub fn series_key(class: &str, index: usize) -> String {
    format!("{}_{}", class, index)
}

impl<D: Discretizer, M: Mutator> Pipeline<D, M> {
    /// Validate `config` and build the shingle index once for the whole run
    pub fn new(config: PipelineConfig, discretizer: D, mutator: M) -> Result<Self> {
        config.validate()?;
        let index = ShingleIndex::new(config.alphabet_size, config.shingle_length)?;
        let params = DiscretizationParams::from(&config);
        Ok(Self {
            config,
            params,
            index,
            discretizer,
            mutator,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn index(&self) -> &ShingleIndex {
        &self.index
    }

    /// Reject a mutant set of the wrong size or with ids not derived from `key`
    fn check_mutants(&self, key: &str, mutants: &MutantMap) -> Result<()> {
        let expected = self.config.mutants_per_series;
        if mutants.len() != expected {
            return Err(ShingleError::Mutation(format!(
                "expected {} mutants for '{}', got {}",
                expected,
                key,
                mutants.len()
            )));
        }

        let prefix = format!("{}_", key);
        if let Some(id) = mutants.keys().find(|id| !id.starts_with(&prefix)) {
            return Err(ShingleError::Mutation(format!(
                "mutant id '{}' is not derived from series '{}'",
                id, key
            )));
        }
        Ok(())
    }

    /// Discretize and mutate one series, inserting every mutant
    fn process_series(
        &self,
        aggregator: &mut ShingleAggregator,
        key: &str,
        series: &[f64],
    ) -> Result<usize> {
        let sax = self.discretizer.discretize(series, &self.params)?;
        debug!(series = key, symbols = sax.len(), "discretized");

        let mutants = self
            .mutator
            .mutate(&sax, key, self.config.mutants_per_series)?;
        debug!(series = key, mutants = mutants.len(), "mutated");
        self.check_mutants(key, &mutants)?;

        let produced = mutants.len();
        for (id, mutant) in mutants {
            aggregator.insert(id, &mutant)?;
        }
        Ok(produced)
    }

    /// Run the pipeline over a whole corpus
    pub fn run(&self, corpus: &LabeledCorpus) -> Result<PipelineOutput> {
        let mut aggregator = ShingleAggregator::new(self.index.clone(), self.config.paa_size)?;
        let mut mutants_per_class = BTreeMap::new();
        let mut series_processed = 0;

        for (class, series_list) in corpus.iter() {
            let mut class_mutants = 0;
            for (idx, series) in series_list.iter().enumerate() {
                let key = series_key(class, idx);
                info!("processing series of class {}, index {}", class, idx);

                match self.process_series(&mut aggregator, &key, series) {
                    Ok(produced) => class_mutants += produced,
                    Err(e) => {
                        error!(series = %key, error = %e, "aborting run");
                        return Err(ShingleError::Series {
                            key,
                            source: Box::new(e),
                        });
                    }
                }
                series_processed += 1;
            }
            mutants_per_class.insert(class.to_string(), class_mutants);
        }

        info!(
            series = series_processed,
            mutants = aggregator.len(),
            "done mutations"
        );

        let summary = RunSummary {
            classes: corpus.class_count(),
            series: series_processed,
            mutants: aggregator.len(),
            columns: self.index.len(),
            alphabet_size: self.config.alphabet_size,
            shingle_length: self.config.shingle_length,
            word_length: aggregator.word_length(),
            mutants_per_class,
            output: None,
        };

        Ok(PipelineOutput {
            snapshot: aggregator.into_snapshot(),
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::mutator::{mutant_id, MutantMap};
    use std::cell::RefCell;

    /// Maps each value's sign to a symbol, one word per `paa_size` values
    #[derive(Debug)]
    struct SignDiscretizer;

    impl Discretizer for SignDiscretizer {
        fn discretize(&self, series: &[f64], _params: &DiscretizationParams) -> Result<String> {
            if series.is_empty() {
                return Err(ShingleError::Discretization("empty series".into()));
            }
            Ok(series
                .iter()
                .map(|&v| if v < 0.0 { 'a' } else { 'b' })
                .collect())
        }
    }

    /// Returns `count` copies of the base, recording every call
    #[derive(Debug, Default)]
    struct CopyMutator {
        calls: RefCell<Vec<String>>,
    }

    impl Mutator for CopyMutator {
        fn mutate(&self, base: &str, id_prefix: &str, count: usize) -> Result<MutantMap> {
            self.calls.borrow_mut().push(id_prefix.to_string());
            Ok((0..count)
                .map(|i| (mutant_id(id_prefix, i), base.to_string()))
                .collect())
        }
    }

    /// Always returns a single mutant, whatever was asked for
    #[derive(Debug)]
    struct ShortMutator;

    impl Mutator for ShortMutator {
        fn mutate(&self, base: &str, id_prefix: &str, _count: usize) -> Result<MutantMap> {
            Ok([(mutant_id(id_prefix, 0), base.to_string())].into_iter().collect())
        }
    }

    /// Tags every mutant with a fixed foreign prefix
    #[derive(Debug)]
    struct ForeignPrefixMutator;

    impl Mutator for ForeignPrefixMutator {
        fn mutate(&self, base: &str, id_prefix: &str, count: usize) -> Result<MutantMap> {
            Ok((0..count)
                .map(|i| (format!("other{}_{}", id_prefix, i), base.to_string()))
                .collect())
        }
    }

    fn config() -> PipelineConfig {
        PipelineConfig {
            window_size: 4,
            paa_size: 4,
            alphabet_size: 2,
            shingle_length: 2,
            mutants_per_series: 3,
            ..Default::default()
        }
    }

    fn corpus() -> LabeledCorpus {
        let mut corpus = LabeledCorpus::new();
        corpus.push("2", vec![1.0, -1.0, 1.0, -1.0]);
        corpus.push("1", vec![-1.0, -1.0, 1.0, 1.0]);
        corpus.push("1", vec![1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]);
        corpus
    }

    #[test]
    fn test_run_produces_all_mutants() {
        let pipeline = Pipeline::new(config(), SignDiscretizer, CopyMutator::default()).unwrap();
        let output = pipeline.run(&corpus()).unwrap();

        assert_eq!(output.snapshot.len(), 9);
        assert_eq!(output.summary.series, 3);
        assert_eq!(output.summary.mutants, 9);
        assert_eq!(output.summary.columns, 4);
        assert_eq!(output.summary.mutants_per_class.get("1"), Some(&6));
        assert_eq!(output.summary.mutants_per_class.get("2"), Some(&3));

        // "aabb": aa, ab, bb
        let freq = output.snapshot.get("1_0_2").unwrap();
        assert_eq!(freq.counts(), &[1, 1, 0, 1]);
        // "bbbbaaaa": words "bbbb" and "aaaa"
        let freq = output.snapshot.get("1_1_0").unwrap();
        assert_eq!(freq.counts(), &[3, 0, 0, 3]);
    }

    #[test]
    fn test_series_processed_in_class_then_index_order() {
        let pipeline = Pipeline::new(config(), SignDiscretizer, CopyMutator::default()).unwrap();
        pipeline.run(&corpus()).unwrap();
        assert_eq!(
            pipeline.mutator.calls.borrow().as_slice(),
            &["1_0", "1_1", "2_0"]
        );
    }

    #[test]
    fn test_invalid_config_rejected_before_run() {
        let config = PipelineConfig {
            shingle_length: 5,
            ..config()
        };
        let err = Pipeline::new(config, SignDiscretizer, CopyMutator::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_discretizer_failure_aborts_with_series_key() {
        let mut corpus = corpus();
        corpus.push("3", vec![]);
        let pipeline = Pipeline::new(config(), SignDiscretizer, CopyMutator::default()).unwrap();

        let err = pipeline.run(&corpus).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(err.to_string().contains("3_0"));
    }

    #[test]
    fn test_mutant_length_mismatch_is_format_error() {
        let mut corpus = LabeledCorpus::new();
        corpus.push("1", vec![1.0, 1.0, -1.0, -1.0, 1.0]);
        let pipeline = Pipeline::new(config(), SignDiscretizer, CopyMutator::default()).unwrap();

        let err = pipeline.run(&corpus).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("1_0"));
    }

    #[test]
    fn test_wrong_mutant_count_aborts() {
        let pipeline = Pipeline::new(config(), SignDiscretizer, ShortMutator).unwrap();
        let err = pipeline.run(&corpus()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(matches!(err, ShingleError::Series { ref key, .. } if key == "1_0"));
        assert!(err.to_string().contains("expected 3 mutants"));
    }

    #[test]
    fn test_mutant_ids_must_carry_series_key() {
        let pipeline = Pipeline::new(config(), SignDiscretizer, ForeignPrefixMutator).unwrap();
        let err = pipeline.run(&corpus()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(err.to_string().contains("other1_0_0"));
    }

    #[test]
    fn test_empty_corpus() {
        let pipeline = Pipeline::new(config(), SignDiscretizer, CopyMutator::default()).unwrap();
        let output = pipeline.run(&LabeledCorpus::new()).unwrap();
        assert!(output.snapshot.is_empty());
        assert_eq!(output.summary.classes, 0);
    }

    #[test]
    fn test_series_key() {
        assert_eq!(series_key("cylinder", 12), "cylinder_12");
    }
}
