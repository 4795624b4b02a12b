//! Phone normalization engine.
//!
//! Turns one free-text phone field into a deduplicated set of canonical
//! 12-digit "375" numbers plus the digit strings that could not be
//! recognized. Pure computation over in-memory strings: any input, however
//! malformed, yields a result; nothing here performs I/O or keeps state
//! between calls.

pub mod merge;
pub mod rules;
pub mod tokenize;

use merge::{Emission, MergeAccumulator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use merge::OverflowPolicy;
pub use rules::{is_canonical, CanonRule, CanonTable, CANONICAL_LEN, COUNTRY_PREFIX};
pub use tokenize::{extract_digits, split_field};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub table: CanonTable,
    pub overflow: OverflowPolicy,
}

/// Outcome of normalizing one raw field. Both collections are duplicate-free
/// under exact string equality and keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl NormalizationResult {
    pub fn is_empty(&self) -> bool {
        self.valid.is_empty() && self.invalid.is_empty()
    }

    /// The persisted form of a corrected field: valid numbers joined by ", ".
    pub fn joined_valid(&self) -> String {
        self.valid.join(", ")
    }

    fn push_valid(&mut self, number: String) {
        if !self.valid.iter().any(|seen| *seen == number) {
            self.valid.push(number);
        }
    }

    fn push_invalid(&mut self, digits: String) {
        if !self.invalid.iter().any(|seen| *seen == digits) {
            self.invalid.push(digits);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalizes one raw field: tokenize, strip to digits, greedily merge
    /// fragments, then classify every emission into `valid` or `invalid`.
    pub fn normalize(&self, raw: &str) -> NormalizationResult {
        let mut result = NormalizationResult::default();
        let mut accumulator = MergeAccumulator::new(self.options.overflow);

        for token in split_field(raw) {
            let digits = extract_digits(token);
            if digits.is_empty() {
                continue;
            }
            if let Some(emission) = accumulator.feed(digits) {
                self.classify(emission, &mut result);
            }
        }
        if let Some(emission) = accumulator.finish() {
            self.classify(emission, &mut result);
        }

        result
    }

    fn classify(&self, emission: Emission, result: &mut NormalizationResult) {
        match emission {
            Emission::Candidate(digits) => match self.options.table.canonicalize(&digits) {
                Some(number) => result.push_valid(number),
                None => result.push_invalid(digits),
            },
            Emission::Unmatched(digits) => result.push_invalid(digits),
        }
    }
}

/// Cross-record accumulation for reports: one shared seen-set per pile,
/// sorted ascending for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    valid: BTreeSet<String>,
    invalid: BTreeSet<String>,
}

impl BatchReport {
    pub fn absorb(&mut self, result: NormalizationResult) {
        self.valid.extend(result.valid);
        self.invalid.extend(result.invalid);
    }

    pub fn merge(mut self, other: BatchReport) -> BatchReport {
        self.valid.extend(other.valid);
        self.invalid.extend(other.invalid);
        self
    }

    pub fn valid(&self) -> impl Iterator<Item = &str> {
        self.valid.iter().map(String::as_str)
    }

    pub fn invalid(&self) -> impl Iterator<Item = &str> {
        self.invalid.iter().map(String::as_str)
    }

    pub fn valid_count(&self) -> usize {
        self.valid.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }
}

/// Normalizes many independent fields in parallel and reduces them into one
/// deduplicated report. Per-field work is side-effect-free, so only the
/// final reduce shares state.
pub fn normalize_batch(normalizer: &Normalizer, fields: &[&str]) -> BatchReport {
    fields
        .par_iter()
        .map(|raw| normalizer.normalize(raw))
        .fold(BatchReport::default, |mut report, result| {
            report.absorb(result);
            report
        })
        .reduce(BatchReport::default, BatchReport::merge)
}
