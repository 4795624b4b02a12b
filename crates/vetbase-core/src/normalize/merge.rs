use crate::normalize::rules::{CANONICAL_LEN, COUNTRY_PREFIX};
use serde::{Deserialize, Serialize};

/// What to do when the accumulated digits reach 12 characters.
///
/// The data-correction runs this engine was ported from flushed at >= 12
/// before the exact-12 identity rule could apply, so a standalone canonical
/// number typed as one token ended up in the invalid pile. That ordering is
/// kept as the default; `AcceptExactCanonical` is the repaired alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Flush any combined string of 12+ digits as unmatched, unconditionally.
    FlushAsInvalid,
    /// Accept a combined string that is exactly 12 digits and carries the
    /// country code before the overflow check fires.
    AcceptExactCanonical,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::FlushAsInvalid
    }
}

/// One decision of the accumulator. `Candidate` values still have to pass
/// the canonical mapper; `Unmatched` values go straight to the invalid set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Emission {
    Candidate(String),
    Unmatched(String),
}

/// Greedy single-pass fragment merger.
///
/// Hand-entered fields often split one logical number across several tokens
/// ("29 123-45-67"). Each incoming digit string is appended to the buffer;
/// the combined length then decides, without lookahead, whether the buffer
/// is a complete candidate, has overflowed, or needs more digits. No
/// backtracking: once appended, digits are never re-split.
#[derive(Debug)]
pub(crate) struct MergeAccumulator {
    policy: OverflowPolicy,
    buffer: Vec<String>,
    buffered_len: usize,
}

impl MergeAccumulator {
    pub(crate) fn new(policy: OverflowPolicy) -> Self {
        Self {
            policy,
            buffer: Vec::new(),
            buffered_len: 0,
        }
    }

    /// Appends one non-empty digit string and reports an emission if the
    /// combined buffer reached a decision point.
    pub(crate) fn feed(&mut self, digits: String) -> Option<Emission> {
        debug_assert!(!digits.is_empty());
        self.buffered_len += digits.len();
        self.buffer.push(digits);

        if self.buffered_len >= CANONICAL_LEN {
            // Prefix conditions apply to the combined string, not to any one
            // fragment of it.
            let combined = self.drain();
            if self.policy == OverflowPolicy::AcceptExactCanonical
                && combined.len() == CANONICAL_LEN
                && combined.starts_with(COUNTRY_PREFIX)
            {
                return Some(Emission::Candidate(combined));
            }
            return Some(Emission::Unmatched(combined));
        }

        if matches!(self.buffered_len, 9 | 7 | 6)
            || (self.buffered_len == 11 && self.buffer.concat().starts_with("80"))
        {
            return Some(Emission::Candidate(self.drain()));
        }

        // Lengths 1-5, 8, 10 and prefixless 11: keep accumulating.
        None
    }

    /// Force-flushes whatever is pending at the end of the field.
    pub(crate) fn finish(&mut self) -> Option<Emission> {
        if self.buffer.is_empty() {
            return None;
        }
        Some(Emission::Unmatched(self.drain()))
    }

    fn drain(&mut self) -> String {
        self.buffered_len = 0;
        let combined = self.buffer.concat();
        self.buffer.clear();
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::{Emission, MergeAccumulator, OverflowPolicy};

    fn feed_all(acc: &mut MergeAccumulator, parts: &[&str]) -> Vec<Emission> {
        let mut emissions: Vec<Emission> = parts
            .iter()
            .filter_map(|part| acc.feed(part.to_string()))
            .collect();
        emissions.extend(acc.finish());
        emissions
    }

    #[test]
    fn fragments_merge_into_one_candidate() {
        let mut acc = MergeAccumulator::new(OverflowPolicy::default());
        let emissions = feed_all(&mut acc, &["12", "34567"]);
        assert_eq!(emissions, vec![Emission::Candidate("1234567".to_string())]);
    }

    #[test]
    fn complete_lengths_emit_without_waiting() {
        for digits in ["291234567", "1234567", "123456"] {
            let mut acc = MergeAccumulator::new(OverflowPolicy::default());
            let emissions = feed_all(&mut acc, &[digits]);
            assert_eq!(emissions, vec![Emission::Candidate(digits.to_string())]);
        }
    }

    #[test]
    fn trunk_prefixed_eleven_digits_emit() {
        let mut acc = MergeAccumulator::new(OverflowPolicy::default());
        let emissions = feed_all(&mut acc, &["80291234567"]);
        assert_eq!(
            emissions,
            vec![Emission::Candidate("80291234567".to_string())]
        );
    }

    #[test]
    fn trunk_prefix_split_across_fragments_still_counts() {
        let mut acc = MergeAccumulator::new(OverflowPolicy::default());
        let emissions = feed_all(&mut acc, &["8", "0291234567"]);
        assert_eq!(
            emissions,
            vec![Emission::Candidate("80291234567".to_string())]
        );
    }

    #[test]
    fn prefixless_eleven_digits_keep_accumulating() {
        let mut acc = MergeAccumulator::new(OverflowPolicy::default());
        assert_eq!(acc.feed("12345678901".to_string()), None);
        let emissions = feed_all(&mut acc, &["2"]);
        assert_eq!(
            emissions,
            vec![Emission::Unmatched("123456789012".to_string())]
        );
    }

    #[test]
    fn overflow_first_rejects_standalone_canonical_token() {
        // Pinned ported behavior: the >= 12 check fires before the identity
        // rule could, so a lone canonical number is flushed as unmatched.
        let mut acc = MergeAccumulator::new(OverflowPolicy::FlushAsInvalid);
        let emissions = feed_all(&mut acc, &["375291234567"]);
        assert_eq!(
            emissions,
            vec![Emission::Unmatched("375291234567".to_string())]
        );
    }

    #[test]
    fn exact_canonical_policy_accepts_standalone_canonical_token() {
        let mut acc = MergeAccumulator::new(OverflowPolicy::AcceptExactCanonical);
        let emissions = feed_all(&mut acc, &["375291234567"]);
        assert_eq!(
            emissions,
            vec![Emission::Candidate("375291234567".to_string())]
        );
    }

    #[test]
    fn exact_canonical_policy_accepts_merged_canonical_fragments() {
        let mut acc = MergeAccumulator::new(OverflowPolicy::AcceptExactCanonical);
        let emissions = feed_all(&mut acc, &["375", "29", "1234567"]);
        assert_eq!(
            emissions,
            vec![Emission::Candidate("375291234567".to_string())]
        );
    }

    #[test]
    fn exact_canonical_policy_still_flushes_foreign_twelve_digits() {
        let mut acc = MergeAccumulator::new(OverflowPolicy::AcceptExactCanonical);
        let emissions = feed_all(&mut acc, &["123456789012"]);
        assert_eq!(
            emissions,
            vec![Emission::Unmatched("123456789012".to_string())]
        );
    }

    #[test]
    fn overflow_past_twelve_flushes_everything_buffered() {
        let mut acc = MergeAccumulator::new(OverflowPolicy::default());
        assert_eq!(acc.feed("12345".to_string()), None);
        let emissions = feed_all(&mut acc, &["12345678"]);
        assert_eq!(
            emissions,
            vec![Emission::Unmatched("1234512345678".to_string())]
        );
    }

    #[test]
    fn trailing_buffer_is_force_flushed() {
        let mut acc = MergeAccumulator::new(OverflowPolicy::default());
        let emissions = feed_all(&mut acc, &["12345"]);
        assert_eq!(emissions, vec![Emission::Unmatched("12345".to_string())]);
    }

    #[test]
    fn accumulator_resets_between_emissions() {
        let mut acc = MergeAccumulator::new(OverflowPolicy::default());
        let emissions = feed_all(&mut acc, &["291234567", "80", "291234567"]);
        assert_eq!(
            emissions,
            vec![
                Emission::Candidate("291234567".to_string()),
                Emission::Candidate("80291234567".to_string()),
            ]
        );
    }
}
