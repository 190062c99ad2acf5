//! Per-date edge-case classification.
//!
//! Checks run in a fixed order: empty, all snow, no snow, too few points.
//! Uniform sets are labeled whatever their size.

use snowline_common::{EmptyReason, ObservationSet};

/// Smallest mixed-state set that is interpolated.
pub const MIN_OBSERVATIONS: usize = 3;

/// What to do with one date's observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No observations: the date yields zero rows.
    Empty,
    /// One row with no geometry and this label.
    Labeled(EmptyReason),
    /// Run the full extraction.
    Extract,
}

pub fn classify(observations: &ObservationSet<'_>) -> Classification {
    if observations.is_empty() {
        Classification::Empty
    } else if observations.all_snow() {
        Classification::Labeled(EmptyReason::CompleteSnow)
    } else if !observations.any_snow() {
        Classification::Labeled(EmptyReason::NoSnow)
    } else if observations.len() < MIN_OBSERVATIONS {
        Classification::Labeled(EmptyReason::InsufficientData)
    } else {
        Classification::Extract
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use snowline_common::Observation;

    fn observations(states: &[bool]) -> Vec<Observation> {
        let date = NaiveDate::from_ymd_opt(2005, 1, 15).unwrap();
        states
            .iter()
            .enumerate()
            .map(|(i, &s)| Observation::new(date, format!("S{i}"), 56.0 + i as f64 * 0.1, -4.0, s))
            .collect()
    }

    fn classify_states(states: &[bool]) -> Classification {
        let obs = observations(states);
        classify(&ObservationSet::from_filtered(obs.iter()))
    }

    #[test]
    fn test_empty() {
        assert_eq!(classify_states(&[]), Classification::Empty);
    }

    #[test]
    fn test_uniform_sets_are_labeled_at_any_size() {
        for n in 1..6 {
            assert_eq!(
                classify_states(&vec![true; n]),
                Classification::Labeled(EmptyReason::CompleteSnow)
            );
            assert_eq!(
                classify_states(&vec![false; n]),
                Classification::Labeled(EmptyReason::NoSnow)
            );
        }
    }

    #[test]
    fn test_small_mixed_set_is_insufficient() {
        assert_eq!(
            classify_states(&[true, false]),
            Classification::Labeled(EmptyReason::InsufficientData)
        );
    }

    #[test]
    fn test_mixed_set_is_extracted() {
        assert_eq!(classify_states(&[true, false, false]), Classification::Extract);
        assert_eq!(classify_states(&[true, false, true, false]), Classification::Extract);
    }
}
