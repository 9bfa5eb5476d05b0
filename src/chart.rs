use crate::data::model::Results;
use crate::error::PreconditionError;

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

/// One metric curve: a label and its `[epoch, score]` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// Everything needed to draw a "metric over epochs" line chart, independent
/// of the rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl CurveChart {
    /// Build the chart for one split of `results`, one line per series.
    /// Epochs are numbered from 0.
    pub fn from_results(
        results: &Results,
        split: &str,
        metric: &str,
    ) -> Result<Self, PreconditionError> {
        let by_label = results
            .get(split)
            .ok_or_else(|| PreconditionError::MissingSplit {
                split: split.to_string(),
                available: results.keys().cloned().collect(),
            })?;

        let series = by_label
            .iter()
            .map(|(label, scores)| Series {
                label: label.clone(),
                points: scores
                    .iter()
                    .enumerate()
                    .map(|(epoch, &score)| [epoch as f64, score])
                    .collect(),
            })
            .collect();

        Ok(CurveChart {
            title: format!("{} {metric} over Epochs", capitalize(split)),
            x_label: "Epoch".to_string(),
            y_label: metric.to_string(),
            series,
        })
    }
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Per-series summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub epochs: usize,
    pub last: Option<f64>,
    /// Highest non-NaN score and the epoch it was reached at (first on ties).
    pub best: Option<(usize, f64)>,
}

impl Series {
    pub fn summary(&self) -> SeriesSummary {
        let best = self
            .points
            .iter()
            .filter(|[_, score]| !score.is_nan())
            .fold(None, |best: Option<(usize, f64)>, &[epoch, score]| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((epoch as usize, score)),
            });

        SeriesSummary {
            epochs: self.points.len(),
            last: self.points.last().map(|[_, score]| *score),
            best,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn results() -> Results {
        let mut valid = BTreeMap::new();
        valid.insert("mlp_full".to_string(), vec![0.70, 0.74, 0.73]);
        valid.insert("mlp_partial".to_string(), vec![0.80, 0.82]);
        let mut test = BTreeMap::new();
        test.insert("mlp_full".to_string(), vec![0.69]);

        let mut results = Results::new();
        results.insert("valid".to_string(), valid);
        results.insert("test".to_string(), test);
        results
    }

    #[test]
    fn builds_one_series_per_label() {
        let chart = CurveChart::from_results(&results(), "valid", "Accuracy").unwrap();

        assert_eq!(chart.title, "Valid Accuracy over Epochs");
        assert_eq!(chart.x_label, "Epoch");
        assert_eq!(chart.y_label, "Accuracy");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label, "mlp_full");
        assert_eq!(
            chart.series[0].points,
            vec![[0.0, 0.70], [1.0, 0.74], [2.0, 0.73]]
        );
        assert_eq!(chart.series[1].label, "mlp_partial");
    }

    #[test]
    fn missing_split_is_precondition_error() {
        let err = CurveChart::from_results(&results(), "train", "F1").unwrap_err();

        assert_eq!(
            err,
            PreconditionError::MissingSplit {
                split: "train".to_string(),
                available: vec!["test".to_string(), "valid".to_string()],
            }
        );
    }

    #[test]
    fn capitalize_matches_title_case_of_split() {
        assert_eq!(capitalize("test"), "Test");
        assert_eq!(capitalize("VALID"), "Valid");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn summary_tracks_best_and_last() {
        let chart = CurveChart::from_results(&results(), "valid", "Accuracy").unwrap();
        let summary = chart.series[0].summary();

        assert_eq!(summary.epochs, 3);
        assert_eq!(summary.last, Some(0.73));
        assert_eq!(summary.best, Some((1, 0.74)));
    }

    #[test]
    fn summary_ignores_nan_and_handles_empty() {
        let series = Series {
            label: "noisy".to_string(),
            points: vec![[0.0, f64::NAN], [1.0, 0.5], [2.0, 0.5]],
        };
        assert_eq!(series.summary().best, Some((1, 0.5)));

        let empty = Series {
            label: "empty".to_string(),
            points: Vec::new(),
        };
        let summary = empty.summary();
        assert_eq!(summary.epochs, 0);
        assert_eq!(summary.last, None);
        assert_eq!(summary.best, None);
    }
}
