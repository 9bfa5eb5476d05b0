use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::PreconditionError;

// ---------------------------------------------------------------------------
// ESCI labels
// ---------------------------------------------------------------------------

/// The four query–product relevance classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EsciLabel {
    Exact,
    Substitute,
    Complement,
    Irrelevant,
}

impl EsciLabel {
    pub const ALL: [EsciLabel; 4] = [
        EsciLabel::Exact,
        EsciLabel::Substitute,
        EsciLabel::Complement,
        EsciLabel::Irrelevant,
    ];

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn letter(self) -> char {
        match self {
            EsciLabel::Exact => 'E',
            EsciLabel::Substitute => 'S',
            EsciLabel::Complement => 'C',
            EsciLabel::Irrelevant => 'I',
        }
    }
}

impl fmt::Display for EsciLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Already-computed evaluation metrics for one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalMetrics {
    pub accuracy: f64,
    pub f1_macro: f64,
    /// Class id (0..=3) → accuracy on that class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_class_accuracy: Option<BTreeMap<u8, f64>>,
}

impl EvalMetrics {
    pub fn new(accuracy: f64, f1_macro: f64) -> Self {
        EvalMetrics {
            accuracy,
            f1_macro,
            per_class_accuracy: None,
        }
    }

    pub fn with_per_class(mut self, per_class: BTreeMap<u8, f64>) -> Self {
        self.per_class_accuracy = Some(per_class);
        self
    }

    /// Read metrics out of a loosely-typed JSON object, naming the offending
    /// key on failure.
    pub fn from_json(value: &JsonValue) -> Result<Self, PreconditionError> {
        let number = |key: &str| -> Result<f64, PreconditionError> {
            value
                .get(key)
                .ok_or_else(|| PreconditionError::MissingKey(key.to_string()))?
                .as_f64()
                .ok_or_else(|| PreconditionError::NotANumber(key.to_string()))
        };

        let mut metrics = EvalMetrics::new(number("accuracy")?, number("f1_macro")?);

        if let Some(per_class) = value.get("per_class_accuracy") {
            let per_class = per_class
                .as_object()
                .ok_or_else(|| PreconditionError::NotAnObject("per_class_accuracy".to_string()))?;
            let mut by_id = BTreeMap::new();
            for (key, acc) in per_class {
                let id = key
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .filter(|id| EsciLabel::from_id(*id).is_some())
                    .ok_or_else(|| PreconditionError::UnknownClassId(key.clone()))?;
                let acc = acc.as_f64().ok_or_else(|| {
                    PreconditionError::NotANumber(format!("per_class_accuracy.{key}"))
                })?;
                by_id.insert(id, acc);
            }
            metrics.per_class_accuracy = Some(by_id);
        }

        Ok(metrics)
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

const IMPROVED_MARKER: &str = " *";
const PER_CLASS_INDENT: &str = "        ";

/// Four decimals; NaN is written `nan`, like the infinities (`inf`, `-inf`).
fn fixed4(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.4}")
    }
}

/// `[VAL ] Acc: 0.8123 | F1-macro: 0.7456`, with ` *` appended when improved.
pub fn format_eval_result(metrics: &EvalMetrics, stage: &str, is_improved: bool) -> String {
    let star = if is_improved { IMPROVED_MARKER } else { "" };
    format!(
        "[{:<4}] Acc: {} | F1-macro: {}{star}",
        stage.to_uppercase(),
        fixed4(metrics.accuracy),
        fixed4(metrics.f1_macro)
    )
}

/// The summary line, followed by a per-class accuracy line
/// (`        E: 0.9000 | S: 0.4000 | ...`) when per-class data is present.
/// Classes are listed in ascending id order.
pub fn format_eval_result_esci(
    metrics: &EvalMetrics,
    stage: &str,
    is_improved: bool,
) -> Result<Vec<String>, PreconditionError> {
    let mut lines = vec![format_eval_result(metrics, stage, is_improved)];

    if let Some(per_class) = &metrics.per_class_accuracy {
        let entries = per_class
            .iter()
            .map(|(&id, acc)| {
                EsciLabel::from_id(id)
                    .map(|label| format!("{label}: {}", fixed4(*acc)))
                    .ok_or_else(|| PreconditionError::UnknownClassId(id.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        lines.push(format!("{PER_CLASS_INDENT}{}", entries.join(" | ")));
    }

    Ok(lines)
}

/// Print [`format_eval_result`] to stdout.
pub fn print_eval_result(metrics: &EvalMetrics, stage: &str, is_improved: bool) {
    println!("{}", format_eval_result(metrics, stage, is_improved));
}

/// Print [`format_eval_result_esci`] to stdout. Nothing is printed if a
/// class id is unknown.
pub fn print_eval_result_esci(
    metrics: &EvalMetrics,
    stage: &str,
    is_improved: bool,
) -> Result<(), PreconditionError> {
    for line in format_eval_result_esci(metrics, stage, is_improved)? {
        println!("{line}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn per_class() -> BTreeMap<u8, f64> {
        [(0, 0.9), (1, 0.41234), (2, 0.2), (3, 0.55557)].into_iter().collect()
    }

    #[test]
    fn summary_line_pads_stage() {
        let metrics = EvalMetrics::new(0.81234, 0.745);

        assert_eq!(
            format_eval_result(&metrics, "val", false),
            "[VAL ] Acc: 0.8123 | F1-macro: 0.7450"
        );
        assert_eq!(
            format_eval_result(&metrics, "test", true),
            "[TEST] Acc: 0.8123 | F1-macro: 0.7450 *"
        );
        assert_eq!(
            format_eval_result(&metrics, "train", false),
            "[TRAIN] Acc: 0.8123 | F1-macro: 0.7450"
        );
    }

    #[test]
    fn esci_adds_per_class_line() {
        let metrics = EvalMetrics::new(0.5, 0.25).with_per_class(per_class());

        let lines = format_eval_result_esci(&metrics, "val", true).unwrap();
        assert_eq!(
            lines,
            vec![
                "[VAL ] Acc: 0.5000 | F1-macro: 0.2500 *".to_string(),
                "        E: 0.9000 | S: 0.4123 | C: 0.2000 | I: 0.5556".to_string(),
            ]
        );
    }

    #[test]
    fn non_finite_scores_use_lowercase_names() {
        let metrics = EvalMetrics::new(f64::NAN, f64::INFINITY)
            .with_per_class([(0, f64::NAN), (1, f64::NEG_INFINITY)].into_iter().collect());

        let lines = format_eval_result_esci(&metrics, "val", false).unwrap();
        assert_eq!(lines[0], "[VAL ] Acc: nan | F1-macro: inf");
        assert_eq!(lines[1], "        E: nan | S: -inf");
    }

    #[test]
    fn esci_without_per_class_is_single_line() {
        let metrics = EvalMetrics::new(0.5, 0.25);

        let lines = format_eval_result_esci(&metrics, "test", false).unwrap();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn esci_rejects_unknown_class() {
        let mut classes = per_class();
        classes.insert(7, 0.1);
        let metrics = EvalMetrics::new(0.5, 0.25).with_per_class(classes);

        assert_eq!(
            format_eval_result_esci(&metrics, "val", false).unwrap_err(),
            PreconditionError::UnknownClassId("7".to_string())
        );
    }

    #[test]
    fn labels_map_ids_to_letters() {
        let letters: String = EsciLabel::ALL.iter().map(|l| l.letter()).collect();
        assert_eq!(letters, "ESCI");
        assert_eq!(EsciLabel::from_id(2), Some(EsciLabel::Complement));
        assert_eq!(EsciLabel::Irrelevant.id(), 3);
        assert_eq!(EsciLabel::from_id(4), None);
    }

    #[test]
    fn metrics_from_json() {
        let value = json!({
            "accuracy": 0.7,
            "f1_macro": 0.6,
            "per_class_accuracy": { "0": 0.9, "3": 0.1 },
            "loss": 1.2
        });

        let metrics = EvalMetrics::from_json(&value).unwrap();
        assert_eq!(metrics.accuracy, 0.7);
        assert_eq!(metrics.f1_macro, 0.6);
        let per_class = metrics.per_class_accuracy.unwrap();
        assert_eq!(per_class.len(), 2);
        assert_eq!(per_class[&3], 0.1);
    }

    #[test]
    fn metrics_from_json_reports_missing_keys() {
        assert_eq!(
            EvalMetrics::from_json(&json!({ "accuracy": 0.7 })).unwrap_err(),
            PreconditionError::MissingKey("f1_macro".to_string())
        );
        assert_eq!(
            EvalMetrics::from_json(&json!({ "accuracy": "high", "f1_macro": 0.1 })).unwrap_err(),
            PreconditionError::NotANumber("accuracy".to_string())
        );
        assert_eq!(
            EvalMetrics::from_json(&json!({
                "accuracy": 0.7,
                "f1_macro": 0.1,
                "per_class_accuracy": { "X": 0.5 }
            }))
            .unwrap_err(),
            PreconditionError::UnknownClassId("X".to_string())
        );
        assert_eq!(
            EvalMetrics::from_json(&json!({
                "accuracy": 0.7,
                "f1_macro": 0.1,
                "per_class_accuracy": [0.5, 0.4]
            }))
            .unwrap_err(),
            PreconditionError::NotAnObject("per_class_accuracy".to_string())
        );
    }
}
