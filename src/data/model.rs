use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Product id → product text.
pub type Pid2Text = BTreeMap<String, String>;

/// Class id → class label.
pub type IdToLabel = BTreeMap<i64, String>;

/// Class label → class id.
pub type LabelToId = BTreeMap<String, i64>;

/// Keyword group name → items, in source order and untrimmed.
pub type Keywords = BTreeMap<String, Vec<String>>;

// ---------------------------------------------------------------------------
// Class graph
// ---------------------------------------------------------------------------

/// One parent → child edge of the label taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassEdge {
    pub parent: i64,
    pub child: i64,
}

impl From<(i64, i64)> for ClassEdge {
    fn from((parent, child): (i64, i64)) -> Self {
        ClassEdge { parent, child }
    }
}

impl fmt::Display for ClassEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.parent, self.child)
    }
}

/// Edge list in file order. Duplicates, self-loops and cycles are kept as-is.
pub type ClassGraph = Vec<ClassEdge>;

// ---------------------------------------------------------------------------
// Training results
// ---------------------------------------------------------------------------

/// Split name ("valid", "test") → series label → score per epoch.
///
/// ```json
/// {
///   "valid": { "mlp_partial": [0.80, 0.82, 0.83] },
///   "test":  { "mlp_partial": [0.79, 0.81, 0.81] }
/// }
/// ```
pub type Results = BTreeMap<String, BTreeMap<String, Vec<f64>>>;
