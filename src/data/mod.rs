/// Data layer: resource file formats and the types they decode into.
///
/// Architecture:
/// ```text
///  .txt / .tsv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file line by line → lookup structure
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  Pid2Text, IdToLabel, Keywords, ClassGraph, Results
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
