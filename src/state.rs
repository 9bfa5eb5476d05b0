use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use esci_toolkit::chart::CurveChart;
use esci_toolkit::data::loader::load_results;
use esci_toolkit::data::model::Results;

use crate::color::SeriesColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded results (None until a file is opened).
    pub results: Option<Results>,

    /// File the results came from.
    pub source: Option<PathBuf>,

    /// Split currently shown ("valid", "test", ...).
    pub split: String,

    /// Metric name used for the title and y axis.
    pub metric: String,

    /// Chart for the current split (cached).
    pub chart: Option<CurveChart>,

    /// Series the user switched off.
    pub hidden: BTreeSet<String>,

    /// One colour per series label.
    pub colors: Option<SeriesColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(split: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            results: None,
            source: None,
            split: split.into(),
            metric: metric.into(),
            chart: None,
            hidden: BTreeSet::new(),
            colors: None,
            status_message: None,
        }
    }

    /// Load a results document from disk and show it.
    pub fn open(&mut self, path: &Path) {
        match load_results(path) {
            Ok(results) => {
                log::info!(
                    "Loaded results from {} with splits {:?}",
                    path.display(),
                    results.keys().collect::<Vec<_>>()
                );
                self.source = Some(path.to_path_buf());
                self.set_results(results);
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to load results: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest newly loaded results, reset visibility and colours.
    pub fn set_results(&mut self, results: Results) {
        let labels: BTreeSet<&String> = results.values().flat_map(|s| s.keys()).collect();
        self.colors = Some(SeriesColors::new(labels));
        self.hidden.clear();
        self.results = Some(results);
        self.rebuild_chart();
    }

    /// Switch to another split of the loaded results.
    pub fn set_split(&mut self, split: String) {
        self.split = split;
        self.rebuild_chart();
    }

    /// Recompute `chart` after the split or the results changed.
    pub fn rebuild_chart(&mut self) {
        let Some(results) = &self.results else {
            self.chart = None;
            return;
        };
        match CurveChart::from_results(results, &self.split, &self.metric) {
            Ok(chart) => {
                self.chart = Some(chart);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("{e}");
                self.chart = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Names of the splits in the loaded results.
    pub fn splits(&self) -> Vec<String> {
        self.results
            .as_ref()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_visible(&self, label: &str) -> bool {
        !self.hidden.contains(label)
    }

    /// Show or hide a single series.
    pub fn toggle_series(&mut self, label: &str) {
        if !self.hidden.remove(label) {
            self.hidden.insert(label.to_string());
        }
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    pub fn hide_all(&mut self) {
        if let Some(chart) = &self.chart {
            self.hidden = chart.series.iter().map(|s| s.label.clone()).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn results() -> Results {
        let mut valid = BTreeMap::new();
        valid.insert("a".to_string(), vec![0.1, 0.2]);
        valid.insert("b".to_string(), vec![0.3]);
        let mut test = BTreeMap::new();
        test.insert("a".to_string(), vec![0.15]);

        let mut results = Results::new();
        results.insert("valid".to_string(), valid);
        results.insert("test".to_string(), test);
        results
    }

    #[test]
    fn set_results_builds_chart_for_current_split() {
        let mut state = AppState::new("valid", "Accuracy");
        state.set_results(results());

        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.series.len(), 2);
        assert_eq!(state.splits(), vec!["test", "valid"]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn missing_split_sets_status_message() {
        let mut state = AppState::new("train", "Accuracy");
        state.set_results(results());

        assert!(state.chart.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("train"));

        state.set_split("test".to_string());
        assert_eq!(state.chart.as_ref().unwrap().title, "Test Accuracy over Epochs");
        assert!(state.status_message.is_none());
    }

    #[test]
    fn toggling_series_visibility() {
        let mut state = AppState::new("valid", "F1");
        state.set_results(results());

        state.toggle_series("a");
        assert!(!state.is_visible("a"));
        state.toggle_series("a");
        assert!(state.is_visible("a"));

        state.hide_all();
        assert!(!state.is_visible("a") && !state.is_visible("b"));
        state.show_all();
        assert!(state.is_visible("b"));
    }

    #[test]
    fn open_missing_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new("valid", "Accuracy");
        state.open(&dir.path().join("nope.json"));

        assert!(state.results.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn open_malformed_json_shows_parser_message_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"valid\": }").unwrap();

        let mut state = AppState::new("valid", "Accuracy");
        state.open(&path);

        let msg = state.status_message.unwrap();
        assert!(msg.contains("invalid JSON"));
        assert_eq!(msg.matches("line 1").count(), 1);
    }
}
