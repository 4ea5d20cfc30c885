use std::path::PathBuf;
use std::sync::Arc;

use crate::data::aggregate::{summarize, ChartKind, Summary};
use crate::data::export;
use crate::data::filter::{apply, FilterOptions, FilterSpec, NumericRange, Selection};
use crate::data::model::{CategoricalField, NumericField, Table};

// ---------------------------------------------------------------------------
// Interactions coming back from the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    SetSelection(CategoricalField, Selection),
    ToggleValue(CategoricalField, String),
    SetRange(NumericField, NumericRange),
    SetChart(ChartKind),
    ResetFilters,
    Export(PathBuf),
}

/// User-visible outcome of the last discrete action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering. Everything except the
/// base table is rebuilt by [`DashboardState::recompute`].
pub struct DashboardState {
    /// Base table shared with the dataset store.
    pub base: Arc<Table>,

    /// Current constraints.
    pub spec: FilterSpec,

    /// Which main chart is shown.
    pub chart: ChartKind,

    /// Choices and slider bounds for the controls.
    pub options: FilterOptions,

    /// Rows passing `spec`.
    pub view: Table,

    /// Aggregates of `view`.
    pub summary: Summary,

    /// Result of the last export, shown in the side panel.
    pub notice: Option<Notice>,
}

impl DashboardState {
    pub fn new(base: Arc<Table>) -> Self {
        let spec = FilterSpec::defaults(&base);
        let chart = ChartKind::default();
        let options = FilterOptions::derive(&base, &spec);
        let view = apply(&base, &spec);
        let summary = summarize(&view, chart);
        Self {
            base,
            spec,
            chart,
            options,
            view,
            summary,
            notice: None,
        }
    }

    /// Rebuild option domains, the filtered view and all aggregates from the
    /// current spec.
    pub fn recompute(&mut self) {
        self.options = FilterOptions::derive(&self.base, &self.spec);
        self.view = apply(&self.base, &self.spec);
        self.summary = summarize(&self.view, self.chart);
        log::debug!("Recomputed: {} of {} rows visible", self.view.len(), self.base.len());
        if self.view.is_empty() {
            log::warn!("No data available for the selected filters");
        }
    }

    /// Apply one interaction. Filter and chart changes trigger a single
    /// recompute; export leaves the view untouched.
    pub fn handle(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::SetSelection(field, selection) => {
                *self.spec.selection_mut(field) = selection;
            }
            Interaction::ToggleValue(field, value) => {
                self.spec.selection_mut(field).toggle(&value);
            }
            Interaction::SetRange(field, range) => {
                *self.spec.range_mut(field) = range;
            }
            Interaction::SetChart(chart) => {
                self.chart = chart;
            }
            Interaction::ResetFilters => {
                self.spec = FilterSpec::defaults(&self.base);
            }
            Interaction::Export(path) => {
                self.export(path);
                return;
            }
        }
        self.recompute();
    }

    fn export(&mut self, path: PathBuf) {
        self.notice = Some(match export::write_csv(&self.view, &path) {
            Ok(n) => Notice::Success(format!("Saved {n} rows to {}", path.display())),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                Notice::Error(format!("Export failed: {e:#}"))
            }
        });
    }
}
