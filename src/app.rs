use std::path::PathBuf;

use eframe::egui::{self, ScrollArea, Ui};

use crate::color::ColorMap;
use crate::data::aggregate::Summary;
use crate::data::model::CategoricalField;
use crate::state::DashboardState;
use crate::ui::{charts, panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CarDashApp {
    pub state: DashboardState,
    /// Colours keyed by make, fixed over the base table so a make keeps its
    /// colour while filters change.
    make_colors: ColorMap,
    export_path: PathBuf,
}

impl CarDashApp {
    pub fn new(state: DashboardState, export_path: PathBuf) -> Self {
        let make_colors = ColorMap::new(&state.base.unique(CategoricalField::Make));
        Self {
            state,
            make_colors,
            export_path,
        }
    }

    fn dashboard(&self, ui: &mut Ui) {
        ui.heading("Car Price Dashboard");
        ui.separator();

        let summary = match &self.state.summary {
            Summary::NoData => {
                ui.colored_label(
                    egui::Color32::from_rgb(0xd0, 0x90, 0x00),
                    "No data available for the selected filters.",
                );
                return;
            }
            Summary::Ready(summary) => summary,
        };

        tables::kpi_row(ui, &summary.kpis);
        ui.separator();
        tables::describe_table(ui, &summary.describe);
        ui.separator();

        charts::main_chart(ui, self.state.chart, &summary.chart, &self.make_colors);
        ui.separator();
        charts::color_breakdowns(ui, &summary.colors, &summary.interiors);
        ui.separator();

        ui.columns(2, |cols| {
            cols[0].heading("Average Price by Condition");
            tables::group_table(&mut cols[0], "by_condition", "Tight_condition", &summary.by_condition);
            cols[1].heading("Average Price by State");
            tables::group_table(&mut cols[1], "by_state", "State", &summary.top_states);
        });
        ui.separator();

        tables::pivot_heatmap(ui, &summary.pivot);
    }
}

impl eframe::App for CarDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        let actions = egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &self.state, &self.export_path))
            .inner;

        // ---- Central panel: KPIs, tables, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| self.dashboard(ui));
        });

        for action in actions {
            self.state.handle(action);
        }
    }
}
