use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::ChartKind;
use crate::data::filter::{NumericRange, Selection, ALL_SENTINEL};
use crate::data::model::{CategoricalField, NumericField};
use crate::state::{DashboardState, Interaction, Notice};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel and return the interactions the user triggered.
pub fn side_panel(ui: &mut Ui, state: &DashboardState, export_path: &Path) -> Vec<Interaction> {
    let mut actions = Vec::new();

    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for field in CategoricalField::ALL {
                multiselect(ui, state, field, &mut actions);
            }
            ui.separator();

            for field in NumericField::ALL {
                range_slider(ui, state, field, &mut actions);
            }
            ui.separator();

            // ---- Graph type ----
            ui.strong("Select Graph Type");
            egui::ComboBox::from_id_salt("graph_type")
                .selected_text(state.chart.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for kind in ChartKind::ALL {
                        if ui.selectable_label(state.chart == kind, kind.to_string()).clicked() {
                            actions.push(Interaction::SetChart(kind));
                        }
                    }
                });
            ui.separator();

            if ui.button("Reset Filters").clicked() {
                actions.push(Interaction::ResetFilters);
            }
            if ui.button("Download Filtered Data").clicked() {
                if let Some(path) = save_file_dialog(export_path) {
                    actions.push(Interaction::Export(path));
                }
            }

            match &state.notice {
                Some(Notice::Success(msg)) => {
                    ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
                }
                Some(Notice::Error(msg)) => {
                    ui.label(RichText::new(msg).color(Color32::RED));
                }
                None => {}
            }
        });

    actions
}

/// Collapsible checkbox list standing in for a multiselect. The "All" entry
/// lifts the restriction; unchecking it leaves nothing selected.
fn multiselect(ui: &mut Ui, state: &DashboardState, field: CategoricalField, actions: &mut Vec<Interaction>) {
    let selection = state.spec.selection(field);
    let choices = state.options.choices(field);

    let summary = match selection {
        Selection::All => ALL_SENTINEL.to_string(),
        Selection::Only(set) => format!("{}/{}", set.len(), choices.len()),
    };
    let header_text = format!("Select {field}  ({summary})");

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(field.column())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let mut all = selection.is_all();
            if ui.checkbox(&mut all, ALL_SENTINEL).changed() {
                actions.push(Interaction::SetSelection(field, all_checkbox_selection(all)));
            }

            for value in choices {
                let mut checked = matches!(selection, Selection::Only(set) if set.contains(value));
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    actions.push(Interaction::ToggleValue(field, value.clone()));
                }
            }
        });
}

/// Selection after the "All" entry is (un)checked: checked means only the
/// sentinel is picked, unchecked means nothing is.
fn all_checkbox_selection(checked: bool) -> Selection {
    let picked: &[&str] = if checked { &[ALL_SENTINEL] } else { &[] };
    Selection::from_choices(picked.iter().copied())
}

/// A pair of sliders bounding one numeric column.
fn range_slider(ui: &mut Ui, state: &DashboardState, field: NumericField, actions: &mut Vec<Interaction>) {
    let bounds = state.options.bounds(field);
    let current = state.spec.range(field);
    let (mut lo, mut hi) = (current.min, current.max);

    ui.strong(format!("Select {field} Range"));
    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, bounds.min..=bounds.max).integer().text("min"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, bounds.min..=bounds.max).integer().text("max"))
        .changed();

    if lo_changed || hi_changed {
        // Keep the interval ordered: whichever handle moved pushes the other.
        if lo > hi {
            if lo_changed {
                hi = lo;
            } else {
                lo = hi;
            }
        }
        actions.push(Interaction::SetRange(field, NumericRange::new(lo, hi)));
    }
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn save_file_dialog(suggested: &Path) -> Option<std::path::PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .add_filter("CSV", &["csv"]);
    if let Some(name) = suggested.file_name() {
        dialog = dialog.set_file_name(name.to_string_lossy());
    }
    if let Some(dir) = suggested.parent().filter(|d| !d.as_os_str().is_empty()) {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Car Price Dashboard");
        ui.separator();
        ui.label(format!(
            "{} listings loaded, {} visible",
            state.base.len(),
            state.view.len()
        ));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_checkbox_maps_to_sentinel_or_nothing() {
        assert_eq!(all_checkbox_selection(true), Selection::All);
        assert_eq!(all_checkbox_selection(false), Selection::none());
    }
}
