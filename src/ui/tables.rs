use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::{money, number};
use crate::color::heat;
use crate::data::aggregate::{DescribeTable, GroupMean, Kpis, PivotTable};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

pub fn kpi_row(ui: &mut Ui, kpis: &Kpis) {
    ui.heading("Key Performance Indicators");
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Unique Makes", kpis.unique_makes.to_string());
        metric(&mut cols[1], "Unique Models", kpis.unique_models.to_string());
        metric(&mut cols[2], "Average Price", money(kpis.average_price));
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Tabular summaries
// ---------------------------------------------------------------------------

pub fn describe_table(ui: &mut Ui, describe: &DescribeTable) {
    ui.heading("Descriptive Statistics");
    ui.push_id("describe", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(60.0))
            .columns(Column::auto().at_least(110.0), 2)
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui| {
                    ui.strong("");
                });
                header.col(|ui| {
                    ui.strong("Price");
                });
                header.col(|ui| {
                    ui.strong("Mileage");
                });
            })
            .body(|mut body| {
                let price = describe.price.entries();
                let mileage = describe.mileage.entries();
                for ((label, p), (_, m)) in price.into_iter().zip(mileage) {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.strong(label);
                        });
                        row.col(|ui| {
                            ui.label(number(p));
                        });
                        row.col(|ui| {
                            ui.label(number(m));
                        });
                    });
                }
            });
    });
}

/// Group / Average_Price / Count table for the condition and state summaries.
pub fn group_table(ui: &mut Ui, id: &str, key_label: &str, groups: &[GroupMean]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(50.0))
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for title in [key_label, "Average_Price", "Count"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for group in groups {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(&group.key);
                        });
                        row.col(|ui| {
                            ui.label(money(group.mean));
                        });
                        row.col(|ui| {
                            ui.label(group.count.to_string());
                        });
                    });
                }
            });
    });
}

/// Make × Transmission grid of mean prices, shaded by value.
pub fn pivot_heatmap(ui: &mut Ui, pivot: &PivotTable) {
    ui.heading("Average Price by Make and Transmission");
    let max = pivot.max_value();

    egui::ScrollArea::horizontal()
        .id_salt("pivot_scroll")
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("pivot_grid")
                .spacing([2.0, 2.0])
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Make \\ Transmission");
                    for t in &pivot.transmissions {
                        ui.strong(t);
                    }
                    ui.end_row();

                    for (make, line) in pivot.makes.iter().zip(&pivot.cells) {
                        ui.strong(make);
                        for &v in line {
                            let t = if max > 0.0 { v / max } else { 0.0 };
                            let text = RichText::new(format!(" {v:>10.0} "))
                                .monospace()
                                .color(if t > 0.6 { Color32::WHITE } else { Color32::BLACK })
                                .background_color(heat(t));
                            ui.label(text);
                        }
                        ui.end_row();
                    }
                });
        });
}
