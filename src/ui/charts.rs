use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{generate_palette, ColorMap};
use crate::data::aggregate::{ChartData, ChartKind, GroupMean, ValueCount, YearMeans};

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Main chart (central panel)
// ---------------------------------------------------------------------------

/// Render the user-selected chart.
pub fn main_chart(ui: &mut Ui, kind: ChartKind, data: &ChartData, makes: &ColorMap) {
    ui.heading(kind.title());
    match data {
        ChartData::AvgPriceByMake(groups) => mean_bars(ui, "avg_price_by_make", groups, makes),
        ChartData::CountByMake(counts) => count_bars(ui, "count_by_make", "Count", counts, false),
        ChartData::AvgPriceByYear(years) => year_lines(ui, years, false),
        ChartData::PriceAndMmrByYear(years) => year_lines(ui, years, true),
        ChartData::MileageVsPrice(points) => {
            // One series per make so the legend doubles as a colour key.
            let mut by_make: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
            for p in points {
                by_make.entry(p.make.as_str()).or_default().push([p.mileage, p.price]);
            }
            Plot::new("mileage_vs_price")
                .height(CHART_HEIGHT)
                .legend(Legend::default())
                .x_axis_label("Mileage")
                .y_axis_label("Price")
                .show(ui, |plot_ui| {
                    for (make, pts) in by_make {
                        plot_ui.points(
                            Points::new(PlotPoints::from(pts))
                                .name(make)
                                .color(makes.color_for(make))
                                .radius(2.5),
                        );
                    }
                });
        }
        ChartData::TransmissionShare(counts) => pie(ui, counts),
    }
}

fn mean_bars(ui: &mut Ui, id: &str, groups: &[GroupMean], makes: &ColorMap) {
    let bars: Vec<Bar> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.mean)
                .name(&g.key)
                .fill(makes.color_for(&g.key))
                .width(0.7)
        })
        .collect();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label("Make")
        .y_axis_label("Price")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Average Price"));
        });
    index_key(ui, groups.iter().map(|g| g.key.as_str()));
}

/// Bar chart of value counts; `horizontal` lays the bars along the y axis.
pub fn count_bars(ui: &mut Ui, id: &str, label: &str, counts: &[ValueCount], horizontal: bool) {
    let palette = generate_palette(counts.len());
    let bars: Vec<Bar> = counts
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, (c, color))| {
            Bar::new(i as f64, c.count as f64)
                .name(&c.value)
                .fill(color)
                .width(0.7)
        })
        .collect();
    let mut chart = BarChart::new(bars).name(label);
    if horizontal {
        chart = chart.horizontal();
    }
    Plot::new(id)
        .height(CHART_HEIGHT * 0.8)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
    index_key(ui, counts.iter().map(|c| c.value.as_str()));
}

fn year_lines(ui: &mut Ui, years: &[YearMeans], with_mmr: bool) {
    let mut sorted = years.to_vec();
    sorted.sort_by_key(|y| y.year);
    let price: Vec<[f64; 2]> = sorted.iter().map(|y| [f64::from(y.year), y.avg_price]).collect();
    let mmr: Vec<[f64; 2]> = sorted.iter().map(|y| [f64::from(y.year), y.avg_mmr]).collect();

    Plot::new(if with_mmr { "price_mmr_by_year" } else { "price_by_year" })
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Price")
        .show(ui, |plot_ui| {
            let name = if with_mmr { "Avg_price" } else { "Price" };
            plot_ui.line(Line::new(PlotPoints::from(price.clone())).name(name).width(2.0));
            if with_mmr {
                plot_ui.points(Points::new(PlotPoints::from(price)).name(name).radius(3.0));
                plot_ui.line(Line::new(PlotPoints::from(mmr.clone())).name("Avg_mmr").width(2.0));
                plot_ui.points(Points::new(PlotPoints::from(mmr)).name("Avg_mmr").radius(3.0));
            }
        });
}

/// Bars are placed at 0, 1, 2, …; list which category sits at which position.
fn index_key<'a>(ui: &mut Ui, keys: impl Iterator<Item = &'a str>) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (i, key) in keys.enumerate() {
            ui.label(RichText::new(format!("{i}: {key}")).small());
        }
    });
}

// ---------------------------------------------------------------------------
// Pie chart (painted directly; egui_plot has none)
// ---------------------------------------------------------------------------

fn pie(ui: &mut Ui, counts: &[ValueCount]) {
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return;
    }
    let colors = generate_palette(counts.len());

    ui.horizontal(|ui: &mut Ui| {
        let size = ui.available_width().min(CHART_HEIGHT);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = size * 0.45;

        let mut start = -FRAC_PI_2;
        for (c, &color) in counts.iter().zip(&colors) {
            let sweep = TAU * c.count as f32 / total as f32;
            // Each polygon must stay convex, so slices wider than a quarter
            // turn are drawn in pieces.
            let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
            let step = sweep / pieces as f32;
            for p in 0..pieces {
                let a0 = start + step * p as f32;
                let mut pts = vec![center];
                for s in 0..=16 {
                    let a = a0 + step * s as f32 / 16.0;
                    pts.push(center + radius * egui::vec2(a.cos(), a.sin()));
                }
                painter.add(Shape::convex_polygon(pts, color, Stroke::NONE));
            }
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for (c, &color) in counts.iter().zip(&colors) {
                let share = 100.0 * c.count as f64 / total as f64;
                ui.label(RichText::new(format!("■ {}  {share:.1}% ({})", c.value, c.count)).color(color));
            }
        });
    });
}

/// Color and interior value counts, side by side.
pub fn color_breakdowns(ui: &mut Ui, colors: &[ValueCount], interiors: &[ValueCount]) {
    ui.columns(2, |cols| {
        cols[0].strong("Count by Car Color");
        count_bars(&mut cols[0], "color_counts", "Count", colors, true);
        cols[1].strong("Count by Interior Color");
        count_bars(&mut cols[1], "interior_counts", "Count", interiors, true);
    });
}
