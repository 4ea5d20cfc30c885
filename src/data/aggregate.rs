use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use super::model::{CategoricalField, Row, Table};

/// Number of groups kept in the per-state summary.
pub const STATE_SUMMARY_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Headline metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub unique_makes: usize,
    pub unique_models: usize,
    pub average_price: f64,
}

/// Count, moments and five-number summary of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN below two values.
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Describe {
    /// `(label, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.p50),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescribeTable {
    pub price: Describe,
    pub mileage: Describe,
}

/// Mean price and row count of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: String,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Per-year means for the line charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearMeans {
    pub year: i32,
    pub avg_price: f64,
    pub avg_mmr: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub mileage: f64,
    pub price: f64,
    pub make: String,
}

/// Mean price cross-tabulated by Make (rows) and Transmission (columns).
/// Combinations with no listings hold `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub makes: Vec<String>,
    pub transmissions: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl PivotTable {
    #[cfg(test)]
    fn get(&self, make: &str, transmission: &str) -> Option<f64> {
        let r = self.makes.iter().position(|m| m == make)?;
        let c = self.transmissions.iter().position(|t| t == transmission)?;
        Some(self.cells[r][c])
    }

    /// Largest cell, used to scale the heatmap.
    pub fn max_value(&self) -> f64 {
        self.cells.iter().flatten().copied().fold(0.0, f64::max)
    }
}

/// The user-selectable main chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    CountBar,
    Line,
    BiAxesLine,
    Scatter,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Bar,
        ChartKind::CountBar,
        ChartKind::Line,
        ChartKind::BiAxesLine,
        ChartKind::Scatter,
        ChartKind::Pie,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Bar => "Average Price by Make",
            ChartKind::CountBar => "Cars Count by Make",
            ChartKind::Line => "Average Price Over Years",
            ChartKind::BiAxesLine => "Average Price & MMR Over Years",
            ChartKind::Scatter => "Mileage vs Price",
            ChartKind::Pie => "Transmission Distribution",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChartKind::Bar => "Bar",
            ChartKind::CountBar => "Count Bar",
            ChartKind::Line => "Line",
            ChartKind::BiAxesLine => "Bi_axes_line",
            ChartKind::Scatter => "Scatter",
            ChartKind::Pie => "Pie",
        };
        f.write_str(label)
    }
}

/// Data behind the selected main chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    AvgPriceByMake(Vec<GroupMean>),
    CountByMake(Vec<ValueCount>),
    AvgPriceByYear(Vec<YearMeans>),
    PriceAndMmrByYear(Vec<YearMeans>),
    MileageVsPrice(Vec<ScatterPoint>),
    TransmissionShare(Vec<ValueCount>),
}

/// Everything the dashboard shows for a non-empty view.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub kpis: Kpis,
    pub describe: DescribeTable,
    pub chart: ChartData,
    pub colors: Vec<ValueCount>,
    pub interiors: Vec<ValueCount>,
    pub by_condition: Vec<GroupMean>,
    pub top_states: Vec<GroupMean>,
    pub pivot: PivotTable,
}

/// Outcome of one aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// The filtered view is empty; nothing was computed.
    NoData,
    Ready(Box<DashboardSummary>),
}

impl Summary {
    pub fn ready(&self) -> Option<&DashboardSummary> {
        match self {
            Summary::NoData => None,
            Summary::Ready(summary) => Some(summary),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Compute every aggregate for `view`, or [`Summary::NoData`] when it has no
/// rows.
pub fn summarize(view: &Table, chart: ChartKind) -> Summary {
    if view.is_empty() {
        return Summary::NoData;
    }
    let rows = view.rows();
    Summary::Ready(Box::new(DashboardSummary {
        kpis: kpis(view),
        describe: DescribeTable {
            price: describe(rows.iter().map(|r| r.price)),
            mileage: describe(rows.iter().map(|r| r.mileage)),
        },
        chart: chart_data(view, chart),
        colors: value_counts(rows, |r| &r.color),
        interiors: value_counts(rows, |r| &r.interior),
        by_condition: condition_summary(view),
        top_states: state_summary(view),
        pivot: pivot_price_by_make_transmission(view),
    }))
}

/// Data for the selected main chart only.
pub fn chart_data(view: &Table, chart: ChartKind) -> ChartData {
    let rows = view.rows();
    match chart {
        ChartKind::Bar => ChartData::AvgPriceByMake(mean_price_by(rows, |r| &r.make)),
        ChartKind::CountBar => ChartData::CountByMake(value_counts(rows, |r| &r.make)),
        ChartKind::Line => ChartData::AvgPriceByYear(year_means(view)),
        ChartKind::BiAxesLine => ChartData::PriceAndMmrByYear(year_means(view)),
        ChartKind::Scatter => ChartData::MileageVsPrice(scatter_points(view)),
        ChartKind::Pie => ChartData::TransmissionShare(value_counts(rows, |r| &r.transmission)),
    }
}

// ---------------------------------------------------------------------------
// Individual aggregates
// ---------------------------------------------------------------------------

/// Distinct makes and models plus the mean price.
pub fn kpis(view: &Table) -> Kpis {
    let distinct = |field: CategoricalField| {
        view.rows()
            .iter()
            .map(|r| r.categorical(field))
            .collect::<HashSet<_>>()
            .len()
    };
    Kpis {
        unique_makes: distinct(CategoricalField::Make),
        unique_models: distinct(CategoricalField::Model),
        average_price: mean(view.rows().iter().map(|r| r.price)),
    }
}

/// Pandas-style `describe()` of one numeric column.
pub fn describe(values: impl IntoIterator<Item = f64>) -> Describe {
    let mut sorted: Vec<f64> = values.into_iter().collect();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let mean = mean(sorted.iter().copied());
    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    };

    Describe {
        count,
        mean,
        std,
        min: sorted.first().copied().unwrap_or(f64::NAN),
        p25: quantile(&sorted, 0.25),
        p50: quantile(&sorted, 0.50),
        p75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Mean price per group of `key`, first-seen group order.
pub fn mean_price_by<F>(rows: &[Row], key: F) -> Vec<GroupMean>
where
    F: Fn(&Row) -> &String,
{
    group_by(rows, |r| key(r).clone())
        .into_iter()
        .map(|(key, members)| GroupMean {
            mean: mean(members.iter().map(|r| r.price)),
            count: members.len(),
            key,
        })
        .collect()
}

/// Row count per distinct value of `key`, first-seen order.
pub fn value_counts<F>(rows: &[Row], key: F) -> Vec<ValueCount>
where
    F: Fn(&Row) -> &String,
{
    group_by(rows, |r| key(r).clone())
        .into_iter()
        .map(|(value, members)| ValueCount {
            value,
            count: members.len(),
        })
        .collect()
}

/// Mean price and mean MMR per model year, first-seen year order.
pub fn year_means(view: &Table) -> Vec<YearMeans> {
    group_by(view.rows(), |r| r.year)
        .into_iter()
        .map(|(year, members)| YearMeans {
            year,
            avg_price: mean(members.iter().map(|r| r.price)),
            avg_mmr: mean(members.iter().map(|r| r.mmr)),
            count: members.len(),
        })
        .collect()
}

/// `(mileage, price, make)` for every row, unaggregated.
pub fn scatter_points(view: &Table) -> Vec<ScatterPoint> {
    view.rows()
        .iter()
        .map(|r| ScatterPoint {
            mileage: r.mileage,
            price: r.price,
            make: r.make.clone(),
        })
        .collect()
}

/// Mean price and count per condition, highest mean first.
pub fn condition_summary(view: &Table) -> Vec<GroupMean> {
    let mut groups = mean_price_by(view.rows(), |r| &r.condition);
    sort_by_mean_desc(&mut groups);
    groups
}

/// Mean price and count for the [`STATE_SUMMARY_LIMIT`] states with the
/// highest mean.
pub fn state_summary(view: &Table) -> Vec<GroupMean> {
    let mut groups = mean_price_by(view.rows(), |r| &r.state);
    sort_by_mean_desc(&mut groups);
    groups.truncate(STATE_SUMMARY_LIMIT);
    groups
}

/// Mean price by Make × Transmission; makes and transmissions in first-seen
/// order, empty combinations `0.0`.
pub fn pivot_price_by_make_transmission(view: &Table) -> PivotTable {
    let makes = view.unique(CategoricalField::Make);
    let transmissions = view.unique(CategoricalField::Transmission);
    let make_idx: HashMap<&str, usize> = makes.iter().enumerate().map(|(i, m)| (m.as_str(), i)).collect();
    let trans_idx: HashMap<&str, usize> = transmissions
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();

    let mut sums = vec![vec![(0.0_f64, 0_usize); transmissions.len()]; makes.len()];
    for row in view.rows() {
        let cell = &mut sums[make_idx[row.make.as_str()]][trans_idx[row.transmission.as_str()]];
        cell.0 += row.price;
        cell.1 += 1;
    }

    let cells = sums
        .into_iter()
        .map(|line| {
            line.into_iter()
                .map(|(sum, n)| if n == 0 { 0.0 } else { sum / n as f64 })
                .collect()
        })
        .collect();

    PivotTable {
        makes,
        transmissions,
        cells,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Group rows by key, preserving the order in which keys first appear.
fn group_by<K, F>(rows: &[Row], key: F) -> Vec<(K, Vec<&Row>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Row) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&Row>)> = Vec::new();
    for row in rows {
        let k = key(row);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row);
    }
    groups
}

// Stable, so equal means keep first-seen order.
fn sort_by_mean_desc(groups: &mut [GroupMean]) {
    groups.sort_by(|a, b| b.mean.total_cmp(&a.mean));
}

fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values.into_iter().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// Linear interpolation between closest ranks of a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        }
    }
}
