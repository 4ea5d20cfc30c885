mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use car_dash::data::aggregate::{
    condition_summary, kpis, mean_price_by, pivot_price_by_make_transmission, state_summary, summarize,
    ChartKind, Summary, STATE_SUMMARY_LIMIT,
};
use car_dash::data::export::write_csv;
use car_dash::data::filter::{apply, FilterOptions, FilterSpec, NumericRange, Selection};
use car_dash::data::loader::DataSourceError;
use car_dash::data::model::{CategoricalField, Table, COLUMNS};
use car_dash::data::store::DatasetStore;
use car_dash::state::{DashboardState, Interaction};

use common::{temp_file, toyota_honda, varied_table};

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() <= 1e-6 * b.abs().max(1.0), "{a} != {b}");
}

fn narrowed_spec(table: &Table) -> FilterSpec {
    let mut spec = FilterSpec::defaults(table);
    spec.make = Selection::from_choices(["Toyota", "Ford", "Kia"]);
    spec.state = Selection::from_choices(["ca", "tx", "fl", "wa"]);
    spec.mileage = NumericRange::new(20_000.0, 120_000.0);
    spec.price = NumericRange::new(6_000.0, 22_000.0);
    spec
}

#[test]
fn make_filter_example() {
    let table = toyota_honda();
    let mut spec = FilterSpec::defaults(&table);
    spec.make = Selection::from_choices(["Toyota"]);

    let view = apply(&table, &spec);
    assert_eq!(view.len(), 1);
    assert_eq!(view.rows()[0].make, "Toyota");

    let k = kpis(&view);
    assert_eq!(k.unique_makes, 1);
    assert_eq!(format!("{:.2}", k.average_price), "20000.00");
}

#[test]
fn price_range_example() {
    let table = toyota_honda();
    let mut spec = FilterSpec::defaults(&table);
    spec.price = NumericRange::new(19_000.0, 21_000.0);
    let view = apply(&table, &spec);
    assert_eq!(view.len(), 1);
    assert_eq!(view.rows()[0].make, "Toyota");
}

#[test]
fn empty_transmission_selection_example() {
    let table = toyota_honda();
    let mut spec = FilterSpec::defaults(&table);
    spec.transmission = Selection::none();
    let view = apply(&table, &spec);
    assert!(view.is_empty());
    assert_eq!(summarize(&view, ChartKind::Bar), Summary::NoData);
}

#[test]
fn filter_is_sound_complete_and_order_preserving() {
    let table = varied_table();
    let spec = narrowed_spec(&table);
    let view = apply(&table, &spec);
    assert!(!view.is_empty());
    assert!(view.len() < table.len());

    // View rows appear in the base table in the same relative order.
    let mut base = table.rows().iter();
    for row in view.rows() {
        assert!(base.any(|r| r == row), "row missing or out of order: {row:?}");
    }

    assert!(view.rows().iter().all(|r| spec.matches(r)));
    let kept = table.rows().iter().filter(|r| spec.matches(r)).count();
    assert_eq!(kept, view.len());
}

#[test]
fn default_spec_is_identity_and_any_empty_set_empties() {
    let table = varied_table();
    let spec = FilterSpec::defaults(&table);
    assert_eq!(apply(&table, &spec), table);

    for field in CategoricalField::ALL {
        let mut spec = FilterSpec::defaults(&table);
        *spec.selection_mut(field) = Selection::Only(BTreeSet::new());
        assert!(apply(&table, &spec).is_empty(), "{field} with no choices kept rows");
    }
}

#[test]
fn numeric_bounds_are_inclusive() {
    let table = varied_table();
    let target = &table.rows()[17];
    let mut spec = FilterSpec::defaults(&table);
    spec.mileage = NumericRange::new(target.mileage, target.mileage);
    let view = apply(&table, &spec);
    assert_eq!(view.rows(), std::slice::from_ref(target));
}

#[test]
fn grouped_means_decompose_the_overall_mean() {
    let view = apply(&varied_table(), &narrowed_spec(&varied_table()));
    let overall = kpis(&view).average_price * view.len() as f64;
    for groups in [
        mean_price_by(view.rows(), |r| &r.make),
        mean_price_by(view.rows(), |r| &r.state),
        condition_summary(&view),
    ] {
        let total: f64 = groups.iter().map(|g| g.mean * g.count as f64).sum();
        assert_close(total, overall);
        assert_eq!(groups.iter().map(|g| g.count).sum::<usize>(), view.len());
    }
}

#[test]
fn summary_group_limits_and_ordering() {
    let view = varied_table();
    let states = state_summary(&view);
    assert!(states.len() <= STATE_SUMMARY_LIMIT);
    assert!(states.windows(2).all(|w| w[0].mean >= w[1].mean));

    let conditions = condition_summary(&view);
    let distinct: BTreeSet<_> = view.rows().iter().map(|r| r.condition.as_str()).collect();
    assert_eq!(conditions.len(), distinct.len());
    assert!(conditions.windows(2).all(|w| w[0].mean >= w[1].mean));
}

#[test]
fn pivot_shape_matches_view() {
    let mut spec = FilterSpec::defaults(&varied_table());
    spec.make = Selection::from_choices(["Honda", "BMW"]);
    spec.year = NumericRange::new(2010.0, 2012.0);
    let view = apply(&varied_table(), &spec);
    let pivot = pivot_price_by_make_transmission(&view);

    assert_eq!(pivot.makes, view.unique(CategoricalField::Make));
    assert_eq!(pivot.transmissions, view.unique(CategoricalField::Transmission));
    assert_eq!(pivot.cells.len(), pivot.makes.len());
    for (make, line) in pivot.makes.iter().zip(&pivot.cells) {
        assert_eq!(line.len(), pivot.transmissions.len());
        for (t, &v) in pivot.transmissions.iter().zip(line) {
            let present = view.rows().iter().any(|r| &r.make == make && &r.transmission == t);
            assert!(!v.is_nan());
            assert_eq!(present, v > 0.0, "{make}/{t} = {v}");
        }
    }
}

#[test]
fn only_model_options_cascade() {
    let table = varied_table();
    let mut spec = FilterSpec::defaults(&table);
    spec.make = Selection::from_choices(["Kia"]);
    spec.state = Selection::from_choices(["ca"]);
    let options = FilterOptions::derive(&table, &spec);

    assert!(options.models.iter().all(|m| m.starts_with("Kia-")));
    assert_eq!(options.models.len(), 3);
    assert_eq!(options.makes, table.unique(CategoricalField::Make));
    assert_eq!(options.states, table.unique(CategoricalField::State));
    assert_eq!(options.transmissions, table.unique(CategoricalField::Transmission));
}

#[test]
fn store_export_and_reload_round_trip() {
    let header = COLUMNS.join(",");
    let csv = format!(
        "{header}\n\
         Toyota,Camry,automatic,ca,white,black,Good,30000,2020,20000,19500\n\
         Honda,Civic,manual,tx,red,gray,Fair,40000,2019,18000,18200\n\
         Ford,Focus,automatic,ca,blue,black,Poor,90000,2012,6000,6100\n"
    );
    let (dir, path) = temp_file("car_price_clean_data2.csv", &csv);

    let store = DatasetStore::new(&path);
    let base = store.load().expect("load");
    assert!(Arc::ptr_eq(&base, &store.load().expect("reload")));

    let mut state = DashboardState::new(base);
    state.handle(Interaction::SetSelection(
        CategoricalField::State,
        Selection::from_choices(["ca"]),
    ));
    assert_eq!(state.view.len(), 2);

    let out = dir.path().join("filtered_data.csv");
    assert_eq!(write_csv(&state.view, &out).expect("export"), 2);
    let reloaded = DatasetStore::new(&out).load().expect("load export");
    assert_eq!(*reloaded, state.view);
}

#[test]
fn load_failures_are_data_source_errors() {
    let (_dir, path) = temp_file("cars.csv", "Make,Model,Price\nKia,Soul,not-a-number\n");
    assert!(matches!(DatasetStore::new(&path).load(), Err(DataSourceError::Csv { .. })));

    let (_dir, path) = temp_file("cars.json", "{\"not\": \"an array\"}");
    assert!(matches!(DatasetStore::new(&path).load(), Err(DataSourceError::Json { .. })));
}

#[test]
fn reset_after_many_interactions_restores_defaults() {
    let mut state = DashboardState::new(Arc::new(varied_table()));
    state.handle(Interaction::ToggleValue(CategoricalField::Make, "Ford".into()));
    state.handle(Interaction::ToggleValue(CategoricalField::Model, "Ford-B".into()));
    state.handle(Interaction::SetRange(
        car_dash::data::model::NumericField::Year,
        NumericRange::new(2015.0, 2016.0),
    ));
    state.handle(Interaction::SetChart(ChartKind::Scatter));
    assert!(state.view.len() < state.base.len());

    state.handle(Interaction::ResetFilters);
    assert_eq!(state.spec, FilterSpec::defaults(&state.base));
    assert_eq!(state.view, *state.base);
    assert_eq!(state.chart, ChartKind::Scatter);
    assert!(state.summary.ready().is_some());
}
