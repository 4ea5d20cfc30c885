use std::path::PathBuf;

use car_dash::data::model::{Row, Table};
use tempfile::TempDir;

pub fn listing(make: &str, model: &str, transmission: &str, price: f64) -> Row {
    Row {
        make: make.to_string(),
        model: model.to_string(),
        transmission: transmission.to_string(),
        state: "ca".to_string(),
        color: "white".to_string(),
        interior: "black".to_string(),
        condition: "Good".to_string(),
        mileage: 30_000.0,
        year: 2020,
        price,
        mmr: price,
    }
}

/// The two-row table used by the worked examples: a 2020 automatic Toyota at
/// 20000 and a 2019 manual Honda at 18000.
pub fn toyota_honda() -> Table {
    let mut honda = listing("Honda", "Civic", "Manual", 18_000.0);
    honda.mileage = 40_000.0;
    honda.year = 2019;
    Table::new(vec![listing("Toyota", "Camry", "Auto", 20_000.0), honda])
}

/// A larger deterministic table with every column varying.
pub fn varied_table() -> Table {
    let makes = ["Toyota", "Honda", "Ford", "Kia", "BMW"];
    let models = ["A", "B", "C"];
    let transmissions = ["automatic", "manual"];
    let states = ["ca", "tx", "fl", "ny", "wa", "ga", "az"];
    let conditions = ["Excellent", "Good", "Fair", "Poor"];
    let colors = ["white", "black", "silver", "red"];

    (0..120)
        .map(|i: usize| Row {
            make: makes[i % makes.len()].to_string(),
            model: format!("{}-{}", makes[i % makes.len()], models[i % models.len()]),
            transmission: transmissions[(i / 3) % transmissions.len()].to_string(),
            state: states[(i * 5) % states.len()].to_string(),
            color: colors[i % colors.len()].to_string(),
            interior: colors[(i + 1) % colors.len()].to_string(),
            condition: conditions[(i * 7) % conditions.len()].to_string(),
            mileage: 5_000.0 + (i as f64) * 1_250.5,
            year: 2008 + (i % 12) as i32,
            price: 4_000.0 + ((i * 37) % 101) as f64 * 250.0,
            mmr: 4_500.0 + ((i * 53) % 97) as f64 * 240.0,
        })
        .collect()
}

/// Write `contents` to a file named `name` inside a fresh temp dir.
pub fn temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write temp file");
    (dir, path)
}
