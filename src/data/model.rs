use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Column names as they appear in the header row, in on-disk order.
pub const COLUMNS: [&str; 11] = [
    "Make",
    "Model",
    "Transmission",
    "State",
    "Color",
    "Interior",
    "Tight_condition",
    "Mileage",
    "Year",
    "Price",
    "Mmr",
];

// ---------------------------------------------------------------------------
// Row – one listing
// ---------------------------------------------------------------------------

/// A single used-car listing. Field order matches [`COLUMNS`] so serializing
/// a row reproduces the input layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Transmission")]
    pub transmission: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Interior")]
    pub interior: String,
    #[serde(rename = "Tight_condition")]
    pub condition: String,
    #[serde(rename = "Mileage")]
    pub mileage: f64,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Mmr")]
    pub mmr: f64,
}

impl Row {
    pub fn categorical(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Make => &self.make,
            CategoricalField::Model => &self.model,
            CategoricalField::Transmission => &self.transmission,
            CategoricalField::State => &self.state,
        }
    }

    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Mileage => self.mileage,
            NumericField::Year => f64::from(self.year),
            NumericField::Price => self.price,
        }
    }
}

// ---------------------------------------------------------------------------
// Filterable fields
// ---------------------------------------------------------------------------

/// Categorical columns that have a multiselect filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoricalField {
    Make,
    Model,
    Transmission,
    State,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::Make,
        CategoricalField::Model,
        CategoricalField::Transmission,
        CategoricalField::State,
    ];

    pub fn column(self) -> &'static str {
        match self {
            CategoricalField::Make => "Make",
            CategoricalField::Model => "Model",
            CategoricalField::Transmission => "Transmission",
            CategoricalField::State => "State",
        }
    }
}

/// Numeric columns that have a range slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericField {
    Mileage,
    Year,
    Price,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [NumericField::Mileage, NumericField::Year, NumericField::Price];

    pub fn column(self) -> &'static str {
        match self {
            NumericField::Mileage => "Mileage",
            NumericField::Year => "Year",
            NumericField::Price => "Price",
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded dataset or a filtered view of it
// ---------------------------------------------------------------------------

/// An ordered, immutable sequence of rows. Filtering produces a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct values of a categorical column in first-seen order.
    pub fn unique(&self, field: CategoricalField) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.categorical(field))
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }

    /// `(min, max)` of a numeric column, `None` for an empty table.
    pub fn bounds(&self, field: NumericField) -> Option<(f64, f64)> {
        self.rows.iter().map(|r| r.numeric(field)).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::row;
    use super::*;

    #[test]
    fn unique_keeps_first_seen_order() {
        let table = Table::new(vec![
            row("Toyota", "Camry", "automatic", "ca", 1.0),
            row("Honda", "Civic", "manual", "tx", 2.0),
            row("Toyota", "Corolla", "automatic", "ca", 3.0),
        ]);
        assert_eq!(table.unique(CategoricalField::Make), vec!["Toyota", "Honda"]);
        assert_eq!(table.unique(CategoricalField::Model), vec!["Camry", "Civic", "Corolla"]);
    }

    #[test]
    fn bounds_of_empty_table_is_none() {
        assert_eq!(Table::default().bounds(NumericField::Price), None);
        let table = Table::new(vec![row("A", "a", "m", "s", 5.0), row("B", "b", "m", "s", 2.5)]);
        assert_eq!(table.bounds(NumericField::Price), Some((2.5, 5.0)));
    }
}
