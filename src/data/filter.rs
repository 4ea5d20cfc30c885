use std::collections::BTreeSet;

use super::model::{CategoricalField, NumericField, Row, Table};

/// Multiselect choice meaning "no restriction on this column".
pub const ALL_SENTINEL: &str = "All";

/// Order in which per-column predicates are applied. Option domains for the
/// categorical pickers are defined relative to this order.
pub const FILTER_ORDER: [Field; 7] = [
    Field::Categorical(CategoricalField::Make),
    Field::Categorical(CategoricalField::Model),
    Field::Categorical(CategoricalField::Transmission),
    Field::Categorical(CategoricalField::State),
    Field::Numeric(NumericField::Mileage),
    Field::Numeric(NumericField::Year),
    Field::Numeric(NumericField::Price),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Categorical(CategoricalField),
    Numeric(NumericField),
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// Allowed values for a categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No restriction.
    #[default]
    All,
    /// Only these values pass. An empty set lets nothing through.
    Only(BTreeSet<String>),
}

impl Selection {
    /// Build a selection from picked choice labels; the `"All"` label
    /// overrides everything else. The side panel's "All" checkbox goes
    /// through here.
    pub fn from_choices<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for choice in choices {
            let choice = choice.into();
            if choice == ALL_SENTINEL {
                return Selection::All;
            }
            set.insert(choice);
        }
        Selection::Only(set)
    }

    pub fn none() -> Self {
        Selection::Only(BTreeSet::new())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn allows(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => set.contains(value),
        }
    }

    /// Flip a single value. Toggling from `All` starts an explicit selection
    /// holding just that value.
    pub fn toggle(&mut self, value: &str) {
        match self {
            Selection::All => {
                *self = Selection::Only(BTreeSet::from([value.to_string()]));
            }
            Selection::Only(set) => {
                if !set.remove(value) {
                    set.insert(value.to_string());
                }
            }
        }
    }
}

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Slider bounds covering every value in `[lo, hi]`, widened to whole
    /// numbers.
    pub fn covering(lo: f64, hi: f64) -> Self {
        Self::new(lo.floor(), hi.ceil())
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

// ---------------------------------------------------------------------------
// FilterSpec
// ---------------------------------------------------------------------------

/// The user's current constraints, one per filterable column.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub make: Selection,
    pub model: Selection,
    pub transmission: Selection,
    pub state: Selection,
    pub mileage: NumericRange,
    pub year: NumericRange,
    pub price: NumericRange,
}

impl FilterSpec {
    /// Everything selected: `All` for each picker and the full range of the
    /// unfiltered base table for each slider.
    pub fn defaults(base: &Table) -> Self {
        let full = |field: NumericField| {
            base.bounds(field)
                .map(|(lo, hi)| NumericRange::covering(lo, hi))
                .unwrap_or(NumericRange::new(0.0, 0.0))
        };
        Self {
            make: Selection::All,
            model: Selection::All,
            transmission: Selection::All,
            state: Selection::All,
            mileage: full(NumericField::Mileage),
            year: full(NumericField::Year),
            price: full(NumericField::Price),
        }
    }

    pub fn selection(&self, field: CategoricalField) -> &Selection {
        match field {
            CategoricalField::Make => &self.make,
            CategoricalField::Model => &self.model,
            CategoricalField::Transmission => &self.transmission,
            CategoricalField::State => &self.state,
        }
    }

    pub fn selection_mut(&mut self, field: CategoricalField) -> &mut Selection {
        match field {
            CategoricalField::Make => &mut self.make,
            CategoricalField::Model => &mut self.model,
            CategoricalField::Transmission => &mut self.transmission,
            CategoricalField::State => &mut self.state,
        }
    }

    pub fn range(&self, field: NumericField) -> NumericRange {
        match field {
            NumericField::Mileage => self.mileage,
            NumericField::Year => self.year,
            NumericField::Price => self.price,
        }
    }

    pub fn range_mut(&mut self, field: NumericField) -> &mut NumericRange {
        match field {
            NumericField::Mileage => &mut self.mileage,
            NumericField::Year => &mut self.year,
            NumericField::Price => &mut self.price,
        }
    }

    /// Whether `row` satisfies the constraint on one column.
    pub fn accepts(&self, field: Field, row: &Row) -> bool {
        match field {
            Field::Categorical(f) => self.selection(f).allows(row.categorical(f)),
            Field::Numeric(f) => self.range(f).contains(row.numeric(f)),
        }
    }

    /// Whether `row` satisfies every constraint.
    pub fn matches(&self, row: &Row) -> bool {
        FILTER_ORDER.iter().all(|&field| self.accepts(field, row))
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Return the rows of `table` that pass every constraint of `spec`, in their
/// original order.
pub fn apply(table: &Table, spec: &FilterSpec) -> Table {
    table.rows().iter().filter(|row| spec.matches(row)).cloned().collect()
}

/// Apply only the constraints of the first `n` fields of [`FILTER_ORDER`].
pub fn apply_prefix(table: &Table, spec: &FilterSpec, n: usize) -> Table {
    let fields = &FILTER_ORDER[..n.min(FILTER_ORDER.len())];
    table
        .rows()
        .iter()
        .filter(|row| fields.iter().all(|&field| spec.accepts(field, row)))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Option domains offered to the controls
// ---------------------------------------------------------------------------

/// Choices and slider bounds for every control.
///
/// Make, Transmission and State choices come from the unfiltered base table.
/// Model choices come from the base table narrowed by the Make selection only.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub makes: Vec<String>,
    pub models: Vec<String>,
    pub transmissions: Vec<String>,
    pub states: Vec<String>,
    pub mileage: NumericRange,
    pub year: NumericRange,
    pub price: NumericRange,
}

impl FilterOptions {
    pub fn derive(base: &Table, spec: &FilterSpec) -> Self {
        let by_make = apply_prefix(base, spec, 1);
        let defaults = FilterSpec::defaults(base);
        Self {
            makes: base.unique(CategoricalField::Make),
            models: by_make.unique(CategoricalField::Model),
            transmissions: base.unique(CategoricalField::Transmission),
            states: base.unique(CategoricalField::State),
            mileage: defaults.mileage,
            year: defaults.year,
            price: defaults.price,
        }
    }

    pub fn choices(&self, field: CategoricalField) -> &[String] {
        match field {
            CategoricalField::Make => &self.makes,
            CategoricalField::Model => &self.models,
            CategoricalField::Transmission => &self.transmissions,
            CategoricalField::State => &self.states,
        }
    }

    pub fn bounds(&self, field: NumericField) -> NumericRange {
        match field {
            NumericField::Mileage => self.mileage,
            NumericField::Year => self.year,
            NumericField::Price => self.price,
        }
    }
}
