//! Keyword classification: fuel-type inference and ordered rule cascades.
//!
//! Two mechanisms live here. The fuel classifier is a fixed priority chain —
//! first match wins — applied only to rows whose fuel type is not already a
//! canonical category. The bucketing cascades are the opposite: every rule in
//! the table is evaluated in order and a later match overwrites an earlier
//! one (last match wins), because each rule is semantically a full-column
//! conditional assignment applied in sequence. Both match case-insensitively.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::{Column, Table, TableError, col};

/// Fuel categories accepted as-is from the raw data; anything else is
/// re-derived from the engine description.
pub const CANONICAL_FUEL_TYPES: &[&str] = &[
    "Diesel",
    "Electric",
    "E85 Flex Fuel",
    "Gasoline",
    "Hybrid",
    "Plug-In Hybrid",
];

static ELECTRIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Electric|Battery|kW|charge").expect("electric pattern"));
static DIESEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Diesel").expect("diesel pattern"));
static FLEX_FUEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Flex Fuel|E85").expect("flex fuel pattern"));
static GASOLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Gasoline|Standard|Turbo|Liter|GDI|MPFI|PDI").expect("gasoline pattern")
});

pub fn is_canonical_fuel(value: &str) -> bool {
    CANONICAL_FUEL_TYPES.contains(&value)
}

/// Infers a fuel category from engine text; priority order is fixed and the
/// first matching tier wins.
pub fn fuel_type_from_engine(engine: &str) -> Option<&'static str> {
    if ELECTRIC.is_match(engine) {
        return Some("Electric");
    }
    if DIESEL.is_match(engine) {
        return Some("Diesel");
    }
    if FLEX_FUEL.is_match(engine) {
        return Some("E85 Flex Fuel");
    }
    if GASOLINE.is_match(engine) {
        return Some("Gasoline");
    }
    None
}

/// Rewrites non-canonical fuel values from the engine description. Rows that
/// already hold a canonical category are untouched; rows the classifier
/// cannot place stay missing for later mode imputation.
pub fn fill_fuel_type(table: &mut Table) -> Result<(), TableError> {
    let engine = table.text(col::ENGINE)?;
    let updated: Vec<Option<String>> = table
        .text(col::FUEL_TYPE)?
        .iter()
        .zip(engine)
        .map(|(fuel, engine)| match fuel.as_deref() {
            Some(value) if is_canonical_fuel(value) => Some(value.to_string()),
            _ => engine
                .as_deref()
                .and_then(fuel_type_from_engine)
                .map(str::to_string),
        })
        .collect();
    table.insert(col::FUEL_TYPE, Column::Text(updated))
}

/// An ordered rule table. Later matches overwrite earlier ones; rows matching
/// nothing take the default ("Other" for colors, missing otherwise).
pub struct RuleCascade {
    rules: Vec<(Regex, &'static str)>,
    default: Option<&'static str>,
}

impl RuleCascade {
    fn new(rules: &[(&str, &'static str)], default: Option<&'static str>) -> Self {
        let rules = rules
            .iter()
            .map(|(pattern, label)| {
                let regex = Regex::new(&format!("(?i){pattern}")).expect("valid rule pattern");
                (regex, *label)
            })
            .collect();
        Self { rules, default }
    }

    pub fn classify(&self, text: Option<&str>) -> Option<&'static str> {
        let mut label = self.default;
        if let Some(text) = text {
            for (pattern, rule_label) in &self.rules {
                if pattern.is_match(text) {
                    label = Some(rule_label);
                }
            }
        }
        label
    }

    pub fn apply(&self, table: &mut Table, source: &str, target: &str) -> Result<(), TableError> {
        let labels: Vec<Option<String>> = table
            .text(source)?
            .iter()
            .map(|cell| self.classify(cell.as_deref()).map(str::to_string))
            .collect();
        table.insert(target, Column::Text(labels))
    }
}

pub static TRANSMISSION_TYPE_RULES: LazyLock<RuleCascade> = LazyLock::new(|| {
    RuleCascade::new(
        &[
            ("Manual|MT|M/T", "M/T"),
            ("A/T|Automatic|AT", "A/T"),
            ("CVT|Variable", "CVT"),
            ("DCT|Dual Shift Mode", "DCT"),
            ("Fixed Gear", "Fixed Gear"),
            ("Electronically Controlled Automatic", "Electronically Controlled"),
            ("Auto-Shift|AT/MT", "Auto-Shift"),
            ("Overdrive", "Overdrive"),
        ],
        None,
    )
});

pub static MODEL_CLASS_RULES: LazyLock<RuleCascade> = LazyLock::new(|| {
    RuleCascade::new(
        &[
            ("S|L|Base", "Base"),
            ("SE|SX|SRT|GT", "Mid-Range"),
            ("EX|SXT", "Performance/Sport"),
            ("EX-L|LX|LE|SEL|Platinum|Premium|Limited", "Luxury"),
        ],
        None,
    )
});

pub static BRAND_CATEGORY_RULES: LazyLock<RuleCascade> = LazyLock::new(|| {
    RuleCascade::new(
        &[
            (
                "Mercedes-Benz|BMW|Audi|Porsche|Lexus|Cadillac|Jaguar|Bentley|Maserati\
                 |Lamborghini|Rolls-Royce|Ferrari|McLaren|Aston Martin|Lucid|Lotus|Karma\
                 |Bugatti|Maybach",
                "Luxury",
            ),
            ("Acura|Infiniti|Genesis|Volvo|Lincoln|Land Rover", "Premium"),
            (
                "Ford|Chevrolet|Toyota|Jeep|RAM|Nissan|Tesla|GMC|Dodge|Mazda|Kia|Subaru\
                 |Honda|Hyundai|Volkswagen|Buick|Chrysler|Mitsubishi|Polestar|Rivian",
                "Mainstream",
            ),
            ("MINI|Fiat|Saab|Suzuki|smart", "Economy"),
            ("Lamborghini|Ferrari|McLaren|Bugatti", "Supercars"),
        ],
        None,
    )
});

pub static EXTERIOR_COLOR_RULES: LazyLock<RuleCascade> = LazyLock::new(|| {
    RuleCascade::new(
        &[
            ("Black|Midnight|Onyx|Graphite|Dark|Gray", "Black/Gray"),
            ("White|Pearl|Silver|Platinum|Metallic", "White/Silver"),
            ("Red|Ruby|Burgundy", "Red/Maroon"),
            ("Blue|Navy|Sky", "Blue"),
            ("Green|Forest", "Green"),
            ("Yellow|Gold|Mustard", "Yellow/Gold"),
            ("Brown|Bronze|Tan|Beige", "Brown/Beige"),
            ("Orange|opper", "Orange"),
            ("Purple|Lavender", "Purple"),
        ],
        Some("Other"),
    )
});

pub static INTERIOR_COLOR_RULES: LazyLock<RuleCascade> = LazyLock::new(|| {
    RuleCascade::new(
        &[
            ("Black|Charcoal|Dark|Gray", "Black/Gray"),
            ("White|Ivory|Beige", "White/Beige"),
            ("Red|Burgundy", "Red/Maroon"),
            ("Blue|Navy", "Blue"),
            ("Brown|Tan", "Brown"),
        ],
        Some("Other"),
    )
});

pub fn transmission_type(table: &mut Table) -> Result<(), TableError> {
    TRANSMISSION_TYPE_RULES.apply(table, col::TRANSMISSION, col::TRANSMISSION_TYPE)
}

pub fn model_class(table: &mut Table) -> Result<(), TableError> {
    MODEL_CLASS_RULES.apply(table, col::MODEL, col::MODEL_CLASS)
}

pub fn brand_category(table: &mut Table) -> Result<(), TableError> {
    BRAND_CATEGORY_RULES.apply(table, col::BRAND, col::BRAND_CAT)
}

pub fn exterior_color(table: &mut Table) -> Result<(), TableError> {
    EXTERIOR_COLOR_RULES.apply(table, col::EXT_COL, col::EXT_COL_CAT)
}

pub fn interior_color(table: &mut Table) -> Result<(), TableError> {
    INTERIOR_COLOR_RULES.apply(table, col::INT_COL, col::INT_COL_CAT)
}
