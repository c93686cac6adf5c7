use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use listing_prep::data::{Column, Table, col};
use listing_prep::pipeline::{self, PipelineOptions};

const BRANDS: &[&str] = &["Toyota", "BMW", "Ford", "Tesla", "Honda", "Hyundai"];
const MODELS: &[&str] = &[
    "Camry SE",
    "M550i xDrive",
    "F-150 Lariat",
    "Model 3",
    "Civic LX",
    "Tucson SEL",
];
const ENGINES: &[&str] = &[
    "203.0HP 2.5L 4 Cylinder Gasoline Fuel",
    "523.0HP 4.4L 8 Cylinder Gasoline Fuel",
    "400.0HP 3.5L 6 Cylinder Gasoline Fuel",
    "Electric Motor 283.0HP",
    "158.0HP 2.0L 4 Cylinder Gasoline Fuel",
    "187.0HP 2.5L 4 Cylinder Gasoline Fuel",
];
const TRANSMISSIONS: &[&str] = &[
    "8-Speed Automatic",
    "8-Speed Automatic",
    "10-Speed Automatic",
    "1-Speed Fixed Gear",
    "CVT Transmission",
    "6-Speed Manual",
];
const EXT_COLORS: &[&str] = &[
    "Midnight Black",
    "Alpine White",
    "Race Red",
    "Deep Blue Metallic",
    "Aegean Blue",
    "Amazon Gray",
];
const INT_COLORS: &[&str] = &["Black", "Cognac", "Gray", "White", "Ivory", "Black"];

fn cycled_text(values: &[&str], rows: usize) -> Column {
    Column::Text(
        (0..rows)
            .map(|row| Some(values[row % values.len()].to_string()))
            .collect(),
    )
}

fn synthetic_listings(rows: usize) -> Table {
    let mut table = Table::new();
    table.insert(col::BRAND, cycled_text(BRANDS, rows)).unwrap();
    table.insert(col::MODEL, cycled_text(MODELS, rows)).unwrap();
    table
        .insert(
            col::MODEL_YEAR,
            Column::Float((0..rows).map(|row| Some(2010.0 + (row % 14) as f64)).collect()),
        )
        .unwrap();
    table
        .insert(
            col::MILAGE,
            Column::Float((0..rows).map(|row| Some(15_000.0 + (row % 90) as f64 * 1_000.0)).collect()),
        )
        .unwrap();
    table
        .insert(col::FUEL_TYPE, cycled_text(&["Gasoline", "–"], rows))
        .unwrap();
    table.insert(col::ENGINE, cycled_text(ENGINES, rows)).unwrap();
    table
        .insert(col::TRANSMISSION, cycled_text(TRANSMISSIONS, rows))
        .unwrap();
    table.insert(col::EXT_COL, cycled_text(EXT_COLORS, rows)).unwrap();
    table.insert(col::INT_COL, cycled_text(INT_COLORS, rows)).unwrap();
    table
        .insert(
            col::ACCIDENT,
            cycled_text(
                &["None reported", "At least 1 accident or damage reported"],
                rows,
            ),
        )
        .unwrap();
    table.insert(col::CLEAN_TITLE, cycled_text(&["Yes"], rows)).unwrap();
    table
}

fn bench_pipeline(c: &mut Criterion) {
    let options = PipelineOptions::as_of(2024);
    for rows in [1_000usize, 10_000] {
        let base = synthetic_listings(rows);
        c.bench_function(&format!("pipeline_{rows}_rows"), |b| {
            b.iter_batched(
                || base.clone(),
                |mut table| {
                    pipeline::run(&mut table, &options).expect("pipeline");
                    table
                },
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
