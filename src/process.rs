use anyhow::{Result, anyhow};
use log::info;

use crate::{
    cli::ProcessArgs,
    io_utils, load,
    pipeline::{self, PipelineOptions},
    table,
};

const PREVIEW_ROWS: usize = 10;

pub fn execute(args: &ProcessArgs) -> Result<()> {
    if args.preview && args.output.is_some() {
        return Err(anyhow!("--preview cannot be combined with --output"));
    }
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let output_path = args.output.as_deref();
    let output_delimiter =
        io_utils::resolve_output_delimiter(output_path, args.output_delimiter, delimiter);
    info!(
        "Processing '{}' -> {}",
        args.input.display(),
        output_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".into())
    );

    let mut listings = load::read_listing_table(&args.input, delimiter, args.limit)?;
    let row_count = listings.row_count();
    let options = args.as_of_year.map(PipelineOptions::as_of).unwrap_or_default();
    pipeline::run(&mut listings, &options)?;
    info!(
        "Derived {} feature column(s) for {} row(s)",
        listings.column_count(),
        row_count
    );

    if args.preview || (args.table && output_path.is_none()) {
        let shown = if args.preview {
            PREVIEW_ROWS.min(row_count)
        } else {
            row_count
        };
        let headers: Vec<&str> = listings.names().iter().map(String::as_str).collect();
        let rows: Vec<Vec<String>> = (0..shown).map(|row| listings.row_display(row)).collect();
        table::print_table(&headers, &rows);
        return Ok(());
    }

    load::write_table(&listings, output_path, output_delimiter)?;
    Ok(())
}
