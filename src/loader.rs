use std::error::Error;
use std::fs;

use crate::builder;
use crate::districts::UNKNOWN_DISTRICT;
use crate::schema;
use crate::tokenizer;
use crate::types::SalesRecord;

/// Diagnostics from one parse run, printed after loading.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Rows produced by the tokenizer, header and banners included.
    pub total_rows: usize,
    /// Records that survived cleaning.
    pub record_count: usize,
    /// Data rows dropped as truncated or empty.
    pub skipped_rows: usize,
    /// Records whose district fell back to the unknown sentinel.
    pub unknown_district: usize,
}

/// Read a POS export from disk and run the whole pipeline.
///
/// The only hard failures are file-level: missing file or non-UTF-8
/// content. Row content never errors; bad rows just reduce
/// `record_count` and show up in `skipped_rows`.
pub fn load_and_parse(path: &str) -> Result<(Vec<SalesRecord>, LoadReport), Box<dyn Error>> {
    let text = fs::read_to_string(path)?;

    let rows = tokenizer::tokenize(&text);
    let total_rows = rows.len();
    let (map, start_row) = schema::resolve(&rows);

    let mut rng = rand::thread_rng();
    let records = builder::build(&rows, &map, start_row, &mut rng);

    let data_rows = total_rows.saturating_sub(start_row);
    let report = LoadReport {
        total_rows,
        record_count: records.len(),
        skipped_rows: data_rows.saturating_sub(records.len()),
        unknown_district: records
            .iter()
            .filter(|r| r.district == UNKNOWN_DISTRICT)
            .count(),
    };
    Ok((records, report))
}
