// Row-to-record construction.
//
// Takes tokenized rows plus the resolved column map and produces typed
// sales records. Row content never errors: numbers degrade to zero,
// missing optional columns degrade to absent, and rows that carry no
// product, address or amount at all are dropped.

use rand::Rng;

use crate::districts::classify;
use crate::geo;
use crate::schema::{self, ColumnMap};
use crate::tokenizer;
use crate::types::SalesRecord;
use crate::util::{parse_f64_safe, parse_i64_safe};

/// Trimmed cell at `idx`, or `""` when the row is too short.
fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

/// Optional trimmed cell; `None` when the column is absent from the
/// map or the value is blank.
fn optional_cell(row: &[String], idx: Option<usize>) -> Option<String> {
    let value = cell(row, idx?);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Build sales records from tokenized rows, starting at `start_row`.
///
/// Rows shorter than the highest required column index (product code,
/// amount, address) are skipped, as are rows where all three are
/// empty/zero. District resolution prefers an explicit district column
/// unless it is blank or the literal `"Unknown"` (an artifact of one
/// upstream export tool, kept as-is); otherwise the district is
/// extracted from the address. Subdistrict only ever comes from an
/// explicit column.
pub fn build(
    rows: &[Vec<String>],
    map: &ColumnMap,
    start_row: usize,
    rng: &mut impl Rng,
) -> Vec<SalesRecord> {
    let mut records = Vec::new();
    let required_max = map.plu.max(map.amount).max(map.address);

    for (i, row) in rows.iter().enumerate().skip(start_row) {
        if row.len() <= required_max {
            continue;
        }

        let plu = cell(row, map.plu).to_string();
        let qty = parse_i64_safe(cell(row, map.qty)).unwrap_or(0);
        let amount = parse_f64_safe(cell(row, map.amount)).unwrap_or(0.0);
        let salesman = cell(row, map.salesman).to_string();
        let address = cell(row, map.address).to_string();
        let date = cell(row, map.date).to_string();
        let remark = cell(row, map.remark).to_string();
        let vip_code = optional_cell(row, map.vip_code);
        let csv_district = optional_cell(row, map.district);
        let csv_sub_district = optional_cell(row, map.sub_district);

        // Rows with no product, no address and no amount carry nothing
        // worth aggregating.
        if plu.is_empty() && address.is_empty() && amount == 0.0 {
            continue;
        }

        let district = match csv_district {
            Some(d) if d != "Unknown" => d,
            _ => classify(&address).to_string(),
        };

        // Coordinate resolution, most precise source first: an explicit
        // subdistrict with a direct table entry, then the resolved
        // district with a direct table entry, then the raw address
        // through the classifier.
        let (lat, lng) = if let Some(sub) = csv_sub_district
            .as_deref()
            .filter(|s| geo::district_center(s).is_some())
        {
            geo::estimate(sub, rng)
        } else if geo::district_center(&district).is_some() {
            geo::estimate(&district, rng)
        } else {
            geo::estimate(classify(&address), rng)
        };

        records.push(SalesRecord {
            id: format!("rec-{}", i),
            plu,
            qty,
            amount,
            salesman,
            address,
            date,
            remark,
            district,
            sub_district: csv_sub_district,
            vip_code,
            lat,
            lng,
        });
    }

    records
}

/// Full pipeline over one in-memory CSV text: tokenize, resolve the
/// schema, build records. Best-effort; malformed content produces
/// fewer records, never an error.
pub fn parse_csv(text: &str, rng: &mut impl Rng) -> Vec<SalesRecord> {
    let rows = tokenizer::tokenize(text);
    let (map, start_row) = schema::resolve(&rows);
    build(&rows, &map, start_row, rng)
}
