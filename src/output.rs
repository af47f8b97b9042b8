use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table, Tabled};

use crate::types::SalesRecord;

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Print the first `max_rows` of a report as a Markdown table.
pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Serialize the record set as the compact CSV handed to an external
/// AI assistant as conversation context. Only the columns useful for
/// location questions are included, and the free-text address is
/// always quoted since it routinely contains commas.
pub fn ai_context(records: &[SalesRecord]) -> String {
    let mut out = String::from("ID,PLU,Amount,Address,District,Date\n");
    for r in records {
        out.push_str(&format!(
            "{},{},{},\"{}\",{},{}\n",
            r.id, r.plu, r.amount, r.address, r.district, r.date
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::ai_context;
    use crate::types::SalesRecord;

    #[test]
    fn context_lines_quote_the_address() {
        let records = vec![SalesRecord {
            id: "rec-1".to_string(),
            plu: "P001".to_string(),
            qty: 1,
            amount: 350.5,
            salesman: "S01".to_string(),
            address: "屯門友愛邨, 愛德樓".to_string(),
            date: "2024-05-01".to_string(),
            remark: String::new(),
            district: "屯門".to_string(),
            sub_district: None,
            vip_code: None,
            lat: 22.39,
            lng: 113.97,
        }];
        let text = ai_context(&records);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("ID,PLU,Amount,Address,District,Date"));
        assert_eq!(
            lines.next(),
            Some("rec-1,P001,350.5,\"屯門友愛邨, 愛德樓\",屯門,2024-05-01")
        );
    }

    #[test]
    fn empty_record_set_still_has_a_header() {
        assert_eq!(ai_context(&[]), "ID,PLU,Amount,Address,District,Date\n");
    }
}
