// Per-district and per-subdistrict sales aggregation.
//
// One accumulation routine serves both views; only the group key
// differs. Buckets are kept in first-seen order so the stable sort by
// total sales leaves ties in insertion order.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::Utc;

use crate::districts::UNKNOWN_DISTRICT;
use crate::types::{DistrictStat, DistrictStatRow, SalesRecord, SummaryStats};
use crate::util::format_number;

/// Deduplication key for unique-customer counting: the loyalty code
/// when one is present and non-blank, otherwise the trimmed address.
pub fn customer_key(record: &SalesRecord) -> String {
    match record.vip_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => format!("VIP:{}", code),
        _ => format!("ADDR:{}", record.address.trim()),
    }
}

struct Bucket {
    label: String,
    total_sales: f64,
    transaction_count: usize,
    customers: HashSet<String>,
}

fn aggregate<'a, F>(records: &'a [SalesRecord], group_key: F) -> Vec<DistrictStat>
where
    F: Fn(&'a SalesRecord) -> &'a str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    for record in records {
        let key = group_key(record);
        let slot = match index.get(key) {
            Some(&i) => i,
            None => {
                index.insert(key, buckets.len());
                buckets.push(Bucket {
                    label: key.to_string(),
                    total_sales: 0.0,
                    transaction_count: 0,
                    customers: HashSet::new(),
                });
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[slot];
        bucket.total_sales += record.amount;
        bucket.transaction_count += 1;
        bucket.customers.insert(customer_key(record));
    }

    let mut stats: Vec<DistrictStat> = buckets
        .into_iter()
        .map(|b| DistrictStat {
            district: b.label,
            total_sales: b.total_sales,
            transaction_count: b.transaction_count,
            unique_customers: b.customers.len(),
        })
        .collect();
    // Stable sort: equal totals keep first-seen bucket order.
    stats.sort_by(|a, b| {
        b.total_sales
            .partial_cmp(&a.total_sales)
            .unwrap_or(Ordering::Equal)
    });
    stats
}

/// Rank districts by total sales, descending.
pub fn aggregate_by_district(records: &[SalesRecord]) -> Vec<DistrictStat> {
    aggregate(records, |r| {
        if r.district.is_empty() {
            UNKNOWN_DISTRICT
        } else {
            &r.district
        }
    })
}

/// Rank subdistricts by total sales, descending. Records without a
/// subdistrict fall back to their district as the group label.
pub fn aggregate_by_sub_district(records: &[SalesRecord]) -> Vec<DistrictStat> {
    aggregate(records, |r| {
        match r.sub_district.as_deref() {
            Some(sub) if !sub.is_empty() => sub,
            _ if !r.district.is_empty() => &r.district,
            _ => UNKNOWN_DISTRICT,
        }
    })
}

/// Turn ranked stats into display/export rows with formatted totals.
pub fn stat_rows(stats: &[DistrictStat]) -> Vec<DistrictStatRow> {
    stats
        .iter()
        .enumerate()
        .map(|(idx, s)| DistrictStatRow {
            rank: idx + 1,
            district: s.district.clone(),
            total_sales: format_number(s.total_sales, 2),
            transactions: s.transaction_count,
            unique_customers: s.unique_customers,
        })
        .collect()
}

/// Global dashboard numbers over the whole record set.
pub fn generate_summary(records: &[SalesRecord], district_stats: &[DistrictStat]) -> SummaryStats {
    let total_sales: f64 = records.iter().map(|r| r.amount).sum();
    let total_transactions = records.len();
    let customers: HashSet<String> = records.iter().map(customer_key).collect();
    let avg_ticket = if total_transactions > 0 {
        total_sales / total_transactions as f64
    } else {
        0.0
    };
    let top_district = district_stats
        .first()
        .map(|s| s.district.clone())
        .unwrap_or_else(|| "N/A".to_string());

    SummaryStats {
        total_sales,
        total_transactions,
        unique_customers: customers.len(),
        avg_ticket,
        top_district,
        generated_at: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        aggregate_by_district, aggregate_by_sub_district, customer_key, generate_summary,
        stat_rows,
    };
    use crate::types::SalesRecord;

    fn record(
        id: usize,
        amount: f64,
        address: &str,
        district: &str,
        sub_district: Option<&str>,
        vip_code: Option<&str>,
    ) -> SalesRecord {
        SalesRecord {
            id: format!("rec-{}", id),
            plu: format!("P{:03}", id),
            qty: 1,
            amount,
            salesman: "S01".to_string(),
            address: address.to_string(),
            date: "2024-05-01".to_string(),
            remark: String::new(),
            district: district.to_string(),
            sub_district: sub_district.map(str::to_string),
            vip_code: vip_code.map(str::to_string),
            lat: 22.3,
            lng: 114.17,
        }
    }

    /// Ten rows across three districts, mirroring a small real export.
    fn sample() -> Vec<SalesRecord> {
        vec![
            record(1, 100.0, "屯門友愛邨愛德樓", "屯門", None, Some("V001")),
            record(2, 250.0, "屯門置樂花園", "屯門", None, None),
            record(3, 80.0, "屯門友愛邨愛德樓", "屯門", None, Some("V001")),
            record(4, 500.0, "沙田第一城10座", "沙田", Some("火炭"), None),
            record(5, 120.0, "沙田第一城10座", "沙田", None, None),
            record(6, -50.0, "沙田廣源邨", "沙田", None, Some("V002")),
            record(7, 300.0, "紅磡海逸豪園16座", "紅磡", None, None),
            record(8, 90.0, "紅磡黃埔花園", "紅磡", None, Some("V003")),
            record(9, 60.0, "紅磡黃埔花園", "紅磡", None, Some("V003")),
            record(10, 40.0, "紅磡機利士南路", "紅磡", None, None),
        ]
    }

    #[test]
    fn totals_and_counts_match_the_sample() {
        let records = sample();
        let stats = aggregate_by_district(&records);

        let overall: f64 = stats.iter().map(|s| s.total_sales).sum();
        let expected: f64 = records.iter().map(|r| r.amount).sum();
        assert!((overall - expected).abs() < 1e-9);

        assert_eq!(stats.len(), 3);
        // 沙田 570 > 紅磡 490 > 屯門 430
        assert_eq!(stats[0].district, "沙田");
        assert_eq!(stats[0].transaction_count, 3);
        assert_eq!(stats[1].district, "紅磡");
        assert_eq!(stats[1].transaction_count, 4);
        assert_eq!(stats[2].district, "屯門");
        assert_eq!(stats[2].transaction_count, 3);
    }

    #[test]
    fn shared_vip_code_counts_as_one_customer() {
        let records = vec![
            record(1, 10.0, "屯門友愛邨", "屯門", None, Some("V001")),
            record(2, 20.0, "屯門置樂花園", "屯門", None, Some("V001")),
        ];
        let stats = aggregate_by_district(&records);
        assert_eq!(stats[0].unique_customers, 1);
    }

    #[test]
    fn identical_addresses_without_vip_count_as_one_customer() {
        let records = vec![
            record(1, 10.0, "屯門友愛邨愛德樓", "屯門", None, None),
            record(2, 20.0, "屯門友愛邨愛德樓", "屯門", None, None),
            record(3, 30.0, "屯門置樂花園", "屯門", None, None),
        ];
        let stats = aggregate_by_district(&records);
        assert_eq!(stats[0].unique_customers, 2);
    }

    #[test]
    fn blank_vip_code_falls_back_to_address() {
        let r = record(1, 10.0, " 屯門友愛邨 ", "屯門", None, Some("  "));
        assert_eq!(customer_key(&r), "ADDR:屯門友愛邨");
        let r = record(2, 10.0, "屯門友愛邨", "屯門", None, Some(" V9 "));
        assert_eq!(customer_key(&r), "VIP:V9");
    }

    #[test]
    fn sorted_descending_with_first_seen_tie_order() {
        let records = vec![
            record(1, 100.0, "a", "甲", None, None),
            record(2, 100.0, "b", "乙", None, None),
            record(3, 100.0, "c", "丙", None, None),
            record(4, 200.0, "d", "丁", None, None),
        ];
        let stats = aggregate_by_district(&records);
        assert_eq!(stats[0].district, "丁");
        assert_eq!(stats[1].district, "甲");
        assert_eq!(stats[2].district, "乙");
        assert_eq!(stats[3].district, "丙");
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = sample();
        let a = aggregate_by_district(&records);
        let b = aggregate_by_district(&records);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.district, y.district);
            assert_eq!(x.total_sales, y.total_sales);
            assert_eq!(x.transaction_count, y.transaction_count);
            assert_eq!(x.unique_customers, y.unique_customers);
        }
    }

    #[test]
    fn subdistrict_view_falls_back_to_district() {
        let records = sample();
        let stats = aggregate_by_sub_district(&records);
        // 火炭 splits out of 沙田; the rest group by district.
        let labels: Vec<&str> = stats.iter().map(|s| s.district.as_str()).collect();
        assert!(labels.contains(&"火炭"));
        assert!(labels.contains(&"沙田"));
        let fo_tan = stats.iter().find(|s| s.district == "火炭").unwrap();
        assert_eq!(fo_tan.transaction_count, 1);
        assert!((fo_tan.total_sales - 500.0).abs() < 1e-9);
        let sha_tin = stats.iter().find(|s| s.district == "沙田").unwrap();
        assert_eq!(sha_tin.transaction_count, 2);
    }

    #[test]
    fn returns_can_push_totals_negative() {
        let records = vec![
            record(1, -120.0, "屯門友愛邨", "屯門", None, None),
            record(2, 40.0, "屯門置樂花園", "屯門", None, None),
        ];
        let stats = aggregate_by_district(&records);
        assert!((stats[0].total_sales - -80.0).abs() < 1e-9);
    }

    #[test]
    fn stat_rows_are_ranked_and_formatted() {
        let stats = aggregate_by_district(&sample());
        let rows = stat_rows(&stats);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].total_sales, "570.00");
        assert_eq!(rows.last().unwrap().rank, 3);
    }

    #[test]
    fn summary_covers_the_whole_run() {
        let records = sample();
        let stats = aggregate_by_district(&records);
        let summary = generate_summary(&records, &stats);
        assert_eq!(summary.total_transactions, 10);
        assert!((summary.total_sales - 1490.0).abs() < 1e-9);
        // V001 (x2), V002, V003 (x2) plus four distinct fallback
        // addresses, one of them shared by two rows.
        assert_eq!(summary.unique_customers, 7);
        assert_eq!(summary.top_district, "沙田");
        assert!((summary.avg_ticket - 149.0).abs() < 1e-9);
    }

    #[test]
    fn empty_run_produces_an_empty_summary() {
        let summary = generate_summary(&[], &[]);
        assert_eq!(summary.total_transactions, 0);
        assert_eq!(summary.avg_ticket, 0.0);
        assert_eq!(summary.top_district, "N/A");
    }
}
