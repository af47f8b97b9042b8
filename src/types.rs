use serde::Serialize;
use tabled::Tabled;

/// One parsed transaction line from the POS export.
///
/// Everything here is derived from a single parse run: `id` is only
/// unique within that run, and `lat`/`lng` are estimated district
/// centers with jitter, not real geocodes.
#[derive(Debug, Clone)]
pub struct SalesRecord {
    pub id: String,
    pub plu: String,
    pub qty: i64,
    pub amount: f64,
    pub salesman: String,
    pub address: String,
    pub date: String,
    pub remark: String,
    /// Canonical district, either taken from an explicit column or
    /// extracted from the address. Never empty; falls back to the
    /// unknown sentinel.
    pub district: String,
    /// Only carried through when the export had a subdistrict column;
    /// never derived from the address.
    pub sub_district: Option<String>,
    pub vip_code: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

/// One aggregation bucket. The same shape serves the district-level and
/// the subdistrict-level views; `district` is the group label either way.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictStat {
    pub district: String,
    pub total_sales: f64,
    pub transaction_count: usize,
    pub unique_customers: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DistrictStatRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "District")]
    #[tabled(rename = "District")]
    pub district: String,
    #[serde(rename = "TotalSales")]
    #[tabled(rename = "TotalSales")]
    pub total_sales: String,
    #[serde(rename = "Transactions")]
    #[tabled(rename = "Transactions")]
    pub transactions: usize,
    #[serde(rename = "UniqueCustomers")]
    #[tabled(rename = "UniqueCustomers")]
    pub unique_customers: usize,
}

/// Global dashboard numbers, exported to `summary.json`.
#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_sales: f64,
    pub total_transactions: usize,
    pub unique_customers: usize,
    pub avg_ticket: f64,
    pub top_district: String,
    pub generated_at: String,
}
