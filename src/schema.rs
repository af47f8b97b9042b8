// Header detection and column mapping.
//
// The POS system exports several layouts: some files carry an XF_*
// header row (occasionally preceded by report banner lines), some carry
// plain English or bilingual headers, and some have no header at all.
// We scan the first rows for a recognizable header and fall back to the
// legacy positional layout otherwise.

/// Where each logical field lives in a tokenized row.
///
/// The seven core columns always have an index; when a header is found
/// but does not name one of them, the legacy positional index is kept.
/// The three newer columns are `None` unless a header cell matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub plu: usize,
    pub qty: usize,
    pub amount: usize,
    pub salesman: usize,
    pub address: usize,
    pub date: usize,
    pub remark: usize,
    pub vip_code: Option<usize>,
    pub district: Option<usize>,
    pub sub_district: Option<usize>,
}

impl Default for ColumnMap {
    /// Legacy positional layout: plu, qty, amount, salesman, address,
    /// date, remark in columns 0-6, no loyalty or district columns.
    fn default() -> Self {
        ColumnMap {
            plu: 0,
            qty: 1,
            amount: 2,
            salesman: 3,
            address: 4,
            date: 5,
            remark: 6,
            vip_code: None,
            district: None,
            sub_district: None,
        }
    }
}

/// Rows scanned before we give up looking for a header.
const HEADER_SCAN_ROWS: usize = 20;

/// Find the header row and build the column map.
///
/// Returns the map plus the index of the first data row. A row counts
/// as a header when it contains both a product-code-like cell and an
/// amount-like cell (case-insensitive); the first such row wins and
/// data starts on the row after it. With no header in the scan window
/// the positional default applies and data starts at row 0.
pub fn resolve(rows: &[Vec<String>]) -> (ColumnMap, usize) {
    let mut map = ColumnMap::default();
    let mut start_row = 0;

    for (i, row) in rows.iter().take(HEADER_SCAN_ROWS).enumerate() {
        let cells: Vec<String> = row.iter().map(|c| c.trim().to_uppercase()).collect();

        let has_plu = cells.iter().any(|c| c.contains("XF_PLU") || c.contains("PLU"));
        let has_amount = cells.iter().any(|c| c.contains("XF_AMT") || c.contains("AMOUNT"));
        if !(has_plu && has_amount) {
            continue;
        }

        start_row = i + 1;
        for (idx, cell) in cells.iter().enumerate() {
            let c = cell.as_str();
            if c.contains("XF_PLU") || c == "PLU" {
                map.plu = idx;
            }
            if c.contains("XF_QTY") || c == "QTY" {
                map.qty = idx;
            }
            if c.contains("XF_AMT") || c.contains("AMOUNT") {
                map.amount = idx;
            }
            if c.contains("XF_SALESMAN") || c.contains("SALESMAN") {
                map.salesman = idx;
            }
            if c.contains("XF_CUSTOMERADDR") || c.contains("ADDRESS") || c.contains("ADDR") {
                map.address = idx;
            }
            if c.contains("XF_DELIVERYDATE") || c.contains("DATE") {
                map.date = idx;
            }
            if c.contains("XF_SALESITEMREMARK") || c.contains("REMARK") {
                map.remark = idx;
            }
            if c.contains("XF_VIPCODE") || c == "VIPCODE" || c == "VIP" {
                map.vip_code = Some(idx);
            }
            if c == "DISTRICT" || c == "XF_DISTRICT" || c == "地區" {
                map.district = Some(idx);
            }
            if c == "SUBDISTRICT" || c == "SUB_DISTRICT" || c == "分區" || c == "SUB-DISTRICT" {
                map.sub_district = Some(idx);
            }
        }
        break;
    }

    (map, start_row)
}
