// Entry point and high-level CLI flow.
//
// The binary is a console report generator over a point-of-sale CSV
// export:
// - Option [1] loads the export, runs the parse/classify pipeline and
//   prints diagnostics.
// - Option [2] writes the district and subdistrict summaries, the JSON
//   summary stats and the AI-context CSV, with Markdown previews.
// - After generating reports, the user can go back to the menu or exit.
mod builder;
mod districts;
mod geo;
mod loader;
mod output;
mod reports;
mod schema;
mod tokenizer;
mod types;
mod util;

use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::SalesRecord;

/// How many ranked rows the console previews show; the full tables go
/// to the exported CSV files.
const PREVIEW_ROWS: usize = 10;

// Simple in-memory app state so we only parse the export once but can
// generate reports multiple times in a single run. A new load fully
// replaces the previous record set.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Vec<SalesRecord>>,
}

/// Read a single line of input after printing the common prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the report selection menu after
/// generating reports.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Report Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let resp = buf.trim().to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load and parse the CSV export.
///
/// On success, we store the records in `APP_STATE` and print a short
/// textual summary of the run.
fn handle_load(path: &str) {
    match loader::load_and_parse(path) {
        Ok((records, report)) => {
            println!(
                "Processing export... ({} rows tokenized, {} records built)",
                util::format_int(report.total_rows as i64),
                util::format_int(report.record_count as i64)
            );
            println!(
                "Note: {} rows skipped as truncated or empty.",
                util::format_int(report.skipped_rows as i64)
            );
            if report.unknown_district > 0 {
                println!(
                    "Info: {} records could not be matched to a district.",
                    util::format_int(report.unknown_district as i64)
                );
            }
            println!("");
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(records);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: generate all reports and exports.
///
/// This function is intentionally side-effectful:
/// - writes two summary CSV files,
/// - writes the JSON summary stats,
/// - writes the AI-context CSV text,
/// - and prints Markdown previews of both summaries to the console.
fn handle_generate_reports() {
    let records = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(records) = records else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };

    println!("Generating reports...");
    println!("Outputs saved to individual files...\n");

    let district_stats = reports::aggregate_by_district(&records);
    let district_rows = reports::stat_rows(&district_stats);
    let file1 = "report1_district_summary.csv";
    if let Err(e) = output::write_csv(file1, &district_rows) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 1: Sales by District\n");
    println!("(Ranked by TotalSales, top {} shown)\n", PREVIEW_ROWS);
    output::preview_table_rows(&district_rows, PREVIEW_ROWS);
    println!("(Full table exported to {})\n", file1);

    let sub_district_stats = reports::aggregate_by_sub_district(&records);
    let sub_district_rows = reports::stat_rows(&sub_district_stats);
    let file2 = "report2_subdistrict_summary.csv";
    if let Err(e) = output::write_csv(file2, &sub_district_rows) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 2: Sales by Subdistrict\n");
    println!("(Ranked by TotalSales, top {} shown)\n", PREVIEW_ROWS);
    output::preview_table_rows(&sub_district_rows, PREVIEW_ROWS);
    println!("(Full table exported to {})\n", file2);

    let summary = reports::generate_summary(&records, &district_stats);
    if let Err(e) = output::write_json("summary.json", &summary) {
        eprintln!("Write error: {}", e);
    }
    println!("Summary Stats (summary.json):");
    println!(
        "{{\"total_sales\": {}, \"unique_customers\": {}, \"top_district\": \"{}\"}}\n",
        util::format_number(summary.total_sales, 2),
        util::format_int(summary.unique_customers as i64),
        summary.top_district
    );

    let context = output::ai_context(&records);
    if let Err(e) = std::fs::write("ai_context.csv", context) {
        eprintln!("Write error: {}", e);
    }
    println!("AI assistant context exported to ai_context.csv\n");
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sales_export.csv".to_string());

    loop {
        println!("Select option:");
        println!("[1] Load the file");
        println!("[2] Generate Reports\n");
        match read_choice().as_str() {
            "1" => {
                handle_load(&path);
            }
            "2" => {
                println!("");
                handle_generate_reports();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
