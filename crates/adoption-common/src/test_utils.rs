//! Test utilities and shared fixtures for the dashboard workspace.
//!
//! Enabled for the crate's own tests and for other crates through the
//! `testing` feature.

use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// The three-row reference dataset: two physicians, two regions, two months.
pub const SAMPLE_PROCEDURES_CSV: &str = "\
Physician_ID,Device_ID,Procedure_Date,Geographic_Region,Specialty,Revenue_Impact
1,D-100,2024-01-10,West,Cardiology,1000
1,D-101,2024-02-01,West,Cardiology,1200
2,D-102,2024-01-20,East,Ortho,800
";

/// Initialize logging for tests. Safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Build a CSV document with the standard header from data rows.
pub fn procedures_csv(rows: &[&str]) -> String {
    let mut csv = String::from(
        "Physician_ID,Device_ID,Procedure_Date,Geographic_Region,Specialty,Revenue_Impact\n",
    );
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}

/// Write `contents` to a temporary `.csv` file that is removed on drop.
pub fn write_csv_fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temporary CSV file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temporary CSV file");
    file
}
