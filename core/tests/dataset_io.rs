//! Dataset file handling: header layout, write/read fidelity,
//! the missing-file path, the load-once handle, and filtered export.

use sales_core::{
    config::GeneratorConfig,
    dataset::{Dataset, DatasetSource},
    error::SalesError,
    filter::FilterSpec,
    generator::SalesGenerator,
    record::{SalesRecord, CSV_COLUMNS},
    store,
};
use std::path::PathBuf;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// A scratch path unique to this test process and test name.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sales-core-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn generated(seed: u64, n: usize) -> Vec<SalesRecord> {
    let config = GeneratorConfig::default()
        .with_seed(seed)
        .with_record_count(n);
    SalesGenerator::new(config).unwrap().generate()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn header_lists_all_columns_in_order() {
    let csv = store::records_to_csv_string(&generated(1, 3)).unwrap();
    let header = csv.lines().next().unwrap();
    assert_eq!(header, CSV_COLUMNS.join(","));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn row_carries_derived_columns() {
    let records = generated(1, 1);
    let csv = store::records_to_csv_string(&records).unwrap();
    let row = csv.lines().nth(1).unwrap();
    let r = &records[0];

    assert!(row.starts_with(&format!("{},{},{},", r.order_id, r.order_date, r.delivery_date())));
    assert!(row.ends_with(&format!(
        ",{},{},{},{}",
        r.month(),
        r.day_of_week(),
        r.quarter(),
        r.day_name()
    )));
    assert!(row.contains(if r.returned { ",Yes," } else { ",No," }));
}

#[test]
fn written_file_reads_back_identically() {
    let records = generated(42, 1_000);
    let path = scratch("round_trip.csv");

    let written = store::write_records_to_path(&path, &records).unwrap();
    assert_eq!(written, 1_000);
    let loaded = Dataset::load(&path).unwrap();
    assert_eq!(loaded.records(), records.as_slice());

    std::fs::remove_file(&path).ok();
}

#[test]
fn rewriting_replaces_the_file() {
    let path = scratch("replace.csv");
    store::write_records_to_path(&path, &generated(1, 50)).unwrap();
    store::write_records_to_path(&path, &generated(2, 10)).unwrap();
    assert_eq!(Dataset::load(&path).unwrap().len(), 10);
    std::fs::remove_file(&path).ok();
}

#[test]
fn file_without_derived_columns_still_loads() {
    let csv = "\
Order_ID,Order_Date,Category,Subcategory,Product_Price,Quantity,Discount_Percent,Discount_Amount,Final_Price,Payment_Method,Customer_Segment,City,Customer_Rating,Review_Length,Delivery_Days,Delivery_Status,Returned,Profit_Margin
ORD10000,2023-05-06,Books,Fiction,250.0,2,10,50.0,450.0,UPI,Prime,Pune,4,Short,3,On Time,No,120.5
";
    let records = store::read_records(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.city, "Pune");
    assert!(!r.returned);
    assert_eq!(r.delivery_date().to_string(), "2023-05-09");
    assert_eq!(r.day_name(), "Saturday");
}

#[test]
fn missing_file_is_missing_dataset() {
    let path = scratch("does_not_exist.csv");
    std::fs::remove_file(&path).ok();
    match Dataset::load(&path) {
        Err(SalesError::MissingDataset { path: p }) => assert!(p.ends_with("does_not_exist.csv")),
        other => panic!("Expected MissingDataset, got {other:?}"),
    }
}

#[test]
fn malformed_row_is_an_error() {
    let csv = format!("{}\nORD1,not-a-date\n", CSV_COLUMNS.join(","));
    assert!(store::read_records(csv.as_bytes()).is_err());
}

#[test]
fn source_loads_once_until_reload() {
    let path = scratch("source.csv");
    store::write_records_to_path(&path, &generated(3, 20)).unwrap();

    let mut source = DatasetSource::new(&path);
    assert!(!source.is_loaded());
    let first = source.get().unwrap();
    assert!(source.is_loaded());
    assert_eq!(first.len(), 20);

    // The file changes underneath; the cached copy does not.
    store::write_records_to_path(&path, &generated(3, 5)).unwrap();
    assert_eq!(source.get().unwrap().len(), 20);
    assert!(std::sync::Arc::ptr_eq(&first, &source.get().unwrap()));

    assert_eq!(source.reload().unwrap().len(), 5);
    std::fs::remove_file(&path).ok();
}

#[test]
fn failed_load_is_retried() {
    let path = scratch("late.csv");
    std::fs::remove_file(&path).ok();
    let mut source = DatasetSource::new(&path);
    assert!(matches!(source.get(), Err(SalesError::MissingDataset { .. })));
    assert!(!source.is_loaded());

    store::write_records_to_path(&path, &generated(4, 7)).unwrap();
    assert_eq!(source.get().unwrap().len(), 7);
    std::fs::remove_file(&path).ok();
}

#[test]
fn export_writes_only_filtered_rows() {
    let ds = Dataset::from_records(generated(42, 2_000));
    let spec = FilterSpec::for_dataset(&ds).with_category("Clothing");
    let rows = spec.apply(ds.records());
    let path = scratch("export.csv");

    let written = store::write_records_to_path(&path, rows.iter().copied()).unwrap();
    assert_eq!(written, rows.len());
    let exported = Dataset::load(&path).unwrap();
    assert_eq!(exported.len(), rows.len());
    assert!(exported.records().iter().all(|r| r.category == "Clothing"));
    assert_eq!(exported.categories(), ["Clothing"]);

    std::fs::remove_file(&path).ok();
}

#[test]
fn distinct_values_keep_first_appearance() {
    let ds = Dataset::from_records(generated(8, 500));
    let first_city = ds.records()[0].city.as_str();
    assert_eq!(ds.cities()[0], first_city);
    assert_eq!(ds.segments().len(), 4);
    assert_eq!(ds.categories().len(), 5);
}
