//! Two generators, same seed, same record count.
//! They must produce byte-identical dataset files.
//! Any divergence is a blocker.

use sales_core::{config::GeneratorConfig, generator::SalesGenerator, store};

fn csv_for(seed: u64, n: usize) -> String {
    let config = GeneratorConfig::default()
        .with_seed(seed)
        .with_record_count(n);
    let records = SalesGenerator::new(config).expect("valid config").generate();
    store::records_to_csv_string(&records).expect("csv")
}

#[test]
fn same_seed_produces_identical_files() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;

    let a = csv_for(SEED, 5_000);
    let b = csv_for(SEED, 5_000);

    let lines_a: Vec<&str> = a.lines().collect();
    let lines_b: Vec<&str> = b.lines().collect();
    assert_eq!(lines_a.len(), lines_b.len(), "Row counts differ");
    for (i, (x, y)) in lines_a.iter().zip(&lines_b).enumerate() {
        assert_eq!(x, y, "Output diverged at line {i}:\n  A: {x}\n  B: {y}");
    }
}

#[test]
fn one_generator_is_repeatable() {
    let config = GeneratorConfig::default().with_record_count(200);
    let generator = SalesGenerator::new(config).unwrap();
    assert_eq!(generator.generate(), generator.generate());
}

#[test]
fn different_seeds_produce_different_files() {
    let a = csv_for(42, 500);
    let b = csv_for(99, 500);
    assert_ne!(a, b, "Different seeds produced identical output — seed is not being used");
}

/// A longer run is a prefix-extension of a shorter one: record i only
/// depends on the seed and the draws before it.
#[test]
fn shorter_run_is_a_prefix_of_longer_run() {
    let short = csv_for(7, 100);
    let long = csv_for(7, 300);
    assert!(long.starts_with(&short), "First 100 rows changed when N grew");
}
