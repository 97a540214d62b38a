//! # CSV Import Test
//!
//! End-to-end coverage of the CSV ingestion path: delimiter
//! substitution, schema capture from the header row, one record per data
//! row, and skip-counting when the disk runs out of space mid-import.

use std::fs;

use spindle::storage::Geometry;
use spindle::{import_csv, Disk, ImportSummary};
use tempfile::tempdir;

#[test]
fn import_loads_schema_and_all_rows() {
    let dir = tempdir().unwrap();
    let geometry = Geometry {
        platters: 1,
        surfaces_per_platter: 1,
        tracks_per_surface: 2,
        sectors_per_track: 4,
        sector_capacity: 64,
    };
    let mut disk = Disk::create(dir.path().join("disk"), geometry, "people").unwrap();

    let csv_path = dir.path().join("people.csv");
    fs::write(
        &csv_path,
        "id,name,age\n1,alice,30\n2,bob,25\n\n3,carol,41\n",
    )
    .unwrap();

    let summary = import_csv(&mut disk, &csv_path).unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            rows_inserted: 3,
            rows_skipped: 0
        }
    );

    assert_eq!(disk.schema(), "id#name#age");
    assert_eq!(disk.retrieve(1).unwrap().as_deref(), Some("1#alice#30"));
    assert_eq!(disk.retrieve(2).unwrap().as_deref(), Some("2#bob#25"));
    assert_eq!(disk.retrieve(3).unwrap().as_deref(), Some("3#carol#41"));
}

#[test]
fn rows_that_no_longer_fit_are_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    // One data sector of 10 bytes: each "N#xxxx" row takes 7 bytes with
    // its terminator, so only the first row fits.
    let geometry = Geometry {
        platters: 1,
        surfaces_per_platter: 1,
        tracks_per_surface: 1,
        sectors_per_track: 3,
        sector_capacity: 10,
    };
    let mut disk = Disk::create(dir.path().join("disk"), geometry, "tiny").unwrap();

    let csv_path = dir.path().join("rows.csv");
    fs::write(&csv_path, "id,val\n1,aaaa\n2,bbbb\n3,cccc\n").unwrap();

    let summary = import_csv(&mut disk, &csv_path).unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            rows_inserted: 1,
            rows_skipped: 2
        }
    );
    assert_eq!(disk.retrieve(1).unwrap().as_deref(), Some("1#aaaa"));
    assert_eq!(disk.retrieve(2).unwrap(), None);
}

#[test]
fn a_second_import_overwrites_the_schema() {
    let dir = tempdir().unwrap();
    let geometry = Geometry {
        platters: 1,
        surfaces_per_platter: 1,
        tracks_per_surface: 2,
        sectors_per_track: 4,
        sector_capacity: 64,
    };
    let mut disk = Disk::create(dir.path().join("disk"), geometry, "multi").unwrap();

    let first = dir.path().join("first.csv");
    fs::write(&first, "id,name\n1,alice\n").unwrap();
    import_csv(&mut disk, &first).unwrap();
    assert_eq!(disk.schema(), "id#name");

    let second = dir.path().join("second.csv");
    fs::write(&second, "sku,price,stock\n100,9.99,4\n").unwrap();
    import_csv(&mut disk, &second).unwrap();
    assert_eq!(disk.schema(), "sku#price#stock");

    // Records from both imports coexist; ids keep climbing.
    assert_eq!(disk.retrieve(1).unwrap().as_deref(), Some("1#alice"));
    assert_eq!(disk.retrieve(2).unwrap().as_deref(), Some("100#9.99#4"));
}

#[test]
fn import_of_a_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let geometry = Geometry {
        platters: 1,
        surfaces_per_platter: 1,
        tracks_per_surface: 1,
        sectors_per_track: 3,
        sector_capacity: 64,
    };
    let mut disk = Disk::create(dir.path().join("disk"), geometry, "missing").unwrap();

    assert!(import_csv(&mut disk, dir.path().join("no_such.csv")).is_err());
}
