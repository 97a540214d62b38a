//! # Persistence Test
//!
//! Covers the directory-persistence protocol: reconstructing a disk from
//! its reserved directory sector, schema reload, the
//! occupied-entries-only serialization of the directory, and hard
//! rejection of malformed headers and rows.

use std::fs;

use spindle::storage::Geometry;
use spindle::{DeleteOutcome, Disk, InsertOutcome, SectorAddress};
use tempfile::tempdir;

fn test_geometry() -> Geometry {
    Geometry {
        platters: 1,
        surfaces_per_platter: 1,
        tracks_per_surface: 2,
        sectors_per_track: 4,
        sector_capacity: 64,
    }
}

fn insert_ok(disk: &mut Disk, payload: &str) -> u64 {
    match disk.insert(payload).unwrap() {
        InsertOutcome::Stored { id, .. } => id,
        InsertOutcome::DiskFull => panic!("unexpected DiskFull"),
    }
}

#[test]
fn reload_reconstructs_the_directory_exactly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("disk");

    let mut disk = Disk::create(&path, test_geometry(), "persist").unwrap();
    disk.set_schema("id#name#age").unwrap();
    insert_ok(&mut disk, "1#alice#30");
    insert_ok(&mut disk, "2#bob#25");
    insert_ok(&mut disk, "3#carol#41");
    let original: Vec<_> = disk.records().to_vec();
    drop(disk);

    let reloaded = Disk::load(&path).unwrap();
    assert_eq!(reloaded.name(), "persist");
    assert_eq!(*reloaded.geometry(), test_geometry());
    assert_eq!(reloaded.schema(), "id#name#age");
    assert_eq!(reloaded.records(), &original[..]);

    assert_eq!(reloaded.retrieve(1).unwrap().as_deref(), Some("1#alice#30"));
    assert_eq!(reloaded.retrieve(2).unwrap().as_deref(), Some("2#bob#25"));
    assert_eq!(reloaded.retrieve(3).unwrap().as_deref(), Some("3#carol#41"));
}

#[test]
fn inserts_continue_after_a_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("disk");

    let mut disk = Disk::create(&path, test_geometry(), "persist").unwrap();
    insert_ok(&mut disk, "1#alice#30");
    insert_ok(&mut disk, "2#bob#25");
    drop(disk);

    let mut reloaded = Disk::load(&path).unwrap();
    let id = insert_ok(&mut reloaded, "3#carol#41");
    assert_eq!(id, 3);
    assert_eq!(reloaded.retrieve(3).unwrap().as_deref(), Some("3#carol#41"));
}

#[test]
fn tombstones_do_not_survive_a_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("disk");

    let mut disk = Disk::create(&path, test_geometry(), "persist").unwrap();
    insert_ok(&mut disk, "1#alice#30");
    insert_ok(&mut disk, "2#bob#25");
    assert_eq!(disk.delete(1).unwrap(), DeleteOutcome::Deleted);
    assert_eq!(disk.records().len(), 2);
    drop(disk);

    // Only occupied entries are serialized, so the tombstone is gone
    // from the directory after a reload.
    let reloaded = Disk::load(&path).unwrap();
    assert_eq!(reloaded.records().len(), 1);
    assert_eq!(reloaded.records()[0].id(), 2);
    assert_eq!(reloaded.retrieve(1).unwrap(), None);
}

#[test]
fn deleting_the_highest_id_lets_a_later_session_reuse_it() {
    // Documented consequence of dropping tombstones from the persisted
    // form: the id high-water mark regresses across a reload.
    let dir = tempdir().unwrap();
    let path = dir.path().join("disk");

    let mut disk = Disk::create(&path, test_geometry(), "persist").unwrap();
    insert_ok(&mut disk, "1#alice#30");
    insert_ok(&mut disk, "2#bob#25");
    disk.delete(2).unwrap();
    drop(disk);

    let mut reloaded = Disk::load(&path).unwrap();
    assert_eq!(insert_ok(&mut reloaded, "2#bea#33"), 2);
}

#[test]
fn load_of_a_missing_disk_fails() {
    let dir = tempdir().unwrap();
    assert!(Disk::load(dir.path().join("nothing_here")).is_err());
}

#[test]
fn load_rejects_a_malformed_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("disk");
    Disk::create(&path, test_geometry(), "persist").unwrap();

    let directory_file = SectorAddress::DIRECTORY.sector_file(&path);
    fs::write(&directory_file, "BOGUS#1#1#2#4#64#persist\n").unwrap();
    assert!(Disk::load(&path).is_err());

    fs::write(&directory_file, "CONFIG#1#1#2\n").unwrap();
    assert!(Disk::load(&path).is_err());
}

#[test]
fn load_rejects_a_malformed_directory_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("disk");

    let mut disk = Disk::create(&path, test_geometry(), "persist").unwrap();
    insert_ok(&mut disk, "1#alice#30");
    drop(disk);

    let directory_file = SectorAddress::DIRECTORY.sector_file(&path);
    let mut contents = fs::read_to_string(&directory_file).unwrap();
    contents.push_str("R#2#0#0\n");
    fs::write(&directory_file, contents).unwrap();

    assert!(Disk::load(&path).is_err());
}

#[test]
fn load_rejects_a_row_addressing_outside_the_geometry() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("disk");
    Disk::create(&path, test_geometry(), "persist").unwrap();

    let directory_file = SectorAddress::DIRECTORY.sector_file(&path);
    let mut contents = fs::read_to_string(&directory_file).unwrap();
    contents.push_str("R#1#5#0#0#2#0#4#1\n");
    fs::write(&directory_file, contents).unwrap();

    assert!(Disk::load(&path).is_err());
}
