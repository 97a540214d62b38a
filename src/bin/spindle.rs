//! # Spindle CLI Entry Point
//!
//! Binary entry point for the spindle command-line interface.
//!
//! ## Usage
//!
//! ```bash
//! # Open existing disk
//! spindle ./mydisk
//!
//! # Create a new disk
//! spindle --create ./newdisk --name archive --platters 2 --surfaces 2 \
//!         --tracks 4 --sectors 8 --capacity 512
//!
//! # Show version
//! spindle --version
//! ```

use std::env;
use std::path::PathBuf;

use eyre::{bail, eyre, Result, WrapErr};
use spindle::cli::Repl;
use spindle::storage::Geometry;
use spindle::Disk;

const DEFAULT_GEOMETRY: Geometry = Geometry {
    platters: 2,
    surfaces_per_platter: 2,
    tracks_per_surface: 4,
    sectors_per_track: 8,
    sector_capacity: 512,
};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let mut create_mode = false;
    let mut disk_path: Option<PathBuf> = None;
    let mut name: Option<String> = None;
    let mut geometry = DEFAULT_GEOMETRY;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("spindle {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--create" | "-c" => {
                create_mode = true;
            }
            "--name" => {
                i += 1;
                name = Some(flag_value(&args, i, "--name")?.to_string());
            }
            "--platters" => {
                i += 1;
                geometry.platters = parse_flag(&args, i, "--platters")?;
            }
            "--surfaces" => {
                i += 1;
                geometry.surfaces_per_platter = parse_flag(&args, i, "--surfaces")?;
            }
            "--tracks" => {
                i += 1;
                geometry.tracks_per_surface = parse_flag(&args, i, "--tracks")?;
            }
            "--sectors" => {
                i += 1;
                geometry.sectors_per_track = parse_flag(&args, i, "--sectors")?;
            }
            "--capacity" => {
                i += 1;
                geometry.sector_capacity = parse_flag(&args, i, "--capacity")?;
            }
            arg if arg.starts_with('-') => {
                bail!("Unknown option: {}", arg);
            }
            path => {
                if disk_path.is_some() {
                    bail!("Multiple disk paths specified");
                }
                disk_path = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let disk_path = match disk_path {
        Some(p) => p,
        None => {
            print_usage();
            return Ok(());
        }
    };

    let disk = if create_mode {
        let name = match name {
            Some(name) => name,
            None => disk_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| eyre!("cannot derive a disk name from '{}'", disk_path.display()))?,
        };
        Disk::create(&disk_path, geometry, &name)
            .wrap_err_with(|| format!("failed to create disk at {:?}", disk_path))?
    } else if disk_path.exists() {
        Disk::load(&disk_path)
            .wrap_err_with(|| format!("failed to load disk at {:?}", disk_path))?
    } else {
        bail!(
            "disk '{}' does not exist (use --create to make one)",
            disk_path.display()
        );
    };

    let mut repl = Repl::new(disk)?;
    repl.run()?;

    Ok(())
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| eyre!("{} requires a value", flag))
}

fn parse_flag<T>(args: &[String], i: usize, flag: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = flag_value(args, i, flag)?;
    value
        .parse()
        .wrap_err_with(|| format!("invalid value '{}' for {}", value, flag))
}

fn print_usage() {
    println!("Spindle - mechanical-disk record storage engine");
    println!();
    println!("USAGE:");
    println!("    spindle [OPTIONS] <DISK_PATH>");
    println!();
    println!("ARGS:");
    println!("    <DISK_PATH>        Path to the disk directory");
    println!();
    println!("OPTIONS:");
    println!("    -c, --create       Create a new disk at DISK_PATH");
    println!("    --name NAME        Disk name (default: the path's last component)");
    println!("    --platters N       Platter count (default 2)");
    println!("    --surfaces N       Surfaces per platter (default 2)");
    println!("    --tracks N         Tracks per surface (default 4)");
    println!("    --sectors N        Sectors per track (default 8, minimum 2)");
    println!("    --capacity BYTES   Sector capacity in bytes (default 512)");
    println!("    -h, --help         Print help information");
    println!("    -v, --version      Print version information");
    println!();
    println!("EXAMPLES:");
    println!("    spindle ./mydisk               Open the disk at ./mydisk");
    println!("    spindle --create ./newdisk     Create a disk with the default geometry");
}
