// Copyright 2020 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Extracts numeral-looking strings from files and prints their binary16,
//! binary32 and binary64 encodings, one sorted line per distinct numeral.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use numeral_oracle::scan::{is_hidden, Scan};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "extract-numerals",
    version,
    about = "Prints \"<F16> <F32> <F64> <numeral>\" for every distinct numeral found in the given files"
)]
struct Args {
    /// Files or directories to scan; directories are walked recursively.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Skip files larger than this many bytes.
    #[arg(long, default_value_t = 16 << 20)]
    max_file_size: u64,

    /// Print only the numerals, without converting them.
    #[arg(long)]
    no_convert: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Default)]
struct Stats {
    scanned: usize,
    skipped: usize,
}

fn scan_file(scan: &mut Scan, path: &Path, max_file_size: u64, stats: &mut Stats) -> Result<()> {
    let len = fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();
    if len > max_file_size {
        debug!("skipping {}: {} bytes", path.display(), len);
        stats.skipped += 1;
        return Ok(());
    }

    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if scan.scan_bytes(&bytes) {
        stats.scanned += 1;
    } else {
        debug!("skipping {}: not text", path.display());
        stats.skipped += 1;
    }

    Ok(())
}

/// Scans every file under `root`, skipping dot-prefixed files and
/// directories below it.
fn scan_root(scan: &mut Scan, root: &Path, max_file_size: u64, stats: &mut Stats) {
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Err(e) = scan_file(scan, entry.path(), max_file_size, stats) {
            warn!("{:#}", e);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let mut scan = Scan::new();
    let mut stats = Stats::default();

    for root in &args.paths {
        scan_root(&mut scan, root, args.max_file_size, &mut stats);
    }

    info!(
        "scanned {} files, skipped {}, found {} distinct numerals",
        stats.scanned,
        stats.skipped,
        scan.len()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.no_convert {
        for numeral in scan.numerals() {
            writeln!(out, "{}", numeral)?;
        }
    } else {
        for line in scan.lines() {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write<P: AsRef<Path>>(dir: &TempDir, name: P, contents: &[u8]) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn numerals(scan: &Scan) -> Vec<&str> {
        scan.numerals().collect()
    }

    #[test]
    fn file_size_limit() {
        let dir = TempDir::new().unwrap();
        write(&dir, "small.txt", b"1.5");
        write(&dir, "large.txt", b"2.5 3.5 4.5");

        let mut scan = Scan::new();
        let mut stats = Stats::default();
        scan_file(&mut scan, &dir.path().join("small.txt"), 4, &mut stats).unwrap();
        scan_file(&mut scan, &dir.path().join("large.txt"), 4, &mut stats).unwrap();
        assert_eq!(numerals(&scan), vec!["1.5"]);
        assert_eq!(stats.scanned, 1);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn binary_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.bin", b"\xff\xfe 1.25");
        write(&dir, "b.txt", b"x = 6.5\n");

        let mut scan = Scan::new();
        let mut stats = Stats::default();
        scan_file(&mut scan, &dir.path().join("a.bin"), 1 << 10, &mut stats).unwrap();
        scan_file(&mut scan, &dir.path().join("b.txt"), 1 << 10, &mut stats).unwrap();
        assert_eq!(numerals(&scan), vec!["6.5"]);
        assert_eq!(stats.scanned, 1);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let mut scan = Scan::new();
        let mut stats = Stats::default();
        assert!(scan_file(&mut scan, &dir.path().join("nope"), 1 << 10, &mut stats).is_err());
        assert_eq!(stats.scanned + stats.skipped, 0);
    }

    #[test]
    fn hidden_entries() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.txt", b"x = 1.5");
        write(&dir, "sub/b.txt", b"y = 2.25");
        write(&dir, ".hidden", b"77");
        write(&dir, ".git/packed-refs", b"ref 4242.5");
        write(&dir, "sub/.cache/c.txt", b"9.75");

        let mut scan = Scan::new();
        let mut stats = Stats::default();
        scan_root(&mut scan, dir.path(), 1 << 10, &mut stats);
        assert_eq!(numerals(&scan), vec!["1.5", "2.25"]);
        assert_eq!(stats.scanned, 2);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn hidden_root() {
        let dir = TempDir::new().unwrap();
        write(&dir, ".data/a.txt", b"3.5");

        let mut scan = Scan::new();
        let mut stats = Stats::default();
        scan_root(&mut scan, &dir.path().join(".data"), 1 << 10, &mut stats);
        assert_eq!(numerals(&scan), vec!["3.5"]);
        assert_eq!(stats.scanned, 1);
    }
}
