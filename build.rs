//! Build script for the nutrition labeler
//!
//! Embeds a build number and timestamp. The number comes from
//! `LABELER_BUILD_NUMBER` when set, otherwise from build_number.txt, which is
//! bumped on every recompilation.

use std::fs;
use std::path::Path;

const BUILD_NUMBER_FILE: &str = "build_number.txt";

fn next_local_build_number(path: &Path) -> u64 {
    let current: u64 = fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let next = current + 1;

    if let Err(e) = fs::write(path, next.to_string()) {
        println!("cargo:warning=Could not update {}: {}", path.display(), e);
    }
    next
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=LABELER_BUILD_NUMBER");

    let build_number = std::env::var("LABELER_BUILD_NUMBER")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or_else(|| next_local_build_number(Path::new(BUILD_NUMBER_FILE)));

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=LABELER_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=LABELER_BUILD_TIMESTAMP={}", timestamp);
}
