//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mapmarks_core` linkage and
//!   storage bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;

fn main() -> ExitCode {
    println!("mapmarks_core version={}", mapmarks_core::core_version());

    match mapmarks_core::db::open_db_in_memory() {
        Ok(_) => {
            println!("storage=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("storage=error {err}");
            ExitCode::FAILURE
        }
    }
}
