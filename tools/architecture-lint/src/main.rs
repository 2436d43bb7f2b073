//! Binary entry point for the architecture lint.
//!
//! Run from anywhere inside the workspace:
//!
//! ```text
//! cargo run -p architecture-lint
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use architecture_lint::lint_backend_sources;

fn main() -> ExitCode {
    let Some(repo_root) = locate_repo_root() else {
        eprintln!("architecture-lint: unable to locate the workspace root");
        return ExitCode::FAILURE;
    };

    match lint_backend_sources(&repo_root.join("backend")) {
        Ok(()) => {
            println!("architecture-lint: no boundary violations found");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Locate the workspace root by walking candidate directories upwards until a
/// `Cargo.toml` declaring `[workspace]` is found.
fn locate_repo_root() -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(dir) = env::var("CARGO_WORKSPACE_DIR") {
        candidates.push(PathBuf::from(dir));
    }
    if let Ok(dir) = env::current_dir() {
        candidates.push(dir);
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

    candidates.into_iter().find_map(|candidate| {
        let mut current = candidate.as_path();
        loop {
            let manifest = current.join("Cargo.toml");
            if let Ok(contents) = std::fs::read_to_string(&manifest)
                && contents.contains("[workspace]")
            {
                return Some(current.to_path_buf());
            }
            current = current.parent()?;
        }
    })
}
