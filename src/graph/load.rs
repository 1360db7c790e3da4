//! Makefile discovery and reading

use crate::error::{Result, RmakeError};
use crate::graph::parse::parse_str;
use crate::graph::types::TaskGraph;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default makefile name searched for
pub const MAKEFILE_NAME: &str = "makefile.txt";

/// Find the makefile by searching the current and parent directories
pub fn find_makefile() -> Result<PathBuf> {
    find_makefile_from(env::current_dir()?)
}

/// Find the makefile starting from a specific directory
pub fn find_makefile_from(start_dir: PathBuf) -> Result<PathBuf> {
    search_upwards(start_dir, None)
}

/// Find the makefile starting from `start_dir` without leaving `root`
pub fn find_makefile_within(start_dir: PathBuf, root: &Path) -> Result<PathBuf> {
    search_upwards(start_dir, Some(root))
}

fn search_upwards(start_dir: PathBuf, root: Option<&Path>) -> Result<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        let candidate = current_dir.join(MAKEFILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        searched_paths.push(candidate.display().to_string());

        if root.is_some_and(|root| current_dir == root) {
            return Err(RmakeError::NotFound(searched_paths.join(", ")));
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(RmakeError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Read and parse a makefile from disk
pub fn load_makefile(path: &Path) -> Result<TaskGraph> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_str(&contents)?)
}
