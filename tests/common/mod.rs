//! Common test utilities

#![allow(dead_code)]

use rmake::{ExecutionPath, TaskGraph};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with a makefile.txt file
pub fn create_test_makefile(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let makefile_path = temp_dir.path().join("makefile.txt");
    fs::write(&makefile_path, content).unwrap();
    (temp_dir, makefile_path)
}

/// Create a makefile.txt and a subdirectory next to it
pub fn create_test_makefile_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let (temp_dir, makefile_path) = create_test_makefile(content);
    let sub_dir = temp_dir.path().join("subdir");
    fs::create_dir(&sub_dir).unwrap();
    (temp_dir, makefile_path, sub_dir)
}

/// Assert that every dependency of every task in `path` runs before it
pub fn assert_valid_order(graph: &TaskGraph, path: &ExecutionPath) {
    for (index, name) in path.iter().enumerate() {
        let record = graph.get(name).unwrap();
        for dependency in record.dependencies() {
            let position = path
                .position(dependency)
                .unwrap_or_else(|| panic!("'{}' is missing from {:?}", dependency, path));
            assert!(
                position < index,
                "'{}' must run before '{}' in {:?}",
                dependency,
                name,
                path
            );
        }
    }
}
