#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::project::{add_service_marker, go_project, ROOT_IMPORT};
use rpcscaffold::config::ScaffoldConfig;
use rpcscaffold::discovery::{discover_modules, read_root_import_path};
use rpcscaffold::ScaffoldError;
use std::fs;

#[test]
fn test_directory_without_marker_is_invisible() {
    let dir = go_project();
    add_service_marker(dir.path(), "course");
    fs::create_dir_all(dir.path().join("app").join("rpc").join("scratch")).unwrap();
    fs::write(
        dir.path().join("app").join("rpc").join("scratch").join("notes.go"),
        "package scratch\n",
    )
    .unwrap();

    let modules = discover_modules(dir.path(), &ScaffoldConfig::default()).unwrap();
    let names: Vec<_> = modules.iter().map(|m| m.module_name.as_str()).collect();
    assert_eq!(names, vec!["course"]);
}

#[test]
fn test_modules_are_sorted_by_directory_name() {
    let dir = go_project();
    for module in ["enrollment", "billing", "course"] {
        add_service_marker(dir.path(), module);
    }
    let modules = discover_modules(dir.path(), &ScaffoldConfig::default()).unwrap();
    let names: Vec<_> = modules.iter().map(|m| m.module_name.as_str()).collect();
    assert_eq!(names, vec!["billing", "course", "enrollment"]);
    assert_eq!(
        modules[1].service_import_path,
        format!("{ROOT_IMPORT}/app/rpc/course")
    );
}

#[test]
fn test_aggregate_file_and_invalid_module_are_skipped() {
    let dir = go_project();
    add_service_marker(dir.path(), "course");
    add_service_marker(dir.path(), "bad-name");
    fs::write(dir.path().join("app").join("rpc").join("server.go"), "package rpc\n").unwrap();

    let modules = discover_modules(dir.path(), &ScaffoldConfig::default()).unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].module_name, "course");
}

#[test]
fn test_marker_directory_does_not_count() {
    let dir = go_project();
    fs::create_dir_all(
        dir.path()
            .join("app")
            .join("rpc")
            .join("course")
            .join("service.go"),
    )
    .unwrap();
    let modules = discover_modules(dir.path(), &ScaffoldConfig::default()).unwrap();
    assert!(modules.is_empty());
}

#[test]
fn test_missing_go_mod_is_fatal() {
    let dir = go_project();
    fs::remove_file(dir.path().join("go.mod")).unwrap();
    let err = discover_modules(dir.path(), &ScaffoldConfig::default()).unwrap_err();
    assert!(matches!(err, ScaffoldError::Discovery { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_go_mod_without_module_line_is_fatal() {
    let dir = go_project();
    fs::write(dir.path().join("go.mod"), "go 1.22\n").unwrap();
    let err = read_root_import_path(&dir.path().join("go.mod")).unwrap_err();
    assert!(err.to_string().contains("module name not found"));
}

#[test]
fn test_missing_module_root_is_fatal() {
    let dir = go_project();
    fs::remove_dir_all(dir.path().join("app")).unwrap();
    let err = discover_modules(dir.path(), &ScaffoldConfig::default()).unwrap_err();
    assert!(matches!(err, ScaffoldError::Discovery { .. }));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_custom_layout_from_config() {
    let dir = go_project();
    fs::write(
        dir.path().join("rpcscaffold.toml"),
        "rpc_dir = \"internal/rpc\"\nmodule_marker = \"module.go\"\n",
    )
    .unwrap();
    let module_dir = dir.path().join("internal").join("rpc").join("course");
    fs::create_dir_all(&module_dir).unwrap();
    fs::write(module_dir.join("module.go"), "package course\n").unwrap();

    let config = ScaffoldConfig::load(dir.path(), None).unwrap();
    let modules = discover_modules(dir.path(), &config).unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(
        modules[0].service_import_path,
        format!("{ROOT_IMPORT}/internal/rpc/course")
    );
}
