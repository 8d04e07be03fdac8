#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::project::{add_generated_module, add_service_marker, go_project, ROOT_IMPORT};
use std::fs;
use std::process::{Command, Output};

fn rpcscaffold(root: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rpcscaffold"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .env("RPCSCAFFOLD_LOG_LEVEL", "info")
        .output()
        .expect("run rpcscaffold")
}

#[test]
fn test_module_register_writes_server() {
    let dir = go_project();
    add_service_marker(dir.path(), "course");

    let output = rpcscaffold(dir.path(), &["module", "register"]);
    assert!(output.status.success(), "{output:?}");
    let server = fs::read_to_string(dir.path().join("app").join("rpc").join("server.go")).unwrap();
    assert!(server.contains("coursepb.RegisterCourseServiceServer(grpcServer, courseService)"));
}

#[test]
fn test_missing_go_mod_exits_with_status_one() {
    let dir = go_project();
    fs::remove_file(dir.path().join("go.mod")).unwrap();

    let output = rpcscaffold(dir.path(), &["gateway", "register"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "{stderr}");
    assert!(stderr.contains("go.mod"), "{stderr}");
}

#[test]
fn test_module_add_offline() {
    let dir = go_project();
    add_generated_module(dir.path(), "course", "Course");

    let output = rpcscaffold(
        dir.path(),
        &["module", "add", "course", ROOT_IMPORT, "--skip-protogen", "--no-format"],
    );
    assert!(output.status.success(), "{output:?}");
    let app = dir.path().join("app").join("rpc").join("course");
    for file in ["service.go", "rpc_create_course.go", "rpc_get_course.go", "converter.go"] {
        assert!(app.join(file).is_file(), "missing {file}");
    }
}

#[test]
fn test_module_add_without_methods_fails() {
    let dir = go_project();
    let protogen = dir.path().join("protogen").join("course");
    fs::create_dir_all(&protogen).unwrap();
    fs::write(protogen.join("course_grpc.pb.go"), "package coursepb\n").unwrap();

    let output = rpcscaffold(
        dir.path(),
        &["module", "add", "course", ROOT_IMPORT, "--skip-protogen", "--no-format"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no methods found"));
}

#[test]
fn test_dry_run_register_writes_nothing() {
    let dir = go_project();
    add_service_marker(dir.path(), "course");

    let output = rpcscaffold(dir.path(), &["module", "gateway", "--dry-run"]);
    assert!(output.status.success(), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stderr).contains("would create"));
    assert!(!dir.path().join("app").join("gateway").exists());
}

#[test]
fn test_module_list_json() {
    let dir = go_project();
    add_service_marker(dir.path(), "course");
    add_service_marker(dir.path(), "billing");

    let output = rpcscaffold(dir.path(), &["-q", "module", "list", "--json"]);
    assert!(output.status.success(), "{output:?}");
    let modules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let modules = modules.as_array().unwrap();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0]["module_name"], "billing");
    assert_eq!(modules[1]["register_func"], "coursepb.RegisterCourseServiceServer");
}

#[test]
fn test_malformed_config_exits_with_status_one() {
    let dir = go_project();
    fs::write(dir.path().join("rpcscaffold.toml"), "unknown_key = 1\n").unwrap();

    let output = rpcscaffold(dir.path(), &["module", "list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid config"));
}

#[cfg(unix)]
#[test]
fn test_sqlc_generate_runs_sqlc_then_tidy() {
    use common::project::stub_tool;

    let dir = go_project();
    let bin = tempfile::tempdir().unwrap();
    let log = bin.path().join("calls.log");
    let sqlc = stub_tool(bin.path(), "sqlc", &format!("echo \"sqlc $@\" >> {}", log.display()));
    let go = stub_tool(bin.path(), "go", &format!("echo \"go $@\" >> {}", log.display()));

    let output = Command::new(env!("CARGO_BIN_EXE_rpcscaffold"))
        .arg("--root")
        .arg(dir.path())
        .args(["sqlc", "generate"])
        .env("RPCSCAFFOLD_SQLC_BIN", &sqlc)
        .env("RPCSCAFFOLD_GO_BIN", &go)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "sqlc generate\ngo mod tidy\n"
    );
}
