#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::project::{add_generated_module, add_service_marker, go_project, ROOT_IMPORT};
use rpcscaffold::config::ScaffoldConfig;
use rpcscaffold::generator::{
    add_module, register_gateway, register_services, AddOptions, FileWriter, WriteOutcome,
    WritePolicy,
};
use std::fs;

fn offline() -> AddOptions {
    AddOptions {
        skip_protogen: true,
        no_format: true,
        dry_run: false,
    }
}

#[test]
fn test_existing_per_module_file_is_left_untouched() {
    let dir = go_project();
    let target = dir.path().join("app").join("rpc").join("course").join("service.go");
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "SENTINEL").unwrap();

    let outcome = FileWriter::new(false)
        .write(&target, "package course\n", WritePolicy::CreateOnly)
        .unwrap();
    assert_eq!(outcome, WriteOutcome::AlreadyExists);
    assert_eq!(fs::read_to_string(&target).unwrap(), "SENTINEL");
}

#[test]
fn test_aggregates_are_deterministic() {
    let dir = go_project();
    for module in ["enrollment", "course", "billing"] {
        add_service_marker(dir.path(), module);
    }
    let config = ScaffoldConfig::default();
    let server = dir.path().join("app").join("rpc").join("server.go");
    let gateway = dir.path().join("app").join("gateway").join("gateway.go");

    register_services(dir.path(), &config, false).unwrap();
    register_gateway(dir.path(), &config, false).unwrap();
    let first = (
        fs::read_to_string(&server).unwrap(),
        fs::read_to_string(&gateway).unwrap(),
    );

    register_services(dir.path(), &config, false).unwrap();
    register_gateway(dir.path(), &config, false).unwrap();
    let second = (
        fs::read_to_string(&server).unwrap(),
        fs::read_to_string(&gateway).unwrap(),
    );
    assert_eq!(first, second);

    let billing = first.0.find("billingsv.NewBillingService()").unwrap();
    let course = first.0.find("coursesv.NewCourseService()").unwrap();
    let enrollment = first.0.find("enrollmentsv.NewEnrollmentService()").unwrap();
    assert!(billing < course && course < enrollment);
}

#[test]
fn test_add_then_register_end_to_end() {
    let dir = go_project();
    add_generated_module(dir.path(), "course", "Course");
    add_generated_module(dir.path(), "billing", "Billing");
    let config = ScaffoldConfig::default();

    for module in ["course", "billing"] {
        let report = add_module(dir.path(), &config, module, ROOT_IMPORT, offline()).unwrap();
        assert_eq!(report.methods.len(), 2);
        assert_eq!(report.files.len(), 4);
    }

    let course = dir.path().join("app").join("rpc").join("course");
    let handler = fs::read_to_string(course.join("rpc_create_course.go")).unwrap();
    assert!(handler.contains("func (s *CourseService) CreateCourse("));

    let report = register_services(dir.path(), &config, false).unwrap();
    let names: Vec<_> = report.modules.iter().map(|m| m.module_name.as_str()).collect();
    assert_eq!(names, vec!["billing", "course"]);
    let server = fs::read_to_string(report.file.unwrap().path).unwrap();
    assert!(server.contains(&format!("coursesv \"{ROOT_IMPORT}/app/rpc/course\"")));
    assert!(server.contains(&format!("db \"{ROOT_IMPORT}/internal/repo\"")));
}

#[test]
fn test_rerunning_add_preserves_edits() {
    let dir = go_project();
    add_generated_module(dir.path(), "course", "Course");
    let config = ScaffoldConfig::default();
    add_module(dir.path(), &config, "course", ROOT_IMPORT, offline()).unwrap();

    let handler = dir
        .path()
        .join("app")
        .join("rpc")
        .join("course")
        .join("rpc_get_course.go");
    fs::write(&handler, "// implemented by hand\n").unwrap();

    let report = add_module(dir.path(), &config, "course", ROOT_IMPORT, offline()).unwrap();
    assert!(report
        .files
        .iter()
        .all(|f| f.outcome == WriteOutcome::AlreadyExists));
    assert_eq!(
        fs::read_to_string(&handler).unwrap(),
        "// implemented by hand\n"
    );
}

#[test]
fn test_streaming_methods_are_reported() {
    let dir = go_project();
    add_generated_module(dir.path(), "chat", "Chat");
    let grpc = dir.path().join("protogen").join("chat").join("chat_grpc.pb.go");
    let mut source = fs::read_to_string(&grpc).unwrap();
    source = source.replace(
        "\tmustEmbed",
        "\tWatch(*WatchRequest, grpc.ServerStreamingServer[Event]) error\n\tmustEmbed",
    );
    fs::write(&grpc, source).unwrap();

    let report = add_module(dir.path(), &ScaffoldConfig::default(), "chat", ROOT_IMPORT, offline())
        .unwrap();
    assert_eq!(report.methods.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "Watch");
    assert!(!dir
        .path()
        .join("app")
        .join("rpc")
        .join("chat")
        .join("rpc_watch.go")
        .exists());
}

#[cfg(unix)]
#[test]
fn test_add_runs_protoc_and_go_tools() {
    use common::project::stub_tool;

    let dir = go_project();
    add_generated_module(dir.path(), "course", "Course");
    let bin = tempfile::tempdir().unwrap();
    let log = bin.path().join("calls.log");
    let make = stub_tool(bin.path(), "make", &format!("echo \"make $@\" >> {}", log.display()));
    let go = stub_tool(bin.path(), "go", &format!("echo \"go $@\" >> {}", log.display()));

    let mut config = ScaffoldConfig::default();
    config.tools.protoc[0] = make.to_string_lossy().into_owned();
    config.tools.go = go.to_string_lossy().into_owned();
    let options = AddOptions::default();
    add_module(dir.path(), &config, "course", ROOT_IMPORT, options).unwrap();

    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "make protoc\ngo fmt ./...\ngo mod tidy\n"
    );
}

#[cfg(unix)]
#[test]
fn test_failing_protoc_aborts_before_writing() {
    use common::project::stub_tool;

    let dir = go_project();
    add_generated_module(dir.path(), "course", "Course");
    let bin = tempfile::tempdir().unwrap();
    let make = stub_tool(bin.path(), "make", "echo 'protoc: not found' >&2\nexit 2");

    let mut config = ScaffoldConfig::default();
    config.tools.protoc[0] = make.to_string_lossy().into_owned();
    let err = add_module(dir.path(), &config, "course", ROOT_IMPORT, AddOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("protoc: not found"));
    assert!(!dir.path().join("app").join("rpc").join("course").exists());
}
