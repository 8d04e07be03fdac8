#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod project {
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    pub const ROOT_IMPORT: &str = "github.com/acme/school";

    /// Generated interface file declaring unary `Create<T>` and `Get<T>`
    pub fn grpc_source(service: &str) -> String {
        format!(
            "// Code generated by protoc-gen-go-grpc. DO NOT EDIT.\n\n\
             type {service}ServiceServer interface {{\n\
             \tCreate{service}(context.Context, *Create{service}Request) (*Create{service}Response, error)\n\
             \tGet{service}(context.Context, *Get{service}Request) (*Get{service}Response, error)\n\
             \tmustEmbedUnimplemented{service}ServiceServer()\n\
             }}\n"
        )
    }

    /// Temp Go project with `go.mod` and an empty `app/rpc`
    pub fn go_project() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("go.mod"),
            format!("module {ROOT_IMPORT}\n\ngo 1.22\n"),
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("app").join("rpc")).unwrap();
        dir
    }

    /// Add `proto/<module>/<module>.proto` and `protogen/<module>/<module>_grpc.pb.go`
    pub fn add_generated_module(root: &Path, module: &str, service: &str) {
        let proto = root.join("proto").join(module);
        fs::create_dir_all(&proto).unwrap();
        fs::write(proto.join(format!("{module}.proto")), "syntax = \"proto3\";\n").unwrap();

        let protogen = root.join("protogen").join(module);
        fs::create_dir_all(&protogen).unwrap();
        fs::write(
            protogen.join(format!("{module}_grpc.pb.go")),
            grpc_source(service),
        )
        .unwrap();
    }

    /// Make `app/rpc/<module>/service.go` so the module is discoverable
    pub fn add_service_marker(root: &Path, module: &str) {
        let dir = root.join("app").join("rpc").join(module);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("service.go"), format!("package {module}\n")).unwrap();
    }

    #[cfg(unix)]
    pub fn stub_tool(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }
}
