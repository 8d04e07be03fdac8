//! # rpcscaffold
//!
//! **rpcscaffold** scaffolds the application layer of a Go gRPC microservice.
//! It reads the service interfaces `protoc` already generated, writes a
//! service stub, one handler stub per unary RPC and a converter stub for each
//! module, and keeps one aggregate gRPC server and one HTTP gateway wired to
//! every module in the project.
//!
//! ## Architecture
//!
//! - **[`naming`]** - identifier derivation (PascalCase, snake_case, aliases, file names) and validation
//! - **[`proto`]** - line-oriented extraction of unary methods from `*_grpc.pb.go`
//! - **[`discovery`]** - module discovery under `app/rpc` and `go.mod` reading
//! - **[`generator`]** - Askama templates, the [`generator::FileWriter`] and the pipelines
//! - **[`toolchain`]** - `make protoc`, `go fmt`, `go mod tidy`, `sqlc generate`
//! - **[`config`]** - optional `rpcscaffold.toml` layout config
//! - **[`logging`]** - tracing subscriber setup
//! - **[`cli`]** - clap command table
//!
//! ### Flow
//!
//! ```text
//! module add course github.com/acme/school
//!   proto/course/*.proto ──make protoc──▶ protogen/course/*_grpc.pb.go
//!   ──extract──▶ [ServiceMethod] ──render──▶ app/rpc/course/{service,rpc_*,converter}.go
//!
//! module register | gateway register
//!   app/rpc/*/service.go ──discover──▶ [RegistrationDescriptor]
//!   ──render──▶ app/rpc/server.go | app/gateway/gateway.go
//! ```
//!
//! Per-module files are created once and then belong to the developer. The
//! aggregate files are rewritten on every registration run, and the same
//! set of module directories always produces byte-identical output.
//!
//! ## Example
//!
//! ```
//! use rpcscaffold::proto::extract_methods;
//!
//! let src = "type CourseServiceServer interface {\n\
//!     CreateCourse(ctx, *CreateCourseRequest) (*CreateCourseResponse, error)\n\
//!     GetCourse(ctx, *GetCourseRequest) (*GetCourseResponse, error)\n\
//! }\n";
//! let found = extract_methods(src, "course").unwrap();
//! let files: Vec<_> = found.methods.iter().map(|m| m.file_name.as_str()).collect();
//! assert_eq!(files, ["rpc_create_course.go", "rpc_get_course.go"]);
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod logging;
pub mod module;
pub mod naming;
pub mod proto;
pub mod toolchain;

pub use error::{Result, ScaffoldError};
