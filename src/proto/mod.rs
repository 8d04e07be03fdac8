//! # Service Interface Extraction
//!
//! Reads the Go service interfaces emitted by `protoc-gen-go-grpc` and turns
//! them into [`ServiceMethod`] descriptors, one per unary RPC.
//!
//! ```text
//! protogen/<module>/*_grpc.pb.go → load::extract_module_methods
//!                                → extract::extract_methods (per file)
//!                                → Vec<ServiceMethod> (declaration order)
//! ```
//!
//! Only the `type <Name>Server interface { ... }` block is scanned, and only
//! signatures of the exact unary shape are accepted:
//!
//! ```text
//! CreateCourse(context.Context, *CreateCourseRequest) (*CreateCourseResponse, error)
//! ```
//!
//! Streaming methods are reported separately as [`SkippedMethod`] so callers
//! can tell "no methods" apart from "methods of an unsupported shape".

mod extract;
mod load;
mod types;

pub use extract::*;
pub use load::*;
pub use types::*;
