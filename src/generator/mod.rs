//! # Generator Module
//!
//! Turns extracted methods and discovered modules into Go source and puts it
//! on disk.
//!
//! ## Overview
//!
//! Five artifact kinds are generated from Askama templates in `templates/`:
//!
//! - **Service** (`service.go`) - struct embedding the unimplemented server, plus constructor
//! - **Handler** (`rpc_<method>.go`) - one per unary method; rejects a nil request
//! - **Converter** (`converter.go`) - empty wire/model mapping functions
//! - **Server** (`app/rpc/server.go`) - registers every module on one gRPC server
//! - **Gateway** (`app/gateway/gateway.go`) - grpc-gateway mux with CORS and `/healthz`
//!
//! ## Architecture
//!
//! ```text
//! module add:      proto check → protoc → extract → render ×N → write (create-only)
//! module register: discover → render server  → write (replace)
//! gateway register: discover → render gateway → write (replace)
//! ```
//!
//! Rendering is pure: the `render_*` functions never touch the file system
//! and validate every identifier they interpolate. [`FileWriter`] applies the
//! ownership policy. Per-module files belong to the developer once created and
//! are never overwritten; the two aggregates belong to the tool and are
//! rewritten on every run, so hand edits to them are lost.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use rpcscaffold::config::ScaffoldConfig;
//! use rpcscaffold::generator::{add_module, register_services, AddOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = Path::new(".");
//! let config = ScaffoldConfig::load(root, None)?;
//! add_module(root, &config, "course", "github.com/acme/school", AddOptions::default())?;
//! register_services(root, &config, false)?;
//! # Ok(())
//! # }
//! ```

mod project;
mod templates;
mod writer;

pub use project::*;
pub use templates::*;
pub use writer::*;
