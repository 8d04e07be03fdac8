//! # Project Layout Configuration
//!
//! Every path the scaffolder reads or writes is relative to the project root
//! and follows a conventional layout:
//!
//! ```text
//! project/
//! ├── go.mod                       # project marker: `module <root-import-path>`
//! ├── proto/<module>/*.proto       # protocol definitions
//! ├── protogen/<module>/*_grpc.pb.go
//! └── app/
//!     ├── rpc/
//!     │   ├── server.go            # aggregate, machine-owned
//!     │   └── <module>/service.go  # per-module marker, developer-owned
//!     └── gateway/gateway.go       # aggregate, machine-owned
//! ```
//!
//! A project can override any of these in an optional `rpcscaffold.toml` at
//! its root. A missing file means "use the defaults"; a file that exists but
//! does not parse is an error.
//!
//! ```toml
//! rpc_dir = "internal/rpc"
//! grpc_addr = ":50051"
//!
//! [tools]
//! protoc = ["buf", "generate"]
//! ```
//!
//! ## Environment Variables
//!
//! The program name of each external tool can be replaced without touching
//! the config file:
//!
//! - `RPCSCAFFOLD_GO_BIN` - replaces `go`
//! - `RPCSCAFFOLD_MAKE_BIN` - replaces the first word of `tools.protoc` when it is `make`
//! - `RPCSCAFFOLD_SQLC_BIN` - replaces the first word of `tools.sqlc` when it is `sqlc`

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

/// File name looked up at the project root
pub const CONFIG_FILE_NAME: &str = "rpcscaffold.toml";

/// Layout and tool settings for one project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Directory holding `<module>/*.proto`
    pub proto_dir: String,
    /// Directory the protocol compiler writes Go packages into
    pub protogen_dir: String,
    /// Directory holding one application package per module
    pub rpc_dir: String,
    /// Directory of the aggregate gateway file
    pub gateway_dir: String,
    /// Project marker declaring `module <root-import-path>`
    pub project_marker: String,
    /// File whose presence makes a module directory discoverable
    pub module_marker: String,
    /// Suffix of protoc-generated service interface files
    pub interface_file_suffix: String,
    /// Package (relative to the root import path) holding data-store models
    pub model_package: String,
    /// Listen address baked into the aggregate server
    pub grpc_addr: String,
    /// External tool command lines
    pub tools: ToolsConfig,
}

/// External tool command lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Protocol compiler invocation
    pub protoc: Vec<String>,
    /// SQL code generator invocation
    pub sqlc: Vec<String>,
    /// Go toolchain binary (`go fmt`, `go mod tidy`)
    pub go: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            proto_dir: "proto".to_string(),
            protogen_dir: "protogen".to_string(),
            rpc_dir: "app/rpc".to_string(),
            gateway_dir: "app/gateway".to_string(),
            project_marker: "go.mod".to_string(),
            module_marker: "service.go".to_string(),
            interface_file_suffix: "_grpc.pb.go".to_string(),
            model_package: "internal/repo".to_string(),
            grpc_addr: ":9001".to_string(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            protoc: vec!["make".to_string(), "protoc".to_string()],
            sqlc: vec!["sqlc".to_string(), "generate".to_string()],
            go: "go".to_string(),
        }
    }
}

impl ScaffoldConfig {
    /// Load the config for `root`, falling back to defaults when no file exists
    ///
    /// `explicit` takes priority over `<root>/rpcscaffold.toml`. An explicit
    /// path that does not exist is an error; a missing default file is not.
    /// Tool environment overrides are applied after loading.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] when the file cannot be read or parsed.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => root.join(path),
            None => root.join(CONFIG_FILE_NAME),
        };
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else if explicit.is_some() {
            return Err(ScaffoldError::Config {
                path,
                message: "file does not exist".to_string(),
            });
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a config file
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ScaffoldError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents).map_err(|message| ScaffoldError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_toml(contents: &str) -> std::result::Result<Self, String> {
        let config: Self = toml::from_str(contents).map_err(|e| e.to_string())?;
        if config.tools.protoc.is_empty() {
            return Err("tools.protoc must not be empty".to_string());
        }
        if config.tools.sqlc.is_empty() {
            return Err("tools.sqlc must not be empty".to_string());
        }
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(go) = env::var("RPCSCAFFOLD_GO_BIN") {
            self.tools.go = go;
        }
        replace_program(&mut self.tools.protoc, "make", "RPCSCAFFOLD_MAKE_BIN");
        replace_program(&mut self.tools.sqlc, "sqlc", "RPCSCAFFOLD_SQLC_BIN");
    }

    /// `<root>/proto`
    #[must_use]
    pub fn proto_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.proto_dir)
    }

    /// `<root>/protogen`
    #[must_use]
    pub fn protogen_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.protogen_dir)
    }

    /// `<root>/app/rpc`
    #[must_use]
    pub fn rpc_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.rpc_dir)
    }

    /// `<root>/app/gateway`
    #[must_use]
    pub fn gateway_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.gateway_dir)
    }

    /// `<root>/go.mod`
    #[must_use]
    pub fn project_marker_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.project_marker)
    }
}

/// Join a `/`-separated layout path onto `root` one segment at a time
fn resolve(root: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .fold(root.to_path_buf(), |acc, s| acc.join(s))
}

fn replace_program(command: &mut [String], default: &str, var: &str) {
    if let (Some(program), Ok(bin)) = (command.first_mut(), env::var(var)) {
        if program.as_str() == default {
            *program = bin;
        }
    }
}
