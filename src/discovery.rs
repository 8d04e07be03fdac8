//! # Module Discovery
//!
//! Finds every scaffolded module under the RPC directory and derives the
//! names the aggregate server and gateway need to wire it in.
//!
//! A directory counts as a module only if it holds the per-module marker
//! (`service.go` by default). Directories without it are silently invisible.
//! Descriptors come back sorted by directory name; that order is the
//! canonical registration order and is what makes the aggregate files
//! byte-identical across runs.
//!
//! Failure granularity:
//!
//! - project marker missing, unreadable or without a `module` line → fatal
//! - RPC directory absent → fatal
//! - one module with an unusable name or unreadable marker → warning, skipped

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ScaffoldConfig;
use crate::error::{ExtractionFailure, Result, ScaffoldError};
use crate::naming::{
    join_import_path, package_name, pb_package, service_alias, service_var, to_pascal_case,
    validate_import_path, validate_package_name,
};

/// How one discovered module is wired into the aggregate server and gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationDescriptor {
    /// Directory name under the RPC directory
    pub module_name: String,
    /// PascalCase service name (`CourseCatalog`)
    pub service_name: String,
    /// Go package of the module's application code
    pub package_name: String,
    /// Alias of the wire-format package (`coursecatalogpb`)
    pub pb_package: String,
    /// Import path of the wire-format package
    pub pb_import_path: String,
    /// Alias of the module's application package (`coursecatalogsv`)
    pub service_alias: String,
    /// Import path of the module's application package
    pub service_import_path: String,
    /// gRPC registration call (`coursepb.RegisterCourseServiceServer`)
    pub register_func: String,
    /// Gateway registration call (`coursepb.RegisterCourseServiceHandlerFromEndpoint`)
    pub gateway_register_func: String,
    /// Local variable holding the service instance (`courseService`)
    pub service_var: String,
}

impl RegistrationDescriptor {
    /// Derive the descriptor for `module_name`
    ///
    /// # Errors
    ///
    /// Returns a recoverable [`ScaffoldError::Extraction`] when the module
    /// name does not yield a valid Go package.
    pub fn derive(module_name: &str, root_import: &str, config: &ScaffoldConfig) -> Result<Self> {
        let package = package_name(module_name);
        validate_package_name(&package).map_err(|reason| {
            ScaffoldError::extraction(module_name, ExtractionFailure::InvalidModuleName { reason })
        })?;

        let service_name = to_pascal_case(module_name);
        let pb = pb_package(module_name);
        Ok(Self {
            module_name: module_name.to_string(),
            pb_import_path: join_import_path(
                root_import,
                &[config.protogen_dir.as_str(), package.as_str()],
            ),
            service_alias: service_alias(&service_name),
            service_import_path: join_import_path(
                root_import,
                &[config.rpc_dir.as_str(), module_name],
            ),
            register_func: format!("{pb}.Register{service_name}ServiceServer"),
            gateway_register_func: format!(
                "{pb}.Register{service_name}ServiceHandlerFromEndpoint"
            ),
            service_var: service_var(&service_name),
            package_name: package,
            pb_package: pb,
            service_name,
        })
    }
}

/// Read the root import path from the project marker (`module <path>` line)
///
/// # Errors
///
/// Returns [`ScaffoldError::Discovery`] when the file is missing or
/// unreadable, has no `module` line, or declares an unusable path.
pub fn read_root_import_path(marker: &Path) -> Result<String> {
    let content = fs::read_to_string(marker).map_err(|e| {
        ScaffoldError::discovery_io(format!("failed to read {}", marker.display()), e)
    })?;
    let path = parse_module_line(&content).ok_or_else(|| {
        ScaffoldError::discovery(format!("module name not found in {}", marker.display()))
    })?;
    validate_import_path(&path)
        .map_err(|reason| ScaffoldError::discovery(format!("{}: {reason}", marker.display())))?;
    Ok(path)
}

fn parse_module_line(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let rest = line.strip_prefix("module ")?;
        let rest = rest.split("//").next().unwrap_or(rest);
        let path = rest.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// Discover every module under the RPC directory, sorted by directory name
///
/// # Errors
///
/// Returns [`ScaffoldError::Discovery`] when the project marker cannot be
/// read or the RPC directory does not exist or cannot be listed. Per-module
/// failures are logged and the module is skipped.
pub fn discover_modules(
    root: &Path,
    config: &ScaffoldConfig,
) -> Result<Vec<RegistrationDescriptor>> {
    let root_import = read_root_import_path(&config.project_marker_path(root))?;
    scan_modules(root, &root_import, config)
}

/// Discover modules with an already-known root import path
///
/// # Errors
///
/// Returns [`ScaffoldError::Discovery`] when the RPC directory does not
/// exist or cannot be listed.
pub fn scan_modules(
    root: &Path,
    root_import: &str,
    config: &ScaffoldConfig,
) -> Result<Vec<RegistrationDescriptor>> {
    let rpc_path = config.rpc_path(root);
    if !rpc_path.is_dir() {
        return Err(ScaffoldError::discovery(format!(
            "module root directory {} does not exist",
            rpc_path.display()
        )));
    }

    let entries = fs::read_dir(&rpc_path).map_err(|e| {
        ScaffoldError::discovery_io(format!("failed to read {}", rpc_path.display()), e)
    })?;
    let mut dirs: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name())
        .collect();
    dirs.sort();

    let mut registrations = Vec::new();
    for dir_name in dirs {
        let Some(module_name) = dir_name.to_str() else {
            warn!("Skipping non UTF-8 module directory {:?}", dir_name);
            continue;
        };
        let marker = rpc_path.join(module_name).join(&config.module_marker);
        if !marker.is_file() {
            debug!("Ignoring {module_name}: no {}", config.module_marker);
            continue;
        }

        match describe_module(&marker, module_name, root_import, config) {
            Ok(descriptor) => registrations.push(descriptor),
            Err(e) if e.is_recoverable() => {
                warn!("Failed to extract service info for {module_name}: {e}");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(registrations)
}

fn describe_module(
    marker: &Path,
    module_name: &str,
    root_import: &str,
    config: &ScaffoldConfig,
) -> Result<RegistrationDescriptor> {
    fs::read(marker).map_err(|e| {
        ScaffoldError::extraction(
            module_name,
            ExtractionFailure::UnreadableMarker {
                path: marker.to_path_buf(),
                message: e.to_string(),
            },
        )
    })?;
    RegistrationDescriptor::derive(module_name, root_import, config)
}
