//! Per-invocation description of the module being scaffolded.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ScaffoldConfig;
use crate::error::{Result, ScaffoldError};
use crate::naming::{
    join_import_path, package_name, pb_package, to_pascal_case, validate_import_path,
    validate_package_name,
};

/// Everything derived from `module add <module-name> <target-root-import-path>`
///
/// Built once per invocation and never mutated afterwards. Every identifier
/// and import path is validated on construction, so templates can interpolate
/// them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleConfig {
    /// Module name as typed by the user (also the directory name)
    pub module_name: String,
    /// Root import path of the Go project (e.g., `github.com/acme/school`)
    pub target_module: String,
    /// Go package of the generated application code (`course`)
    pub package_name: String,
    /// PascalCase service name (`Course`)
    pub service_name: String,
    /// Alias of the wire-format package (`coursepb`)
    pub pb_package: String,
    /// Import path of the wire-format package
    pub pb_import_path: String,
    /// Import path of the data-store models package
    pub model_import_path: String,
    /// `proto/<module>`
    pub proto_path: PathBuf,
    /// `app/rpc/<module>`
    pub app_path: PathBuf,
    /// `protogen/<module>`
    pub protogen_path: PathBuf,
}

impl ModuleConfig {
    /// Derive the module configuration
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Generation`] when the module name does not
    /// yield a valid Go package or the import path cannot be interpolated.
    pub fn new(
        root: &Path,
        module_name: &str,
        target_module: &str,
        config: &ScaffoldConfig,
    ) -> Result<Self> {
        let package = package_name(module_name);
        validate_package_name(&package).map_err(|reason| {
            ScaffoldError::generation(format!("module '{module_name}': {reason}"))
        })?;
        validate_import_path(target_module).map_err(ScaffoldError::generation)?;

        let service_name = to_pascal_case(module_name);
        Ok(Self {
            module_name: module_name.to_string(),
            target_module: target_module.to_string(),
            pb_package: pb_package(module_name),
            pb_import_path: join_import_path(
                target_module,
                &[config.protogen_dir.as_str(), package.as_str()],
            ),
            model_import_path: join_import_path(target_module, &[config.model_package.as_str()]),
            package_name: package,
            service_name,
            proto_path: config.proto_path(root).join(module_name),
            app_path: config.rpc_path(root).join(module_name),
            protogen_path: config.protogen_path(root).join(module_name),
        })
    }
}
