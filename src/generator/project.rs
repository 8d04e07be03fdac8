use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::templates::{
    render_converter, render_gateway, render_handler, render_server, render_service,
};
use super::writer::{FileWriter, WriteOutcome, WritePolicy};
use crate::config::ScaffoldConfig;
use crate::discovery::{read_root_import_path, scan_modules, RegistrationDescriptor};
use crate::error::{Result, ScaffoldError};
use crate::module::ModuleConfig;
use crate::naming::join_import_path;
use crate::proto::{extract_module_methods, ServiceMethod, SkippedMethod};
use crate::toolchain;

/// File name of the aggregate gRPC server inside the RPC directory
pub const SERVER_FILE_NAME: &str = "server.go";
/// File name of the aggregate gateway inside the gateway directory
pub const GATEWAY_FILE_NAME: &str = "gateway.go";
/// File name of the per-module converter stub
pub const CONVERTER_FILE_NAME: &str = "converter.go";

/// Switches for `module add`
#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
    /// Skip proto validation and the protocol compiler run
    pub skip_protogen: bool,
    /// Skip `go fmt` and `go mod tidy`
    pub no_format: bool,
    /// Report what would be written without touching anything
    pub dry_run: bool,
}

/// One generated file and what happened to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Result of `module add`
#[derive(Debug, Clone)]
pub struct AddReport {
    pub module: ModuleConfig,
    pub methods: Vec<ServiceMethod>,
    /// Methods found but not scaffolded (streaming and other shapes)
    pub skipped: Vec<SkippedMethod>,
    /// Files in write order: service, handlers, converter
    pub files: Vec<WrittenFile>,
}

/// Result of `module register` / `gateway register`
#[derive(Debug, Clone)]
pub struct RegisterReport {
    /// Modules in registration order
    pub modules: Vec<RegistrationDescriptor>,
    /// `None` when no module was found and nothing was written
    pub file: Option<WrittenFile>,
}

/// Scaffold the application layer of one module
///
/// Proto validation, protocol compiler run, method extraction, then
/// create-only writes of `service.go`, one `rpc_<method>.go` per unary method
/// and `converter.go`, then `go fmt` / `go mod tidy`. Everything is rendered
/// before the first write, so a generation error leaves the tree untouched.
///
/// # Errors
///
/// - [`ScaffoldError::Generation`] for an invalid module name or import path,
///   or when two methods map to the same handler file
/// - [`ScaffoldError::Discovery`] when the proto directory is missing or empty
/// - [`ScaffoldError::Extraction`] when no interface file or method is found
/// - [`ScaffoldError::Tool`] / [`ScaffoldError::Write`] from the tools and writes
pub fn add_module(
    root: &Path,
    config: &ScaffoldConfig,
    module_name: &str,
    target_module: &str,
    options: AddOptions,
) -> Result<AddReport> {
    info!("Starting to create module {module_name} under {target_module}");
    let module = ModuleConfig::new(root, module_name, target_module, config)?;
    let writer = FileWriter::new(options.dry_run);

    if options.skip_protogen {
        info!("Skipping proto validation and protoc");
    } else {
        validate_proto_dir(&module.proto_path)?;
        if writer.is_dry_run() {
            info!("Dry run: not running `{}`", config.tools.protoc.join(" "));
        } else {
            toolchain::run_protoc(root, config)?;
        }
    }

    info!("Extracting service methods...");
    let extraction = extract_module_methods(
        &module.protogen_path,
        &config.interface_file_suffix,
        module_name,
    )?;
    check_handler_collisions(&extraction.methods)?;
    info!("Extracted {} service method(s)", extraction.methods.len());

    let mut rendered = Vec::with_capacity(extraction.methods.len() + 2);
    rendered.push((
        module.app_path.join(&config.module_marker),
        render_service(&module)?,
    ));
    for method in &extraction.methods {
        rendered.push((
            module.app_path.join(&method.file_name),
            render_handler(&module, method)?,
        ));
    }
    rendered.push((
        module.app_path.join(CONVERTER_FILE_NAME),
        render_converter(&module)?,
    ));

    let mut files = Vec::with_capacity(rendered.len());
    for (path, content) in rendered {
        let outcome = writer.write(&path, &content, WritePolicy::CreateOnly)?;
        files.push(WrittenFile { path, outcome });
    }

    if !options.no_format && !writer.is_dry_run() {
        toolchain::go_fmt(root, config)?;
        toolchain::go_mod_tidy(root, config)?;
    }

    info!("🎉 Module '{module_name}' created");
    info!("Next steps:");
    info!("1. Implement business logic in the generated handlers");
    info!("2. Run `rpcscaffold module register` and `rpcscaffold gateway register`");
    info!("3. Add the data-store models the converter maps to");

    Ok(AddReport {
        module,
        methods: extraction.methods,
        skipped: extraction.skipped,
        files,
    })
}

/// Regenerate the aggregate gRPC server from every discovered module
///
/// With no modules, logs and writes nothing.
///
/// # Errors
///
/// Returns discovery, generation or write errors; per-module extraction
/// failures only skip that module. Two modules that derive the same alias,
/// variable, wire package or service name are a generation error.
pub fn register_services(
    root: &Path,
    config: &ScaffoldConfig,
    dry_run: bool,
) -> Result<RegisterReport> {
    let root_import = read_root_import_path(&config.project_marker_path(root))?;
    let modules = scan_modules(root, &root_import, config)?;
    if modules.is_empty() {
        info!("No modules found to register");
        return Ok(RegisterReport {
            modules,
            file: None,
        });
    }

    check_registration_collisions(&modules)?;
    let model_import = join_import_path(&root_import, &[config.model_package.as_str()]);
    let content = render_server(&model_import, &config.grpc_addr, &modules)?;
    let path = config.rpc_path(root).join(SERVER_FILE_NAME);
    let outcome = FileWriter::new(dry_run).write(&path, &content, WritePolicy::Replace)?;
    info!("Registered {} service(s)", modules.len());
    Ok(RegisterReport {
        modules,
        file: Some(WrittenFile { path, outcome }),
    })
}

/// Regenerate the aggregate HTTP gateway from every discovered module
///
/// # Errors
///
/// Same as [`register_services`].
pub fn register_gateway(
    root: &Path,
    config: &ScaffoldConfig,
    dry_run: bool,
) -> Result<RegisterReport> {
    let root_import = read_root_import_path(&config.project_marker_path(root))?;
    let modules = scan_modules(root, &root_import, config)?;
    if modules.is_empty() {
        info!("No modules found to register in gateway");
        return Ok(RegisterReport {
            modules,
            file: None,
        });
    }

    check_registration_collisions(&modules)?;
    let content = render_gateway(&modules)?;
    let path = config.gateway_path(root).join(GATEWAY_FILE_NAME);
    let outcome = FileWriter::new(dry_run).write(&path, &content, WritePolicy::Replace)?;
    info!("Registered {} gateway endpoint(s)", modules.len());
    Ok(RegisterReport {
        modules,
        file: Some(WrittenFile { path, outcome }),
    })
}

/// Require `proto/<module>` to exist and hold at least one `.proto` file
fn validate_proto_dir(proto_path: &Path) -> Result<()> {
    info!("Checking proto directory at {}...", proto_path.display());
    if !proto_path.is_dir() {
        return Err(ScaffoldError::discovery(format!(
            "proto directory does not exist: {}",
            proto_path.display()
        )));
    }
    let entries = fs::read_dir(proto_path).map_err(|e| {
        ScaffoldError::discovery_io(format!("failed to list {}", proto_path.display()), e)
    })?;
    let count = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let path = entry.path();
            path.is_file() && path.extension().is_some_and(|ext| ext == "proto")
        })
        .count();
    if count == 0 {
        return Err(ScaffoldError::discovery(format!(
            "no proto files found in directory: {}",
            proto_path.display()
        )));
    }
    info!("Found {count} proto file(s)");
    Ok(())
}

/// Fail when two methods would be written to the same handler file
pub(crate) fn check_handler_collisions(methods: &[ServiceMethod]) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for method in methods {
        if let Some(first) = seen.insert(&method.file_name, &method.name) {
            return Err(ScaffoldError::generation(format!(
                "methods {first} and {} both map to handler file {}",
                method.name, method.file_name
            )));
        }
    }
    Ok(())
}

/// Fail when two modules would declare the same name in an aggregate file
pub(crate) fn check_registration_collisions(modules: &[RegistrationDescriptor]) -> Result<()> {
    let fields: [(&str, fn(&RegistrationDescriptor) -> &str); 4] = [
        ("service alias", |m| m.service_alias.as_str()),
        ("service variable", |m| m.service_var.as_str()),
        ("wire package", |m| m.pb_package.as_str()),
        ("service name", |m| m.service_name.as_str()),
    ];
    for (label, field) in fields {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for module in modules {
            if let Some(first) = seen.insert(field(module), &module.module_name) {
                return Err(ScaffoldError::generation(format!(
                    "modules {first} and {} both use {label} {}",
                    module.module_name,
                    field(module)
                )));
            }
        }
    }
    Ok(())
}
