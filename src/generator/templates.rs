use askama::Template;

use crate::discovery::RegistrationDescriptor;
use crate::error::{Result, ScaffoldError};
use crate::module::ModuleConfig;
use crate::naming::{validate_import_path, validate_package_name, validate_type_name};
use crate::proto::ServiceMethod;

/// Template data for `service.go`
#[derive(Template)]
#[template(path = "service.go.txt", escape = "none")]
pub struct ServiceTemplateData<'a> {
    pub package_name: &'a str,
    pub service_name: &'a str,
    pub pb_package: &'a str,
    pub pb_import_path: &'a str,
}

/// Template data for one `rpc_<method>.go` handler stub
///
/// The stub rejects a nil request with `codes.InvalidArgument` and otherwise
/// returns an empty response.
#[derive(Template)]
#[template(path = "handler.go.txt", escape = "none")]
pub struct HandlerTemplateData<'a> {
    pub package_name: &'a str,
    pub service_name: &'a str,
    pub pb_package: &'a str,
    pub pb_import_path: &'a str,
    pub method: &'a ServiceMethod,
}

/// Template data for `converter.go`
#[derive(Template)]
#[template(path = "converter.go.txt", escape = "none")]
pub struct ConverterTemplateData<'a> {
    pub package_name: &'a str,
    pub service_name: &'a str,
    pub pb_package: &'a str,
    pub pb_import_path: &'a str,
    /// Last segment of the model import path
    pub model_alias: &'a str,
    pub model_import_path: &'a str,
}

/// Template data for the aggregate gRPC server
#[derive(Template)]
#[template(path = "server.go.txt", escape = "none")]
pub struct ServerTemplateData<'a> {
    pub model_import_path: &'a str,
    pub grpc_addr: &'a str,
    /// Modules in registration order
    pub registrations: &'a [RegistrationDescriptor],
}

/// Template data for the aggregate HTTP gateway
#[derive(Template)]
#[template(path = "gateway.go.txt", escape = "none")]
pub struct GatewayTemplateData<'a> {
    /// Modules in registration order
    pub registrations: &'a [RegistrationDescriptor],
}

fn finish(mut rendered: String) -> String {
    while rendered.ends_with('\n') {
        rendered.pop();
    }
    rendered.push('\n');
    rendered
}

fn check(what: &str, result: std::result::Result<(), String>) -> Result<()> {
    result.map_err(|reason| ScaffoldError::generation(format!("{what}: {reason}")))
}

fn check_module(module: &ModuleConfig) -> Result<()> {
    check("package", validate_package_name(&module.package_name))?;
    check("service", validate_type_name(&module.service_name))?;
    check("wire package", validate_package_name(&module.pb_package))?;
    check("import", validate_import_path(&module.pb_import_path))
}

fn check_registration(reg: &RegistrationDescriptor) -> Result<()> {
    check("service", validate_type_name(&reg.service_name))?;
    check("wire package", validate_package_name(&reg.pb_package))?;
    check("service alias", validate_package_name(&reg.service_alias))?;
    check("import", validate_import_path(&reg.pb_import_path))?;
    check("import", validate_import_path(&reg.service_import_path))
}

/// Package alias Go assigns to an import path (its last segment)
fn import_alias(import_path: &str) -> &str {
    import_path.rsplit('/').next().unwrap_or(import_path)
}

/// Render `service.go` for a module
///
/// # Errors
///
/// Returns [`ScaffoldError::Generation`] if a derived identifier is not
/// valid Go or the template fails to render.
pub fn render_service(module: &ModuleConfig) -> Result<String> {
    check_module(module)?;
    let rendered = ServiceTemplateData {
        package_name: &module.package_name,
        service_name: &module.service_name,
        pb_package: &module.pb_package,
        pb_import_path: &module.pb_import_path,
    }
    .render()?;
    Ok(finish(rendered))
}

/// Render the handler stub for one method
///
/// # Errors
///
/// Returns [`ScaffoldError::Generation`] if the method, request or response
/// name is not a valid Go identifier.
pub fn render_handler(module: &ModuleConfig, method: &ServiceMethod) -> Result<String> {
    check_module(module)?;
    check("method", validate_type_name(&method.name))?;
    check("request type", validate_type_name(&method.request_type))?;
    check("response type", validate_type_name(&method.response_type))?;
    let rendered = HandlerTemplateData {
        package_name: &module.package_name,
        service_name: &module.service_name,
        pb_package: &module.pb_package,
        pb_import_path: &module.pb_import_path,
        method,
    }
    .render()?;
    Ok(finish(rendered))
}

/// Render `converter.go` for a module
///
/// # Errors
///
/// Returns [`ScaffoldError::Generation`] if the model package path does not
/// end in a valid Go package name.
pub fn render_converter(module: &ModuleConfig) -> Result<String> {
    check_module(module)?;
    check("model import", validate_import_path(&module.model_import_path))?;
    let model_alias = import_alias(&module.model_import_path);
    check("model package", validate_package_name(model_alias))?;
    let rendered = ConverterTemplateData {
        package_name: &module.package_name,
        service_name: &module.service_name,
        pb_package: &module.pb_package,
        pb_import_path: &module.pb_import_path,
        model_alias,
        model_import_path: &module.model_import_path,
    }
    .render()?;
    Ok(finish(rendered))
}

/// Render the aggregate server wiring every registration in slice order
///
/// # Errors
///
/// Returns [`ScaffoldError::Generation`] if an identifier, import path or the
/// listen address cannot be interpolated safely.
pub fn render_server(
    model_import_path: &str,
    grpc_addr: &str,
    registrations: &[RegistrationDescriptor],
) -> Result<String> {
    check("model import", validate_import_path(model_import_path))?;
    if grpc_addr.is_empty()
        || !grpc_addr
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '-' | '[' | ']'))
    {
        return Err(ScaffoldError::generation(format!(
            "invalid gRPC listen address '{grpc_addr}'"
        )));
    }
    registrations.iter().try_for_each(check_registration)?;
    let rendered = ServerTemplateData {
        model_import_path,
        grpc_addr,
        registrations,
    }
    .render()?;
    Ok(finish(rendered))
}

/// Render the aggregate gateway registering every module in slice order
///
/// # Errors
///
/// Returns [`ScaffoldError::Generation`] if an identifier or import path
/// cannot be interpolated safely.
pub fn render_gateway(registrations: &[RegistrationDescriptor]) -> Result<String> {
    registrations.iter().try_for_each(check_registration)?;
    let rendered = GatewayTemplateData { registrations }.render()?;
    Ok(finish(rendered))
}
