//! Identifier derivation shared by every stage of the pipeline.
//!
//! All functions here are pure. Given the same module or method name they
//! always produce the same package, alias, type and file names, which is
//! what makes repeated generation byte-identical.

/// Suffix appended to the package name to form the wire-format package alias
pub const PB_PACKAGE_SUFFIX: &str = "pb";
/// Suffix appended to the lowercase service name to alias the service package
pub const SERVICE_ALIAS_SUFFIX: &str = "sv";
/// Prefix of every generated handler file
pub const HANDLER_FILE_PREFIX: &str = "rpc_";
/// Extension of every generated source file
pub const GO_FILE_EXTENSION: &str = ".go";

const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Convert a module name to PascalCase
///
/// Splits on `_`, `-` and whitespace, uppercases the first character of each
/// word, lowercases the rest and joins without a separator.
///
/// ```
/// use rpcscaffold::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("course_catalog"), "CourseCatalog");
/// assert_eq!(to_pascal_case("USER-profile"), "UserProfile");
/// ```
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a PascalCase or camelCase identifier to snake_case
///
/// An underscore is inserted before every uppercase character except the
/// first. Runs of capitals are not grouped, so `GetHTTPStatus` becomes
/// `get_h_t_t_p_status`; generated handler names already in use depend on
/// this exact behaviour.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Go package identifier for a module (`Course` -> `course`)
#[must_use]
pub fn package_name(module: &str) -> String {
    module.to_lowercase()
}

/// Alias of the module's generated wire-format package (`course` -> `coursepb`)
#[must_use]
pub fn pb_package(module: &str) -> String {
    format!("{}{PB_PACKAGE_SUFFIX}", package_name(module))
}

/// File name of the handler stub for one RPC method
///
/// ```
/// use rpcscaffold::naming::handler_file_name;
///
/// assert_eq!(handler_file_name("CreateCourse"), "rpc_create_course.go");
/// ```
#[must_use]
pub fn handler_file_name(method: &str) -> String {
    format!(
        "{HANDLER_FILE_PREFIX}{}{GO_FILE_EXTENSION}",
        to_snake_case(method)
    )
}

/// Variable holding the service instance in the aggregate server (`courseService`)
#[must_use]
pub fn service_var(service_name: &str) -> String {
    format!("{}Service", service_name.to_lowercase())
}

/// Import alias for the module's application package (`coursesv`)
#[must_use]
pub fn service_alias(service_name: &str) -> String {
    format!("{}{SERVICE_ALIAS_SUFFIX}", service_name.to_lowercase())
}

/// Check that `name` can be used verbatim as a Go package identifier
///
/// # Errors
///
/// Returns a description of the problem when the name is empty, contains
/// characters outside `[a-z0-9_]`, starts with a digit, or is a Go keyword.
pub fn validate_package_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("package name is empty".to_string()),
        Some(c) if !(c.is_ascii_lowercase() || c == '_') => {
            return Err(format!(
                "package name '{name}' must start with a lowercase letter or underscore"
            ));
        }
        Some(_) => {}
    }
    if let Some(bad) =
        chars.find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
    {
        return Err(format!("package name '{name}' contains invalid character '{bad}'"));
    }
    if GO_KEYWORDS.contains(&name) {
        return Err(format!("package name '{name}' is a Go keyword"));
    }
    Ok(())
}

/// Check that `name` is a Go identifier usable as a type name
///
/// # Errors
///
/// Returns a description of the problem when the name is not `[A-Za-z_][A-Za-z0-9_]*`.
pub fn validate_type_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("'{name}' is not a valid identifier"));
    }
    Ok(())
}

/// Check that `path` can be interpolated into a Go import string
///
/// # Errors
///
/// Returns a description of the problem for empty paths, empty segments, or
/// paths containing whitespace, quotes, backticks or backslashes.
pub fn validate_import_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("import path is empty".to_string());
    }
    if let Some(bad) = path
        .chars()
        .find(|&c| c.is_whitespace() || matches!(c, '"' | '`' | '\\'))
    {
        return Err(format!("import path '{path}' contains invalid character {bad:?}"));
    }
    if path.split('/').any(str::is_empty) {
        return Err(format!("import path '{path}' has an empty segment"));
    }
    Ok(())
}

/// Join an import root and relative segments with `/`, regardless of platform
#[must_use]
pub fn join_import_path(root: &str, segments: &[&str]) -> String {
    let mut out = root.trim_end_matches('/').to_string();
    for segment in segments {
        for part in segment.split(['/', '\\']).filter(|p| !p.is_empty()) {
            out.push('/');
            out.push_str(part);
        }
    }
    out
}
