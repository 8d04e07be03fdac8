use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::types::{Extraction, ServiceMethod, SkippedMethod};
use crate::error::{ExtractionFailure, Result, ScaffoldError};

// `type CourseServiceServer interface {`. Stream helper interfaces such as
// `CourseService_WatchServer` are filtered out after matching.
static INTERFACE_OPEN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^\s*type\s+(\w+)Server\s+interface\s*\{").unwrap()
});

// `Name(<ctx>, *Request) (*Response, error)`
static UNARY_METHOD: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(
        r"^\s*(\w+)\s*\(\s*[^,()]*,\s*[^,()]*\*\s*(?:\w+\.)?(\w+)\s*\)\s*\(\s*\*\s*(?:\w+\.)?(\w+)\s*,\s*error\s*\)",
    )
    .unwrap()
});

static EXPORTED_METHOD: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^\s*([A-Z]\w*)\s*\(").unwrap()
});

fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn brace_delta(code: &str) -> isize {
    code.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

/// Scan generated Go source for service interfaces
///
/// Never fails; an input without any interface yields an empty
/// [`Extraction`]. Brace depth is tracked inside each interface block, so a
/// nested `interface{}` parameter or a `}` inside a trailing comment does not
/// end the block early.
///
/// # Example
///
/// ```
/// use rpcscaffold::proto::scan_interfaces;
///
/// let src = "type CourseServiceServer interface {\n\
///            \tGetCourse(context.Context, *GetCourseRequest) (*GetCourseResponse, error)\n\
///            }\n";
/// let found = scan_interfaces(src);
/// assert_eq!(found.methods[0].file_name, "rpc_get_course.go");
/// ```
#[must_use]
pub fn scan_interfaces(source: &str) -> Extraction {
    let mut out = Extraction::default();
    let mut depth: isize = 0;

    for line in source.lines() {
        let code = strip_line_comment(line);

        if depth <= 0 {
            if let Some(caps) = INTERFACE_OPEN.captures(code) {
                if caps[1].contains('_') {
                    continue;
                }
                out.interfaces += 1;
                depth = brace_delta(code);
                debug!(interface = %format!("{}Server", &caps[1]), "entering service interface");
            }
            continue;
        }

        let at_top_level = depth == 1;
        depth += brace_delta(code);
        if depth <= 0 || !at_top_level {
            continue;
        }

        if let Some(caps) = UNARY_METHOD.captures(code) {
            out.methods
                .push(ServiceMethod::new(&caps[1], &caps[2], &caps[3]));
        } else if let Some(caps) = EXPORTED_METHOD.captures(code) {
            out.skipped.push(SkippedMethod {
                name: caps[1].to_string(),
                signature: code.trim().to_string(),
            });
        }
    }

    out
}

/// Extract the unary methods declared in one interface file
///
/// `module` is only used to label the error.
///
/// # Errors
///
/// Returns a recoverable [`ScaffoldError::Extraction`] with
/// [`ExtractionFailure::NoMethods`] when no unary method is found.
pub fn extract_methods(source: &str, module: &str) -> Result<Extraction> {
    let extraction = scan_interfaces(source);
    if extraction.methods.is_empty() {
        return Err(ScaffoldError::extraction(module, ExtractionFailure::NoMethods));
    }
    Ok(extraction)
}
