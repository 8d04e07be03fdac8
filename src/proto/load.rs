use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::extract::scan_interfaces;
use super::types::Extraction;
use crate::error::{ExtractionFailure, Result, ScaffoldError};

/// List `*<suffix>` files directly inside `dir`, sorted by file name
///
/// A missing directory yields an empty list.
///
/// # Errors
///
/// Returns [`ScaffoldError::Discovery`] if the directory exists but cannot be listed.
pub fn find_interface_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir).map_err(|e| {
        ScaffoldError::discovery_io(format!("failed to list {}", dir.display()), e)
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(suffix))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Extract every unary method a module's generated interface files declare
///
/// Files are read in sorted order and their methods concatenated. A file
/// that cannot be read is skipped with a warning. Streaming methods are
/// logged as unsupported.
///
/// # Errors
///
/// Returns a recoverable [`ScaffoldError::Extraction`] when no interface file
/// exists ([`ExtractionFailure::NoInterfaceFiles`]) or none of them declares
/// a unary method ([`ExtractionFailure::NoMethods`]).
pub fn extract_module_methods(dir: &Path, suffix: &str, module: &str) -> Result<Extraction> {
    let files = find_interface_files(dir, suffix)?;
    if files.is_empty() {
        return Err(ScaffoldError::extraction(
            module,
            ExtractionFailure::NoInterfaceFiles {
                dir: dir.to_path_buf(),
            },
        ));
    }
    info!("Found {} gRPC definition file(s) for {module}", files.len());

    let mut all = Extraction::default();
    for (i, file) in files.iter().enumerate() {
        debug!("Parsing file {}/{}: {}", i + 1, files.len(), file.display());
        let source = match fs::read_to_string(file) {
            Ok(source) => source,
            Err(e) => {
                warn!("Skipping file {}: {e}", file.display());
                continue;
            }
        };
        let found = scan_interfaces(&source);
        debug!("Found {} method(s) in {}", found.methods.len(), file.display());
        all.merge(found);
    }

    for skipped in &all.skipped {
        warn!(
            "Skipping {}::{}: only unary request/response methods are scaffolded ({})",
            module, skipped.name, skipped.signature
        );
    }

    if all.methods.is_empty() {
        return Err(ScaffoldError::extraction(module, ExtractionFailure::NoMethods));
    }
    Ok(all)
}
