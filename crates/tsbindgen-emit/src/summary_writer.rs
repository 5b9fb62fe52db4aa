//! Validation-summary output.
//!
//! The summary JSON and the flat diagnostics file are written on success
//! and on halt alike, so downstream tooling always finds a stable
//! artifact.

use crate::EmitError;
use std::fs;
use std::path::Path;
use tsbindgen_gate::ValidationSummary;

pub fn write_summary(out_dir: &Path, summary: &ValidationSummary) -> Result<(), EmitError> {
    fs::create_dir_all(out_dir).map_err(|e| EmitError::Io(out_dir.to_path_buf(), e))?;

    let summary_path = out_dir.join("validation-summary.json");
    fs::write(&summary_path, summary.to_json())
        .map_err(|e| EmitError::Io(summary_path.clone(), e))?;

    let mut lines = String::new();
    for diag in &summary.diagnostics {
        lines.push_str(&format!(
            "{} {}: {}\n",
            diag.code, diag.severity, diag.message
        ));
    }
    let diag_path = out_dir.join("diagnostics.txt");
    fs::write(&diag_path, lines).map_err(|e| EmitError::Io(diag_path.clone(), e))?;
    Ok(())
}
