//! Library-contract loading.
//!
//! A prior output directory doubles as a contract: its per-namespace
//! `bindings.json` files describe the types the earlier package already
//! covers. The layout is fixed, so loading is a flat scan of namespace
//! directories rather than a recursive walk.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;
use tsbindgen_gate::LibraryContract;

#[derive(Deserialize)]
struct ContractBindingEntry {
    #[serde(rename = "clrName")]
    clr_name: String,
    #[serde(rename = "tsEmitName")]
    ts_emit_name: Option<String>,
}

/// Read a prior output directory into a [`LibraryContract`].
pub fn load_contract(dir: &Path) -> Result<LibraryContract, String> {
    let mut contract = LibraryContract::default();
    let entries = fs::read_dir(dir).map_err(|e| format!("{}: {e}", dir.display()))?;

    let mut namespace_dirs: Vec<std::path::PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    namespace_dirs.sort();

    for ns_dir in namespace_dirs {
        let bindings_path = ns_dir.join("bindings.json");
        if !bindings_path.is_file() {
            continue;
        }
        let raw = fs::read_to_string(&bindings_path)
            .map_err(|e| format!("{}: {e}", bindings_path.display()))?;
        let parsed: Vec<ContractBindingEntry> = serde_json::from_str(&raw)
            .map_err(|e| format!("{}: {e}", bindings_path.display()))?;
        for entry in parsed {
            if let Some(ts_name) = entry.ts_emit_name {
                contract.bindings.insert(entry.clr_name.clone(), ts_name);
            }
            contract.types.insert(entry.clr_name);
        }
    }

    debug!(types = contract.types.len(), "loaded library contract");
    Ok(contract)
}
