//! Provenance sidecars: `<artifact stem>.provenance.json` next to every export.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: the CLI params and, optionally, a summary of
/// the graph that was exported.
pub struct Payload {
    pub params: Value,
    pub summary: Option<Value>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: Value) -> Self {
        self.summary = Some(summary);
        self
    }
}

/// Write the sidecar for `artifact` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = sidecar_path(artifact);
    if let Some(parent) = sidecar.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "roomgraph_version": roomgraph::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "summary": payload.summary,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

/// `out/klein.parquet` -> `out/klein.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// `GIT_COMMIT` if set, else the checkout's `HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_path_replaces_extension() {
        let base = Path::new("/tmp/out/klein.parquet");
        assert_eq!(
            sidecar_path(base),
            Path::new("/tmp/out/klein.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("edges")),
            Path::new("edges.provenance.json")
        );
    }

    #[test]
    fn git_rev_prefers_the_environment() {
        std::env::set_var("GIT_COMMIT", "abc123");
        assert_eq!(current_git_rev(), "abc123");
        std::env::remove_var("GIT_COMMIT");
        assert!(!current_git_rev().is_empty());
    }

    #[test]
    fn write_sidecar_records_params_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("edges.csv");
        fs::write(&artifact, "from,dir,to\n").unwrap();
        let payload =
            Payload::new(json!({"preset": "klein"})).with_summary(json!({"rooms": 16}));
        let path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["preset"], "klein");
        assert_eq!(parsed["summary"]["rooms"], 16);
        assert_eq!(parsed["roomgraph_version"], roomgraph::VERSION);
    }
}
