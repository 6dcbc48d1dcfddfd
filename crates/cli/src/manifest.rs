use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use crate::log;
use crate::report::{Error, ErrorExt, Report};

#[derive(Deserialize)]
struct Metadata {
    packages: Vec<Package>,
    target_directory: PathBuf,
}

#[derive(Deserialize)]
struct Package {
    name: String,
    version: String,
    manifest_path: PathBuf,
    targets: Vec<Target>,
}

#[derive(Deserialize)]
struct Target {
    name: String,
    crate_types: Vec<String>,
}

pub struct Manifest {
    pub crate_name: String,
    pub crate_version: String,
    /// Directory containing the package `Cargo.toml`.
    pub root: PathBuf,
    /// File stem of the compiled `.wasm`.
    pub artifact: String,
    pub target: PathBuf,
}

pub fn manifest(package: Option<&str>) -> Report<Manifest> {
    let out = Command::new("cargo")
        .args([
            "metadata",
            "--format-version=1",
            "--filter-platform=wasm32-unknown-unknown",
            "--no-deps",
        ])
        .output()
        .message("failed to run cargo")?;

    if !out.status.success() {
        let err = String::from_utf8_lossy(&out.stderr);
        return Err(Error::message(format!(
            "failed to read cargo metadata\n{err}",
        )));
    }

    let metadata: Metadata =
        serde_json::from_slice(&out.stdout).message("failed to parse cargo metadata")?;

    let cwd = env::current_dir().message("failed to get current directory")?;
    let here = cwd.join("Cargo.toml");
    let here = fs::canonicalize(&here).unwrap_or(here);

    let manifest = select(metadata, package, &here)?;

    log::info!(
        "found `{}` at {}, artifact `{}.wasm`",
        manifest.crate_name,
        manifest.root.display(),
        manifest.artifact,
    );

    Ok(manifest)
}

/// Pick the package named `package`, or the one whose manifest is `here`.
fn select(metadata: Metadata, package: Option<&str>, here: &Path) -> Report<Manifest> {
    let Metadata {
        packages,
        target_directory,
    } = metadata;

    let found = match package {
        Some(name) => packages
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::message(format!("package `{name}` not found in workspace")))?,
        None => packages
            .into_iter()
            .find(|p| p.manifest_path == here)
            .ok_or_else(|| {
                Error::message(format!(
                    "no package manifest at {}; run from a crate directory or use --package",
                    here.display(),
                ))
            })?,
    };

    let Some(lib) = found
        .targets
        .iter()
        .find(|t| t.crate_types.iter().any(|ty| ty == "cdylib"))
    else {
        return Err(Error::message(format!(
            "package `{}` has no cdylib target; set `crate-type = [\"cdylib\"]` under [lib]",
            found.name,
        )));
    };

    let artifact = lib.name.replace('-', "_");
    let root = match found.manifest_path.parent() {
        Some(root) => root.to_path_buf(),
        None => PathBuf::from("."),
    };

    Ok(Manifest {
        crate_name: found.name,
        crate_version: found.version,
        root,
        artifact,
        target: target_directory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const METADATA: &str = r#"{
        "packages": [
            {
                "name": "counter",
                "version": "0.1.0",
                "manifest_path": "/work/crates/counter/Cargo.toml",
                "targets": [
                    { "name": "counter", "kind": ["cdylib", "rlib"], "crate_types": ["cdylib", "rlib"] },
                    { "name": "surface", "kind": ["test"], "crate_types": ["bin"] }
                ]
            },
            {
                "name": "counter-cli",
                "version": "0.1.0",
                "manifest_path": "/work/crates/cli/Cargo.toml",
                "targets": [
                    { "name": "counter", "kind": ["bin"], "crate_types": ["bin"] }
                ]
            },
            {
                "name": "dashed-app",
                "version": "0.2.0",
                "manifest_path": "/work/crates/dashed/Cargo.toml",
                "targets": [
                    { "name": "dashed-app", "kind": ["cdylib"], "crate_types": ["cdylib"] }
                ]
            }
        ],
        "target_directory": "/work/target",
        "version": 1
    }"#;

    fn metadata() -> Metadata {
        serde_json::from_str(METADATA).unwrap()
    }

    #[test]
    fn select_by_name() {
        let m = select(metadata(), Some("counter"), Path::new("/elsewhere/Cargo.toml")).unwrap();

        assert_eq!(m.crate_name, "counter");
        assert_eq!(m.crate_version, "0.1.0");
        assert_eq!(m.root, Path::new("/work/crates/counter"));
        assert_eq!(m.artifact, "counter");
        assert_eq!(m.target, Path::new("/work/target"));
    }

    #[test]
    fn select_by_current_manifest() {
        let m = select(metadata(), None, Path::new("/work/crates/dashed/Cargo.toml")).unwrap();

        assert_eq!(m.crate_name, "dashed-app");
        assert_eq!(m.artifact, "dashed_app");
    }

    #[test]
    fn requires_cdylib() {
        let err = select(metadata(), Some("counter-cli"), Path::new("/")).err().unwrap();

        assert!(err.to_string().contains("has no cdylib target"));
    }

    #[test]
    fn unknown_package() {
        let err = select(metadata(), Some("nope"), Path::new("/")).err().unwrap();

        assert_eq!(err.to_string(), "package `nope` not found in workspace");
    }

    #[test]
    fn outside_any_package() {
        let err = select(metadata(), None, Path::new("/tmp/Cargo.toml")).err().unwrap();

        assert!(err.to_string().contains("use --package"));
    }
}
