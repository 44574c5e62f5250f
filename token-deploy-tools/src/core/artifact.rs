// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Contracts are compiled by an external toolchain; this module only looks up what it produced.
//! The on-disk layout is Hardhat's: `<root>/contracts/<source>.sol/<Name>.json`, alongside a
//! `<Name>.dbg.json` file that is ignored here.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    json_abi::{Constructor, JsonAbi},
    primitives::Bytes,
};
use serde::Deserialize;

/// Default artifact directory of a Hardhat project.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Bytecode and interface of a compiled contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: Option<String>,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn constructor(&self) -> Option<&Constructor> {
        self.abi.constructor()
    }
}

/// Read-only lookup of compiled artifacts by contract name.
pub trait ArtifactStore {
    fn artifact(&self, contract_name: &str) -> Result<Artifact, ArtifactError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("no artifact for contract {name} under {}; has the project been compiled?", .root.display())]
    NotFound { name: String, root: PathBuf },
    #[error(
        "multiple artifacts for contract {name}: {}; use a fully qualified name such as {}",
        .candidates.join(", "),
        .candidates.first().map(String::as_str).unwrap_or("contracts/Token.sol:Token")
    )]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
    #[error("contract {name} has no bytecode (interface or abstract contract?)")]
    NotDeployable { name: String },
    #[error("failed to read artifact {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact {}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid bytecode in {}: {reason}", .path.display())]
    InvalidBytecode { path: PathBuf, reason: String },
    #[error("invalid artifact search pattern")]
    Pattern(#[from] glob::PatternError),
}

/// Artifact as written by Hardhat's compile task.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifactFile {
    contract_name: String,
    #[serde(default)]
    source_name: Option<String>,
    abi: JsonAbi,
    bytecode: String,
}

/// Artifacts produced by `hardhat compile`.
#[derive(Debug, Clone)]
pub struct HardhatArtifacts {
    root: PathBuf,
}

impl HardhatArtifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds candidate artifact files for a contract name.
    ///
    /// Accepts either a bare name (`UNICoin`) or a fully qualified one
    /// (`contracts/UNICoin.sol:UNICoin`).
    fn candidates(&self, contract_name: &str) -> Result<Vec<PathBuf>, ArtifactError> {
        if let Some((source, name)) = contract_name.rsplit_once(':') {
            let path = self.root.join(source).join(format!("{name}.json"));
            return Ok(if path.is_file() { vec![path] } else { vec![] });
        }

        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let name = glob::Pattern::escape(contract_name);
        let pattern = format!("{root}/contracts/**/{name}.json");
        debug!(@grey, "searching artifacts: {pattern}");

        let mut paths = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|err| ArtifactError::Io {
                path: err.path().to_path_buf(),
                source: err.into_error(),
            })?;
            paths.push(path);
        }
        paths.sort();
        Ok(paths)
    }

    fn load(&self, path: &Path) -> Result<Artifact, ArtifactError> {
        let text = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: HardhatArtifactFile =
            serde_json::from_str(&text).map_err(|source| ArtifactError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        if file.bytecode.contains("__$") {
            return Err(ArtifactError::InvalidBytecode {
                path: path.to_path_buf(),
                reason: "unlinked library references".to_string(),
            });
        }
        let bytecode: Bytes = file
            .bytecode
            .parse()
            .map_err(|err| ArtifactError::InvalidBytecode {
                path: path.to_path_buf(),
                reason: format!("{err}"),
            })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::NotDeployable {
                name: file.contract_name,
            });
        }

        Ok(Artifact {
            contract_name: file.contract_name,
            source_name: file.source_name,
            abi: file.abi,
            bytecode,
        })
    }
}

impl ArtifactStore for HardhatArtifacts {
    fn artifact(&self, contract_name: &str) -> Result<Artifact, ArtifactError> {
        let mut candidates = self.candidates(contract_name)?;
        match candidates.len() {
            0 => Err(ArtifactError::NotFound {
                name: contract_name.to_owned(),
                root: self.root.clone(),
            }),
            1 => {
                let path = candidates.remove(0);
                debug!(@grey, "using artifact {}", path.display());
                self.load(&path)
            }
            _ => Err(ArtifactError::Ambiguous {
                name: contract_name.to_owned(),
                candidates: candidates
                    .iter()
                    .filter_map(|path| self.qualified_name(path))
                    .collect(),
            }),
        }
    }
}

impl HardhatArtifacts {
    fn qualified_name(&self, path: &Path) -> Option<String> {
        let name = path.file_stem()?.to_string_lossy();
        let source = path.parent()?.strip_prefix(&self.root).ok()?;
        Some(format!("{}:{name}", source.to_string_lossy()))
    }
}


#[cfg(test)]
mod tests {
    use super::{fixtures::*, *};

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_artifact(root: &Path, source: &str, name: &str, bytecode: &str) {
        let dir = root.join(source);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{name}.json")),
            artifact_json(name, source, bytecode),
        )
        .unwrap();
        fs::write(dir.join(format!("{name}.dbg.json")), r#"{"_format":"hh-sol-dbg-1"}"#).unwrap();
    }

    #[test]
    fn finds_compiled_contract() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/UNICoin.sol", "UNICoin", UNICOIN_BYTECODE);

        let store = HardhatArtifacts::new(dir.path());
        let artifact = store.artifact("UNICoin").unwrap();
        assert_eq!(artifact, unicoin());
        assert_eq!(artifact.constructor().unwrap().inputs.len(), 4);
    }

    #[test]
    fn finds_nested_sources() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/tokens/UNICoin.sol", "UNICoin", UNICOIN_BYTECODE);

        let store = HardhatArtifacts::new(dir.path());
        assert!(store.artifact("UNICoin").is_ok());
    }

    #[test]
    fn missing_contract_is_not_found() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/UNICoin.sol", "UNICoin", UNICOIN_BYTECODE);

        let store = HardhatArtifacts::new(dir.path());
        let err = store.artifact("Missing").unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound { ref name, .. } if name == "Missing"));
        assert!(err.to_string().contains("compiled"));
    }

    #[test]
    fn duplicate_names_need_qualification() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/A.sol", "Token", UNICOIN_BYTECODE);
        write_artifact(dir.path(), "contracts/B.sol", "Token", UNICOIN_BYTECODE);

        let store = HardhatArtifacts::new(dir.path());
        match store.artifact("Token").unwrap_err() {
            ArtifactError::Ambiguous { candidates, .. } => assert_eq!(
                candidates,
                vec!["contracts/A.sol:Token", "contracts/B.sol:Token"]
            ),
            err => panic!("unexpected error: {err}"),
        }

        let artifact = store.artifact("contracts/B.sol:Token").unwrap();
        assert_eq!(artifact.source_name.as_deref(), Some("contracts/B.sol"));
    }

    #[test]
    fn rejects_undeployable_bytecode() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/IToken.sol", "IToken", "0x");
        write_artifact(
            dir.path(),
            "contracts/Linked.sol",
            "Linked",
            "0x6080__$1234567890abcdef1234567890abcdef12$__",
        );

        let store = HardhatArtifacts::new(dir.path());
        assert!(matches!(
            store.artifact("IToken"),
            Err(ArtifactError::NotDeployable { .. })
        ));
        assert!(matches!(
            store.artifact("Linked"),
            Err(ArtifactError::InvalidBytecode { .. })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("contracts/Bad.sol");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("Bad.json"), "{ not json").unwrap();

        let store = HardhatArtifacts::new(dir.path());
        assert!(matches!(
            store.artifact("Bad"),
            Err(ArtifactError::Malformed { .. })
        ));
    }
}
