//! Readers for project configuration files.
//!
//! Each reader returns `Ok(None)` when its file does not exist, so callers can
//! distinguish "absent" from "present but broken".

use std::collections::BTreeMap;

use serde::Deserialize;

use super::error::{ProjectError, ProjectResult};
use super::fs::FileSystem;
use crate::base::constants::{FOUNDRY_CONFIG, PACKAGE_JSON, REMAPPINGS_FILE};
use crate::base::paths;

/// The `[profile.<name>]` table of `foundry.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FoundryProfile {
    pub src: Option<String>,
    pub out: Option<String>,
    pub libs: Vec<String>,
    pub remappings: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FoundryToml {
    #[serde(default)]
    profile: BTreeMap<String, FoundryProfile>,
}

/// Parsed `foundry.toml`; only the default profile is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundryConfig {
    pub profile: FoundryProfile,
}

impl FoundryConfig {
    pub fn parse(text: &str, path: &str) -> ProjectResult<Self> {
        let raw: FoundryToml = toml::from_str(text).map_err(|source| ProjectError::Toml {
            path: path.to_string(),
            source,
        })?;
        let profile = raw.profile.get("default").cloned().unwrap_or_default();
        Ok(Self { profile })
    }

    pub fn read(root: &str, fs: &dyn FileSystem) -> ProjectResult<Option<Self>> {
        let path = paths::join(root, FOUNDRY_CONFIG);
        match read_optional(&path, fs)? {
            Some(text) => Self::parse(&text, &path).map(Some),
            None => Ok(None),
        }
    }
}

/// npm `package.json` fields the project model needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageJson {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageJson {
    pub fn parse(text: &str, path: &str) -> ProjectResult<Self> {
        serde_json::from_str(text).map_err(|source| ProjectError::Json {
            path: path.to_string(),
            source,
        })
    }

    pub fn read(root: &str, fs: &dyn FileSystem) -> ProjectResult<Option<Self>> {
        let path = paths::join(root, PACKAGE_JSON);
        match read_optional(&path, fs)? {
            Some(text) => Self::parse(&text, &path).map(Some),
            None => Ok(None),
        }
    }

    /// Runtime and dev dependencies, runtime first.
    pub fn all_dependencies(&self) -> impl Iterator<Item = (&String, &String)> {
        self.dependencies.iter().chain(&self.dev_dependencies)
    }
}

/// Lines of `remappings.txt`, or `None` when the file is absent.
pub fn read_remappings_file(root: &str, fs: &dyn FileSystem) -> ProjectResult<Option<Vec<String>>> {
    let path = paths::join(root, REMAPPINGS_FILE);
    Ok(read_optional(&path, fs)?.map(|text| {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }))
}

fn read_optional(path: &str, fs: &dyn FileSystem) -> ProjectResult<Option<String>> {
    if !fs.is_file(path) {
        return Ok(None);
    }
    fs.read_to_string(path)
        .map(Some)
        .map_err(|source| ProjectError::io(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::MemoryFileSystem;

    #[test]
    fn test_foundry_default_profile() {
        let config = FoundryConfig::parse(
            r#"
[profile.default]
src = "contracts"
out = "build"
libs = ["lib", "deps"]
remappings = ["@oz/=lib/openzeppelin/"]

[profile.ci]
src = "other"
"#,
            "foundry.toml",
        )
        .unwrap();
        assert_eq!(config.profile.src.as_deref(), Some("contracts"));
        assert_eq!(config.profile.out.as_deref(), Some("build"));
        assert_eq!(config.profile.libs, vec!["lib", "deps"]);
        assert_eq!(config.profile.remappings.len(), 1);
    }

    #[test]
    fn test_foundry_without_profile() {
        let config = FoundryConfig::parse("[fmt]\nline_length = 100\n", "foundry.toml").unwrap();
        assert_eq!(config.profile, FoundryProfile::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(matches!(
            FoundryConfig::parse("[profile.default\n", "foundry.toml"),
            Err(ProjectError::Toml { .. })
        ));
    }

    #[test]
    fn test_package_json() {
        let pkg = PackageJson::parse(
            r#"{"name": "app", "version": "1.2.0",
                "dependencies": {"@openzeppelin/contracts": "^5.0.0"},
                "devDependencies": {"hardhat": "^2"}}"#,
            "package.json",
        )
        .unwrap();
        assert_eq!(pkg.name.as_deref(), Some("app"));
        assert_eq!(pkg.all_dependencies().count(), 2);
    }

    #[test]
    fn test_read_missing_files() {
        let fs = MemoryFileSystem::new().with_file("/p/remappings.txt", "# c\n\na/=lib/a/\n");
        assert_eq!(FoundryConfig::read("/p", &fs).unwrap(), None);
        assert_eq!(PackageJson::read("/p", &fs).unwrap(), None);
        assert_eq!(
            read_remappings_file("/p", &fs).unwrap(),
            Some(vec!["a/=lib/a/".to_string()])
        );
    }
}
