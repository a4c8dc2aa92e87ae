//! Domain constants shared across layers.

/// Extension of Solidity source files (without the dot).
pub const SOL_EXT: &str = "sol";

/// Framework configuration file (Foundry).
pub const FOUNDRY_CONFIG: &str = "foundry.toml";

/// Plain remapping list file.
pub const REMAPPINGS_FILE: &str = "remappings.txt";

/// npm-style package manifest.
pub const PACKAGE_JSON: &str = "package.json";

/// Directories scanned for dependency packages when no setting overrides them.
pub const DEFAULT_DEPENDENCY_DIRS: &[&str] = &["lib", "node_modules"];

/// Alternate source directories tried inside a dependency package.
pub const DEFAULT_ALTERNATIVE_SOURCE_DIRS: &[&str] = &["src", "contracts"];

/// Build output directory used when the project config names none.
pub const DEFAULT_BUILD_DIR: &str = "bin";

/// Foundry's source directory when `foundry.toml` does not set `src`.
pub const FOUNDRY_DEFAULT_SRC: &str = "src";

/// Foundry's build directory when `foundry.toml` does not set `out`.
pub const FOUNDRY_DEFAULT_OUT: &str = "out";
