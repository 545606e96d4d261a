//! Configuration system.
//!
//! Layers configuration from four tiers with field-by-field YAML merging:
//! 1. **Defaults** - built in (`git`, export section `alias`, color `auto`)
//! 2. **User** - `<config dir>/git-konfig/config.yaml`
//! 3. **Explicit** - `--config FILE` or `GIT_KONFIG_CONFIG_PATH` (replaces the user file)
//! 4. **Environment** - `GIT_KONFIG_GIT`, `GIT_KONFIG_COLOR`
//!
//! Command-line flags are applied on top by the binary.
//!
//! ## Environment Variables
//! - `GIT_KONFIG_CONFIG_PATH` - Explicit config file
//! - `GIT_KONFIG_CONFIG_DIR` - User config dir (default: `<config dir>/git-konfig`)
//! - `GIT_KONFIG_GIT` - Git executable
//! - `GIT_KONFIG_COLOR` - `auto`, `always` or `never`

mod loader;
mod merge;
mod types;

pub use loader::{
    ConfigLoader, ConfigPaths, ConfigTier, ENV_COLOR, ENV_CONFIG_DIR, ENV_CONFIG_PATH, ENV_GIT,
};
pub use types::*;
