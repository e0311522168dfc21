use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::attributes::FeatureLayout;
use crate::graph::betweenness::BetweennessConfig;
use crate::graph::pagerank::PageRankConfig;

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "fairrank.toml";

/// Errors raised while reading an analysis config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub pagerank: PageRankConfig,
    #[serde(default)]
    pub betweenness: BetweennessConfig,
    #[serde(default)]
    pub features: FeatureLayout,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Treat edge-list lines as directed `src -> dst` edges.
    #[serde(default)]
    pub directed: bool,
}

/// Load the analysis config.
///
/// An explicit path must exist. Without one, `fairrank.toml` in
/// `working_dir` is used if present, otherwise defaults apply.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or is not valid TOML
/// for [`AnalysisConfig`].
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<AnalysisConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = working_dir.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                return Ok(AnalysisConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    toml::from_str::<AnalysisConfig>(&content).map_err(|source| ConfigError::Parse { path, source })
}
