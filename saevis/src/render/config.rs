use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// ES module build of the front-end bundle.
pub const DEFAULT_CDN_URL: &str =
    "https://unpkg.com/circuitsvis@1.43.2/dist/cdn/esm.js";

pub const CDN_URL_ENV: &str = "SAEVIS_CDN_URL";
pub const BUNDLE_PATH_ENV: &str = "SAEVIS_BUNDLE_PATH";

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct RenderConfig {
    /// Module the CDN fragment imports `render` and the component from.
    pub cdn_url: String,
    /// IIFE build of the bundle to inline into the local fragment.
    pub bundle_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cdn_url: DEFAULT_CDN_URL.to_string(),
            bundle_path: None,
        }
    }
}

impl RenderConfig {
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let file =
            File::open(path).map_err(|source| RenderError::UnableToReadConfig {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(RenderError::UnableToParseConfig)
    }

    /// Defaults overridden by `SAEVIS_CDN_URL` and `SAEVIS_BUNDLE_PATH`.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(CDN_URL_ENV).ok(),
            std::env::var_os(BUNDLE_PATH_ENV).map(PathBuf::from),
        )
    }

    fn with_overrides(
        mut self,
        cdn_url: Option<String>,
        bundle_path: Option<PathBuf>,
    ) -> Self {
        if let Some(cdn_url) = cdn_url.filter(|url| !url.is_empty()) {
            self.cdn_url = cdn_url;
        }
        if let Some(bundle_path) = bundle_path {
            self.bundle_path = Some(bundle_path);
        }
        self
    }
}
