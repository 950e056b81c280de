//! Parse options.
//!
//! Options can be built in code, loaded from YAML and overridden from the
//! environment with variables named `PMOTAGS__<OPTION>`:
//!
//! ```yaml
//! skipCovers: true
//! duration: false
//! mimeType: audio/mpeg
//! ```

use std::{env, fmt, sync::Arc};

use serde::Deserialize;
use tracing::debug;

use crate::collector::MetadataEvent;

const ENV_PREFIX: &str = "PMOTAGS__";

/// Callback notified of every accepted format or common-tag write.
pub type Observer = Arc<dyn Fn(&MetadataEvent) + Send + Sync>;

#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Do not decode picture payloads.
    pub skip_covers: bool,
    /// Compute the duration even when it needs a full scan of the audio.
    pub duration: bool,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
    #[serde(skip)]
    pub observer: Option<Observer>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Applies `PMOTAGS__SKIP_COVERS`, `PMOTAGS__DURATION`, `PMOTAGS__MIME_TYPE`
    /// and `PMOTAGS__FILE_SIZE` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(env::vars())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) over an explicit list of variables.
    pub fn with_overrides<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let applied = match name.to_lowercase().as_str() {
                "skip_covers" => parse_yaml(&value).map(|v| self.skip_covers = v).is_some(),
                "duration" => parse_yaml(&value).map(|v| self.duration = v).is_some(),
                "mime_type" => {
                    self.mime_type = Some(value.clone());
                    true
                }
                "file_size" => parse_yaml(&value).map(|v| self.file_size = Some(v)).is_some(),
                _ => false,
            };
            if !applied {
                debug!(variable = %key, value = %value, "Ignoring parse option override");
            }
        }
        self
    }

    pub fn skip_covers(mut self, skip: bool) -> Self {
        self.skip_covers = skip;
        self
    }

    pub fn duration(mut self, duration: bool) -> Self {
        self.duration = duration;
        self
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn file_size(mut self, size: u64) -> Self {
        self.file_size = Some(size);
        self
    }

    pub fn observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&MetadataEvent) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }
}

fn parse_yaml<T: serde::de::DeserializeOwned>(value: &str) -> Option<T> {
    serde_yaml::from_str(value).ok()
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("skip_covers", &self.skip_covers)
            .field("duration", &self.duration)
            .field("mime_type", &self.mime_type)
            .field("file_size", &self.file_size)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
