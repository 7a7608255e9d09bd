//! Persisted plugin settings.
//!
//! Four scalars stored as JSON, namespaced under the plugin's fixed numeric
//! identifier so the file can be shared with other plugins' state without
//! collisions. There is no migration logic; unknown keys are preserved,
//! missing keys fall back to defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// Fixed identifier this plugin's settings are namespaced under.
pub const PLUGIN_ID: u64 = 544_974_305_445_019_651;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Typing-indicator suppression strategy enabled.
    pub typing: bool,
    /// Log-event forwarding enabled.
    pub logging_enabled: bool,
    /// Numeric level code to forward; -1 disables matching.
    pub logging_level: i32,
    /// Destination chat id; 0 means unset.
    pub log_channel_id: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            typing: false,
            logging_enabled: false,
            logging_level: -1,
            log_channel_id: 0,
        }
    }
}

/// JSON-file settings store.
///
/// Each setter is read-modify-write so every intermediate state hits disk,
/// matching how owner commands persist their toggles one at a time.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub async fn load(&self) -> Settings {
        let Ok(contents) = tokio::fs::read_to_string(&self.path).await else {
            return Settings::default();
        };
        serde_json::from_str::<Value>(&contents)
            .ok()
            .and_then(|root| {
                root.get(PLUGIN_ID.to_string())
                    .cloned()
                    .and_then(|v| serde_json::from_value(v).ok())
            })
            .unwrap_or_default()
    }

    pub async fn set_typing(&self, value: bool) -> Result<()> {
        self.update(|s| s.typing = value).await
    }

    pub async fn set_logging_enabled(&self, value: bool) -> Result<()> {
        self.update(|s| s.logging_enabled = value).await
    }

    pub async fn set_logging_level(&self, value: i32) -> Result<()> {
        self.update(|s| s.logging_level = value).await
    }

    pub async fn set_log_channel_id(&self, value: i64) -> Result<()> {
        self.update(|s| s.log_channel_id = value).await
    }

    async fn update(&self, f: impl FnOnce(&mut Settings)) -> Result<()> {
        let mut settings = self.load().await;
        f(&mut settings);
        self.save(settings).await
    }

    async fn save(&self, settings: Settings) -> Result<()> {
        // Preserve namespaces other than ours.
        let mut root = tokio::fs::read_to_string(&self.path)
            .await
            .ok()
            .and_then(|c| serde_json::from_str::<Value>(&c).ok())
            .and_then(|v| v.as_object().cloned())
            .unwrap_or_default();

        root.insert(PLUGIN_ID.to_string(), serde_json::to_value(settings)?);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(root))?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}
