//! Formatting helpers shared by the renderer and the command handlers.

use crate::settings::Settings;
use crate::{PLUGIN_DISPLAY_NAME, PLUGIN_VERSION};

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Settings overview sent by the base command, built generically from the
/// serialized settings record.
pub fn settings_display(settings: &Settings, html: bool) -> String {
    let rows = settings_rows(settings);

    if html {
        let mut out = format!("<b>Settings for {PLUGIN_DISPLAY_NAME}</b>\n\n");
        for (key, value) in rows {
            out.push_str(&format!("<b>{}:</b> {}\n", escape_html(&key), value));
        }
        out.push_str(&format!(
            "\n<i>{PLUGIN_DISPLAY_NAME} - Version {PLUGIN_VERSION}</i>"
        ));
        out
    } else {
        let mut out = format!("Settings for {PLUGIN_DISPLAY_NAME}\n\n");
        for (key, value) in rows {
            out.push_str(&format!("{key}:\t{value}\n"));
        }
        out.push_str(&format!(
            "\n{PLUGIN_DISPLAY_NAME} - Version {PLUGIN_VERSION}"
        ));
        out
    }
}

fn settings_rows(settings: &Settings) -> Vec<(String, String)> {
    let value = serde_json::to_value(settings).unwrap_or_default();
    let Some(object) = value.as_object() else {
        return Vec::new();
    };
    object
        .iter()
        .map(|(key, value)| {
            let label = key.split('_').map(capitalize).collect::<Vec<_>>().join(" ");
            (label, value.to_string())
        })
        .collect()
}
