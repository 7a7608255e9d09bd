use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{errors::Error, Result};

/// Typed process configuration.
///
/// Everything comes from the environment (with an optional `.env` file next
/// to the working directory); the four per-plugin settings live in the
/// [`crate::settings`] store instead, since owner commands mutate them at
/// runtime.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub bot_owners: Vec<i64>,
    pub settings_file: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("BOT_TOKEN").unwrap_or_default();
        let bot_owners = parse_csv_i64(env_str("BOT_OWNERS"));

        if bot_token.trim().is_empty() {
            return Err(Error::Config(
                "BOT_TOKEN environment variable is required".to_string(),
            ));
        }
        if bot_owners.is_empty() {
            return Err(Error::Config(
                "BOT_OWNERS environment variable is required".to_string(),
            ));
        }

        let settings_file = env_path("SETTINGS_FILE")
            .unwrap_or_else(|| PathBuf::from("/tmp/botutils-settings.json"));

        Ok(Self {
            bot_token,
            bot_owners,
            settings_file,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn parse_csv_i64(v: Option<String>) -> Vec<i64> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_owner_parsing_skips_garbage() {
        let owners = parse_csv_i64(Some("123, 456,, abc, 789".to_string()));
        assert_eq!(owners, vec![123, 456, 789]);
    }

    #[test]
    fn csv_owner_parsing_empty() {
        assert!(parse_csv_i64(None).is_empty());
        assert!(parse_csv_i64(Some(" , ".to_string())).is_empty());
    }
}
