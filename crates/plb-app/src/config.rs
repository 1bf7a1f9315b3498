use std::env;
use std::path::{Path, PathBuf};

use crate::error::AppError;

const ENV_FILE: &str = "crates/plb-app/.env";
const DEFAULT_LISTS_DIR: &str = "prompt_lists";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub lists_dir: PathBuf,
    pub sd_models: Vec<String>,
    pub samplers: Vec<String>,
    /// `(name, storage path)` pairs
    pub styles: Vec<(String, Option<String>)>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        match dotenvy::from_path(ENV_FILE) {
            Ok(()) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(AppError::Config(format!("{ENV_FILE}: {e}"))),
        }

        let cwd = env::current_dir().map_err(|e| AppError::Config(e.to_string()))?;
        Self::from_vars(&cwd, |key| env::var(key).ok())
    }

    pub fn from_vars(cwd: &Path, var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let lists_dir = match var("PLB_LISTS_DIR").filter(|v| !v.trim().is_empty()) {
            Some(dir) => cwd.join(dir.trim()),
            None => cwd.join(DEFAULT_LISTS_DIR),
        };

        let styles: Vec<(String, Option<String>)> = split_list(var("PLB_STYLES"))
            .into_iter()
            .map(|entry| parse_style(&entry))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            lists_dir,
            sd_models: split_list(var("PLB_SD_MODELS")),
            samplers: split_list(var("PLB_SAMPLERS")),
            styles,
        })
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_style(entry: &str) -> Result<(String, Option<String>), AppError> {
    match entry.split_once('=') {
        None => Ok((entry.to_string(), None)),
        Some((name, _)) if name.trim().is_empty() => {
            Err(AppError::Config(format!("PLB_STYLES entry without a name: {entry:?}")))
        }
        Some((name, path)) => Ok((name.trim().to_string(), Some(path.trim().to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(Path::new("/srv/plb"), |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.lists_dir, PathBuf::from("/srv/plb/prompt_lists"));
        assert!(config.sd_models.is_empty());
        assert!(config.samplers.is_empty());
        assert!(config.styles.is_empty());
    }

    #[test]
    fn test_lists_dir_override() {
        let config = config(&[("PLB_LISTS_DIR", "/data/lists")]).unwrap();
        assert_eq!(config.lists_dir, PathBuf::from("/data/lists"));

        let config = self::config(&[("PLB_LISTS_DIR", "lists")]).unwrap();
        assert_eq!(config.lists_dir, PathBuf::from("/srv/plb/lists"));
    }

    #[test]
    fn test_registry_lists() {
        let config = config(&[
            ("PLB_SAMPLERS", "Euler a, DPM++ 2M ,,"),
            ("PLB_STYLES", "cinematic=styles.csv,scratch=do_not_save,anime"),
        ])
        .unwrap();

        assert_eq!(config.samplers, vec!["Euler a", "DPM++ 2M"]);
        assert_eq!(
            config.styles,
            vec![
                ("cinematic".to_string(), Some("styles.csv".to_string())),
                ("scratch".to_string(), Some("do_not_save".to_string())),
                ("anime".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_style_without_name_is_rejected() {
        assert!(matches!(
            config(&[("PLB_STYLES", "=styles.csv")]),
            Err(AppError::Config(_))
        ));
    }
}
