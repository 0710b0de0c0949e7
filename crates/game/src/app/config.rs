use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use handheld_engine::{KeyBindings, LogicalButton, LoopConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

pub(crate) const CONFIG_ENV_VAR: &str = "HANDHELD_CONFIG";
pub(crate) const SEED_ENV_VAR: &str = "HANDHELD_SEED";

/// Optional overrides read from a JSON settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ConsoleSettings {
    pub(crate) target_tps: Option<u32>,
    pub(crate) max_render_fps: Option<u32>,
    pub(crate) seed: Option<u64>,
    /// Extra key identifier → button entries layered over the standard table.
    pub(crate) bindings: BTreeMap<String, LogicalButton>,
    /// Key identifiers removed from the table after `bindings` is applied.
    pub(crate) unbind: Vec<String>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("HANDHELD_SEED must be an unsigned integer, got '{raw}'")]
    InvalidSeed { raw: String },
}

/// Settings from `HANDHELD_CONFIG` (if set) with the `HANDHELD_SEED`
/// override applied.
pub(crate) fn settings_from_env() -> Result<ConsoleSettings, ConfigError> {
    let mut settings = match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => load_settings(Path::new(&path))?,
        None => ConsoleSettings::default(),
    };
    if let Ok(raw) = std::env::var(SEED_ENV_VAR) {
        settings.seed = Some(parse_seed(&raw)?);
    }
    Ok(settings)
}

pub(crate) fn load_settings(path: &Path) -> Result<ConsoleSettings, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings(&raw).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })?;
    info!(
        path = %path.display(),
        extra_bindings = settings.bindings.len(),
        unbound = settings.unbind.len(),
        "settings_loaded"
    );
    Ok(settings)
}

fn parse_settings(raw: &str) -> Result<ConsoleSettings, String> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, ConsoleSettings>(&mut deserializer) {
        Ok(settings) => Ok(settings),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(source.to_string())
            } else {
                Err(format!("at {path}: {source}"))
            }
        }
    }
}

pub(crate) fn parse_seed(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeed {
            raw: raw.to_string(),
        })
}

pub(crate) fn apply_bindings(settings: &ConsoleSettings, bindings: &mut KeyBindings) {
    for (key, button) in &settings.bindings {
        if let Some(previous) = bindings.bind(key.clone(), *button) {
            if previous != *button {
                info!(key = %key, from = previous.name(), to = button.name(), "binding_overridden");
            }
        }
    }
    for key in &settings.unbind {
        if bindings.unbind(key).is_none() {
            warn!(key = %key, "unbind_unknown_key");
        }
    }
}

pub(crate) fn apply_loop_config(settings: &ConsoleSettings, config: &mut LoopConfig) {
    if let Some(target_tps) = settings.target_tps {
        config.target_tps = target_tps;
    }
    if settings.max_render_fps.is_some() {
        config.max_render_fps = settings.max_render_fps;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_settings(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp settings file");
        file.write_all(contents.as_bytes())
            .expect("write settings");
        file
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let file = write_settings("{}");
        let settings = load_settings(file.path()).expect("settings");
        assert_eq!(settings, ConsoleSettings::default());
    }

    #[test]
    fn full_settings_are_parsed() {
        let file = write_settings(
            r#"{
                "target_tps": 30,
                "max_render_fps": 144,
                "seed": 99,
                "bindings": { "z": "B", "x": "ZL" },
                "unbind": ["q"]
            }"#,
        );
        let settings = load_settings(file.path()).expect("settings");

        assert_eq!(settings.target_tps, Some(30));
        assert_eq!(settings.max_render_fps, Some(144));
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.bindings.get("z"), Some(&LogicalButton::B));
        assert_eq!(settings.bindings.get("x"), Some(&LogicalButton::Zl));
        assert_eq!(settings.unbind, vec!["q".to_string()]);
    }

    #[test]
    fn bad_button_name_reports_its_path() {
        let file = write_settings(r#"{ "bindings": { "z": "TURBO" } }"#);
        let error = load_settings(file.path()).expect_err("unknown button should fail");

        let message = error.to_string();
        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(message.contains("bindings.z"), "{message}");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let file = write_settings(r#"{ "targetTps": 30 }"#);
        let error = load_settings(file.path()).expect_err("unknown field should fail");
        assert!(error.to_string().contains("targetTps"), "{error}");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = load_settings(&dir.path().join("absent.json")).expect_err("missing file");
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn seed_parsing_trims_and_rejects_garbage() {
        assert_eq!(parse_seed(" 12 ").expect("seed"), 12);
        assert!(matches!(
            parse_seed("twelve"),
            Err(ConfigError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn bindings_are_layered_then_unbound() {
        let settings = ConsoleSettings {
            bindings: BTreeMap::from([
                ("z".to_string(), LogicalButton::B),
                ("l".to_string(), LogicalButton::X),
            ]),
            unbind: vec!["q".to_string(), "nope".to_string()],
            ..ConsoleSettings::default()
        };
        let mut bindings = KeyBindings::standard();
        apply_bindings(&settings, &mut bindings);

        assert_eq!(bindings.lookup("z"), Some(LogicalButton::B));
        assert_eq!(bindings.lookup("l"), Some(LogicalButton::X));
        assert_eq!(bindings.lookup("q"), None);
        assert_eq!(bindings.lookup("k"), Some(LogicalButton::B));
    }

    #[test]
    fn loop_overrides_only_touch_set_fields() {
        let mut config = LoopConfig::default();
        apply_loop_config(&ConsoleSettings::default(), &mut config);
        assert_eq!(config.target_tps, LoopConfig::default().target_tps);
        assert_eq!(config.max_render_fps, None);

        let settings = ConsoleSettings {
            target_tps: Some(120),
            max_render_fps: Some(60),
            ..ConsoleSettings::default()
        };
        apply_loop_config(&settings, &mut config);
        assert_eq!(config.target_tps, 120);
        assert_eq!(config.max_render_fps, Some(60));
    }
}
