use crate::events::AppEvent;
use async_channel::Sender;
use config::builder::{ConfigBuilder, DefaultState};
use config::FileFormat;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;
use wheel::layout::{DIAMETER, RING_THICKNESS};
use wheel::{AnimationSettings, Easing};

/// Key that switches a drag from the whole wheel to the consonance rings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    #[default]
    #[strum(serialize = "alt", serialize = "option", serialize = "mod1")]
    Alt,
    #[strum(serialize = "shift")]
    Shift,
    #[strum(serialize = "control", serialize = "ctrl")]
    Control,
    #[strum(serialize = "super", serialize = "meta", serialize = "logo")]
    Super,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Width of the draggable ring, in units of a 100 unit wide wheel.
    pub ring_thickness: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            ring_thickness: RING_THICKNESS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SnapConfig {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            duration_ms: 400,
            easing: Easing::EaseOut,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InputConfig {
    pub alternate_modifier: Modifier,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub wheel: WheelConfig,
    pub snap: SnapConfig,
    pub input: InputConfig,
}

impl Config {
    pub fn animation(&self) -> AnimationSettings {
        AnimationSettings::new(Duration::from_millis(self.snap.duration_ms), self.snap.easing)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let max = DIAMETER / 2.0;
        let value = self.wheel.ring_thickness;
        if !(value > 0.0 && value <= max) {
            return Err(ConfigError::RingThickness { value, max });
        }
        Ok(self)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Ring thickness must be within (0, {max}], got {value}")]
    RingThickness { value: f64, max: f64 },
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "fifths", "fifths").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    let s = builder
        .add_source(
            config::Environment::with_prefix("FIFTHS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    s.try_deserialize::<Config>()?.validate()
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    finish(
        config::Config::builder()
            .add_source(config::File::from(path).format(FileFormat::Toml).required(false)),
    )
}

pub fn load_or_default(path: &Path) -> Config {
    load_config(path).unwrap_or_else(|e| {
        log::warn!("Using default configuration: {}", e);
        Config::default()
    })
}

/// Writes the bundled config to `path` unless a file is already there.
pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        finish(config::Config::builder().add_source(config::File::from_str(toml, FileFormat::Toml)))
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("fifths-test-{}-{}", std::process::id(), name))
            .join("config.toml")
    }

    #[test]
    fn test_modifier_deserialization() {
        let cases = vec![
            ("\"alt\"", Modifier::Alt),
            ("\"Alt\"", Modifier::Alt),
            ("\"mod1\"", Modifier::Alt),
            ("\"SHIFT\"", Modifier::Shift),
            ("\"ctrl\"", Modifier::Control),
            ("\"Control\"", Modifier::Control),
            ("\"meta\"", Modifier::Super),
        ];

        for (json, expected) in cases {
            let deserialized: Modifier = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse("[snap]\neasing = \"back\"\n").unwrap();
        assert_eq!(config.snap.easing, Easing::Back);
        assert_eq!(config.snap.duration_ms, 400);
        assert_eq!(config.wheel, WheelConfig::default());
        assert_eq!(config.input.alternate_modifier, Modifier::Alt);
    }

    #[test]
    fn test_full_file() {
        let config = parse(
            r#"
            [wheel]
            ring_thickness = 12.5

            [snap]
            duration_ms = 250
            easing = "linear"

            [input]
            alternate_modifier = "shift"
            "#,
        )
        .unwrap();

        assert_eq!(config.wheel.ring_thickness, 12.5);
        assert_eq!(config.input.alternate_modifier, Modifier::Shift);
        assert_eq!(
            config.animation(),
            AnimationSettings::new(Duration::from_millis(250), Easing::Linear)
        );
    }

    #[test]
    fn test_ring_thickness_out_of_range() {
        for bad in ["0.0", "-3.0", "60.0", "nan"] {
            let toml = format!("[wheel]\nring_thickness = {bad}\n");
            assert!(
                matches!(parse(&toml), Err(ConfigError::RingThickness { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_unknown_easing_is_rejected() {
        assert!(matches!(
            parse("[snap]\neasing = \"wobble\"\n"),
            Err(ConfigError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let path = scratch_path("missing");
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_default_config_file_matches_defaults() {
        let path = scratch_path("written");
        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
        let _ = fs_err::remove_dir_all(path.parent().unwrap());
    }
}
