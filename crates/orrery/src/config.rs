use crate::events::AppEvent;
use armillary::{BodyError, BodyName, CelestialBody, Point, Scene, TokenKind};
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// Shape policy for a configured body.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// Annulus-sector token riding between the ring's radii.
    #[strum(serialize = "planet", serialize = "wedge")]
    Planet,
    /// Circular token at a fixed orbital distance.
    #[strum(serialize = "star", serialize = "sun", serialize = "disc")]
    Star,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LineStyleConfig {
    pub color: String,
    pub width: f64,
    #[serde(default)]
    pub dash: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FillStyleConfig {
    pub fill: String,
    #[serde(default)]
    pub hovered_fill: Option<String>,
    #[serde(default)]
    pub stroke: Option<LineStyleConfig>,
}

impl FillStyleConfig {
    fn plain(fill: &str) -> Self {
        Self {
            fill: fill.to_string(),
            hovered_fill: None,
            stroke: None,
        }
    }

    fn with_hover(fill: &str, hovered: &str) -> Self {
        Self {
            fill: fill.to_string(),
            hovered_fill: Some(hovered.to_string()),
            stroke: None,
        }
    }
}

/// The stroked circle drawn at the star token's orbital radius.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RimConfig {
    pub radius: f64,
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BodyConfig {
    pub name: BodyName,
    pub kind: BodyKind,
    pub divisions: u32,
    #[serde(default)]
    pub division_offset: f64,
    pub span: u32,
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// Orbital radius of a star's disc token; ignored for planets.
    #[serde(default)]
    pub token_distance: Option<f64>,
    /// Radius of a star's disc token; ignored for planets.
    #[serde(default)]
    pub token_radius: Option<f64>,
    pub starting_division: u32,
    pub ring: FillStyleConfig,
    pub token: FillStyleConfig,
    #[serde(default)]
    pub division_lines: Option<LineStyleConfig>,
    /// Radius of the zodiac label baseline; labels are drawn only when set.
    #[serde(default)]
    pub label_radius: Option<f64>,
    #[serde(default)]
    pub label_color: Option<String>,
}

impl BodyConfig {
    pub fn build(&self) -> Result<CelestialBody, ConfigError> {
        let token = match self.kind {
            BodyKind::Planet => TokenKind::Wedge,
            BodyKind::Star => TokenKind::Disc {
                distance: self.token_distance.ok_or_else(|| {
                    ConfigError::MissingDiscGeometry {
                        name: self.name.clone(),
                    }
                })?,
                radius: self.token_radius.ok_or_else(|| {
                    ConfigError::MissingDiscGeometry {
                        name: self.name.clone(),
                    }
                })?,
            },
        };
        Ok(CelestialBody::new(
            self.name.clone(),
            self.divisions,
            self.division_offset,
            self.span,
            self.outer_radius,
            self.inner_radius,
            token,
            self.starting_division,
        )?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub dark_mode: bool,
    pub background_light: String,
    pub background_dark: String,
    pub rim: Option<RimConfig>,
    pub bodies: Vec<BodyConfig>,
}

impl Config {
    pub fn build_scene(&self, center: Point) -> Result<Scene, ConfigError> {
        let bodies = self
            .bodies
            .iter()
            .map(BodyConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Scene::new(center, bodies))
    }
}

const NEAR_BLACK: &str = "#3e2e2e";
const OFF_WHITE: &str = "#fffafa";

impl Default for Config {
    /// The Seven Part Pact table layout: the sun's disc over the month
    /// ring, then Saturn through Mercury as wedges on nested rings.
    fn default() -> Self {
        let wedge = |name: &str,
                     divisions: u32,
                     division_offset: f64,
                     span: u32,
                     outer_radius: f64,
                     inner_radius: f64,
                     starting_division: u32,
                     ring: FillStyleConfig,
                     token: FillStyleConfig,
                     division_lines: LineStyleConfig| BodyConfig {
            name: BodyName::new(name),
            kind: BodyKind::Planet,
            divisions,
            division_offset,
            span,
            outer_radius,
            inner_radius,
            token_distance: None,
            token_radius: None,
            starting_division,
            ring,
            token,
            division_lines: Some(division_lines),
            label_radius: None,
            label_color: None,
        };
        let thin_lines = LineStyleConfig {
            color: NEAR_BLACK.to_string(),
            width: 1.0,
            dash: Vec::new(),
        };

        Self {
            dark_mode: true,
            background_light: "#f0edec".to_string(),
            background_dark: "#503020".to_string(),
            rim: Some(RimConfig {
                radius: 265.0,
                color: "#ff0000".to_string(),
                width: 3.0,
            }),
            bodies: vec![
                BodyConfig {
                    name: BodyName::new("Sun"),
                    kind: BodyKind::Star,
                    divisions: 12,
                    division_offset: 0.0,
                    span: 1,
                    outer_radius: 250.0,
                    inner_radius: 200.0,
                    token_distance: Some(265.0),
                    token_radius: Some(30.0),
                    starting_division: 7,
                    ring: FillStyleConfig::plain(OFF_WHITE),
                    token: FillStyleConfig {
                        fill: "#ffab40".to_string(),
                        hovered_fill: Some("#ffc370".to_string()),
                        stroke: Some(LineStyleConfig {
                            color: "#cc0001".to_string(),
                            width: 2.0,
                            dash: Vec::new(),
                        }),
                    },
                    division_lines: Some(LineStyleConfig {
                        color: NEAR_BLACK.to_string(),
                        width: 2.0,
                        dash: Vec::new(),
                    }),
                    label_radius: Some(215.0),
                    label_color: Some(NEAR_BLACK.to_string()),
                },
                wedge(
                    "Saturn",
                    36,
                    -5.0,
                    1,
                    200.0,
                    170.0,
                    3,
                    FillStyleConfig::plain(NEAR_BLACK),
                    FillStyleConfig::with_hover("#434343", "#5a5a5a"),
                    LineStyleConfig {
                        color: OFF_WHITE.to_string(),
                        width: 2.0,
                        dash: Vec::new(),
                    },
                ),
                wedge(
                    "Jupiter",
                    48,
                    0.0,
                    3,
                    170.0,
                    140.0,
                    3,
                    FillStyleConfig::plain("#dcb894"),
                    FillStyleConfig::with_hover("#e69137", "#eeab62"),
                    thin_lines.clone(),
                ),
                wedge(
                    "Mars",
                    24,
                    0.0,
                    3,
                    140.0,
                    110.0,
                    22,
                    FillStyleConfig::plain("#dda1a1"),
                    FillStyleConfig::with_hover("#cc0001", "#e03334"),
                    thin_lines.clone(),
                ),
                wedge(
                    "Venus",
                    24,
                    0.0,
                    5,
                    110.0,
                    80.0,
                    14,
                    FillStyleConfig::plain("#efefd7"),
                    FillStyleConfig::with_hover("#69a84f", "#85bb6f"),
                    thin_lines.clone(),
                ),
                wedge(
                    "Mercury",
                    24,
                    0.0,
                    7,
                    80.0,
                    50.0,
                    12,
                    FillStyleConfig::plain("#d8c7e7"),
                    FillStyleConfig::with_hover("#8d7cc2", "#a596d1"),
                    thin_lines,
                ),
            ],
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid body: {0}")]
    Body(#[from] BodyError),
    #[error("star '{name}' needs token_distance and token_radius")]
    MissingDiscGeometry { name: BodyName },
    #[error(transparent)]
    Color(#[from] crate::gui::theme::ColorParseError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "pact", "orrery").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(path_override: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path_override {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("ORRERY"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path_override: Option<&Path>) -> Config {
    match load_config(path_override) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using the built-in table layout: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>, path_override: Option<PathBuf>) {
    let config_path = match path_override {
        Some(path) => path,
        None => match get_config_path() {
            Ok(p) => p,
            Err(e) => {
                log::error!("Config watcher error: {}", e);
                return;
            }
        },
    };
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
            log::error!("Failed to create watcher: {}", e);
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

    #[test]
    fn test_body_kind_deserialization() {
        let cases = vec![
            ("\"planet\"", BodyKind::Planet),
            ("\"Planet\"", BodyKind::Planet),
            ("\"WEDGE\"", BodyKind::Planet),
            ("\"star\"", BodyKind::Star),
            ("\"Sun\"", BodyKind::Star),
            ("\"disc\"", BodyKind::Star),
        ];

        for (json, expected) in cases {
            let deserialized: BodyKind = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn default_config_file_matches_builtin_layout() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn builtin_layout_builds_a_scene() {
        let config = Config::default();
        let scene = config.build_scene(Point::new(350.0, 350.0)).unwrap();
        assert_eq!(scene.bodies().len(), 6);

        // Mars: 24 divisions, starting on slot 22.
        let mars = &scene.bodies()[3];
        assert_eq!(mars.name().to_string(), "Mars");
        assert!((mars.current_angle() - 330.0).abs() < 1e-9);

        // The sun rides its disc between the month ring's radii.
        let sun = &scene.bodies()[0];
        assert!(matches!(
            sun.token(),
            TokenKind::Disc {
                distance,
                radius,
            } if (distance - 265.0).abs() < 1e-9 && (radius - 30.0).abs() < 1e-9
        ));
    }

    #[test]
    fn star_without_disc_geometry_is_rejected() {
        let mut config = Config::default();
        config.bodies[0].token_distance = None;
        let err = config.build_scene(Point::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDiscGeometry { .. }));
    }

    #[test]
    fn empty_sources_fall_back_to_defaults() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str("", config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed, Config::default());
    }
}
