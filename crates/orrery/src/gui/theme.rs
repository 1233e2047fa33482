use crate::config::{BodyConfig, Config, FillStyleConfig, LineStyleConfig};
use palette::{Srgb, Srgba};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid color '{value}', expected #rrggbb hex")]
pub struct ColorParseError {
    value: String,
}

pub fn parse_color(value: &str) -> Result<Srgba<f64>, ColorParseError> {
    value
        .trim()
        .parse::<Srgb<u8>>()
        .map(|c| c.into_format::<f64>().into())
        .map_err(|_| ColorParseError {
            value: value.to_string(),
        })
}

#[derive(Debug, Clone)]
pub struct Stroke {
    pub color: Srgba<f64>,
    pub width: f64,
    pub dash: Vec<f64>,
}

impl Stroke {
    fn from_config(cfg: &LineStyleConfig) -> Result<Self, ColorParseError> {
        Ok(Self {
            color: parse_color(&cfg.color)?,
            width: cfg.width,
            dash: cfg.dash.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct FillStyle {
    pub fill: Srgba<f64>,
    pub hovered_fill: Option<Srgba<f64>>,
    pub stroke: Option<Stroke>,
}

impl FillStyle {
    fn from_config(cfg: &FillStyleConfig) -> Result<Self, ColorParseError> {
        Ok(Self {
            fill: parse_color(&cfg.fill)?,
            hovered_fill: cfg.hovered_fill.as_deref().map(parse_color).transpose()?,
            stroke: cfg.stroke.as_ref().map(Stroke::from_config).transpose()?,
        })
    }

    pub fn fill_for(&self, hovered: bool) -> Srgba<f64> {
        if hovered {
            self.hovered_fill.unwrap_or(self.fill)
        } else {
            self.fill
        }
    }
}

#[derive(Debug, Clone)]
pub struct LabelStyle {
    pub radius: f64,
    pub color: Srgba<f64>,
}

#[derive(Debug, Clone)]
pub struct Rim {
    pub radius: f64,
    pub stroke: Stroke,
}

#[derive(Debug, Clone)]
pub struct BodyStyle {
    pub ring: FillStyle,
    pub token: FillStyle,
    pub division_lines: Option<Stroke>,
    pub label: Option<LabelStyle>,
}

impl BodyStyle {
    fn from_config(cfg: &BodyConfig) -> Result<Self, ColorParseError> {
        let label = match cfg.label_radius {
            Some(radius) => Some(LabelStyle {
                radius,
                color: parse_color(cfg.label_color.as_deref().unwrap_or("#3e2e2e"))?,
            }),
            None => None,
        };
        Ok(Self {
            ring: FillStyle::from_config(&cfg.ring)?,
            token: FillStyle::from_config(&cfg.token)?,
            division_lines: cfg
                .division_lines
                .as_ref()
                .map(Stroke::from_config)
                .transpose()?,
            label,
        })
    }
}

/// All config styling resolved into drawable values, index-aligned with the
/// scene's bodies.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background_light: Srgba<f64>,
    pub background_dark: Srgba<f64>,
    pub rim: Option<Rim>,
    pub bodies: Vec<BodyStyle>,
}

impl Theme {
    pub fn from_config(config: &Config) -> Result<Self, ColorParseError> {
        let rim = match &config.rim {
            Some(cfg) => Some(Rim {
                radius: cfg.radius,
                stroke: Stroke {
                    color: parse_color(&cfg.color)?,
                    width: cfg.width,
                    dash: Vec::new(),
                },
            }),
            None => None,
        };
        Ok(Self {
            background_light: parse_color(&config.background_light)?,
            background_dark: parse_color(&config.background_dark)?,
            rim,
            bodies: config
                .bodies
                .iter()
                .map(BodyStyle::from_config)
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn background(&self, dark: bool) -> Srgba<f64> {
        if dark {
            self.background_dark
        } else {
            self.background_light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        let a = parse_color("#ffab40").unwrap();
        let b = parse_color("ffab40").unwrap();
        assert_eq!(a, b);
        let (r, _, _, alpha) = a.into_components();
        assert!((r - 1.0).abs() < 1e-9);
        assert!((alpha - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_garbage_colors() {
        assert!(parse_color("salmon-ish").is_err());
        assert!(parse_color("").is_err());
    }

    #[test]
    fn hover_fill_falls_back_to_default() {
        let style = FillStyle {
            fill: parse_color("#434343").unwrap(),
            hovered_fill: None,
            stroke: None,
        };
        assert_eq!(style.fill_for(true), style.fill);

        let style = FillStyle {
            hovered_fill: Some(parse_color("#5a5a5a").unwrap()),
            ..style
        };
        assert_ne!(style.fill_for(true), style.fill_for(false));
    }

    #[test]
    fn builtin_layout_resolves_fully() {
        let theme = Theme::from_config(&Config::default()).unwrap();
        assert_eq!(theme.bodies.len(), 6);
        assert!(theme.rim.is_some());
        // Only the sun's ring carries labels.
        assert!(theme.bodies[0].label.is_some());
        assert!(theme.bodies[1..].iter().all(|b| b.label.is_none()));
        assert_ne!(theme.background(true), theme.background(false));
    }
}
