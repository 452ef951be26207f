//! Tunables for a two-entity scene.

use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::disk::DEFAULT_SEGMENTS;
use crate::error::ConfigError;
use crate::input::KeyBindings;
use crate::render::Color;

/// Static configuration for a [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation ticks per second.
    pub framerate: u32,
    /// Arc length covered per tick while moving.
    pub move_speed: f64,
    /// Radians turned per tick while rotating.
    pub rotate_speed: f64,
    /// Rim samples per hyperbolic disk.
    pub segments: usize,
    /// Size and layout shared by both entities.
    pub figure: FigureConfig,
    /// Keys driving the player entity.
    pub keys: KeyBindings,
    /// Second entity steers itself every tick.
    pub autopilot: bool,
    /// Clockwise turn applied to the second entity before it moves away.
    pub peer_initial_turn: f64,
    /// Distance the second entity moves away from the first at start-up.
    pub peer_initial_distance: f64,
    pub player_color: Color,
    pub peer_color: Color,
    pub background_color: Color,
    pub trail_color: Color,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            framerate: 60,
            move_speed: 0.02,
            rotate_speed: 0.05,
            segments: DEFAULT_SEGMENTS,
            figure: FigureConfig::default(),
            keys: KeyBindings::default(),
            autopilot: true,
            peer_initial_turn: FRAC_PI_2,
            peer_initial_distance: 1.0,
            player_color: Color::RED,
            peer_color: Color::GREEN,
            background_color: Color::BLACK,
            trail_color: Color::WHITE,
        }
    }
}

/// Geometry of one composite figure. All lengths are hyperbolic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FigureConfig {
    pub body_radius: f64,
    pub eye_radius: f64,
    pub pupil_radius: f64,
    /// Largest mouth radius; the mouth breathes between 0 and this.
    pub mouth_radius: f64,
    /// Radius change per tick while breathing.
    pub mouth_step: f64,
    /// Angle between the gaze reference heading and each eye, in radians.
    pub eye_offset: f64,
    pub eye_color: Color,
    pub pupil_color: Color,
    pub mouth_color: Color,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            body_radius: 0.2,
            eye_radius: 0.05,
            pupil_radius: 0.03,
            mouth_radius: 0.1,
            mouth_step: 0.005,
            eye_offset: 0.6,
            eye_color: Color::WHITE,
            pupil_color: Color::BLUE,
            mouth_color: Color::BLACK,
        }
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl FigureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !non_negative(self.body_radius)
            || !non_negative(self.eye_radius)
            || !non_negative(self.pupil_radius)
            || !non_negative(self.mouth_radius)
        {
            return Err(ConfigError::InvalidConfig(
                "figure radii must be finite and non-negative",
            ));
        }
        if !(self.mouth_step.is_finite() && self.mouth_step > 0.0) {
            return Err(ConfigError::InvalidConfig("mouth_step must be positive"));
        }
        if !self.eye_offset.is_finite() {
            return Err(ConfigError::InvalidConfig("eye_offset must be finite"));
        }
        Ok(())
    }
}

impl SimulationConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.framerate == 0 || self.framerate > 1000 {
            return Err(ConfigError::InvalidConfig("framerate must be within 1..=1000"));
        }
        if !non_negative(self.move_speed) || !non_negative(self.rotate_speed) {
            return Err(ConfigError::InvalidConfig(
                "move_speed and rotate_speed must be finite and non-negative",
            ));
        }
        if self.segments == 0 {
            return Err(ConfigError::InvalidConfig("segments must be non-zero"));
        }
        if !self.peer_initial_turn.is_finite() || !non_negative(self.peer_initial_distance) {
            return Err(ConfigError::InvalidConfig("invalid initial peer placement"));
        }
        self.figure.validate()
    }

    /// Milliseconds per tick, truncated.
    pub fn tick_millis(&self) -> u64 {
        1000 / u64::from(self.framerate.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        SimulationConfig::default().validate().unwrap();
        assert_eq!(SimulationConfig::default().tick_millis(), 16);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SimulationConfig::from_json_str(r#"{ "framerate": 30, "figure": { "eye_offset": 0.4 } }"#).unwrap();
        assert_eq!(config.framerate, 30);
        assert_eq!(config.figure.eye_offset, 0.4);
        assert_eq!(config.figure.body_radius, 0.2);
        assert_eq!(config.segments, DEFAULT_SEGMENTS);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for json in [
            r#"{ "framerate": 0 }"#,
            r#"{ "segments": 0 }"#,
            r#"{ "move_speed": -1.0 }"#,
            r#"{ "figure": { "mouth_step": 0.0 } }"#,
            r#"{ "figure": { "pupil_radius": -0.1 } }"#,
        ] {
            let err = SimulationConfig::from_json_str(json);
            assert!(
                matches!(err, Err(ConfigError::InvalidConfig(_))),
                "{} should be rejected, got {:?}",
                json,
                err
            );
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            SimulationConfig::from_json_str("{ framerate"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = SimulationConfig::default();
        config.autopilot = false;
        let json = config.to_json_string().unwrap();
        let parsed = SimulationConfig::from_json_str(&json).unwrap();
        assert!(!parsed.autopilot);
        assert_eq!(parsed.keys, config.keys);
        assert!((parsed.peer_initial_turn - config.peer_initial_turn).abs() < 1e-12);
    }
}
