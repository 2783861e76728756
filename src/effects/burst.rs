//! Celebration burst configuration and emission requests

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::curve::Range;

/// Particle shapes understood by the emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Triangle,
    Square,
}

/// Which way a half of each step fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Launched from below the viewport
    Down,
    /// Launched from above the viewport, drift mirrored
    Up,
}

impl Direction {
    /// Launch angle in degrees
    pub fn angle(&self) -> f32 {
        match self {
            Direction::Down => 90.0,
            Direction::Up => 270.0,
        }
    }
}

/// Parameters for one celebratory trigger
///
/// Every [`Range`] is interpolated linearly from the first step to the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Time from first to last step
    pub total_duration_ms: u64,
    /// Number of intervals; `steps + 1` emission pairs are fired
    pub steps: u32,
    /// Particles per direction across the whole burst
    pub particle_budget: u32,

    pub gravity_down: Range,
    pub gravity_up: Range,
    pub velocity: Range,
    /// Cone spread in degrees
    pub spread: Range,
    pub decay: Range,
    /// Horizontal drift of the downward half; the upward half is mirrored
    pub drift: Range,
    /// Particle size multiplier
    pub scalar: Range,
    /// Lifespan in animation ticks (rounded per step)
    pub ticks: Range,
    pub origin_y_down: Range,
    pub origin_y_up: Range,
    /// Horizontal origin, 0 = left edge, 1 = right edge
    pub origin_x: f32,

    pub colors: Vec<String>,
    pub shapes: Vec<Shape>,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            total_duration_ms: 10,
            steps: 220,
            particle_budget: 700,

            gravity_down: Range::new(-1.0, 0.0),
            gravity_up: Range::new(1.0, 0.0),
            velocity: Range::new(50.0, 120.0),
            spread: Range::new(60.0, 120.0),
            decay: Range::new(0.9, 0.6),
            drift: Range::new(0.0, 0.2),
            scalar: Range::new(0.3, 0.2),
            ticks: Range::new(10.0, 100.0),
            origin_y_down: Range::new(1.0, 2.0),
            origin_y_up: Range::new(0.0, -1.0),
            origin_x: 0.5,

            colors: vec!["#FFD9EC".to_string(), "#D0F0FF".to_string()],
            shapes: vec![Shape::Circle, Shape::Triangle, Shape::Square],
        }
    }
}

impl BurstConfig {
    /// Interval count used for interpolation (never zero)
    pub fn step_count(&self) -> u32 {
        self.steps.max(1)
    }

    /// Particles per emission: the budget spread over the steps, rounded up
    pub fn per_step_count(&self) -> u32 {
        self.particle_budget.div_ceil(self.step_count())
    }
}

/// One call to the particle emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionRequest {
    pub particle_count: u32,
    pub angle: f32,
    pub spread: f32,
    pub start_velocity: f32,
    pub gravity: f32,
    pub decay: f32,
    pub drift: f32,
    pub scalar: f32,
    pub ticks: u32,
    #[serde(with = "origin_xy")]
    pub origin: Vec2,
    pub colors: Vec<String>,
    pub shapes: Vec<Shape>,
}

impl EmissionRequest {
    /// JSON object in the shape a canvas confetti binding expects
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// `Vec2` as `{ "x": .., "y": .. }`
mod origin_xy {
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Point {
        x: f32,
        y: f32,
    }

    pub fn serialize<S: Serializer>(v: &Vec2, s: S) -> Result<S::Ok, S::Error> {
        Point { x: v.x, y: v.y }.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec2, D::Error> {
        let p = Point::deserialize(d)?;
        Ok(Vec2::new(p.x, p.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_per_step_count() {
        // ceil(700 / 220)
        assert_eq!(BurstConfig::default().per_step_count(), 4);
    }

    #[test]
    fn test_zero_steps_treated_as_one() {
        let config = BurstConfig {
            steps: 0,
            particle_budget: 10,
            ..Default::default()
        };
        assert_eq!(config.step_count(), 1);
        assert_eq!(config.per_step_count(), 10);
    }

    #[test]
    fn test_config_partial_json() {
        let config: BurstConfig =
            serde_json::from_str(r#"{"steps": 4, "velocity": [10, 20]}"#).unwrap();
        assert_eq!(config.steps, 4);
        assert_eq!(config.velocity, Range::new(10.0, 20.0));
        assert_eq!(config.particle_budget, 700);
    }

    #[test]
    fn test_request_json_shape() {
        let request = EmissionRequest {
            particle_count: 4,
            angle: 90.0,
            spread: 60.0,
            start_velocity: 50.0,
            gravity: -1.0,
            decay: 0.5,
            drift: 0.0,
            scalar: 0.25,
            ticks: 10,
            origin: Vec2::new(0.5, 1.0),
            colors: vec!["#FFD9EC".to_string()],
            shapes: vec![Shape::Circle],
        };
        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(value["particleCount"], 4);
        assert_eq!(value["startVelocity"], 50.0);
        assert_eq!(value["origin"]["x"], 0.5);
        assert_eq!(value["origin"]["y"], 1.0);
        assert_eq!(value["shapes"][0], "circle");
    }
}
