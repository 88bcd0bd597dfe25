//! Alignment engine configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};

/// Alignment engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Grid resolution for the speed trace / delta comparison
    #[serde(default = "default_speed_points")]
    pub speed_points: usize,

    /// Grid resolution for the track-dominance map
    #[serde(default = "default_map_points")]
    pub map_points: usize,

    /// Sector marker fractions of the common lap span, ascending, in (0, 1)
    #[serde(default = "default_marker_fractions")]
    pub marker_fractions: Vec<f64>,
}

fn default_speed_points() -> usize {
    500
}

fn default_map_points() -> usize {
    1000
}

fn default_marker_fractions() -> Vec<f64> {
    vec![1.0 / 3.0, 2.0 / 3.0]
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            speed_points: default_speed_points(),
            map_points: default_map_points(),
            marker_fractions: default_marker_fractions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlignmentConfig::default();
        assert_eq!(config.speed_points, 500);
        assert_eq!(config.map_points, 1000);
        assert_eq!(config.marker_fractions.len(), 2);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: AlignmentConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AlignmentConfig::default());
    }
}
