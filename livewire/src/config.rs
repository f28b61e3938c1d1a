use crate::algorithms::cost::CostWeights;
use crate::error::{LivewireError, Result};
use crate::events::Modifier;
use crate::geometry::limits::MAX_SNAP_RADIUS;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimateConfig {
    pub enabled: bool,
    /// Max deviation (slice px) a dropped point may have from the simplified run.
    pub epsilon: f32,
}

impl Default for DecimateConfig {
    fn default() -> Self {
        DecimateConfig {
            enabled: false,
            epsilon: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivewireConfig {
    /// Snap radius (px) applied to confirmed clicks; 0 disables snapping.
    pub snap_handle_nearby: u32,
    /// Squared canvas distance to the first control point that closes the contour.
    pub close_threshold_sq: f32,
    /// Canvas distance for picking handles and contour outlines.
    pub handle_proximity: f32,
    pub calculate_stats: bool,
    pub stats_throttle_ms: u64,
    pub prevent_handle_outside_image: bool,
    pub hole_modifier: Modifier,
    pub decimate: DecimateConfig,
    pub cost_weights: CostWeights,
}

impl Default for LivewireConfig {
    fn default() -> Self {
        LivewireConfig {
            snap_handle_nearby: 2,
            close_threshold_sq: 100.0,
            handle_proximity: 6.0,
            calculate_stats: true,
            stats_throttle_ms: 100,
            prevent_handle_outside_image: false,
            hole_modifier: Modifier::Shift,
            decimate: DecimateConfig::default(),
            cost_weights: CostWeights::default(),
        }
    }
}

impl LivewireConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: LivewireConfig = serde_json::from_str(s).map_err(|e| LivewireError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.snap_handle_nearby > MAX_SNAP_RADIUS {
            return Err(LivewireError::Config(format!(
                "snap_handle_nearby {} exceeds {}",
                self.snap_handle_nearby, MAX_SNAP_RADIUS
            )));
        }
        if !self.close_threshold_sq.is_finite() || self.close_threshold_sq < 0.0 {
            return Err(LivewireError::Config("close_threshold_sq must be a non-negative number".into()));
        }
        if !self.handle_proximity.is_finite() || self.handle_proximity < 0.0 {
            return Err(LivewireError::Config("handle_proximity must be a non-negative number".into()));
        }
        if !self.decimate.epsilon.is_finite() || self.decimate.epsilon < 0.0 {
            return Err(LivewireError::Config("decimate.epsilon must be a non-negative number".into()));
        }
        if !self.cost_weights.is_valid() {
            return Err(LivewireError::Config("cost weights must be finite and non-negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = LivewireConfig::from_json_str(r#"{"snap_handle_nearby": 0, "decimate": {"enabled": true}}"#).unwrap();
        assert_eq!(cfg.snap_handle_nearby, 0);
        assert!(cfg.decimate.enabled);
        assert_eq!(cfg.decimate.epsilon, 0.1);
        assert_eq!(cfg.close_threshold_sq, 100.0);
        assert_eq!(cfg.cost_weights, CostWeights::default());
    }

    #[test]
    fn bad_values_are_config_errors() {
        assert!(matches!(LivewireConfig::from_json_str("{"), Err(LivewireError::Config(_))));
        assert!(matches!(
            LivewireConfig::from_json_str(r#"{"snap_handle_nearby": 1000}"#),
            Err(LivewireError::Config(_))
        ));
        assert!(matches!(
            LivewireConfig::from_json_str(r#"{"cost_weights": {"gradient": -1.0}}"#),
            Err(LivewireError::Config(_))
        ));
    }
}
