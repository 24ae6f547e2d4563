//! Tunable interaction thresholds.
//!
//! Every field defaults to the matching value in [`crate::constants`]; a JSON
//! document only needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::constants::*;
use crate::error::{CanvasError, CanvasResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub snap_tolerance: f64,
    pub snap_activation_delay_ms: f64,
    pub drag_start_delay_ms: f64,
    pub drag_start_distance: f64,
    pub new_connection_min_distance: f64,
    pub pan_context_menu_distance: f64,
    pub scroll_border_threshold: f64,
    pub scroll_max_effect_distance: f64,
    pub scroll_min_speed: f64,
    pub scroll_max_speed: f64,
    pub double_click_time_ms: f64,
    pub double_click_distance: f64,
    pub wheel_zoom_threshold: f64,
    pub resize_handle_size: f64,
    pub port_hit_radius: f64,
    pub zoom_steps: Vec<f64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: SNAP_TOLERANCE,
            snap_activation_delay_ms: SNAP_ACTIVATION_DELAY_MS,
            drag_start_delay_ms: DRAG_START_DELAY_MS,
            drag_start_distance: DRAG_START_DISTANCE,
            new_connection_min_distance: NEW_CONNECTION_MIN_DISTANCE,
            pan_context_menu_distance: PAN_CONTEXT_MENU_DISTANCE,
            scroll_border_threshold: SCROLL_BORDER_THRESHOLD,
            scroll_max_effect_distance: SCROLL_MAX_EFFECT_DISTANCE,
            scroll_min_speed: SCROLL_MIN_SPEED,
            scroll_max_speed: SCROLL_MAX_SPEED,
            double_click_time_ms: DOUBLE_CLICK_TIME_MS,
            double_click_distance: DOUBLE_CLICK_DISTANCE,
            wheel_zoom_threshold: WHEEL_ZOOM_THRESHOLD,
            resize_handle_size: RESIZE_HANDLE_SIZE,
            port_hit_radius: PORT_HIT_RADIUS,
            zoom_steps: ZOOM_STEPS.to_vec(),
        }
    }
}

impl CanvasConfig {
    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        let config: CanvasConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), "Canvas config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> CanvasResult<()> {
        let positive = [
            ("snap_tolerance", self.snap_tolerance),
            ("scroll_max_effect_distance", self.scroll_max_effect_distance),
            ("double_click_time_ms", self.double_click_time_ms),
            ("wheel_zoom_threshold", self.wheel_zoom_threshold),
            ("resize_handle_size", self.resize_handle_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CanvasError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("snap_activation_delay_ms", self.snap_activation_delay_ms),
            ("drag_start_delay_ms", self.drag_start_delay_ms),
            ("drag_start_distance", self.drag_start_distance),
            ("new_connection_min_distance", self.new_connection_min_distance),
            ("pan_context_menu_distance", self.pan_context_menu_distance),
            ("scroll_border_threshold", self.scroll_border_threshold),
            ("scroll_min_speed", self.scroll_min_speed),
            ("double_click_distance", self.double_click_distance),
            ("port_hit_radius", self.port_hit_radius),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CanvasError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.scroll_max_speed < self.scroll_min_speed {
            return Err(CanvasError::InvalidConfig(
                "scroll_max_speed is below scroll_min_speed".to_string(),
            ));
        }

        if self.zoom_steps.is_empty() {
            return Err(CanvasError::InvalidConfig("zoom_steps is empty".to_string()));
        }
        if self.zoom_steps.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(CanvasError::InvalidConfig(
                "zoom_steps must be positive".to_string(),
            ));
        }
        if self.zoom_steps.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CanvasError::InvalidConfig(
                "zoom_steps must be strictly ascending".to_string(),
            ));
        }

        debug!("Canvas config validated");
        Ok(())
    }
}
