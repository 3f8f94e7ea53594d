//! Editor configuration

use serde::{Deserialize, Serialize};

use zirkel_core::DEFAULT_SCALE;

/// Editor preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Starting view scale (screen pixels per world unit; device pixel
    /// ratio applied upstream)
    pub default_scale: f32,
    /// Snap radius in screen pixels, divided by the current scale to get
    /// the world-space threshold
    pub snap_distance: f32,
    /// Pointer moves within this many milliseconds of a press are ignored,
    /// so short press-and-release gestures count as clicks
    pub drag_delay_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_scale: DEFAULT_SCALE,
            // The cursor cross is 30px; snap within its diagonal.
            snap_distance: 30.0 * std::f32::consts::SQRT_2,
            drag_delay_ms: 100,
        }
    }
}
