//! Where the bubble sits on screen.

use serde::{Deserialize, Serialize};

/// Screen corner the offsets are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gravity {
    #[default]
    TopStart,
    TopEnd,
    BottomStart,
    BottomEnd,
}

/// Position of the bubble window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubblePlacement {
    pub gravity: Gravity,
    /// Horizontal offset from the gravity corner, in pixels.
    pub x: i32,
    /// Vertical offset from the gravity corner, in pixels.
    pub y: i32,
}

impl Default for BubblePlacement {
    fn default() -> Self {
        Self {
            gravity: Gravity::TopStart,
            x: 100,
            y: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_placement_uses_defaults() {
        let placement: BubblePlacement = serde_json::from_str(r#"{"y": 640}"#).unwrap();
        assert_eq!(placement.gravity, Gravity::TopStart);
        assert_eq!(placement.x, 100);
        assert_eq!(placement.y, 640);
    }

    #[test]
    fn test_gravity_names() {
        let placement: BubblePlacement =
            serde_json::from_str(r#"{"gravity": "bottom_end"}"#).unwrap();
        assert_eq!(placement.gravity, Gravity::BottomEnd);
    }
}
