//! Circular agent layout.
//!
//! Agents sit on a circle around the centre logo, evenly spaced and
//! proceeding clockwise from the start angle. Coordinates are screen
//! coordinates: `y` grows downwards, so an angle of `-90` degrees is
//! directly above the centre.
//!
//! Positions are never stored. They are a pure function of the agent's
//! index, the total count, and the [`LayoutConfig`] constants.

use dentaliq_types::{Agent, PopupDirection, Position};

use crate::config::LayoutConfig;

/// Full turn in degrees.
const FULL_TURN: f64 = 360.0;

/// Compute one position per agent, in input order.
///
/// An empty slice yields an empty vector.
pub fn layout(config: &LayoutConfig, agents: &[Agent]) -> Vec<Position> {
    layout_count(config, agents.len())
}

/// Compute `count` evenly spaced positions.
pub fn layout_count(config: &LayoutConfig, count: usize) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }
    let step = FULL_TURN / count as f64;
    (0..count)
        .map(|i| position_at(config, config.start_angle + step * i as f64))
        .collect()
}

/// The position on the layout circle at `angle` degrees.
pub fn position_at(config: &LayoutConfig, angle: f64) -> Position {
    let radians = angle.to_radians();
    let x = config.radius.mul_add(radians.cos(), config.center_x);
    let y = config.radius.mul_add(radians.sin(), config.center_y);
    Position {
        x,
        y,
        angle,
        popup_direction: popup_direction(config, x, y),
    }
}

/// Classify on which side of an icon at `(x, y)` its popup anchors.
///
/// Outside the dead zone around the vertical centre line the horizontal
/// offset decides (`left` / `right`); inside it the vertical offset does
/// (`top` / `bottom`).
pub fn popup_direction(config: &LayoutConfig, x: f64, y: f64) -> PopupDirection {
    if x < config.center_x - config.dead_zone {
        PopupDirection::Left
    } else if x > config.center_x + config.dead_zone {
        PopupDirection::Right
    } else if y < config.center_y {
        PopupDirection::Top
    } else {
        PopupDirection::Bottom
    }
}
