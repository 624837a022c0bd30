//! Room millimetres <-> renderer scene units.
//!
//! The renderer works in scene units (0.01 per mm) with X centred on the
//! room; the core works in room-frame millimetres with X = 0 at the left
//! outer edge.

use serde::{Deserialize, Serialize};

use crate::constants::units::SCENE_PER_MM;
use crate::modules::Position;

pub fn mm_to_scene(mm: f64) -> f64 {
    mm * SCENE_PER_MM
}

pub fn scene_to_mm(scene: f64) -> f64 {
    scene / SCENE_PER_MM
}

/// Room X (mm) to centred scene X.
pub fn room_x_to_scene(x: f64, room_width: f64) -> f64 {
    mm_to_scene(x - room_width / 2.0)
}

/// Centred scene X back to room X (mm).
pub fn scene_x_to_room(x: f64, room_width: f64) -> f64 {
    scene_to_mm(x) + room_width / 2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenePosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ScenePosition {
    pub fn from_room(p: Position, room_width: f64) -> Self {
        Self {
            x: room_x_to_scene(p.x, room_width),
            y: mm_to_scene(p.y),
            z: mm_to_scene(p.z),
        }
    }

    pub fn to_room(self, room_width: f64) -> Position {
        Position::new(
            scene_x_to_room(self.x, room_width),
            scene_to_mm(self.y),
            scene_to_mm(self.z),
        )
    }
}
