//! Wall bounce physics for bubbles
//!
//! Axis-aligned elastic bounces only. A bubble that crosses a wall keeps its
//! position for that tick and has the velocity component flipped, so it can
//! overshoot by one step before coming back.

use glam::Vec2;

use super::state::Bubble;

/// Which walls a moved bubble touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallContact {
    pub x: bool,
    pub y: bool,
}

/// Check a position against the canvas walls (all values in pixels)
pub fn wall_contact(pos: Vec2, radius_px: f32, width_px: f32, height_px: f32) -> WallContact {
    WallContact {
        x: pos.x < radius_px || pos.x > width_px - radius_px,
        y: pos.y < radius_px || pos.y > height_px - radius_px,
    }
}

/// Move one bubble by its velocity and reflect on wall contact
pub fn step_bubble(bubble: &Bubble, width_px: f32, height_px: f32, density: f32) -> Bubble {
    let new_pos = bubble.pos + bubble.vel;
    let radius_px = bubble.radius * density;
    let contact = wall_contact(new_pos, radius_px, width_px, height_px);

    let mut vel = bubble.vel;
    if contact.x {
        vel.x = -vel.x;
    }
    if contact.y {
        vel.y = -vel.y;
    }

    Bubble {
        pos: new_pos,
        vel,
        ..bubble.clone()
    }
}

/// Advance every bubble by one simulation tick
pub fn advance(bubbles: &[Bubble], width_px: f32, height_px: f32, density: f32) -> Vec<Bubble> {
    bubbles
        .iter()
        .map(|b| step_bubble(b, width_px, height_px, density))
        .collect()
}
