//! Bubble simulation module
//!
//! All gameplay rules live here. Nothing in this module knows about timers
//! or rendering:
//! - Time comes in as milliseconds on the game clock
//! - Randomness comes from the controller's seeded RNG
//! - The play area size is supplied by the caller

pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use physics::{WallContact, advance, step_bubble, wall_contact};
pub use spawn::{SpawnPolicy, create_bubble, expire, populate, remove_by_id};
pub use state::{Bubble, GameEvent, GamePhase, GameState, PlayArea, Rgba};
pub use tick::GameController;
