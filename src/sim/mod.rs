//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through the step's delta
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod actors;
pub mod collision;
pub mod events;
pub mod player;
pub mod powerup;
pub mod spawn;
pub mod state;
pub mod step;

pub use events::{FrameEvents, GameOverCause, SessionEnd, SoundCue};
pub use powerup::BuffKind;
pub use state::{GamePhase, World};
pub use step::{FrameInput, step};
