//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the engine's immutable snapshots and turns them into
//! cells on the terminal.  No animation math happens here — opacity,
//! transforms, and delays all arrive precomputed from `core`.

pub mod card;
pub mod layout;
pub mod stage;
pub mod theme;
