//! Turn-order tracker core: roster, turn controller, reorder engine, layout,
//! themes and keyboard shortcuts. Everything here is synchronous; effects are
//! returned, never performed.

pub mod character;
pub mod keyboard;
pub mod layout;
pub mod policy;
pub mod reorder;
pub mod roster;
pub mod state;
pub mod theme;
pub mod turns;
