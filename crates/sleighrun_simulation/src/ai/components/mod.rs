//! AI components

pub mod patrol_lunge;


// Re-export all components
pub use patrol_lunge::*;
