//! AI systems (strategic layer logic)

pub mod patrol_lunge;


// Re-export all systems
pub use patrol_lunge::*;
