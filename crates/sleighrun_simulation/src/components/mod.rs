//! ECS Components для агентов
//!
//! Организация по доменам:
//! - agent: категория, здоровье (Agent, AgentCategory, Health)
//! - movement: Motion (direction + speed для хоста)
//! - world: позиционирование (WorldPosition)
//! - attachment: ranged орудия (RangedAttachment, RangedAttachments)
//! - player: target marker (Player)

pub mod agent;
pub mod attachment;
pub mod movement;
pub mod player;
pub mod world;

// Re-exports для удобного импорта
pub use agent::*;
pub use attachment::*;
pub use movement::*;
pub use player::*;
pub use world::*;
