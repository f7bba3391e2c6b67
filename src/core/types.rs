//! Core type aliases and re-exports

pub use glam::{IVec2, IVec3, UVec3, Vec2, Vec3};

/// Standard Result type for the terrain system
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
