//! Spyglass Core - Foundational types for the Spyglass inspector
//!
//! This crate provides the core types that all other Spyglass crates depend on:
//! - `CameraId` - Opaque host camera identifiers
//! - `Transform`, `Orientation`, `Vec3` - Spatial types
//! - Text parse/format helpers for editable fields
//! - Error types and Result alias

mod error;
mod id;
pub mod parse;
mod types;

pub use error::{Result, SpyglassError};
pub use id::CameraId;
pub use types::{Basis, Orientation, Transform, Vec3};
