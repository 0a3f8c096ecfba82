//! Glint Core - scene description for the raytracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Camera`, `Light`, `Surface`, `Material`
//! - **Scene files**: JSON loading via `load_scene`
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} surfaces, {} lights",
//!     scene.surfaces.len(),
//!     scene.lights.len());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, SceneError, SceneResult};
pub use scene::{Camera, Geometry, Light, LightKind, Material, Scene, Surface};
