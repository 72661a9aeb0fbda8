//! Phos Core - Scene description and scene file support.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Camera`, `SceneSettings`, `Material`, `Primitive`, `Light`
//! - **Scene files**: parsing and validation of the line-oriented text format
//!
//! # Example
//!
//! ```ignore
//! use phos_core::load_scene;
//!
//! let scene = load_scene("scenes/pool.txt")?;
//! println!("Loaded {} surfaces, {} lights",
//!     scene.surface_count(),
//!     scene.light_count());
//! ```

pub mod scene;
pub mod scene_file;

// Re-export commonly used types
pub use scene::{Camera, Light, Material, Primitive, Scene, SceneError, SceneSettings};
pub use scene_file::{load_scene, parse_scene, ParseError};
