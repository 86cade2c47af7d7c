/*!
# Tessera Engine

Geometry import, instanced mesh batching and glyph atlas text meshes on top of
a backend-agnostic graphics device.

## Architecture

- **GraphicsDevice**: trait for creating buffers, textures and command lists
- **import**: line-format and glTF adapters producing canonical meshes
- **Mesh / InstancedMesh**: GPU geometry; instanced meshes draw many entities
  in capacity-sized chunks
- **GlyphAtlas / TextMesh**: a character set drawn into one texture, and
  textured quads for strings
- **EntityRegistry**: snapshot-consistent entity storage read by the render
  thread

Backends implement `GraphicsDevice` and the resource traits it returns.
*/

// Internal modules
mod error;
mod config;
mod context;
pub mod log;
pub mod graphics_device;
pub mod resource;
pub mod import;
pub mod text;
pub mod scene;
pub mod camera;

// Main tessera namespace module
pub mod tessera {
    // Error types
    pub use crate::error::{Error, ParseErrorKind, Result};

    // Context and configuration
    pub use crate::config::EngineConfig;
    pub use crate::context::EngineContext;

    // Graphics device trait
    pub use crate::graphics_device::GraphicsDevice;

    // Logging sub-module (types and functions, macros stay at the crate root)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity, log, log_detailed,
        };
    }

    // Device sub-module with buffer, texture and command types
    pub mod render {
        pub use crate::graphics_device::*;
    }

    pub mod import {
        pub use crate::import::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod text {
        pub use crate::text::*;
    }

    pub mod scene {
        pub use crate::scene::*;
        pub use crate::camera::Camera;
    }
}

// Re-export math library at crate root
pub use glam;
