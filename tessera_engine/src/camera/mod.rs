//! Camera module.
//!
//! Provides a passive view/projection container. The engine does NOT store
//! or manage cameras. Callers own them and pass one to the instanced batcher
//! when billboarding is requested.

mod camera;

pub use camera::Camera;
