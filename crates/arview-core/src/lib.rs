pub mod camera;
pub mod compose;
pub mod config;
pub mod consts;
pub mod error;
pub mod export;
pub mod geometry;
pub mod overlay;
pub mod session;
pub mod snapshot;
pub mod transform;
