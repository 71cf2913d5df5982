pub mod assets;
pub mod camera;
pub mod core;
pub mod error;
pub mod input;
pub mod loading;
pub mod mapping;
pub mod picking;
pub mod scene;
pub mod systems;
