// Engine modules: assets, camera, input, physics, timing

pub mod assets;
pub mod camera;
pub mod game_loop;
pub mod input;
pub mod physics;
