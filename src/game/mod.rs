// Game modules: hero characters, animation, configuration

pub mod animation;
pub mod characters;
pub mod config;

pub use config::{ConfigError, HeroConfig};
