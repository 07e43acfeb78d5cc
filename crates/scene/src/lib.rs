pub mod camera;
pub mod config;
pub mod containment;
pub mod country;
pub mod error;
pub mod hover;
pub mod picking;
pub mod prefabs;
pub mod visibility;
pub mod world;

pub use config::*;
pub use country::*;
pub use error::*;
pub use world::*;
