pub mod chain;
pub mod debug;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{ChainError, GeometryError, Result, SpherewalkError};
