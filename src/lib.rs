pub mod diagram;
pub mod drawing;
pub mod error;
pub mod lift;
pub mod math;
pub mod subsurface;
pub mod tessellation;

pub use error::{Result, WeaveError};
