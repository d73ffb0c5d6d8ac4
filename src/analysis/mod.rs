pub mod comparison;
pub mod scoring;

pub use comparison::*;
pub use scoring::*;
