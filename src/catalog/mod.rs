pub mod filters;
pub mod normalize;
pub mod recommendations;

pub use filters::*;
pub use normalize::*;
pub use recommendations::*;
