pub mod sequencer;
pub mod state;

pub use sequencer::*;
pub use state::*;
