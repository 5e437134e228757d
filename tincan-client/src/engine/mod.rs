mod call_engine;
mod call_state;

pub use call_engine::*;
pub use call_state::*;
