mod channel;
mod signaling_output;

pub use channel::*;
pub use signaling_output::*;
