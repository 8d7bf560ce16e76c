/// Scroll-position state machine.
pub mod ticker;
