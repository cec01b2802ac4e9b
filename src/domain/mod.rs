pub mod battery;
pub mod schedule;

pub use battery::*;
pub use schedule::*;
