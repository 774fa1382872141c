mod schedule;
mod status;

pub use schedule::*;
pub use status::*;

pub type Id = i32;
