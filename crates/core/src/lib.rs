#![forbid(unsafe_code)]

pub mod artifact;
pub mod evaluator;
pub mod hint;
pub mod model;
pub mod progression;
pub mod session;
pub mod time;

pub use time::Clock;
