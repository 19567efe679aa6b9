pub mod error;
pub mod evaluator;
pub mod expander;

pub use error::ExpandError;
pub use expander::{expand, prepare, render};
