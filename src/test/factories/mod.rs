//! Factories for commonly used test values

mod principals;

pub use principals::*;
