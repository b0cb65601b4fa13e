pub mod graph6;

pub use graph6::*;
