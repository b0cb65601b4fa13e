pub mod errors;
pub mod exact;
pub mod filter;
pub mod graph;
pub mod heuristic;
pub mod io;
pub mod log;
pub mod testing;

pub mod prelude {
    pub use crate::exact::{DeletablePool, ExactOptions};
    pub use crate::filter::{decide, Counters, FilterOptions, Shard};
    pub use crate::graph::*;
    pub use crate::heuristic::HeuristicOptions;
    pub use crate::io::graph6;
    pub use word_bitset::prelude::*;
}
