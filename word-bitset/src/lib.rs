pub mod bitset;

use num::{PrimInt, Unsigned};

/// Machine words usable as bitset storage. The width of the word bounds the
/// universe size; `u64` is noticeably faster than `u128` and should be
/// preferred whenever the universe fits.
pub trait BitWord: PrimInt + Unsigned + 'static {
    const BITS: u32;
}

impl BitWord for u64 {
    const BITS: u32 = 64;
}

impl BitWord for u128 {
    const BITS: u32 = 128;
}

pub mod prelude {
    pub use super::bitset::{WordSet, WordSet128, WordSet64};
    pub use super::BitWord;
}
