//! Exchange adapters.

pub mod bitvavo;

pub use bitvavo::BitvavoAdapter;
