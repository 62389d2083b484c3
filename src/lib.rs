//! # lzss-core
//!
//! The core of a byte-oriented LZSS compressor for bounded-memory,
//! deterministic, bit-packed deployment (e.g. an ECU or other embedded
//! target): a sliding-window dictionary, a binary search tree over window
//! positions that doubles as the match finder, and a driver that emits a
//! bit-packed stream of literal and match records.
//!
//! Decompression is intentionally not part of this crate's surface — the
//! wire format fully determines it, and a conforming decoder is a
//! separate concern for the embedder to own.
//!
//! ## Buffer Example
//!
//! ```rs
//! use lzss_core::{Encoder, STD_PARAMS};
//! let compressed = Encoder::new(STD_PARAMS).expect("valid parameters")
//!     .compress_slice(b"I am Sam. Sam I am. I do not like this Sam I am.\n")
//!     .expect("compression failed");
//! ```

mod ring_buffer;
mod tree;
pub mod io;
pub mod encoder;

pub use encoder::Encoder;
pub use io::{BitSink, BitWriter, ByteInput, InputSource, END_OF_INPUT};

/// Errors an embedder can observe from this crate.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("index_bits + length_bits too small: break-even must be at least 1")]
    InvalidParams
}

/// The two build-time parameters spec. 3 allows to vary; every other
/// quantity (window size, look-ahead, break-even, ...) is derived from
/// these so the wire format and memory footprint always stay consistent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// bits used to encode a window position
    pub index_bits: u32,
    /// bits used to encode an encoded match length
    pub length_bits: u32
}

impl Params {
    /// `W`: window size, always a power of two.
    pub const fn window_size(&self) -> usize {
        1usize << self.index_bits
    }
    /// number of distinct encodable match lengths before biasing
    pub const fn raw_look_ahead(&self) -> usize {
        1usize << self.length_bits
    }
    /// match length at/below which a literal is cheaper than a match record
    pub const fn break_even(&self) -> usize {
        (1 + self.index_bits as usize + self.length_bits as usize) / 9
    }
    /// maximum match length actually searched/encoded
    pub const fn look_ahead(&self) -> usize {
        self.raw_look_ahead() + self.break_even()
    }
    /// sentinel index of the tree's permanent root slot
    pub const fn tree_root(&self) -> usize {
        self.window_size()
    }
}

/// Default parameters: a 1024-byte window, matches up to 17 bytes,
/// break-even at 1 byte.
pub const STD_PARAMS: Params = Params { index_bits: 10, length_bits: 4 };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_params_match_defaults() {
        assert_eq!(STD_PARAMS.window_size(), 1024);
        assert_eq!(STD_PARAMS.raw_look_ahead(), 16);
        assert_eq!(STD_PARAMS.break_even(), 1);
        assert_eq!(STD_PARAMS.look_ahead(), 17);
        assert_eq!(STD_PARAMS.tree_root(), 1024);
    }
}
