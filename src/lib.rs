//! Canonical Huffman compression for byte streams.
//!
//! The encoder scans the input once to count byte frequencies, builds a
//! deterministic Huffman tree from the counts, and packs the input into
//! code bits behind a small frequency-table header. The decoder rebuilds
//! the identical tree from that header alone and walks it per bit.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let summary = huff::encode_file(Path::new("input.txt"), Path::new("input.huff"))?;
//! println!("packed {} bytes into {}", summary.original_bytes, summary.output_bytes());
//!
//! huff::decode_file(Path::new("input.huff"), Path::new("restored.txt"))?;
//! # Ok::<(), huff::Error>(())
//! ```

pub mod code;
pub mod codec;
pub mod error;
pub mod freq;
pub mod header;
pub mod tree;

pub use codec::{EncodeSummary, decode, decode_file, encode, encode_file};
pub use error::{Error, Result};
pub use freq::FrequencyTable;
pub use tree::HuffmanTree;
