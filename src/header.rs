//! The persisted file header.
//!
//! Layout, all integers little-endian 32-bit:
//!
//! ```text
//! [4 bytes] total symbol count
//! [4 bytes] distinct symbol count
//! repeated distinct-count times, in ascending byte-value order:
//!     [1 byte]  symbol value
//!     [4 bytes] symbol count
//! ```
//!
//! The decoder rebuilds the Huffman tree from these counts alone, so the
//! header is the only tree metadata the file carries.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::freq::{ALPHABET, FrequencyTable};

/// Fixed size of the leading count fields.
const FIXED_LEN: u64 = 8;
/// Size of one persisted (symbol, count) pair.
const PAIR_LEN: u64 = 5;

/// Serialized size of the header for `freq`.
pub fn header_len(freq: &FrequencyTable) -> u64 {
    FIXED_LEN + PAIR_LEN * freq.distinct() as u64
}

/// Writes the header for `freq` to `writer`.
pub fn write_header<W: Write>(writer: &mut W, freq: &FrequencyTable) -> std::io::Result<()> {
    writer.write_all(&freq.total().to_le_bytes())?;
    writer.write_all(&freq.distinct().to_le_bytes())?;
    for (byte, count) in freq.present() {
        writer.write_all(&[byte])?;
        writer.write_all(&count.to_le_bytes())?;
    }
    Ok(())
}

/// Reads a header from `reader` and rebuilds the frequency table,
/// validating the header invariants along the way.
pub fn read_header<R: Read>(reader: &mut R) -> Result<FrequencyTable> {
    let total = read_u32(reader)?;
    let distinct = read_u32(reader)?;
    if distinct as usize > ALPHABET {
        return Err(Error::Header("distinct symbol count exceeds alphabet"));
    }

    let mut counts = [0u32; ALPHABET];
    let mut prev: Option<u8> = None;
    for _ in 0..distinct {
        let mut sym = [0u8; 1];
        reader.read_exact(&mut sym)?;
        let count = read_u32(reader)?;
        if count == 0 {
            return Err(Error::Header("persisted symbol has zero count"));
        }
        if prev.is_some_and(|p| p >= sym[0]) {
            return Err(Error::Header("symbols out of ascending order"));
        }
        prev = Some(sym[0]);
        counts[sym[0] as usize] = count;
    }

    let freq = FrequencyTable::from_counts(counts)
        .map_err(|_| Error::Header("symbol counts overflow the 32-bit total"))?;
    if freq.total() != total {
        return Err(Error::Header("symbol counts do not sum to total"));
    }
    Ok(freq)
}

fn read_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}
