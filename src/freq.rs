//! Byte-frequency counting over an input stream.

use std::io::Read;

use crate::error::{Error, Result};

/// Number of distinct symbols a single byte can take.
pub const ALPHABET: usize = 256;

/// Occurrence counts for every byte value, with cached totals.
///
/// Built once per run (from the input stream when encoding, from the
/// persisted header when decoding) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; ALPHABET],
    total: u32,
    distinct: u32,
}

impl FrequencyTable {
    /// Scans `reader` to end-of-stream, counting every byte once.
    ///
    /// Fails on a read error, or with [`Error::InputTooLarge`] once the
    /// stream holds more symbols than the format's 32-bit counts can
    /// carry.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut counts = [0u32; ALPHABET];
        let mut total = 0u64;
        let mut buf = [0u8; 8192];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            // Refuse the chunk before any per-byte count can wrap its
            // 32-bit slot.
            total += n as u64;
            if total > u32::MAX as u64 {
                return Err(Error::InputTooLarge);
            }
            for &byte in &buf[..n] {
                counts[byte as usize] += 1;
            }
        }
        Self::from_counts(counts)
    }

    /// Builds a table from raw per-byte counts.
    ///
    /// Fails with [`Error::InputTooLarge`] if the counts sum past the
    /// 32-bit total the persisted format can carry.
    pub fn from_counts(counts: [u32; ALPHABET]) -> Result<Self> {
        let mut total = 0u64;
        let mut distinct = 0u32;
        for &count in &counts {
            total += count as u64;
            if count > 0 {
                distinct += 1;
            }
        }
        let total = u32::try_from(total).map_err(|_| Error::InputTooLarge)?;
        Ok(FrequencyTable {
            counts,
            total,
            distinct,
        })
    }

    /// Occurrence count for one byte value.
    pub fn count(&self, byte: u8) -> u32 {
        self.counts[byte as usize]
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of byte values with a non-zero count.
    pub fn distinct(&self) -> u32 {
        self.distinct
    }

    /// Iterates `(byte, count)` pairs with non-zero counts in ascending
    /// byte-value order. Both the persisted header layout and the tree
    /// builder's seeding order depend on this ordering.
    pub fn present(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn counts_bytes_and_totals() {
        let mut input = Cursor::new(b"aaab".to_vec());
        let freq = FrequencyTable::from_reader(&mut input).unwrap();

        assert_eq!(freq.count(b'a'), 3);
        assert_eq!(freq.count(b'b'), 1);
        assert_eq!(freq.count(b'c'), 0);
        assert_eq!(freq.total(), 4);
        assert_eq!(freq.distinct(), 2);
    }

    #[test]
    fn empty_stream_yields_empty_table() {
        let mut input = Cursor::new(Vec::new());
        let freq = FrequencyTable::from_reader(&mut input).unwrap();

        assert_eq!(freq.total(), 0);
        assert_eq!(freq.distinct(), 0);
        assert_eq!(freq.present().count(), 0);
    }

    #[test]
    fn present_iterates_in_ascending_byte_order() {
        let mut input = Cursor::new(b"zebra".to_vec());
        let freq = FrequencyTable::from_reader(&mut input).unwrap();

        let bytes: Vec<u8> = freq.present().map(|(byte, _)| byte).collect();
        assert_eq!(bytes, vec![b'a', b'b', b'e', b'r', b'z']);
    }

    #[test]
    fn counts_summing_past_u32_are_rejected() {
        let mut counts = [0u32; ALPHABET];
        counts[0x00] = u32::MAX;
        counts[0x01] = 1;

        assert!(matches!(
            FrequencyTable::from_counts(counts),
            Err(Error::InputTooLarge)
        ));
    }

    #[test]
    fn counts_summing_to_exactly_u32_max_are_accepted() {
        let mut counts = [0u32; ALPHABET];
        counts[0x00] = u32::MAX - 1;
        counts[0x01] = 1;

        let freq = FrequencyTable::from_counts(counts).unwrap();
        assert_eq!(freq.total(), u32::MAX);
        assert_eq!(freq.distinct(), 2);
    }
}
