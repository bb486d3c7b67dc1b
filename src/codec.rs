//! Packing input bytes into a code bit stream and back.
//!
//! Encoding makes two passes over the input: one to count frequencies,
//! one to emit code bits, with a rewind in between. Decoding reads the
//! header, rebuilds the same tree the encoder used, and walks it one bit
//! at a time until the promised symbol count has been produced.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::header;
use crate::tree::{HuffNode, HuffmanTree, NodeId};

/// Sizes observed while encoding, reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Bytes read from the input stream.
    pub original_bytes: u64,
    /// Bytes spent on the persisted header.
    pub header_bytes: u64,
    /// Bytes of packed code bits, including the padded trailing byte.
    pub packed_bytes: u64,
}

impl EncodeSummary {
    /// Total size of the output file.
    pub fn output_bytes(&self) -> u64 {
        self.header_bytes + self.packed_bytes
    }

    /// Packed size relative to the original, excluding the header.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            self.packed_bytes as f64 / self.original_bytes as f64
        }
    }
}

/// Compresses `input` into `output`.
///
/// The input must be seekable: frequencies are counted on the first pass
/// and the stream is rewound before the pass that emits code bits.
pub fn encode<R, W>(input: &mut R, output: &mut W) -> Result<EncodeSummary>
where
    R: Read + Seek,
    W: Write,
{
    let freq = FrequencyTable::from_reader(input)?;
    input.rewind()?;

    let tree = HuffmanTree::build(&freq);
    let codes = CodeTable::build(&tree);

    header::write_header(output, &freq)?;

    // Zero or one distinct symbols are carried entirely by the header.
    let packed_bytes = if freq.distinct() > 1 {
        pack(input, &codes, output)?
    } else {
        0
    };

    Ok(EncodeSummary {
        original_bytes: freq.total() as u64,
        header_bytes: header::header_len(&freq),
        packed_bytes,
    })
}

/// Decompresses `input` into `output`.
pub fn decode<R, W>(input: &mut R, output: &mut W) -> Result<()>
where
    R: Read,
    W: Write,
{
    let freq = header::read_header(input)?;
    let total = freq.total();

    if freq.distinct() == 1 {
        // No bits were packed; the header alone reconstructs the stream.
        if let Some((byte, _)) = freq.present().next() {
            emit_repeated(output, byte, total)?;
        }
        return Ok(());
    }

    let tree = HuffmanTree::build(&freq);
    let Some(root) = tree.root() else {
        // Empty header: nothing to produce.
        return Ok(());
    };

    unpack(input, &tree, root, total, output)
}

/// Encodes the file at `input` into the file at `output`.
pub fn encode_file(input: &Path, output: &Path) -> Result<EncodeSummary> {
    let source = File::open(input).map_err(|source| Error::Open {
        path: input.into(),
        source,
    })?;
    let sink = File::create(output).map_err(|source| Error::Open {
        path: output.into(),
        source,
    })?;

    let mut reader = BufReader::new(source);
    let mut writer = BufWriter::new(sink);
    let summary = encode(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(summary)
}

/// Decodes the file at `input` into the file at `output`.
pub fn decode_file(input: &Path, output: &Path) -> Result<()> {
    let source = File::open(input).map_err(|source| Error::Open {
        path: input.into(),
        source,
    })?;
    let sink = File::create(output).map_err(|source| Error::Open {
        path: output.into(),
        source,
    })?;

    let mut reader = BufReader::new(source);
    let mut writer = BufWriter::new(sink);
    decode(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Second encode pass: looks up each input byte's code and appends its
/// bits MSB-first, padding the trailing byte with zero bits. Returns the
/// number of packed bytes written.
fn pack<R, W>(input: &mut R, codes: &CodeTable, output: &mut W) -> Result<u64>
where
    R: Read,
    W: Write,
{
    let mut writer = BitWriter::endian(output, BigEndian);
    let mut bits_written = 0u64;
    let mut buf = [0u8; 8192];
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        for &byte in &buf[..n] {
            let (code, len) = codes.get(byte).ok_or_else(|| {
                // Only reachable if the input changed between passes.
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("byte {byte:#04x} missing from code table"),
                ))
            })?;
            writer.write_var(len, code)?;
            bits_written += len as u64;
        }
    }
    writer.byte_align()?;
    Ok(bits_written.div_ceil(8))
}

/// Walks the tree once per expected symbol, descending left on 0 and
/// right on 1. Running out of bits before `total` symbols means the
/// packed section was truncated.
fn unpack<R, W>(
    input: &mut R,
    tree: &HuffmanTree,
    root: NodeId,
    total: u32,
    output: &mut W,
) -> Result<()>
where
    R: Read,
    W: Write,
{
    let mut reader = BitReader::endian(input, BigEndian);
    for produced in 0..total {
        let mut id = root;
        loop {
            match tree.node(id) {
                HuffNode::Leaf { byte, .. } => {
                    output.write_all(&[*byte])?;
                    break;
                }
                HuffNode::Internal { left, right, .. } => {
                    let bit = reader.read_bit().map_err(|e| {
                        if e.kind() == std::io::ErrorKind::UnexpectedEof {
                            Error::Truncated {
                                expected: total,
                                produced,
                            }
                        } else {
                            Error::Io(e)
                        }
                    })?;
                    id = if bit { *right } else { *left };
                }
            }
        }
    }
    Ok(())
}

fn emit_repeated<W: Write>(output: &mut W, byte: u8, total: u32) -> Result<()> {
    let buf = [byte; 8192];
    let mut remaining = total as usize;
    while remaining > 0 {
        let n = remaining.min(buf.len());
        output.write_all(&buf[..n])?;
        remaining -= n;
    }
    Ok(())
}
