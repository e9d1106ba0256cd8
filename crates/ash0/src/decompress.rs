//! ASH0 decompression implementation
//!
//! Stream layout (all fields big-endian):
//!
//! ```text
//! 0x00  magic "ASH0"
//! 0x04  u32   decompressed size
//! 0x08  u32   absolute offset of the distance bit stream
//! 0x0C  symbol bit stream (code tree, then codes)
//!  ...  distance bit stream (code tree, then codes)
//! ```
//!
//! Each bit stream begins with its Huffman tree, serialized as a prefix
//! walk: bit `1` opens an internal node (left subtree, then right subtree),
//! bit `0` is a leaf followed by the leaf value (9 bits for symbols, 11 for
//! distances). Symbols below 0x100 are literal bytes; higher symbols encode
//! a match of `sym - 0x100 + 3` bytes at `distance + 1` bytes back.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use tracing::{debug, trace};

use crate::bits::BitReader;
use crate::{ASH0_MAGIC, Error, Result};

/// Fixed header length: magic + decompressed size + distance stream offset.
const HEADER_LEN: usize = 12;

/// Leaf width of the symbol tree: 256 literals + 256 match lengths.
const SYMBOL_LEAF_BITS: u32 = 9;

/// Leaf width of the distance tree.
const DISTANCE_LEAF_BITS: u32 = 11;

/// Cap on the declared decompressed size. Course sub-files are at most a
/// few hundred KiB; anything near this is a corrupt header.
const MAX_DECOMPRESSED_SIZE: usize = 1 << 28;

/// Decompress a complete ASH0 stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < HEADER_LEN {
        return Err(Error::TruncatedData {
            expected: HEADER_LEN,
            actual: data.len(),
        });
    }

    let mut cursor = Cursor::new(data);
    let mut magic = [0u8; ASH0_MAGIC.len()];
    cursor.read_exact(&mut magic)?;
    if magic != ASH0_MAGIC {
        return Err(Error::InvalidMagic(magic));
    }

    let decompressed_size = cursor.read_u32::<BigEndian>()? as usize;
    let distance_offset = cursor.read_u32::<BigEndian>()? as usize;

    if decompressed_size > MAX_DECOMPRESSED_SIZE {
        return Err(Error::InvalidHeader(format!(
            "implausible decompressed size: {decompressed_size}"
        )));
    }
    if distance_offset < HEADER_LEN || distance_offset > data.len() {
        return Err(Error::InvalidHeader(format!(
            "distance stream offset {distance_offset} outside stream of {} bytes",
            data.len()
        )));
    }

    trace!(
        "ASH0 header: decompressed_size={decompressed_size}, distance_offset={distance_offset}"
    );

    let mut symbol_bits = BitReader::new(&data[HEADER_LEN..distance_offset]);
    let mut distance_bits = BitReader::new(&data[distance_offset..]);

    let symbol_tree = CodeTree::parse(&mut symbol_bits, SYMBOL_LEAF_BITS)?;
    let distance_tree = CodeTree::parse(&mut distance_bits, DISTANCE_LEAF_BITS)?;

    let mut out = Vec::with_capacity(decompressed_size);
    while out.len() < decompressed_size {
        let sym = symbol_tree.decode(&mut symbol_bits)?;
        if sym < 0x100 {
            out.push(sym as u8);
            continue;
        }

        let length = usize::from(sym - 0x100) + 3;
        let distance = usize::from(distance_tree.decode(&mut distance_bits)?) + 1;
        if distance > out.len() {
            return Err(Error::InvalidBackreference {
                distance,
                available: out.len(),
            });
        }
        if out.len() + length > decompressed_size {
            return Err(Error::OutputOverrun {
                declared: decompressed_size,
                produced: out.len() + length,
            });
        }
        // Matches may overlap their own output, so copy byte-wise.
        for _ in 0..length {
            let byte = out[out.len() - distance];
            out.push(byte);
        }
    }

    debug!("ASH0: {} bytes -> {} bytes", data.len(), out.len());
    Ok(out)
}

/// Arena-backed Huffman tree.
#[derive(Debug)]
struct CodeTree {
    nodes: Vec<Node>,
    root: u32,
}

#[derive(Debug)]
enum Node {
    Leaf(u16),
    Branch { left: u32, right: u32 },
}

impl CodeTree {
    /// Parse a serialized tree from the head of a bit stream.
    fn parse(bits: &mut BitReader<'_>, leaf_bits: u32) -> Result<Self> {
        // A tree over 2^leaf_bits leaves has at most 2^(leaf_bits+1) - 1
        // nodes; more means the serialization is lying.
        let max_nodes = (1usize << (leaf_bits + 1)) - 1;
        let mut nodes = Vec::new();
        let root = Self::parse_node(bits, leaf_bits, max_nodes, &mut nodes)?;
        Ok(Self { nodes, root })
    }

    fn parse_node(
        bits: &mut BitReader<'_>,
        leaf_bits: u32,
        max_nodes: usize,
        nodes: &mut Vec<Node>,
    ) -> Result<u32> {
        if nodes.len() >= max_nodes {
            return Err(Error::CorruptTree(format!(
                "more than {max_nodes} nodes in serialized tree"
            )));
        }

        if bits.read_bit()? == 1 {
            // Reserve the slot before recursing so child indices are stable.
            let index = nodes.len() as u32;
            nodes.push(Node::Branch { left: 0, right: 0 });
            let left = Self::parse_node(bits, leaf_bits, max_nodes, nodes)?;
            let right = Self::parse_node(bits, leaf_bits, max_nodes, nodes)?;
            nodes[index as usize] = Node::Branch { left, right };
            Ok(index)
        } else {
            let value = bits.read_bits(leaf_bits)? as u16;
            let index = nodes.len() as u32;
            nodes.push(Node::Leaf(value));
            Ok(index)
        }
    }

    /// Decode one value: walk from the root, bit 0 = left, bit 1 = right.
    ///
    /// A single-leaf tree yields its value without consuming bits.
    fn decode(&self, bits: &mut BitReader<'_>) -> Result<u16> {
        let mut index = self.root;
        loop {
            match &self.nodes[index as usize] {
                Node::Leaf(value) => return Ok(*value),
                Node::Branch { left, right } => {
                    index = if bits.read_bit()? == 0 { *left } else { *right };
                }
            }
        }
    }
}
