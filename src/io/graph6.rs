//! Decoder for McKay's graph6 format: one graph per line, an optional
//! `>>graph6<<` header, the vertex count in one or four or eight bytes, then
//! the upper triangle of the adjacency matrix packed six bits per byte.

use thiserror::Error;
use word_bitset::prelude::*;

use crate::graph::CubicGraph;

const HEADER: &str = ">>graph6<<";
const BIAS: u8 = 63;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Graph6Error {
    #[error("empty graph6 line")]
    Empty,

    #[error("invalid start of graph6 string")]
    InvalidStart,

    #[error("invalid graph6 byte {0:#04x}")]
    InvalidByte(u8),

    #[error("graph6 line ends before the adjacency data is complete")]
    Truncated,

    #[error("graph of order {order} does not fit a {width}-bit word")]
    TooLarge { order: u64, width: u32 },
}

pub type Result<T> = std::result::Result<T, Graph6Error>;

fn payload(line: &str) -> Result<&[u8]> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_prefix(HEADER).unwrap_or(line);
    let bytes = line.as_bytes();
    match bytes.first() {
        None => Err(Graph6Error::Empty),
        Some(&b) if (BIAS..=126).contains(&b) => Ok(bytes),
        Some(_) => Err(Graph6Error::InvalidStart),
    }
}

fn six_bits(byte: u8) -> Result<u64> {
    if (BIAS..=126).contains(&byte) {
        Ok((byte - BIAS) as u64)
    } else {
        Err(Graph6Error::InvalidByte(byte))
    }
}

/// Decodes the order field and returns `(order, bytes consumed)`.
fn order_field(bytes: &[u8]) -> Result<(u64, usize)> {
    if bytes[0] < 126 {
        return Ok(((bytes[0] - BIAS) as u64, 1));
    }
    // one or two leading 126-bytes select the 18- or 36-bit form
    let (count, skip) = if bytes.get(1) == Some(&126) {
        (6, 2)
    } else {
        (3, 1)
    };
    let digits = bytes.get(skip..skip + count).ok_or(Graph6Error::Truncated)?;
    let mut order = 0;
    for &byte in digits {
        order = (order << 6) | six_bits(byte)?;
    }
    Ok((order, skip + count))
}

/// The number of vertices encoded at the start of a graph6 line.
pub fn order(line: &str) -> Result<u64> {
    Ok(order_field(payload(line)?)?.0)
}

/// Decodes a graph6 line into an adjacency-list graph on at most `W::BITS`
/// vertices. Padding bits beyond the upper triangle are ignored.
pub fn parse<W: BitWord>(line: &str) -> Result<CubicGraph<W>> {
    let bytes = payload(line)?;
    let (order, consumed) = order_field(bytes)?;
    if order > W::BITS as u64 {
        return Err(Graph6Error::TooLarge {
            order,
            width: W::BITS,
        });
    }
    let n = order as u32;

    let mut adj = vec![WordSet::<W>::new(); n as usize];
    let total_bits = (n as u64) * (n as u64 - 1) / 2;

    // bit k of the packed stream is the matrix entry (row, col), walking the
    // columns upwards: (0,1), (0,2), (1,2), (0,3), ...
    let (mut row, mut col) = (0u32, 1u32);
    let mut k = 0u64;
    for &byte in &bytes[consumed..] {
        let value = six_bits(byte)?;
        for shift in (0..6).rev() {
            if k >= total_bits {
                break;
            }
            if (value >> shift) & 1 == 1 {
                adj[row as usize].set_bit(col);
                adj[col as usize].set_bit(row);
            }
            k += 1;
            row += 1;
            if row == col {
                row = 0;
                col += 1;
            }
        }
    }
    if k < total_bits {
        return Err(Graph6Error::Truncated);
    }

    Ok(CubicGraph::from_adjacency(adj))
}
