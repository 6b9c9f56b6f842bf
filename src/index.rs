use std::ops::Range;

use async_std::io::{prelude::*, Read};
use itertools::Itertools;
use memchr::memchr_iter;

use crate::{error::Error, Result};

/// Size of the buffer used while scanning a file for newlines
const CHUNK_SIZE: usize = 64 * 1024;

/// Pushes `offset + pos` into `out` for every newline within `chunk`. Returns the amount of bytes
/// consumed, which is always the length of the chunk.
pub fn scan_chunk(chunk: &[u8], offset: u64, out: &mut Vec<u64>) -> usize {
    out.extend(memchr_iter(b'\n', chunk).map(|pos| offset + pos as u64));
    chunk.len()
}

/// `offset + 1`, failing for offsets no file can have
#[inline]
fn successor(offset: u64) -> Result<u64> {
    offset.checked_add(1).ok_or_else(|| Error::MalformedIndex {
        token: offset.to_string(),
    })
}

/// Contains an in-memory line-index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Byte offset of the newline terminating each line. The last entry is the end of file
    /// sentinel and holds the total length of the indexed data.
    inner: Vec<u64>,
}

impl Index {
    /// Create a new Index
    pub fn new(offsets: Vec<u64>) -> Index {
        Self { inner: offsets }
    }

    /// Build a new index for text within `reader` in a single forward pass. Only a fixed size
    /// chunk of the data is held in memory at a time.
    pub async fn build<R: Read + Unpin>(reader: &mut R) -> Result<Self> {
        let mut offsets: Vec<u64> = Vec::new();
        let mut curr_offset: u64 = 0;

        let mut buff = vec![0u8; CHUNK_SIZE];

        loop {
            let n = reader.read(&mut buff).await?;
            if n == 0 {
                break;
            }

            curr_offset += scan_chunk(&buff[..n], curr_offset, &mut offsets) as u64;
        }

        // End of file sentinel. Equals the last newline + 1 if the data ends with a newline
        offsets.push(curr_offset);

        Ok(Self { inner: offsets })
    }

    /// Encodes an index into its textual form: decimal offsets separated by a single newline
    /// without a trailing one.
    pub fn encode(&self) -> String {
        self.inner.iter().join("\n")
    }

    /// Decodes an encoded index. Entries are not validated against each other.
    pub fn decode(text: &str) -> Result<Self> {
        let inner = text
            .split('\n')
            .map(|token| {
                token.parse::<u64>().map_err(|_| Error::MalformedIndex {
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { inner })
    }

    /// Get the Index value
    #[inline]
    pub fn get(&self, pos: usize) -> Result<u64> {
        self.inner.get(pos).copied().ok_or(Error::OutOfRange {
            requested: pos,
            max: self.max_line(),
        })
    }

    /// Returns the highest valid line number
    #[inline]
    pub fn max_line(&self) -> usize {
        self.inner.len().saturating_sub(1)
    }

    /// Returns the end of file sentinel
    #[inline]
    pub fn sentinel(&self) -> Option<u64> {
        self.inner.last().copied()
    }

    /// Returns the byte range of `line`, excluding its newline.
    ///
    /// The first line starts at 0, every other line right after the previous newline. A line ends
    /// right before its own newline, except the last one which ends at the sentinel (inclusive).
    pub fn line_range(&self, line: usize) -> Result<Range<u64>> {
        let end = self.get(line)?;

        let start = match line {
            0 => 0,
            _ => successor(self.get(line - 1)?)?,
        };

        let end = if line == self.max_line() {
            successor(end)?
        } else {
            end
        };

        Ok(start..end.max(start))
    }

    /// Returns the amount of items of the index. On a properly built index, this represents the
    /// amount of lines in the file.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the index is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.inner
    }
}
