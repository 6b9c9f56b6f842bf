use std::sync::Arc;

use async_std::io::Cursor;
use async_trait::async_trait;

use crate::reader::IndexedReader;
use crate::{index::Index, Indexable, ReadByLine, Result};

/// In-memory text which implements `ReadByLine` and holds an index of the lines.
#[derive(Debug)]
pub struct IndexedString<'a> {
    data: &'a str,
    reader: IndexedReader<Cursor<&'a [u8]>>,
}

impl<'a> IndexedString<'a> {
    /// Create a new `IndexedString` from text and build its index.
    pub async fn new_raw(s: &'a str) -> Result<IndexedString<'a>> {
        let mut reader = Cursor::new(s.as_bytes());
        let index = Index::build(&mut reader).await?;
        Ok(Self::from_reader(s, reader, Arc::new(index)))
    }

    /// Create a new `IndexedString` from text and use `index` as index.
    /// Expects the index to be properly built.
    pub fn new_custom(s: &'a str, index: Arc<Index>) -> IndexedString<'a> {
        Self::from_reader(s, Cursor::new(s.as_bytes()), index)
    }

    fn from_reader(data: &'a str, reader: Cursor<&'a [u8]>, index: Arc<Index>) -> IndexedString<'a> {
        let reader = IndexedReader::new(reader, index);
        Self { data, reader }
    }
}

impl<'a> Indexable for IndexedString<'a> {
    #[inline]
    fn get_index(&self) -> &Index {
        &self.reader.index
    }
}

#[async_trait]
impl<'a> ReadByLine for IndexedString<'a> {
    #[inline(always)]
    async fn read_line_raw(&mut self, line: usize, buf: &mut Vec<u8>) -> Result<usize> {
        self.reader.read_line_raw(line, buf).await
    }
}

impl<'a> Clone for IndexedString<'a> {
    /// Does not clone the entire text but the IndexedString and the Arc reference to the index
    fn clone(&self) -> Self {
        let reader = self.reader.duplicate(Cursor::new(self.data.as_bytes()));
        Self {
            data: self.data,
            reader,
        }
    }
}
