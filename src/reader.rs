use std::{io::SeekFrom, sync::Arc};

use async_std::io::{prelude::*, Read, Seek};
use async_trait::async_trait;

use crate::{index::Index, Indexable, ReadByLine, Result};

/// A wrapper around any seekable reader which implements `ReadByLine` and holds an index of the
/// lines.
#[derive(Debug)]
pub struct IndexedReader<R: Read + Seek + Unpin + Send> {
    pub reader: R,
    pub(crate) index: Arc<Index>,
}

impl<R: Read + Seek + Unpin + Send> IndexedReader<R> {
    /// Creates a new `IndexedReader` using a reader and an index. The index won't be validated.
    /// Using an index built for other data won't return an error but yield wrong lines.
    #[inline(always)]
    pub fn new(reader: R, index: Arc<Index>) -> IndexedReader<R> {
        Self { reader, index }
    }

    /// Creates a new `IndexedReader` with the current index. `reader` should contain the same
    /// data used in `&self` or the index might be invalid for the given reader
    #[inline(always)]
    pub fn duplicate(&self, reader: R) -> Self {
        Self::new(reader, Arc::clone(&self.index))
    }
}

impl<R: Read + Seek + Unpin + Send> Indexable for IndexedReader<R> {
    #[inline(always)]
    fn get_index(&self) -> &Index {
        &self.index
    }
}

#[async_trait]
impl<R: Read + Seek + Unpin + Send> ReadByLine for IndexedReader<R> {
    async fn read_line_raw(&mut self, line: usize, buf: &mut Vec<u8>) -> Result<usize> {
        let range = self.get_index().line_range(line)?;
        let need_read = range.end - range.start;

        self.reader.seek(SeekFrom::Start(range.start)).await?;

        // The sentinel of the last line may point one byte past the end of the data, so reading
        // less than `need_read` bytes is expected there.
        let read = (&mut self.reader).take(need_read).read_to_end(buf).await?;
        log::trace!("read {} bytes of line {} at {:?}", read, line, range);

        Ok(read)
    }
}
