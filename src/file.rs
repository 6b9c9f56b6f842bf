use std::sync::Arc;

use async_std::{fs, io::BufReader, path::Path};
use async_trait::async_trait;

use crate::{index::Index, reader::IndexedReader, Indexable, ReadByLine, Result};

/// A wrapper around `async_std::fs::File` which implements `ReadByLine` and holds an index of the
/// lines.
#[derive(Debug)]
pub struct File {
    inner: IndexedReader<fs::File>,
}

impl File {
    /// Open a file and generate its index in a single pass over the file.
    pub async fn open_raw<P: AsRef<Path>>(path: P) -> Result<File> {
        let mut reader = BufReader::new(fs::File::open(path.as_ref()).await?);
        let index = Index::build(&mut reader).await?;

        Ok(Self::from_file(reader.into_inner(), Arc::new(index)))
    }

    /// Open a file and use a custom index `index`, e.g. one loaded from a sidecar file.
    /// Expects the index to be properly built.
    pub async fn open_custom<P: AsRef<Path>, I: Into<Arc<Index>>>(path: P, index: I) -> Result<File> {
        let file = fs::File::open(path.as_ref()).await?;
        Ok(Self::from_file(file, index.into()))
    }

    #[inline]
    fn from_file(file: fs::File, index: Arc<Index>) -> File {
        Self {
            inner: IndexedReader::new(file, index),
        }
    }
}

impl Indexable for File {
    #[inline]
    fn get_index(&self) -> &Index {
        self.inner.get_index()
    }
}

#[async_trait]
impl ReadByLine for File {
    #[inline]
    async fn read_line_raw(&mut self, line: usize, buf: &mut Vec<u8>) -> Result<usize> {
        self.inner.read_line_raw(line, buf).await
    }
}
