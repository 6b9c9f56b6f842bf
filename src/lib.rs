//!A simple library to read single lines of large files by line number using a persisted newline
//!offset index

/// Where sidecar index files are stored
pub mod config;
pub mod error;
/// A wrapper around async_std::fs::File which implements ReadByLine
pub mod file;
/// The newline offset index of files
pub mod index;
/// Generic implementation to use any seekable reader
pub mod reader;
/// Building, persisting and loading sidecar index files
pub mod sidecar;
/// An indexed in-memory string reader
pub mod string;

pub use config::Config;
pub use error::Error;
pub use file::File;
pub use index::{scan_chunk, Index};
pub use sidecar::{IndexStore, LineRequest, LineSeeker};
pub use string::IndexedString;

use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, error::Error>;

pub trait Indexable {
    /// Returns a reference to the files index.
    fn get_index(&self) -> &Index;

    /// Returns the total amount of lines in the file.
    #[inline]
    fn total_lines(&self) -> usize {
        self.get_index().len()
    }
}

/// A trait defining behavior for reading certain lines directly from indexed files.
#[async_trait]
pub trait ReadByLine: Indexable + Send {
    /// Reads the given line into `buf` omitting its newline. Returns the amount of bytes read.
    async fn read_line_raw(&mut self, line: usize, buf: &mut Vec<u8>) -> Result<usize>;

    /// Reads the given line
    async fn read_line(&mut self, line: usize) -> Result<String> {
        let mut read_data = Vec::new();
        self.read_line_raw(line, &mut read_data).await?;
        Ok(String::from_utf8(read_data)?)
    }
}

#[cfg(test)]
mod tests {
    use rand::{distributions::Uniform, Rng};

    use super::*;
    use std::io::Write as _;

    const INPUTS: &[&str] = &[
        "0\n1\n2\n3\n4",
        "first line\nsecond line\n\n\nfifth\n",
        "\nleading newline",
        "single line without newline",
        "",
        "俺はプログラミングできねええ\n音楽好き\n昨日のコーヒー飲んじゃった\nthis is a text",
    ];

    fn expected_lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    #[async_std::test]
    async fn test() {
        for input in INPUTS {
            let mut source = tempfile::NamedTempFile::new().unwrap();
            source.write_all(input.as_bytes()).unwrap();

            // Test File
            let mut indexed_file = File::open_raw(source.path())
                .await
                .expect("failed opening indexed file");
            test_reader(&mut indexed_file, input).await;

            // Test IndexedString
            let mut indexed_string = IndexedString::new_raw(input).await.unwrap();
            test_reader(&mut indexed_string, input).await;

            // Test File with the index of the string
            let index = indexed_string.get_index().clone();
            let mut custom = File::open_custom(source.path(), index).await.unwrap();
            test_reader(&mut custom, input).await;
        }
    }

    async fn test_reader<L: ReadByLine>(reader: &mut L, original: &str) {
        assert_eq!(reader.total_lines(), expected_lines(original).len());
        test_sequencially(reader, original).await;
        test_random(reader, original).await;
        test_out_of_range(reader).await;
    }

    async fn test_sequencially<L: ReadByLine>(reader: &mut L, original: &str) {
        for (line, original) in expected_lines(original).into_iter().enumerate() {
            let read = reader.read_line(line).await;

            assert!(read.is_ok());
            assert_eq!(original, read.unwrap());

            let mut buf = Vec::new();
            let res = reader.read_line_raw(line, &mut buf).await;
            assert!(res.is_ok());
            assert_eq!(original.as_bytes(), &buf[..]);
        }
    }

    async fn test_random<L: ReadByLine>(reader: &mut L, original: &str) {
        let orig_content = expected_lines(original);

        let lines: Vec<_> = rand::thread_rng()
            .sample_iter(Uniform::new(0, reader.total_lines()))
            .take(reader.total_lines() * 3)
            .collect();

        for line in lines {
            let original = orig_content.get(line).unwrap();
            let read = reader.read_line(line).await;

            assert!(read.is_ok());
            assert_eq!(*original, read.unwrap());
        }
    }

    async fn test_out_of_range<L: ReadByLine>(reader: &mut L) {
        let total = reader.total_lines();
        match reader.read_line(total).await {
            Err(Error::OutOfRange { requested, max }) => {
                assert_eq!(requested, total);
                assert_eq!(max, total - 1);
            }
            r => panic!("expected out of range, got {:?}", r),
        }
    }

    #[async_std::test]
    async fn test_invalid_utf8() {
        let mut source = tempfile::NamedTempFile::new().unwrap();
        source.write_all(b"ok\n\xff\xfe\n").unwrap();

        let mut file = File::open_raw(source.path()).await.unwrap();
        assert_eq!(file.read_line(0).await.unwrap(), "ok");
        assert!(matches!(file.read_line(1).await, Err(Error::Utf8)));

        let mut buf = Vec::new();
        file.read_line_raw(1, &mut buf).await.unwrap();
        assert_eq!(buf, b"\xff\xfe");
    }
}
