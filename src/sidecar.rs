use std::path::{Path, PathBuf};

use async_std::{fs, io::BufReader};
use log::{debug, info};

use crate::{
    config::Config, error::Error, file::File, index::Index, Indexable, ReadByLine, Result,
};

/// Extension of sidecar index files
pub const INDEX_EXTENSION: &str = "idx";

/// Persists and loads the indexes of source files within a single sidecar directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStore {
    dir: PathBuf,
}

impl IndexStore {
    #[inline]
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    #[inline]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.index_dir.clone())
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the sidecar path for `source`: `<dir>/<source file stem>.idx`. The location of the
    /// source file itself doesn't matter, so equally named files in different directories share
    /// a sidecar file.
    pub fn index_path(&self, source: &Path) -> Result<PathBuf> {
        let stem = source.file_stem().ok_or_else(|| {
            Error::Validation(format!("{} does not name a file", source.display()))
        })?;

        // Only the last extension is dropped, `data.v1.txt` maps to `data.v1.idx`
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(INDEX_EXTENSION);
        Ok(self.dir.join(name))
    }

    /// Loads the persisted index of `source`. The index is trusted as is and not compared to the
    /// current content of `source`.
    pub async fn load(&self, source: &Path) -> Result<Index> {
        let path = self.index_path(source)?;
        let text = fs::read_to_string(&path)
            .await
            .map_err(Error::io_at("failed to read index file", &path))?;

        let index = Index::decode(&text)?;
        info!("Finished loading index file {}", path.display());
        Ok(index)
    }

    /// Writes `index` as sidecar file of `source`, replacing any existing one. The sidecar
    /// directory gets created if missing.
    pub async fn save(&self, source: &Path, index: &Index) -> Result<()> {
        let path = self.index_path(source)?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(Error::io_at("failed to create index directory", &self.dir))?;

        // Write into a temporary file first so the sidecar path never holds a partial index
        let mut tmp_path = path.clone().into_os_string();
        tmp_path.push(format!(".tmp-{}", std::process::id()));
        let tmp_path = PathBuf::from(tmp_path);

        if let Err(err) = fs::write(&tmp_path, index.encode()).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(Error::io_at("failed to write index file", &tmp_path)(err));
        }

        if let Err(err) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(Error::io_at("failed to write index file", &path)(err));
        }

        debug!("wrote {} entries to {}", index.len(), path.display());
        Ok(())
    }

    /// Builds the index of `source` in a single streamed pass and persists it.
    pub async fn build(&self, source: &Path) -> Result<Index> {
        let file = fs::File::open(source)
            .await
            .map_err(Error::io_at("failed to open source file", source))?;

        let index = Index::build(&mut BufReader::new(file))
            .await
            .map_err(|err| match err {
                Error::Io(io) => Error::io_at("failed to read source file", source)(io),
                err => err,
            })?;

        self.save(source, &index).await?;
        info!("Finished creating index file");
        Ok(index)
    }

    /// Loads the index of `source` if a readable sidecar file exists and `overwrite` is not set.
    /// Otherwise the index gets built and written, overwriting any existing sidecar file.
    pub async fn resolve(&self, source: &Path, overwrite: bool) -> Result<Index> {
        let path = self.index_path(source)?;

        if !overwrite && is_readable(&path).await {
            info!("Index file {} was found. Loading index...", path.display());
            return self.load(source).await;
        }

        if overwrite {
            info!("Overwriting index file {}. Creating index...", path.display());
        } else {
            info!("Index file {} was not found. Creating index...", path.display());
        }

        self.build(source).await
    }
}

#[inline]
async fn is_readable(path: &Path) -> bool {
    fs::File::open(path).await.is_ok()
}

/// A single request for a line of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRequest {
    pub path: PathBuf,
    /// 0 based line number
    pub line: usize,
    /// Rebuild the index even if a sidecar file exists
    pub overwrite: bool,
}

impl LineRequest {
    #[inline]
    pub fn new<P: Into<PathBuf>>(path: P, line: usize) -> Self {
        Self {
            path: path.into(),
            line,
            overwrite: false,
        }
    }

    #[inline]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Checks that the requested file can be read.
    pub async fn validate(&self) -> Result<()> {
        let is_file = fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);

        if !is_file || !is_readable(&self.path).await {
            return Err(Error::Validation(format!(
                "File: {} does not exist or is not readable",
                self.path.display()
            )));
        }

        Ok(())
    }
}

/// Answers `LineRequest`s using the indexes of an `IndexStore`.
#[derive(Debug, Clone)]
pub struct LineSeeker {
    store: IndexStore,
}

impl LineSeeker {
    #[inline]
    pub fn new(store: IndexStore) -> Self {
        Self { store }
    }

    #[inline]
    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// Reads the requested line, building or loading the index of the file first.
    pub async fn read_line(&self, request: &LineRequest) -> Result<String> {
        let index = self.store.resolve(&request.path, request.overwrite).await?;

        if request.line > index.max_line() {
            return Err(Error::OutOfRange {
                requested: request.line,
                max: index.max_line(),
            });
        }

        let mut file = File::open_custom(request.path.as_path(), index)
            .await
            .map_err(|err| match err {
                Error::Io(io) => Error::io_at("failed to open source file", &request.path)(io),
                err => err,
            })?;

        debug!(
            "reading line {} of {} ({} lines)",
            request.line,
            request.path.display(),
            file.total_lines()
        );

        file.read_line(request.line).await
    }
}
