use std::{path::PathBuf, string::FromUtf8Error};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid arguments or an unreadable source file
    #[error("{0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An io error tied to a specific path
    #[error("{context} ({}): {source}", path.display())]
    IoAt {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Requested line is beyond the last indexed line
    #[error(
        "line number {requested} is greater than the total number of lines in the input file: {max} (0 based)"
    )]
    OutOfRange { requested: usize, max: usize },

    /// Index is not built properly
    #[error("malformed index entry: {token:?}")]
    MalformedIndex { token: String },

    #[error("line is not valid utf-8")]
    Utf8,
}

impl From<FromUtf8Error> for Error {
    fn from(_: FromUtf8Error) -> Self {
        Self::Utf8
    }
}

impl Error {
    /// Wraps an io error together with the path it happened on
    pub(crate) fn io_at<P: Into<PathBuf>>(
        context: &'static str,
        path: P,
    ) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.into();
        move |source| Error::IoAt {
            context,
            path,
            source,
        }
    }
}
