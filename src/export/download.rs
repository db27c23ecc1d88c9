//! Saving a finished export to disk or to a caller-supplied sink.

use anyhow::{Context, Result};
use log::info;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use super::Exports;
use crate::error::ExportError;
use crate::http::{SinkFactory, Transport};

/// Where a downloaded export ends up.
pub enum DownloadTarget {
    /// A file in `dir` (default: current directory). Without a `filename`
    /// the last segment of the export URI is used.
    File {
        dir: Option<PathBuf>,
        filename: Option<String>,
    },
    /// Any writer; the URI is not inspected.
    Sink(Box<dyn Write + Send>),
}

impl Default for DownloadTarget {
    fn default() -> Self {
        DownloadTarget::File {
            dir: None,
            filename: None,
        }
    }
}

impl fmt::Debug for DownloadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadTarget::File { dir, filename } => f
                .debug_struct("File")
                .field("dir", dir)
                .field("filename", filename)
                .finish(),
            DownloadTarget::Sink(_) => f.write_str("Sink"),
        }
    }
}

impl DownloadTarget {
    /// Keep the name from the URI, but save into `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        DownloadTarget::File {
            dir: Some(dir.into()),
            filename: None,
        }
    }

    /// Save as `dir/filename`.
    pub fn to_file(dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        DownloadTarget::File {
            dir: Some(dir.into()),
            filename: Some(filename.into()),
        }
    }

    pub fn sink(writer: impl Write + Send + 'static) -> Self {
        DownloadTarget::Sink(Box::new(writer))
    }
}

/// Resolves `{dir}/{filename}`, deriving the name from the URI when unset.
fn file_path(dir: Option<&Path>, filename: Option<&str>, uri: &str) -> Result<PathBuf> {
    let filename = match filename {
        Some(name) if is_plain_file_name(name) => name.to_string(),
        Some(name) => return Err(ExportError::InvalidFilename(name.to_string()).into()),
        None => filename_from_uri(uri)?,
    };
    Ok(dir.unwrap_or(Path::new(".")).join(filename))
}

/// A single normal path component: no separators, no `.`/`..`, not absolute.
fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Extracts the text after the final `/` of a URI and percent-decodes it.
///
/// `https://host/path/My%20File.pdf` gives `My File.pdf`. Names that decode
/// to anything but a single file name (`%2Fetc%2Fpasswd`, `..`) are rejected.
pub fn filename_from_uri(uri: &str) -> Result<String> {
    let segment = match uri.rsplit_once('/') {
        Some((_, segment)) if !segment.is_empty() => segment,
        _ => return Err(ExportError::InvalidUri(uri.to_string()).into()),
    };

    let decoded = urlencoding::decode(segment)
        .map_err(|_| ExportError::InvalidUri(uri.to_string()))?;
    if !is_plain_file_name(&decoded) {
        return Err(ExportError::InvalidUri(uri.to_string()).into());
    }
    Ok(decoded.into_owned())
}

impl<T: Transport> Exports<T> {
    /// Streams the document at `uri` into `target`. Returns bytes written.
    ///
    /// Files are created only after the server accepted the request and are
    /// left in place if the transfer fails midway. Missing directories are
    /// not created.
    #[tracing::instrument(skip(self))]
    pub async fn download(&self, uri: &str, target: DownloadTarget) -> Result<u64> {
        let sink: SinkFactory = match target {
            DownloadTarget::Sink(writer) => Box::new(move || Ok(writer)),
            DownloadTarget::File { dir, filename } => {
                let path = file_path(dir.as_deref(), filename.as_deref(), uri)?;
                info!("Downloading export to {:?}...", path);
                Box::new(move || {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create file at {:?}", path))?;
                    Ok(Box::new(file) as Box<dyn Write + Send>)
                })
            }
        };

        let bytes = self.transport.stream_get(uri, sink).await?;
        info!("Download complete ({} bytes).", bytes);
        Ok(bytes)
    }
}
