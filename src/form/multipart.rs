//! `multipart/form-data` parsing
//!
//! Wraps `multer` over a fully buffered body. Text parts become
//! [`FormValues`]; file parts are kept in memory until the in-memory budget
//! runs out, after which they are written to temporary files.

use super::values::FormValues;
use crate::error::{Error, Result};
use bytes::Bytes;
use futures::executor::block_on;
use futures::{future, stream};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::debug;

/// A parsed multipart form
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    /// Text parts
    pub values: FormValues,
    /// File parts, in submission order
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    /// File parts submitted under a field name
    pub fn files_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FilePart> + 'a {
        self.files.iter().filter(move |f| f.name == name)
    }
}

/// A file part of a multipart form
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name
    pub name: String,
    /// Client supplied file name
    pub file_name: String,
    /// Declared content type of the part
    pub content_type: Option<String>,
    /// Size in bytes
    pub size: u64,
    /// Where the content lives
    pub contents: FileContents,
}

/// Storage of a file part
#[derive(Debug, Clone)]
pub enum FileContents {
    /// Held in memory
    Memory(Bytes),
    /// Written to a temporary file, removed when the last clone is dropped
    Spilled(Arc<NamedTempFile>),
}

impl FilePart {
    /// Check if the content was written to disk
    pub fn is_spilled(&self) -> bool {
        matches!(self.contents, FileContents::Spilled(_))
    }

    /// Path of the temporary file, if spilled
    pub fn path(&self) -> Option<&Path> {
        match &self.contents {
            FileContents::Spilled(file) => Some(file.path()),
            FileContents::Memory(_) => None,
        }
    }

    /// Read the whole content
    pub fn bytes(&self) -> Result<Bytes> {
        match &self.contents {
            FileContents::Memory(bytes) => Ok(bytes.clone()),
            FileContents::Spilled(file) => Ok(Bytes::from(std::fs::read(file.path())?)),
        }
    }
}

/// Extra bytes text parts may use on top of `max_memory`
pub const TEXT_VALUE_ALLOWANCE: u64 = 10 * 1024 * 1024;

/// Limits applied while parsing a multipart body
///
/// File parts share a budget of `max_memory` bytes and spill to disk past
/// it. Text parts share a separate budget of `max_memory` plus
/// [`TEXT_VALUE_ALLOWANCE`]; exceeding it fails the parse.
#[derive(Debug, Clone)]
pub struct MultipartLimits {
    /// Bytes of file content kept in memory
    pub max_memory: u64,
    /// Directory for spilled files (system temp dir when `None`)
    pub temp_dir: Option<PathBuf>,
}

/// Parse a buffered multipart body
///
/// Text parts fail the parse with a decode error once their budget (see
/// [`MultipartLimits`]) is exhausted. Parts without a name are skipped.
pub fn parse(
    body: Bytes,
    boundary: impl Into<String>,
    limits: &MultipartLimits,
) -> Result<MultipartForm> {
    let stream = stream::once(future::ready(Ok::<_, std::io::Error>(body)));
    let mut multipart = multer::Multipart::new(stream, boundary);

    // The stream is already in memory, so polling never waits on I/O.
    block_on(read_form(&mut multipart, limits))
}

async fn read_form(
    multipart: &mut multer::Multipart<'_>,
    limits: &MultipartLimits,
) -> Result<MultipartForm> {
    let mut form = MultipartForm::default();
    let mut remaining = limits.max_memory;
    let mut remaining_text = limits.max_memory.saturating_add(TEXT_VALUE_ALLOWANCE);

    while let Some(mut field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let Some(file_name) = field.file_name().map(str::to_string) else {
            let text = field.text().await?;
            let size = text.len() as u64;
            if size > remaining_text {
                return Err(Error::decode("multipart: message too large"));
            }
            remaining_text -= size;
            form.values.append(name, text);
            continue;
        };

        let content_type = field.content_type().map(ToString::to_string);
        let mut buffer: Vec<u8> = Vec::new();
        let mut spilled: Option<NamedTempFile> = None;
        let mut size = 0u64;

        while let Some(chunk) = field.chunk().await? {
            size += chunk.len() as u64;
            if let Some(file) = spilled.as_mut() {
                file.write_all(&chunk)?;
                continue;
            }

            buffer.extend_from_slice(&chunk);
            if buffer.len() as u64 > remaining {
                let mut file = temp_file(limits.temp_dir.as_deref())?;
                file.write_all(&buffer)?;
                buffer = Vec::new();
                spilled = Some(file);
            }
        }

        let contents = match spilled {
            Some(mut file) => {
                file.flush()?;
                debug!(
                    field = %name,
                    size,
                    path = %file.path().display(),
                    "Spilled multipart file to disk"
                );
                FileContents::Spilled(Arc::new(file))
            }
            None => {
                remaining -= size;
                FileContents::Memory(Bytes::from(buffer))
            }
        };

        form.files.push(FilePart {
            name,
            file_name,
            content_type,
            size,
            contents,
        });
    }

    Ok(form)
}

fn temp_file(dir: Option<&Path>) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("multipart-");
    let file = match dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    Ok(file)
}
