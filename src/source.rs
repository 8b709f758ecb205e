//! Input sources: plain files, gzip streams and compressed CSV archives

use crate::error::{BindError, Result};
use flate2::read::GzDecoder;
use s_zip::StreamingZipReader;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::Path;

/// Byte source behind [`Binder::open`](crate::Binder::open)
///
/// Plain files and gzip streams are decoded as they are read. ZIP archives
/// (Zstd or Deflate entries) are unpacked up front and the first `.csv`
/// entry, or the first entry when none ends in `.csv`, is read.
pub enum Source {
    File(BufReader<File>),
    Gzip(GzDecoder<File>),
    Archive(Cursor<Vec<u8>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Plain,
    Gzip,
    ZipArchive,
}

impl Encoding {
    fn detect(path: &Path) -> Self {
        let name = path.to_str().unwrap_or("");
        if name.ends_with(".csv.gz") {
            Encoding::Gzip
        } else if name.ends_with(".csv.zst") || name.ends_with(".csv.zip") {
            Encoding::ZipArchive
        } else {
            Encoding::Plain
        }
    }
}

impl Source {
    /// Open `path`, choosing the decoder from the file extension
    ///
    /// # File Extensions
    /// - `.csv.gz` → gzip stream
    /// - `.csv.zst`, `.csv.zip` → ZIP archive
    /// - anything else → read as is
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match Encoding::detect(path) {
            Encoding::Plain => Ok(Source::File(BufReader::new(File::open(path)?))),
            Encoding::Gzip => Ok(Source::Gzip(GzDecoder::new(File::open(path)?))),
            Encoding::ZipArchive => unpack_archive(path).map(|data| Source::Archive(Cursor::new(data))),
        }
    }
}

fn unpack_archive(path: &Path) -> Result<Vec<u8>> {
    let mut archive = StreamingZipReader::open(path)
        .map_err(|e| BindError::Archive(format!("cannot open {}: {}", path.display(), e)))?;

    let names: Vec<String> = archive.entries().iter().map(|e| e.name.clone()).collect();
    let entry = csv_entry(&names)
        .ok_or_else(|| BindError::Archive(format!("{} has no entries", path.display())))?
        .to_string();

    let data = archive
        .read_entry_by_name(&entry)
        .map_err(|e| BindError::Archive(format!("cannot read entry {}: {}", entry, e)))?;

    tracing::debug!(entry = %entry, bytes = data.len(), "unpacked archive entry");
    Ok(data)
}

/// First `.csv` entry, falling back to the first entry of any name
fn csv_entry(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|name| name.ends_with(".csv"))
        .or_else(|| names.first())
        .map(String::as_str)
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::File(reader) => reader.read(buf),
            Source::Gzip(decoder) => decoder.read(buf),
            Source::Archive(cursor) => cursor.read(buf),
        }
    }
}
