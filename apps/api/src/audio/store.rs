//! Flat-directory filesystem store for synthesized MP3 files.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// On-disk audio store. Filenames carry the caller-supplied stem (voice,
/// or `{id}-{lang}-{voice}` for batch items) plus a local timestamp.
#[derive(Clone)]
pub struct AudioStore {
    dir: PathBuf,
}

/// One stored file as reported by the listing endpoint.
#[derive(Debug, Serialize)]
pub struct AudioFileInfo {
    pub filename: String,
    pub size: u64,
    pub created: DateTime<Utc>,
    pub url: String,
}

impl AudioStore {
    /// Opens the store, creating the directory if needed.
    pub fn create(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Writes an MP3 as `{stem}-{YYYYMMDD_HHMMSS}.mp3` and returns the
    /// filename. Saves landing in the same second get a counter suffix so
    /// nothing is overwritten.
    pub fn save(&self, stem: &str, audio: &[u8]) -> io::Result<String> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let base = format!("{stem}-{timestamp}");
        let mut filename = format!("{base}.mp3");
        let mut n = 1;
        while self.dir.join(&filename).try_exists()? {
            filename = format!("{base}-{n}.mp3");
            n += 1;
        }
        std::fs::write(self.dir.join(&filename), audio)?;
        Ok(filename)
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Every `.mp3` in the store, sorted by filename.
    pub fn list(&self) -> io::Result<Vec<AudioFileInfo>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.ends_with(".mp3") {
                continue;
            }
            let meta = entry.metadata()?;
            if !meta.is_file() {
                continue;
            }
            // Creation time is unsupported on some filesystems; fall back
            // to mtime rather than dropping the entry.
            let created = meta
                .created()
                .or_else(|_| meta.modified())
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            files.push(AudioFileInfo {
                filename: name.to_string(),
                size: meta.len(),
                created,
                url: format!("/api/v1/audio/{name}"),
            });
        }
        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(files)
    }
}

/// Restricts a verse id to filename-safe characters.
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Rejects names that could escape the store directory.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}
