use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Attempts at a fresh name when two estimates land in the same millisecond
const MAX_NAME_ATTEMPTS: i64 = 16;

/// Rendered estimates on disk, addressed by file name
#[derive(Debug, Clone)]
pub struct EstimateArchive {
    dir: PathBuf,
}

impl EstimateArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store a document as `smeta_<unix_millis>.<extension>` and return its file name
    pub async fn save(&self, bytes: &[u8], extension: &str) -> std::io::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let millis = chrono::Utc::now().timestamp_millis();
        for offset in 0..MAX_NAME_ATTEMPTS {
            let name = format!("smeta_{}.{}", millis + offset, extension);
            let file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&name))
                .await;

            match file {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    return Ok(name);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            "no free estimate file name",
        ))
    }

    /// Read an archived document back
    ///
    /// Only the final path component of `name` is used, so lookups never
    /// leave the archive directory. `Ok(None)` when there is no such file.
    pub async fn open(&self, name: &str) -> std::io::Result<Option<Vec<u8>>> {
        let Some(path) = self.resolve(name) else {
            return Ok(None);
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let base = Path::new(name).file_name()?;
        Some(self.dir.join(base))
    }
}

/// Content type for an archived file, by extension
pub fn content_type_for(name: &str) -> &'static str {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
