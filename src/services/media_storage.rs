use std::io::ErrorKind;
use std::path::PathBuf;

use rand::{distributions::Alphanumeric, thread_rng, Rng};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::dto::submission::UploadedFile;
use crate::error::{Error, Result};
use crate::utils::validation::{FieldError, FieldErrors};

const SUFFIX_LENGTH: usize = 7;
const MAX_ATTEMPTS: usize = 100;

/// Local file area for uploads. Stored names are relative to `root`
/// (e.g. `certificates/cv.pdf`) and never overwrite an existing file.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Writes `file` under `upload_to` and returns its stored name,
    /// at most `max_length` characters long.
    pub async fn save(
        &self,
        field: &'static str,
        upload_to: &str,
        file: &UploadedFile,
        max_length: usize,
    ) -> Result<String> {
        let original = file.file_name.as_deref().unwrap_or_default();
        let Some(valid_name) = get_valid_name(original) else {
            let mut errors = FieldErrors::new();
            errors.add(
                field,
                FieldError::malformed_upload("Could not derive a file name from the upload."),
            );
            return Err(Error::Validation(errors));
        };

        let dir = self.root.join(upload_to);
        fs::create_dir_all(&dir).await?;

        let (stem, ext) = split_extension(&valid_name);
        let mut suffix = String::new();
        for _ in 0..MAX_ATTEMPTS {
            let name = fit_name(upload_to, stem, &suffix, ext, max_length).ok_or_else(|| {
                let mut errors = FieldErrors::new();
                errors.add(
                    field,
                    FieldError::malformed_upload("Stored file name would exceed its length limit."),
                );
                Error::Validation(errors)
            })?;

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(&name))
                .await
            {
                Ok(mut handle) => {
                    if let Err(e) = write_all(&mut handle, &file.data).await {
                        let _ = fs::remove_file(self.root.join(&name)).await;
                        return Err(e);
                    }
                    tracing::debug!(
                        name = %name,
                        bytes = file.data.len(),
                        content_type = file.content_type.as_deref().unwrap_or("unknown"),
                        "Stored upload"
                    );
                    return Ok(name);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    suffix = format!("_{}", random_suffix());
                }
                Err(e) => {
                    tracing::error!("Failed to create upload file: {}", e);
                    return Err(e.into());
                }
            }
        }

        Err(Error::Internal(format!(
            "Could not find a free file name for {}",
            valid_name
        )))
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        match fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_all(handle: &mut fs::File, data: &[u8]) -> Result<()> {
    handle.write_all(data).await?;
    handle.flush().await?;
    Ok(())
}

/// Basename of `name` with spaces turned into `_` and anything other than
/// letters, digits, `_`, `-` and `.` removed.
pub fn get_valid_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => None,
        _ => Some(cleaned),
    }
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => name.split_at(index),
        _ => (name, ""),
    }
}

/// Joins the parts, truncating `stem` so the result fits `max_length`.
fn fit_name(upload_to: &str, stem: &str, suffix: &str, ext: &str, max_length: usize) -> Option<String> {
    let fixed = upload_to.chars().count() + 1 + suffix.chars().count() + ext.chars().count();
    let room = max_length.checked_sub(fixed)?;
    let stem: String = stem.chars().take(room).collect();
    if stem.is_empty() {
        return None;
    }
    Some(format!("{}/{}{}{}", upload_to, stem, suffix, ext))
}

fn random_suffix() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LENGTH)
        .map(char::from)
        .collect()
}
