use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::{fs, io::AsyncWriteExt};
use ulid::Ulid;
use validator::ValidationError;

pub const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/webp", "image/gif"];

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Upload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !ALLOWED_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            let mut error = ValidationError::new("invalid_content_type");
            error.message = Some(
                format!(
                    "Unsupported image type {}. Use PNG, JPEG, WebP or GIF.",
                    self.content_type
                )
                .into(),
            );
            return Err(error);
        }

        if let Err(err) = image::load_from_memory(&self.data) {
            tracing::debug!(filename = %self.filename, err = %err, "upload is not an image");

            let mut error = ValidationError::new("invalid_image");
            error.message = Some(
                "Upload a valid image. The file you uploaded was either not an image or a corrupted image."
                    .into(),
            );
            return Err(error);
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Writes the upload under `upload_to` and returns the stored name relative to the root.
    /// An existing file is never overwritten, a random suffix is added to the name instead.
    pub async fn save(&self, upload_to: &str, upload: &Upload) -> restomenu_shared::Result<String> {
        let dir = self.root.join(upload_to);
        fs::create_dir_all(&dir).await?;

        let filename = sanitize_filename(&upload.filename);
        let (stem, ext) = match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_owned(), format!(".{ext}")),
            _ => (filename.to_owned(), "".to_owned()),
        };

        let mut candidate = filename;
        loop {
            let open = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(dir.join(&candidate))
                .await;

            match open {
                Ok(mut file) => {
                    file.write_all(&upload.data).await?;
                    file.flush().await?;
                    break;
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    let suffix = Ulid::new().to_string().to_lowercase();
                    candidate = format!("{stem}_{}{ext}", &suffix[suffix.len() - 7..]);
                }
                Err(err) => return Err(err.into()),
            }
        }

        let name = format!("{upload_to}/{candidate}");
        tracing::info!(name = %name, size = upload.data.len(), "media saved");

        Ok(name)
    }

    /// Deletes a stored file. Failures are logged and otherwise ignored.
    pub async fn remove(&self, name: &str) {
        if let Err(err) = fs::remove_file(self.path(name)).await {
            tracing::warn!(name = %name, err = %err, "failed to remove media");
        }
    }
}

fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let name = basename
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect::<String>();

    let name = name.trim_start_matches('.');

    if name.is_empty() {
        "image".to_owned()
    } else {
        name.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use temp_dir::TempDir;

    use super::*;

    fn png() -> Vec<u8> {
        let mut data = Cursor::new(Vec::new());
        image::RgbImage::new(2, 2)
            .write_to(&mut data, image::ImageFormat::Png)
            .unwrap();
        data.into_inner()
    }

    fn upload(filename: &str, content_type: &str, data: Vec<u8>) -> Upload {
        Upload {
            filename: filename.to_owned(),
            content_type: content_type.to_owned(),
            data,
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("test_image.png"), "test_image.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\tmp\\my photo.jpg"), "my_photo.jpg");
        assert_eq!(sanitize_filename(".."), "image");
        assert_eq!(sanitize_filename(""), "image");
    }

    #[test]
    fn test_upload_validate() {
        assert!(upload("a.png", "image/png", png()).validate().is_ok());
        assert!(upload("a.png", "image/jpeg", png()).validate().is_ok());

        let err = upload("a.txt", "text/plain", b"hello".to_vec())
            .validate()
            .unwrap_err();
        assert_eq!(err.code, "invalid_content_type");

        let err = upload("a.png", "image/png", b"hello".to_vec())
            .validate()
            .unwrap_err();
        assert_eq!(err.code, "invalid_image");
    }

    #[tokio::test]
    async fn test_save_never_overwrites() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let storage = MediaStorage::new(dir.path());
        let file = upload("test_image.png", "image/png", png());

        let first = storage.save("meal", &file).await?;
        assert_eq!(first, "meal/test_image.png");
        assert!(storage.path(&first).exists());

        let second = storage.save("meal", &file).await?;
        assert_ne!(second, first);
        assert!(second.starts_with("meal/test_image_"));
        assert!(second.ends_with(".png"));
        assert!(storage.path(&second).exists());

        Ok(())
    }

    #[tokio::test]
    async fn test_remove() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let storage = MediaStorage::new(dir.path());

        let name = storage
            .save("meal", &upload("test_image.png", "image/png", png()))
            .await?;
        assert!(storage.path(&name).exists());

        storage.remove(&name).await;
        assert!(!storage.path(&name).exists());

        storage.remove(&name).await;
        storage.remove("meal/unknown.png").await;

        Ok(())
    }
}
