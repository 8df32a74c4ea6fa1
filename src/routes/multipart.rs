use std::collections::HashMap;

use axum::extract::{Multipart, multipart::MultipartError};
use restomenu_meal::media::Upload;

/// Text fields and files of a `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl MultipartForm {
    /// File inputs left blank by the browser (no filename, no content) are skipped.
    pub async fn parse(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.file_name().map(str::to_owned) {
                Some(filename) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_owned();
                    let data = field.bytes().await?;

                    if filename.is_empty() && data.is_empty() {
                        continue;
                    }

                    form.files.insert(
                        name,
                        Upload {
                            filename,
                            content_type,
                            data: data.to_vec(),
                        },
                    );
                }
                _ => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|v| v.trim().to_owned())
            .unwrap_or_default()
    }

    pub fn take_file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name)
    }
}
