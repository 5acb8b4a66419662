use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Resume uploads above this size are rejected before touching the store.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_RESUME_EXTS: [&str; 3] = ["pdf", "doc", "docx"];

fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

/// Pre-upload checks: size cap, PDF/Word extension, and a content sniff for
/// PDFs. Runs before any byte is written.
pub fn validate_resume(filename: &str, data: &[u8]) -> Result<String> {
    if data.len() > MAX_RESUME_BYTES {
        return Err(Error::BadRequest(
            "Resume file is too large, the limit is 5MB".into(),
        ));
    }

    let ext = file_extension(filename);
    if !ALLOWED_RESUME_EXTS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed, upload a PDF or Word document",
            ext
        )));
    }

    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }

    Ok(ext)
}

/// Local object store for resume files, served publicly from the uploads
/// directory.
#[derive(Clone)]
pub struct ResumeStore {
    root: PathBuf,
    public_base_url: String,
}

impl ResumeStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Store a validated resume under the applicant's directory and return
    /// its public URL.
    pub async fn store(&self, user_id: Uuid, filename: &str, data: &Bytes) -> Result<String> {
        let ext = validate_resume(filename, data)?;

        let dir = self.root.join("resumes").join(user_id.to_string());
        fs::create_dir_all(&dir).await?;

        let object_name = format!("{}.{}", Uuid::new_v4(), ext);
        let path = dir.join(&object_name);
        fs::write(&path, data).await.map_err(|e| {
            tracing::error!("failed to write resume file: {}", e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        Ok(self.public_url(user_id, &object_name))
    }

    fn public_url(&self, user_id: Uuid, object_name: &str) -> String {
        format!(
            "{}/uploads/resumes/{}/{}",
            self.public_base_url.trim_end_matches('/'),
            user_id,
            object_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_at_exactly_the_size_cap_is_accepted() {
        let data = vec![0u8; MAX_RESUME_BYTES];
        assert!(validate_resume("cv.docx", &data).is_ok());
    }

    #[test]
    fn resume_one_byte_over_the_cap_is_rejected() {
        let data = vec![0u8; MAX_RESUME_BYTES + 1];
        let err = validate_resume("cv.docx", &data).unwrap_err();
        assert!(err.to_string().contains("5MB"));
    }

    #[test]
    fn only_pdf_and_word_extensions_are_allowed() {
        assert!(validate_resume("cv.pdf", b"%PDF-1.7").is_ok());
        assert!(validate_resume("cv.doc", b"old word").is_ok());
        assert!(validate_resume("cv.png", &[0x89, 0x50]).is_err());
        assert!(validate_resume("cv", b"no extension").is_err());
    }

    #[test]
    fn pdf_content_must_carry_the_magic_bytes() {
        assert!(validate_resume("cv.pdf", b"not a pdf at all").is_err());
    }

    #[tokio::test]
    async fn stored_resume_resolves_to_a_public_url() {
        let root = std::env::temp_dir().join(format!("jobjua-store-{}", Uuid::new_v4()));
        let store = ResumeStore::new(&root, "http://localhost:8080/");
        let user = Uuid::new_v4();

        let url = store
            .store(user, "cv.pdf", &Bytes::from_static(b"%PDF-1.4 fake"))
            .await
            .expect("store resume");

        assert!(url.starts_with(&format!(
            "http://localhost:8080/uploads/resumes/{}/",
            user
        )));
        assert!(url.ends_with(".pdf"));

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
