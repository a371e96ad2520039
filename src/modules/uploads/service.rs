use super::dto::{PresignUploadRequest, PresignUploadResponse};
use crate::common::error::AppResult;
use crate::state::AppState;
use std::time::Duration;
use uuid::Uuid;

const PRESIGN_TTL: Duration = Duration::from_secs(15 * 60);
const DEFAULT_CONTENT_TYPE: &str = "video/mp4";

pub struct UploadService;

impl UploadService {
    /// Issue a presigned PUT URL. Keys are namespaced per user with a
    /// random prefix so uploads never collide or overwrite each other.
    pub async fn presign(
        state: AppState,
        user_id: Uuid,
        req: PresignUploadRequest,
    ) -> AppResult<PresignUploadResponse> {
        let key = format!(
            "uploads/{user_id}/{}/{}",
            Uuid::new_v4(),
            sanitize_file_name(&req.file_name)
        );
        let content_type = req.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE);

        let upload_url = state
            .storage
            .presign_put(&key, content_type, PRESIGN_TTL)
            .await?;
        Ok(PresignUploadResponse { upload_url, key })
    }
}

/// Keep file names path-safe inside the object key.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('_').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_safe_names() {
        assert_eq!(sanitize_file_name("clip-01_final.mp4"), "clip-01_final.mp4");
    }

    #[test]
    fn replaces_path_separators_and_spaces() {
        assert_eq!(sanitize_file_name("../etc/pass wd"), ".._etc_pass_wd");
    }

    #[test]
    fn all_garbage_falls_back_to_a_default() {
        assert_eq!(sanitize_file_name("///"), "upload");
    }
}
