use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveScriptRequest {
    /// Existing script id. A missing or non-UUID value inserts a new record.
    pub id: Option<String>,
    pub project_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub style: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteScriptQuery {
    pub id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateVariantsRequest {
    #[validate(length(min = 1, message = "Paragraph is required"))]
    pub paragraph: String,
    #[validate(length(min = 1, message = "Style is required"))]
    pub style: String,
    /// Topical references the rewrite can weave in.
    #[serde(default)]
    pub context_nuggets: Vec<String>,
    /// How many rewrites to ask for. Defaults to 3.
    pub count: Option<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateVariantsResponse {
    pub variants: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PersonalizeScriptRequest {
    #[validate(length(min = 1, message = "Script text is required"))]
    pub script: String,
    #[validate(length(min = 1, message = "Style is required"))]
    pub style: String,
    pub title: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PersonalizeScriptResponse {
    pub script_id: Uuid,
    pub content: String,
}
