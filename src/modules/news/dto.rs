use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsHeadline {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsDigest {
    pub headlines: Vec<NewsHeadline>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ToggleSelectionRequest {
    /// Headlines currently checked, oldest first.
    pub selected: Vec<String>,
    #[validate(length(min = 1, message = "Headline is required"))]
    pub headline: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SelectionResponse {
    pub selected: Vec<String>,
}
