use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::handler::register,
        crate::modules::auth::handler::login,
        crate::modules::auth::handler::logout,
        crate::modules::auth::handler::refresh,
        crate::modules::auth::handler::get_me,
        crate::modules::transcript::handler::extract_transcript,
        crate::modules::scripts::handler::list_scripts,
        crate::modules::scripts::handler::save_script,
        crate::modules::scripts::handler::delete_script,
        crate::modules::scripts::handler::generate_variants,
        crate::modules::scripts::handler::personalize_script,
        crate::modules::videos::handler::generate_heygen,
        crate::modules::videos::handler::probe_heygen,
        crate::modules::videos::handler::generate_n8n,
        crate::modules::videos::handler::video_history,
        crate::modules::videos::handler::get_video,
        crate::modules::videos::handler::avatar_catalog,
        crate::modules::news::handler::latest_news,
        crate::modules::news::handler::refresh_news,
        crate::modules::news::handler::toggle_news_selection,
        crate::modules::projects::handler::list_projects,
        crate::modules::projects::handler::create_project,
        crate::modules::projects::handler::get_project,
        crate::modules::projects::handler::update_project,
        crate::modules::projects::handler::delete_project,
        crate::modules::social::handler::list_connections,
        crate::modules::social::handler::connect,
        crate::modules::social::handler::callback,
        crate::modules::social::handler::publish_youtube,
        crate::modules::uploads::handler::presign_upload,
    ),
    components(
        schemas(
            crate::modules::auth::dto::RegisterRequest,
            crate::modules::auth::dto::LoginRequest,
            crate::modules::auth::dto::AuthResponse,
            crate::modules::auth::dto::UserResponse,
            crate::modules::transcript::dto::ExtractTranscriptRequest,
            crate::modules::transcript::dto::ExtractTranscriptResponse,
            crate::modules::transcript::dto::TranscriptMetadata,
            crate::modules::scripts::model::Script,
            crate::modules::scripts::dto::SaveScriptRequest,
            crate::modules::scripts::dto::GenerateVariantsRequest,
            crate::modules::scripts::dto::GenerateVariantsResponse,
            crate::modules::scripts::dto::PersonalizeScriptRequest,
            crate::modules::scripts::dto::PersonalizeScriptResponse,
            crate::modules::videos::model::VideoJob,
            crate::modules::videos::model::JobState,
            crate::modules::videos::dto::GenerateHeygenRequest,
            crate::modules::videos::dto::GenerateN8nRequest,
            crate::modules::videos::dto::JobStartedResponse,
            crate::modules::videos::dto::StatusProbeResponse,
            crate::modules::videos::dto::AvatarCatalog,
            crate::providers::heygen::Avatar,
            crate::providers::heygen::Voice,
            crate::modules::news::dto::NewsHeadline,
            crate::modules::news::dto::NewsDigest,
            crate::modules::news::dto::ToggleSelectionRequest,
            crate::modules::news::dto::SelectionResponse,
            crate::modules::projects::model::Project,
            crate::modules::projects::dto::CreateProjectRequest,
            crate::modules::projects::dto::UpdateProjectRequest,
            crate::modules::social::dto::ConnectResponse,
            crate::modules::social::dto::ConnectedAccount,
            crate::modules::social::dto::PublishYoutubeRequest,
            crate::modules::social::dto::PublishYoutubeResponse,
            crate::modules::uploads::dto::PresignUploadRequest,
            crate::modules::uploads::dto::PresignUploadResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Transcript", description = "YouTube transcript extraction"),
        (name = "Scripts", description = "Parody script drafting"),
        (name = "Videos", description = "Avatar video generation and history"),
        (name = "News", description = "Trending headlines for parody material"),
        (name = "Projects", description = "Project workspaces"),
        (name = "Social", description = "Social account connections and publishing"),
        (name = "Uploads", description = "Blob storage uploads")
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
