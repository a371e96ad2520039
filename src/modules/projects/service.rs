use super::dto::{CreateProjectRequest, UpdateProjectRequest};
use super::model::Project;
use super::repository::ProjectRepository;
use crate::common::error::{AppError, AppResult};
use crate::state::AppState;
use uuid::Uuid;

pub struct ProjectService;

impl ProjectService {
    pub async fn create(
        state: AppState,
        user_id: Uuid,
        req: CreateProjectRequest,
    ) -> AppResult<Project> {
        let project = ProjectRepository::insert(
            &state.db,
            user_id,
            &req.name,
            req.description.as_deref(),
            req.source_url.as_deref(),
        )
        .await?;
        Ok(project)
    }

    pub async fn update(
        state: AppState,
        user_id: Uuid,
        id: Uuid,
        req: UpdateProjectRequest,
    ) -> AppResult<Project> {
        ProjectRepository::update(
            &state.db,
            id,
            user_id,
            &req.name,
            req.description.as_deref(),
            req.source_url.as_deref(),
            req.transcript.as_deref(),
            req.status.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    pub async fn get(state: AppState, user_id: Uuid, id: Uuid) -> AppResult<Project> {
        ProjectRepository::find_by_id(&state.db, id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    pub async fn list(state: AppState, user_id: Uuid) -> AppResult<Vec<Project>> {
        Ok(ProjectRepository::list_for_user(&state.db, user_id).await?)
    }

    pub async fn delete(state: AppState, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let removed = ProjectRepository::delete(&state.db, id, user_id).await?;
        if removed == 0 {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }
}
