use super::dto::{
    GenerateVariantsRequest, PersonalizeScriptRequest, PersonalizeScriptResponse,
    SaveScriptRequest,
};
use super::model::Script;
use super::repository::ScriptRepository;
use crate::common::error::{AppError, AppResult};
use crate::common::text::{clean_generated_script, split_variants};
use crate::state::AppState;
use std::time::Duration;
use uuid::Uuid;

/// Overall ceiling for full-script rewrites, which can run long.
const PERSONALIZE_TIMEOUT: Duration = Duration::from_secs(120);

const DEFAULT_VARIANT_COUNT: u8 = 3;

pub struct ScriptService;

impl ScriptService {
    /// Upsert: a valid id belonging to the caller updates in place,
    /// anything else inserts a new record.
    pub async fn save(state: AppState, user_id: Uuid, req: SaveScriptRequest) -> AppResult<Script> {
        if let Some(id) = req.id.as_deref().and_then(|raw| Uuid::parse_str(raw).ok()) {
            if let Some(updated) = ScriptRepository::update(
                &state.db,
                id,
                user_id,
                &req.title,
                &req.content,
                req.style.as_deref(),
            )
            .await?
            {
                return Ok(updated);
            }
        }

        let script = ScriptRepository::insert(
            &state.db,
            user_id,
            req.project_id,
            &req.title,
            &req.content,
            req.style.as_deref(),
        )
        .await?;
        Ok(script)
    }

    pub async fn list(state: AppState, user_id: Uuid) -> AppResult<Vec<Script>> {
        Ok(ScriptRepository::list_for_user(&state.db, user_id).await?)
    }

    pub async fn delete(state: AppState, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let removed = ScriptRepository::delete(&state.db, id, user_id).await?;
        if removed == 0 {
            return Err(AppError::NotFound("Script not found".to_string()));
        }
        Ok(())
    }

    pub async fn generate_variants(
        state: AppState,
        req: GenerateVariantsRequest,
    ) -> AppResult<Vec<String>> {
        let count = req.count.unwrap_or(DEFAULT_VARIANT_COUNT).clamp(1, 5);
        let prompt = build_variants_prompt(&req.paragraph, &req.style, &req.context_nuggets, count);

        let raw = state
            .llm
            .chat(
                "You are a comedy writer rewriting transcript paragraphs in a performer's voice.",
                &prompt,
            )
            .await?;

        let variants = split_variants(&raw);
        if variants.is_empty() {
            return Err(AppError::Upstream(
                "LLM returned no usable variants".to_string(),
            ));
        }
        Ok(variants)
    }

    pub async fn personalize(
        state: AppState,
        user_id: Uuid,
        req: PersonalizeScriptRequest,
    ) -> AppResult<PersonalizeScriptResponse> {
        let prompt = build_personalize_prompt(&req.script, &req.style);

        let raw = state
            .llm
            .chat_with_timeout(
                "You rewrite full video scripts in the comedic voice of a given performer. \
                 Keep the factual beats, change the delivery.",
                &prompt,
                PERSONALIZE_TIMEOUT,
            )
            .await?;

        let content = clean_generated_script(&raw);
        if content.is_empty() {
            return Err(AppError::Upstream("LLM returned an empty script".to_string()));
        }

        let title = req
            .title
            .unwrap_or_else(|| format!("Personalized script ({})", req.style));
        let script = ScriptRepository::insert(
            &state.db,
            user_id,
            None,
            &title,
            &content,
            Some(&req.style),
        )
        .await?;

        Ok(PersonalizeScriptResponse {
            script_id: script.id,
            content,
        })
    }
}

fn build_variants_prompt(
    paragraph: &str,
    style: &str,
    context_nuggets: &[String],
    count: u8,
) -> String {
    let mut prompt = format!(
        "Rewrite the following paragraph {count} different ways in the style of {style}. \
         Separate the rewrites with a line containing only ---.\n\nParagraph:\n{paragraph}\n"
    );
    if !context_nuggets.is_empty() {
        prompt.push_str("\nWork in these current references where they fit naturally:\n");
        for nugget in context_nuggets {
            prompt.push_str("- ");
            prompt.push_str(nugget);
            prompt.push('\n');
        }
    }
    prompt
}

fn build_personalize_prompt(script: &str, style: &str) -> String {
    format!(
        "Rewrite this entire script in the comedic style of {style}. \
         Return only the rewritten script, no commentary.\n\nScript:\n{script}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_prompt_names_style_and_delimiter() {
        let prompt = build_variants_prompt("A paragraph.", "Norm Macdonald", &[], 3);
        assert!(prompt.contains("Norm Macdonald"));
        assert!(prompt.contains("---"));
        assert!(prompt.contains("A paragraph."));
    }

    #[test]
    fn variants_prompt_lists_nuggets() {
        let nuggets = vec!["the eclipse".to_string(), "new phone launch".to_string()];
        let prompt = build_variants_prompt("P.", "anyone", &nuggets, 2);
        assert!(prompt.contains("- the eclipse"));
        assert!(prompt.contains("- new phone launch"));
    }
}
