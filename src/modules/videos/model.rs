use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of an external rendering job. Transitions only move
/// forward; the three right-most states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Submitted,
    Processing,
    Completed,
    Failed,
    TimedOut,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Submitted => "submitted",
            JobState::Processing => "processing",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
            JobState::TimedOut => "timed_out",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "submitted" => Some(JobState::Submitted),
            "processing" => Some(JobState::Processing),
            "completed" => Some(JobState::Completed),
            "failed" => Some(JobState::Failed),
            "timed_out" => Some(JobState::TimedOut),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Completed | JobState::Failed | JobState::TimedOut
        )
    }

    fn rank(&self) -> u8 {
        match self {
            JobState::Submitted => 0,
            JobState::Processing => 1,
            JobState::Completed | JobState::Failed | JobState::TimedOut => 2,
        }
    }
}

/// True when moving from `from` to `to` only goes forward in the
/// lifecycle. Terminal states accept no further transitions.
pub fn can_transition(from: JobState, to: JobState) -> bool {
    !from.is_terminal() && to.rank() > from.rank()
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct VideoJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub script_id: Option<Uuid>,
    pub provider: String,
    pub job_id: Option<String>,
    pub state: String,
    pub result_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub error_message: Option<String>,
    pub title: Option<String>,
    pub version: i32,
    #[schema(value_type = String, format = DateTime)]
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
    #[schema(value_type = String, format = DateTime)]
    #[serde(with = "time::serde::iso8601")]
    pub updated_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_round_trip_through_strings() {
        for state in [
            JobState::Submitted,
            JobState::Processing,
            JobState::Completed,
            JobState::Failed,
            JobState::TimedOut,
        ] {
            assert_eq!(JobState::parse(state.as_str()), Some(state));
        }
        assert_eq!(JobState::parse("rendering"), None);
    }

    #[test]
    fn forward_transitions_allowed() {
        assert!(can_transition(JobState::Submitted, JobState::Processing));
        assert!(can_transition(JobState::Processing, JobState::Completed));
        assert!(can_transition(JobState::Processing, JobState::Failed));
        assert!(can_transition(JobState::Submitted, JobState::TimedOut));
    }

    #[test]
    fn backward_transitions_rejected() {
        assert!(!can_transition(JobState::Processing, JobState::Submitted));
        assert!(!can_transition(JobState::Completed, JobState::Processing));
        assert!(!can_transition(JobState::Failed, JobState::Completed));
    }

    #[test]
    fn terminal_states_are_final() {
        for terminal in [JobState::Completed, JobState::Failed, JobState::TimedOut] {
            assert!(terminal.is_terminal());
            for next in [
                JobState::Submitted,
                JobState::Processing,
                JobState::Completed,
                JobState::Failed,
                JobState::TimedOut,
            ] {
                assert!(!can_transition(terminal, next));
            }
        }
    }
}
