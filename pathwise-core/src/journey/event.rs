//! Structured events emitted by the journey store.

use serde::{Deserialize, Serialize};

use crate::journey::timer::{DeferredAction, TimerTicket};
use crate::stage::Stage;

/// State change reported by the journey store, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum JourneyEvent {
    StageChanged {
        from: Stage,
        to: Stage,
    },
    AnswerRecorded {
        question_id: u32,
        /// True when the answer replaced an earlier one for the same question.
        replaced: bool,
    },
    QuestionAdvanced {
        index: usize,
    },
    CareerPathsReady {
        count: usize,
    },
    RoadmapReady {
        career_id: String,
        steps: usize,
        fallback: bool,
    },
    TimerScheduled {
        ticket: TimerTicket,
        action: DeferredAction,
        delay_ms: u64,
    },
    TimerCancelled {
        ticket: TimerTicket,
    },
}

impl JourneyEvent {
    /// Destination stage when this event is a stage change.
    #[must_use]
    pub const fn stage_target(&self) -> Option<Stage> {
        match self {
            Self::StageChanged { to, .. } => Some(*to),
            _ => None,
        }
    }
}
