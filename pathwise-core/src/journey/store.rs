use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::answers::AnswerMap;
use crate::careers::CareerPath;
use crate::data::JourneyData;
use crate::journey::event::JourneyEvent;
use crate::journey::timer::{DeferredAction, PendingTimer, TimerTicket};
use crate::questions::JourneyQuestion;
use crate::roadmap::{FALLBACK_CAREER_ID, RoadmapStep};
use crate::stage::{JourneyEntry, Stage};
use crate::timing::JourneyTiming;

/// Observable journey state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct JourneyState {
    pub stage: Stage,
    pub current_question_index: usize,
    #[serde(default)]
    pub answers: AnswerMap,
    #[serde(default)]
    pub career_paths: Vec<CareerPath>,
    #[serde(default)]
    pub selected_path: Option<CareerPath>,
    #[serde(default)]
    pub roadmap: Vec<RoadmapStep>,
}

/// Serializable view of the pending transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSnapshot {
    pub ticket: TimerTicket,
    pub action: DeferredAction,
    pub remaining_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySnapshot {
    pub state: JourneyState,
    #[serde(default)]
    pub pending: Option<PendingSnapshot>,
}

/// Stage controller for the career journey.
///
/// Every operation is total. Artificial "analyzing" delays are modelled as a
/// single pending timer which the host drives with [`advance`](Self::advance),
/// [`fire`](Self::fire) or [`flush`](Self::flush).
#[derive(Debug, Clone)]
pub struct JourneyStore {
    data: Arc<JourneyData>,
    timing: JourneyTiming,
    state: JourneyState,
    pending: Option<PendingTimer>,
    next_ticket: TimerTicket,
    events: Vec<JourneyEvent>,
}

impl Default for JourneyStore {
    fn default() -> Self {
        Self::new(JourneyData::shared_default(), JourneyTiming::default())
    }
}

impl JourneyStore {
    #[must_use]
    pub fn new(data: Arc<JourneyData>, timing: JourneyTiming) -> Self {
        Self {
            data,
            timing,
            state: JourneyState::default(),
            pending: None,
            next_ticket: TimerTicket::first(),
            events: Vec::new(),
        }
    }

    /// Enter the journey directly at `target`.
    ///
    /// `Questions` clears previous answers; `Paths` and `Roadmap` populate
    /// their data immediately from placeholder inputs.
    pub fn start_journey(&mut self, target: JourneyEntry) {
        self.cancel_pending();
        match target {
            JourneyEntry::Questions => {
                self.state.current_question_index = 0;
                self.state.answers.clear();
            }
            JourneyEntry::Paths => self.resolve_career_paths(&AnswerMap::new()),
            JourneyEntry::Roadmap => self.resolve_roadmap(FALLBACK_CAREER_ID),
            JourneyEntry::Quiz | JourneyEntry::EnhancedQuiz => {}
        }
        self.set_stage(target.into());
    }

    /// Record an answer and move the journey forward.
    pub fn select_answer(&mut self, question_id: u32, answer: impl Into<String>) {
        let replaced = self.state.answers.record(question_id, answer).is_some();
        self.events.push(JourneyEvent::AnswerRecorded {
            question_id,
            replaced,
        });

        if self
            .data
            .questions
            .is_last_index(self.state.current_question_index)
        {
            self.set_stage(Stage::Analyzing);
            self.schedule(
                DeferredAction::ResolveCareerPaths,
                self.timing.analyze_answers_delay(),
            );
        } else {
            self.schedule(DeferredAction::AdvanceQuestion, self.timing.advance_delay());
        }
    }

    /// Choose a career and start building its roadmap.
    pub fn select_path(&mut self, path: CareerPath) {
        let career_id = path.id.clone();
        self.state.selected_path = Some(path);
        self.set_stage(Stage::Analyzing);
        self.schedule(
            DeferredAction::ResolveRoadmap { career_id },
            self.timing.analyze_path_delay(),
        );
    }

    /// Return to the hub, discarding all journey state, any pending timer and
    /// the undrained event log. The log then holds only the move to the hub.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.events.clear();
        let from = self.state.stage;
        self.state = JourneyState::default();
        if from != Stage::Hub {
            self.events.push(JourneyEvent::StageChanged {
                from,
                to: Stage::Hub,
            });
        }
        log::debug!("journey reset from {from}");
    }

    /// Count the pending timer down by `elapsed`, firing it once due.
    pub fn advance(&mut self, elapsed: Duration) -> Option<DeferredAction> {
        let due = self
            .pending
            .as_mut()
            .is_some_and(|timer| timer.elapse(elapsed));
        if due { self.flush() } else { None }
    }

    /// Fire the pending timer if `ticket` still identifies it.
    pub fn fire(&mut self, ticket: TimerTicket) -> Option<DeferredAction> {
        if self.pending.as_ref().is_some_and(|p| p.ticket == ticket) {
            self.flush()
        } else {
            log::trace!("ignoring stale timer {ticket}");
            None
        }
    }

    /// Fire whatever is pending right now.
    pub fn flush(&mut self) -> Option<DeferredAction> {
        let timer = self.pending.take()?;
        self.run(&timer.action);
        Some(timer.action)
    }

    #[must_use]
    pub fn pending_timer(&self) -> Option<(TimerTicket, Duration)> {
        self.pending.as_ref().map(|p| (p.ticket, p.remaining))
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.state.stage
    }

    #[must_use]
    pub const fn current_question_index(&self) -> usize {
        self.state.current_question_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&JourneyQuestion> {
        self.data.questions.at(self.state.current_question_index)
    }

    /// Answered and total question counts.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.state.answers.len(), self.data.questions.len())
    }

    #[must_use]
    pub const fn answers(&self) -> &AnswerMap {
        &self.state.answers
    }

    #[must_use]
    pub fn career_paths(&self) -> &[CareerPath] {
        &self.state.career_paths
    }

    #[must_use]
    pub const fn selected_path(&self) -> Option<&CareerPath> {
        self.state.selected_path.as_ref()
    }

    #[must_use]
    pub fn roadmap(&self) -> &[RoadmapStep] {
        &self.state.roadmap
    }

    #[must_use]
    pub const fn state(&self) -> &JourneyState {
        &self.state
    }

    #[must_use]
    pub const fn timing(&self) -> &JourneyTiming {
        &self.timing
    }

    #[must_use]
    pub fn data(&self) -> &JourneyData {
        &self.data
    }

    #[must_use]
    pub fn events(&self) -> &[JourneyEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<JourneyEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn snapshot(&self) -> JourneySnapshot {
        JourneySnapshot {
            state: self.state.clone(),
            pending: self.pending.as_ref().map(|p| PendingSnapshot {
                ticket: p.ticket,
                action: p.action.clone(),
                remaining_ms: u64::try_from(p.remaining.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }

    fn run(&mut self, action: &DeferredAction) {
        match action {
            DeferredAction::AdvanceQuestion => {
                let last = self.data.questions.len().saturating_sub(1);
                let index = (self.state.current_question_index + 1).min(last);
                self.state.current_question_index = index;
                self.events.push(JourneyEvent::QuestionAdvanced { index });
            }
            DeferredAction::ResolveCareerPaths => {
                let answers = self.state.answers.clone();
                self.resolve_career_paths(&answers);
                self.set_stage(Stage::Paths);
            }
            DeferredAction::ResolveRoadmap { career_id } => {
                self.resolve_roadmap(career_id);
                self.set_stage(Stage::Roadmap);
            }
        }
    }

    fn resolve_career_paths(&mut self, answers: &AnswerMap) {
        self.state.career_paths = self.data.careers.recommend(answers);
        self.events.push(JourneyEvent::CareerPathsReady {
            count: self.state.career_paths.len(),
        });
    }

    fn resolve_roadmap(&mut self, career_id: &str) {
        let lookup = self.data.roadmaps.lookup(career_id);
        let fallback = lookup.is_fallback();
        if fallback {
            log::warn!(
                "no roadmap for `{career_id}`, using `{}`",
                self.data.roadmaps.fallback
            );
        }
        self.state.roadmap = lookup.steps;
        self.events.push(JourneyEvent::RoadmapReady {
            career_id: career_id.to_string(),
            steps: self.state.roadmap.len(),
            fallback,
        });
    }

    fn set_stage(&mut self, to: Stage) {
        let from = self.state.stage;
        if from == to {
            return;
        }
        self.state.stage = to;
        log::debug!("journey stage {from} -> {to}");
        self.events.push(JourneyEvent::StageChanged { from, to });
    }

    fn schedule(&mut self, action: DeferredAction, delay: Duration) {
        self.cancel_pending();
        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        self.events.push(JourneyEvent::TimerScheduled {
            ticket,
            action: action.clone(),
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        });
        self.pending = Some(PendingTimer {
            ticket,
            action,
            remaining: delay,
        });
    }

    fn cancel_pending(&mut self) {
        if let Some(timer) = self.pending.take() {
            log::debug!("cancelled timer {} ({:?})", timer.ticket, timer.action);
            self.events
                .push(JourneyEvent::TimerCancelled { ticket: timer.ticket });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::StepStatus;

    const ANSWERS: [(u32, &str); 5] = [
        (1, "Fast-paced and dynamic"),
        (2, "Technical and analytical"),
        (3, "Hands-on projects"),
        (4, "Continuous growth"),
        (5, "Deep technical expert"),
    ];

    fn answer_all(store: &mut JourneyStore) {
        for (id, answer) in ANSWERS {
            store.select_answer(id, answer);
            store.advance(Duration::from_millis(300));
        }
    }

    #[test]
    fn full_questionnaire_reaches_paths() {
        let mut store = JourneyStore::default();
        store.start_journey(JourneyEntry::Questions);
        assert_eq!(store.stage(), Stage::Questions);

        for (step, (id, answer)) in ANSWERS.into_iter().enumerate() {
            assert_eq!(store.current_question_index(), step);
            assert_eq!(store.current_question().map(|q| q.id), Some(id));
            store.select_answer(id, answer);
            if step < 4 {
                assert_eq!(
                    store.advance(Duration::from_millis(300)),
                    Some(DeferredAction::AdvanceQuestion)
                );
            }
        }

        assert_eq!(store.stage(), Stage::Analyzing);
        assert!(store.career_paths().is_empty());
        assert_eq!(store.advance(Duration::from_millis(1_999)), None);
        assert_eq!(
            store.advance(Duration::from_millis(1)),
            Some(DeferredAction::ResolveCareerPaths)
        );
        assert_eq!(store.stage(), Stage::Paths);
        assert_eq!(store.answers().len(), 5);
        assert_eq!(store.answers().get(1), Some("Fast-paced and dynamic"));
        assert_eq!(store.career_paths().len(), 4);
        assert_eq!(store.progress(), (5, 5));
    }

    #[test]
    fn selecting_a_path_builds_its_roadmap() {
        let mut store = JourneyStore::default();
        store.start_journey(JourneyEntry::Questions);
        answer_all(&mut store);
        store.flush();

        let pm = store
            .career_paths()
            .iter()
            .find(|p| p.id == "product-manager")
            .cloned()
            .unwrap();
        store.select_path(pm);
        assert_eq!(store.stage(), Stage::Analyzing);
        assert_eq!(
            store.selected_path().map(|p| p.id.as_str()),
            Some("product-manager")
        );
        assert_eq!(
            store.pending_timer().map(|(_, d)| d),
            Some(Duration::from_millis(1_500))
        );

        store.advance(Duration::from_millis(1_500));
        assert_eq!(store.stage(), Stage::Roadmap);
        assert_eq!(store.roadmap().len(), 5);
        assert_eq!(store.roadmap()[0].status, StepStatus::Current);
        assert_eq!(store.roadmap()[0].title, "Product Fundamentals");
    }

    #[test]
    fn unknown_path_falls_back_and_reports_it() {
        let mut store =
            JourneyStore::new(JourneyData::shared_default(), JourneyTiming::instant());
        store.start_journey(JourneyEntry::Paths);
        let ux = store.career_paths()[3].clone();
        assert_eq!(ux.id, "ux-designer");
        store.select_path(ux);
        store.advance(Duration::ZERO);
        assert_eq!(store.stage(), Stage::Roadmap);
        assert!(store.events().iter().any(|e| matches!(
            e,
            JourneyEvent::RoadmapReady { fallback: true, career_id, .. } if career_id == "ux-designer"
        )));
    }

    #[test]
    fn start_journey_entries_populate_placeholders() {
        let mut store = JourneyStore::default();
        store.start_journey(JourneyEntry::Paths);
        assert_eq!(store.stage(), Stage::Paths);
        assert_eq!(store.career_paths().len(), 4);

        store.start_journey(JourneyEntry::Roadmap);
        assert_eq!(store.stage(), Stage::Roadmap);
        assert_eq!(store.roadmap()[0].title, "Programming Foundations");

        store.start_journey(JourneyEntry::EnhancedQuiz);
        assert_eq!(store.stage(), Stage::EnhancedQuiz);
        assert!(!store.is_pending());
    }

    #[test]
    fn start_questions_clears_earlier_answers() {
        let mut store = JourneyStore::default();
        store.start_journey(JourneyEntry::Questions);
        store.select_answer(1, "Collaborative and social");
        store.flush();
        assert_eq!(store.current_question_index(), 1);

        store.start_journey(JourneyEntry::Questions);
        assert_eq!(store.current_question_index(), 0);
        assert!(store.answers().is_empty());
    }

    #[test]
    fn reset_mid_analysis_discards_the_transition() {
        let mut store = JourneyStore::default();
        store.start_journey(JourneyEntry::Questions);
        answer_all(&mut store);
        assert_eq!(store.stage(), Stage::Analyzing);
        let (ticket, _) = store.pending_timer().unwrap();

        store.reset();
        assert_eq!(store.state(), &JourneyState::default());
        assert!(!store.is_pending());
        assert_eq!(store.fire(ticket), None);
        assert_eq!(store.advance(Duration::from_secs(10)), None);
        assert_eq!(store.stage(), Stage::Hub);
    }

    #[test]
    fn repeated_answers_share_one_advance() {
        let mut store = JourneyStore::default();
        store.start_journey(JourneyEntry::Questions);
        store.select_answer(1, "Fast-paced and dynamic");
        let (first, _) = store.pending_timer().unwrap();
        store.select_answer(1, "Independent and focused");
        assert_eq!(store.fire(first), None);
        store.flush();
        assert_eq!(store.current_question_index(), 1);
        assert_eq!(store.answers().get(1), Some("Independent and focused"));
        assert!(store.events().contains(&JourneyEvent::AnswerRecorded {
            question_id: 1,
            replaced: true
        }));
        assert!(store.events().contains(&JourneyEvent::TimerCancelled { ticket: first }));
    }

    #[test]
    fn snapshot_reports_pending_timer() {
        let mut store = JourneyStore::default();
        store.start_journey(JourneyEntry::Questions);
        store.select_answer(1, "Fast-paced and dynamic");
        store.advance(Duration::from_millis(100));
        let snapshot = store.snapshot();
        let pending = snapshot.pending.as_ref().unwrap();
        assert_eq!(pending.remaining_ms, 200);
        assert_eq!(pending.action, DeferredAction::AdvanceQuestion);

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["state"]["stage"], "questions");
        assert_eq!(value["state"]["answers"]["1"], "Fast-paced and dynamic");
    }

    #[test]
    fn drain_events_empties_the_log() {
        let mut store = JourneyStore::default();
        store.start_journey(JourneyEntry::Quiz);
        let events = store.drain_events();
        assert_eq!(
            events,
            vec![JourneyEvent::StageChanged {
                from: Stage::Hub,
                to: Stage::Quiz
            }]
        );
        assert!(store.events().is_empty());
    }

    #[test]
    fn reset_keeps_the_event_log_bounded() {
        let mut store = JourneyStore::default();
        for _ in 0..1_000 {
            store.start_journey(JourneyEntry::Questions);
            for (id, answer) in ANSWERS {
                store.select_answer(id, answer);
                store.flush();
            }
            assert_eq!(store.stage(), Stage::Paths);
            store.reset();
            assert_eq!(
                store.events(),
                &[JourneyEvent::StageChanged {
                    from: Stage::Paths,
                    to: Stage::Hub
                }]
            );
        }

        store.reset();
        assert!(store.events().is_empty());
    }
}
