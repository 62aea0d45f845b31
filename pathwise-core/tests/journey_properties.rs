use std::time::Duration;

use pathwise_core::{
    AnswerMap, CareerCatalog, JourneyEntry, JourneyEvent, JourneyState, JourneyStore,
    QuestionBank, RoadmapCatalog, Stage, StepStatus, generate_career_paths, generate_roadmap,
};

const SCENARIO: [(u32, &str); 5] = [
    (1, "Fast-paced and dynamic"),
    (2, "Technical and analytical"),
    (3, "Mentorship and feedback"),
    (4, "Making a meaningful impact"),
    (5, "Running my own venture"),
];

fn answer_maps() -> Vec<AnswerMap> {
    let bank = QuestionBank::default_bank();
    let mut maps = vec![AnswerMap::new()];
    for option_idx in 0..4 {
        maps.push(
            bank.iter()
                .map(|q| (q.id, q.options[option_idx % q.options.len()].clone()))
                .collect(),
        );
    }
    maps.push([(3, "Self-directed research")].into_iter().collect());
    maps.push([(99, "not a real question")].into_iter().collect());
    maps
}

fn walk_questions(store: &mut JourneyStore) {
    store.start_journey(JourneyEntry::Questions);
    for (id, answer) in SCENARIO {
        store.select_answer(id, answer);
        store.flush();
    }
}

#[test]
fn recommendations_are_four_sorted_and_answer_independent() {
    let baseline = generate_career_paths(&AnswerMap::new());
    for answers in answer_maps() {
        let paths = generate_career_paths(&answers);
        assert_eq!(paths.len(), 4);
        assert!(
            paths
                .windows(2)
                .all(|pair| pair[0].match_score >= pair[1].match_score)
        );
        assert_eq!(paths, baseline);
    }
}

#[test]
fn roadmaps_fall_back_and_share_shape() {
    assert_eq!(
        generate_roadmap("software-engineer"),
        generate_roadmap("unknown-id")
    );
    for id in ["software-engineer", "product-manager", "unknown-id", ""] {
        let steps = generate_roadmap(id);
        assert_eq!(steps.len(), 5, "roadmap for `{id}`");
        assert_eq!(steps[0].status, StepStatus::Current);
        assert!(steps.iter().skip(1).all(|s| s.status == StepStatus::Pending));
    }
}

#[test]
fn questionnaire_passes_through_analyzing_to_paths() {
    let mut store = JourneyStore::default();
    assert_eq!(store.stage(), Stage::Hub);
    store.start_journey(JourneyEntry::Questions);

    for (id, answer) in SCENARIO {
        store.select_answer(id, answer);
        if id < 5 {
            store.advance(store.timing().advance_delay());
        }
    }
    assert_eq!(store.stage(), Stage::Analyzing);
    store.advance(store.timing().analyze_answers_delay());
    assert_eq!(store.stage(), Stage::Paths);

    let expected: AnswerMap = SCENARIO.into_iter().collect();
    assert_eq!(store.answers(), &expected);

    let stages: Vec<Stage> = store
        .events()
        .iter()
        .filter_map(JourneyEvent::stage_target)
        .collect();
    assert_eq!(
        stages,
        vec![Stage::Questions, Stage::Analyzing, Stage::Paths]
    );
}

#[test]
fn concrete_answers_without_explicit_start_still_reach_paths() {
    let mut store = JourneyStore::default();
    for (id, answer) in SCENARIO {
        store.select_answer(id, answer);
        store.advance(Duration::from_secs(3));
    }
    assert_eq!(store.stage(), Stage::Paths);
    assert_eq!(store.answers().get(1), Some("Fast-paced and dynamic"));
    assert_eq!(store.answers().get(2), Some("Technical and analytical"));
    assert_eq!(store.answers().len(), 5);
}

#[test]
fn reset_restores_initial_state_from_every_stage() {
    let reach: [fn(&mut JourneyStore); 7] = [
        |_| {},
        |s| s.start_journey(JourneyEntry::Questions),
        |s| {
            s.start_journey(JourneyEntry::Questions);
            for (id, answer) in SCENARIO {
                s.select_answer(id, answer);
                if id < 5 {
                    s.flush();
                }
            }
        },
        walk_questions,
        |s| {
            walk_questions(s);
            let path = s.career_paths()[1].clone();
            s.select_path(path);
            s.flush();
        },
        |s| s.start_journey(JourneyEntry::Quiz),
        |s| s.start_journey(JourneyEntry::EnhancedQuiz),
    ];

    let mut seen = Vec::new();
    for setup in reach {
        let mut store = JourneyStore::default();
        setup(&mut store);
        seen.push(store.stage());
        store.reset();
        assert_eq!(store.state(), &JourneyState::default());
        assert_eq!(store.stage(), Stage::Hub);
        assert_eq!(store.current_question_index(), 0);
        assert!(store.answers().is_empty());
        assert!(store.career_paths().is_empty());
        assert!(store.selected_path().is_none());
        assert!(store.roadmap().is_empty());
        assert!(!store.is_pending());
    }
    assert_eq!(
        seen,
        vec![
            Stage::Hub,
            Stage::Questions,
            Stage::Analyzing,
            Stage::Paths,
            Stage::Roadmap,
            Stage::Quiz,
            Stage::EnhancedQuiz,
        ]
    );
}

#[test]
fn embedded_catalogs_validate() {
    assert!(QuestionBank::default_bank().validate().is_ok());
    assert!(CareerCatalog::default_catalog().validate().is_ok());
    assert!(RoadmapCatalog::default_catalog().validate().is_ok());
}
