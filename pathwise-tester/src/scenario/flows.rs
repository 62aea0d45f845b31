use anyhow::{Context, Result, ensure};
use pathwise_core::{
    FALLBACK_CAREER_ID, JourneyEntry, JourneyEvent, JourneySnapshot, JourneyStore, Stage,
    StepStatus,
};

use super::ScenarioCtx;

/// Advance the store by exactly the pending timer's remaining delay.
fn settle(store: &mut JourneyStore) {
    if let Some((_, remaining)) = store.pending_timer() {
        store.advance(remaining);
    }
}

/// Answer every question with its first option.
fn answer_everything(store: &mut JourneyStore) -> Result<()> {
    let questions: Vec<(u32, String)> = store
        .data()
        .questions
        .iter()
        .map(|q| {
            q.options
                .first()
                .map(|option| (q.id, option.clone()))
                .with_context(|| format!("question {} has no options", q.id))
        })
        .collect::<Result<_>>()?;

    for (id, answer) in questions {
        ensure!(
            store.current_question().map(|q| q.id) == Some(id),
            "expected question {id} to be current, found {:?}",
            store.current_question().map(|q| q.id)
        );
        store.select_answer(id, answer);
        if store.stage() != Stage::Analyzing {
            settle(store);
        }
    }
    Ok(())
}

fn check_roadmap_shape(store: &JourneyStore) -> Result<()> {
    let roadmap = store.roadmap();
    ensure!(
        roadmap.len() == 5,
        "roadmap should have 5 steps, got {}",
        roadmap.len()
    );
    ensure!(
        roadmap.first().map(|s| s.status) == Some(StepStatus::Current),
        "first roadmap step should be current"
    );
    ensure!(
        roadmap.iter().skip(1).all(|s| s.status == StepStatus::Pending),
        "later roadmap steps should be pending"
    );
    Ok(())
}

pub fn smoke(ctx: &ScenarioCtx) -> Result<JourneySnapshot> {
    let mut store = ctx.store();
    ensure!(store.stage() == Stage::Hub, "journey should start at the hub");
    ensure!(!store.data().questions.is_empty(), "question bank is empty");
    store.start_journey(JourneyEntry::Questions);
    ensure!(store.stage() == Stage::Questions, "expected questions stage");
    ensure!(
        store.current_question().is_some(),
        "first question should be available"
    );
    Ok(store.snapshot())
}

pub fn full_journey(ctx: &ScenarioCtx) -> Result<JourneySnapshot> {
    let mut store = ctx.store();
    store.start_journey(JourneyEntry::Questions);
    answer_everything(&mut store)?;
    ensure!(
        store.stage() == Stage::Analyzing,
        "last answer should start analysis, stage is {}",
        store.stage()
    );

    settle(&mut store);
    ensure!(
        store.stage() == Stage::Paths,
        "expected paths, got {}",
        store.stage()
    );
    let (answered, total) = store.progress();
    ensure!(answered == total, "answered {answered} of {total} questions");

    let top = store
        .career_paths()
        .first()
        .cloned()
        .context("no career paths recommended")?;
    store.select_path(top);
    ensure!(store.stage() == Stage::Analyzing, "path choice should analyze");
    settle(&mut store);
    ensure!(
        store.stage() == Stage::Roadmap,
        "expected roadmap, got {}",
        store.stage()
    );
    check_roadmap_shape(&store)?;
    Ok(store.snapshot())
}

pub fn direct_paths(ctx: &ScenarioCtx) -> Result<JourneySnapshot> {
    let mut store = ctx.store();
    store.start_journey(JourneyEntry::Paths);
    ensure!(store.stage() == Stage::Paths, "expected paths stage");
    let paths = store.career_paths();
    ensure!(
        paths.len() == 4,
        "expected 4 career paths, got {}",
        paths.len()
    );
    ensure!(
        paths
            .windows(2)
            .all(|pair| pair[0].match_score >= pair[1].match_score),
        "career paths are not sorted by match score"
    );
    Ok(store.snapshot())
}

pub fn direct_roadmap(ctx: &ScenarioCtx) -> Result<JourneySnapshot> {
    let mut store = ctx.store();
    store.start_journey(JourneyEntry::Roadmap);
    ensure!(store.stage() == Stage::Roadmap, "expected roadmap stage");
    check_roadmap_shape(&store)?;
    Ok(store.snapshot())
}

pub fn fallback_roadmap(ctx: &ScenarioCtx) -> Result<JourneySnapshot> {
    let mut store = ctx.store();
    store.start_journey(JourneyEntry::Paths);
    let unmapped = store
        .career_paths()
        .iter()
        .find(|p| !store.data().roadmaps.contains(&p.id))
        .cloned()
        .context("every career has a dedicated roadmap")?;
    let requested = unmapped.id.clone();

    store.select_path(unmapped);
    settle(&mut store);
    ensure!(store.stage() == Stage::Roadmap, "expected roadmap stage");
    ensure!(
        store.roadmap() == store.data().roadmaps.lookup(FALLBACK_CAREER_ID).steps,
        "unmapped career `{requested}` should use the {FALLBACK_CAREER_ID} roadmap"
    );
    ensure!(
        store.events().iter().any(|e| matches!(
            e,
            JourneyEvent::RoadmapReady { career_id, fallback: true, .. } if *career_id == requested
        )),
        "fallback was not reported for `{requested}`"
    );
    Ok(store.snapshot())
}

pub fn reset_mid_analysis(ctx: &ScenarioCtx) -> Result<JourneySnapshot> {
    let mut store = ctx.store();
    store.start_journey(JourneyEntry::Questions);
    answer_everything(&mut store)?;
    let (ticket, _) = store
        .pending_timer()
        .context("analysis should be pending")?;

    store.reset();
    ensure!(store.fire(ticket).is_none(), "stale ticket fired after reset");
    store.advance(ctx.timing.analyze_answers_delay());
    ensure!(store.stage() == Stage::Hub, "reset should land on the hub");
    ensure!(
        store.career_paths().is_empty() && store.answers().is_empty(),
        "reset left journey data behind"
    );
    Ok(store.snapshot())
}

pub fn answer_overwrite(ctx: &ScenarioCtx) -> Result<JourneySnapshot> {
    let mut store = ctx.store();
    store.start_journey(JourneyEntry::Questions);
    let question = store.current_question().cloned().context("no questions")?;
    let (first, last) = match question.options.as_slice() {
        [first, .., last] => (first.clone(), last.clone()),
        _ => anyhow::bail!("question {} needs two options", question.id),
    };

    store.select_answer(question.id, first);
    store.select_answer(question.id, last.clone());
    settle(&mut store);
    ensure!(store.answers().len() == 1, "expected a single answer");
    ensure!(
        store.answers().get(question.id) == Some(last.as_str()),
        "last answer should win"
    );
    ensure!(
        store.current_question_index() == 1,
        "double answer should advance exactly once, index is {}",
        store.current_question_index()
    );
    Ok(store.snapshot())
}
