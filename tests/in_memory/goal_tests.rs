//! Goal progress, achievement and the goals view.

use super::helpers::{HubFixture, ManualClock, clock, fixture};
use rstest::rstest;
use std::sync::Arc;
use taskhub::config::HubConfig;
use taskhub::goal::domain::GoalPatch;
use taskhub::lifecycle::GOAL_ACHIEVED_MESSAGE;

fn celebrations(fixture: &HubFixture) -> usize {
    fixture
        .messages()
        .iter()
        .filter(|message| message.as_str() == GOAL_ACHIEVED_MESSAGE)
        .count()
}

#[rstest]
fn progress_rounds_over_milestones(mut fixture: HubFixture) -> Result<(), eyre::Report> {
    let goal = fixture
        .hub
        .add_goal("Run a half marathon")
        .ok_or_else(|| eyre::eyre!("goal not added"))?;
    let milestones: Vec<_> = ["5k", "10k", "15k"]
        .into_iter()
        .filter_map(|title| fixture.hub.add_milestone(goal, title))
        .collect();
    eyre::ensure!(milestones.len() == 3, "milestones not added");

    let mut seen = Vec::new();
    for milestone in &milestones {
        fixture.hub.toggle_milestone(goal, *milestone);
        seen.push(fixture.hub.goal(goal).map(|g| g.progress()));
    }
    eyre::ensure!(
        seen == [Some(33), Some(67), Some(100)],
        "unexpected progress sequence {seen:?}"
    );
    eyre::ensure!(celebrations(&fixture) == 1, "expected one celebration");
    Ok(())
}

#[rstest]
fn achievement_survives_a_new_milestone(mut fixture: HubFixture) {
    let goal = fixture.hub.add_goal("Ship v2").expect("goal added");
    let only = fixture.hub.add_milestone(goal, "Beta").expect("added");
    fixture.hub.toggle_milestone(goal, only);

    fixture.hub.add_milestone(goal, "General availability");

    let state = fixture.hub.goal(goal).expect("goal present");
    assert_eq!(state.progress(), 50);
    assert!(state.is_completed());
    assert_eq!(celebrations(&fixture), 1);
}

#[rstest]
fn goals_view_summarises_every_goal(mut fixture: HubFixture) {
    let halfway = fixture.hub.add_goal("Read twelve books").expect("goal added");
    let done = fixture.hub.add_goal("Learn to juggle").expect("goal added");
    fixture.hub.add_goal("Visit Lisbon").expect("goal added");
    fixture
        .hub
        .update_goal(halfway, GoalPatch::new().progress(50));
    fixture.hub.update_goal(done, GoalPatch::new().progress(100));

    let view = fixture.hub.goals_view().expect("goals enabled");

    assert_eq!(view.summary.total, 3);
    assert_eq!(view.summary.completed, 1);
    assert_eq!(view.summary.active, 2);
    assert_eq!(view.summary.average_progress, 50);
    assert_eq!(view.completed.first().map(|g| g.id()), Some(done));
    assert_eq!(view.active.len(), 2);
}

#[rstest]
fn progress_above_100_is_clamped(mut fixture: HubFixture) {
    let goal = fixture.hub.add_goal("Save for a bike").expect("goal added");

    fixture.hub.update_goal(goal, GoalPatch::new().progress(180));

    let state = fixture.hub.goal(goal).expect("goal present");
    assert_eq!(state.progress(), 100);
    assert!(state.is_completed());
}

#[rstest]
fn the_reports_variant_has_no_goals(clock: Arc<ManualClock>) {
    let mut fixture = HubFixture::with_config(HubConfig::tasks_with_reports(), clock);

    assert_eq!(fixture.hub.add_goal("Ignored"), None);
    assert!(fixture.hub.goals_view().is_none());
    assert!(fixture.hub.goals().is_empty());
    assert!(fixture.hub.report().is_some());
    assert!(fixture.hub.board().is_some());
}

#[rstest]
fn the_tasks_only_variant_has_no_optional_views(clock: Arc<ManualClock>) {
    let mut fixture = HubFixture::with_config(HubConfig::tasks_only(), clock);
    fixture.add("Still works").expect("task added");

    assert!(fixture.hub.report().is_none());
    assert!(fixture.hub.board().is_none());
    assert!(fixture.hub.goals_view().is_none());
    assert_eq!(fixture.hub.view().len(), 1);
}
