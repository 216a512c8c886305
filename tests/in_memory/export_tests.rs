//! CSV export and snapshot reload.

use super::helpers::{HubFixture, fixture};
use rstest::rstest;
use std::sync::Arc;
use taskhub::config::HubConfig;
use taskhub::hub::TaskHub;
use taskhub::persistence::InMemorySnapshotRepository;
use taskhub::task::domain::{TaskPatch, TaskStatus};

const HEADER: &str = "Title,Status,Priority,Category,Due Date,Created At,Subtasks,Comments";

#[rstest]
fn export_writes_both_sections_with_escaped_fields(
    mut fixture: HubFixture,
) -> Result<(), eyre::Report> {
    let done = fixture.add("Archive me")?;
    fixture
        .hub
        .update_task(done, TaskPatch::new().status(TaskStatus::Done));
    fixture.advance(1_000);

    let launch = fixture.add("Plan launch")?;
    let brief = fixture
        .hub
        .add_subtask(launch, "Brief")
        .ok_or_else(|| eyre::eyre!("subtask not added"))?;
    fixture.hub.toggle_subtask(launch, brief);
    fixture.hub.add_comment(launch, "Say \"Hi\", now");

    let expected = format!(
        "ACTIVE TASKS\n{HEADER}\n\
         Plan launch,To Do,Medium,Digital Marketing,2026-07-08,2026-07-08,Brief \u{2713},\"Say \"\"Hi\"\", now\"\n\
         \n\n\
         ARCHIVED TASKS\n{HEADER}\n\
         Archive me,Done,Medium,Digital Marketing,2026-07-08,2026-07-08,,\n"
    );
    let exported = fixture.hub.export_csv();
    eyre::ensure!(exported == expected, "unexpected export:\n{exported}");
    Ok(())
}

#[rstest]
fn empty_export_still_has_both_headers(fixture: HubFixture) {
    let exported = fixture.hub.export_csv();

    assert_eq!(
        exported,
        format!("ACTIVE TASKS\n{HEADER}\n\n\nARCHIVED TASKS\n{HEADER}\n")
    );
}

#[rstest]
fn reloading_the_saved_snapshot_restores_every_view(mut fixture: HubFixture) {
    let first = fixture.add("Prepare slides").expect("task added");
    fixture.add("Email speakers").expect("task added");
    fixture.hub.add_subtask(first, "Outline");
    fixture
        .hub
        .update_task(first, TaskPatch::new().status(TaskStatus::Done));
    fixture.advance(1_000);
    let goal = fixture.hub.add_goal("Run the meetup").expect("goal added");
    fixture.hub.add_milestone(goal, "Find a venue");

    let reloaded = TaskHub::load(
        HubConfig::full(),
        Arc::clone(&fixture.repository),
        Arc::clone(&fixture.clock),
    );

    assert_eq!(reloaded.snapshot(), fixture.hub.snapshot());
    assert_eq!(reloaded.export_csv(), fixture.hub.export_csv());
    assert_eq!(reloaded.goal(goal), fixture.hub.goal(goal));
}

#[rstest]
fn reload_does_not_restore_pending_timers(mut fixture: HubFixture) {
    let id = fixture.add("Half finished").expect("task added");
    fixture
        .hub
        .update_task(id, TaskPatch::new().status(TaskStatus::Done));

    let mut reloaded = TaskHub::load(
        HubConfig::full(),
        Arc::clone(&fixture.repository),
        Arc::clone(&fixture.clock),
    );
    fixture.clock.advance(chrono::TimeDelta::seconds(2));

    assert_eq!(reloaded.tick(), 0);
    assert!(reloaded.notifications().is_empty());
    let task = reloaded.task(id).expect("task restored");
    assert_eq!(task.status(), TaskStatus::Done);
    assert!(!task.is_archived());
}

#[rstest]
fn a_seeded_repository_feeds_a_narrower_variant(mut fixture: HubFixture) {
    fixture.add("Carry over").expect("task added");
    fixture.hub.add_goal("Left behind").expect("goal added");
    let repository = Arc::new(InMemorySnapshotRepository::with_snapshot(
        fixture.hub.snapshot(),
    ));

    let hub = TaskHub::load(HubConfig::tasks_only(), repository, Arc::clone(&fixture.clock));

    assert_eq!(hub.view().len(), 1);
    assert_eq!(hub.goals().len(), 1);
    assert!(hub.goals_view().is_none());
    assert!(hub.board().is_none());
}
