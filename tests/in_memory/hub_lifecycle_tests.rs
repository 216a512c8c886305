//! Completion, archival, deletion and undo through the public hub API.

use super::helpers::{HubFixture, ManualClock, clock, fixture, now};
use chrono::{DateTime, Utc};
use rstest::rstest;
use std::sync::Arc;
use taskhub::config::HubConfig;
use taskhub::hub::ViewFilter;
use taskhub::lifecycle::{
    ARCHIVED_MESSAGE, DELETED_MESSAGE, NotificationAction, NotificationKind, RESTORED_MESSAGE,
};
use taskhub::task::domain::{Priority, TaskPatch, TaskStatus};

fn complete() -> TaskPatch {
    TaskPatch::new().status(TaskStatus::Done)
}

#[rstest]
fn completed_task_leaves_the_active_view_after_one_second(
    mut fixture: HubFixture,
) -> Result<(), eyre::Report> {
    let id = fixture.add("Draft release notes")?;
    eyre::ensure!(fixture.hub.update_task(id, complete()), "update rejected");
    eyre::ensure!(fixture.hub.is_recently_completed(id), "not flagged");

    eyre::ensure!(fixture.advance(999) == 0, "archived too early");
    eyre::ensure!(fixture.hub.view().len() == 1, "task left the view early");

    eyre::ensure!(fixture.advance(1) == 1, "archival did not fire");
    eyre::ensure!(fixture.hub.view().is_empty(), "task still active");
    eyre::ensure!(!fixture.hub.is_recently_completed(id), "flag not cleared");
    eyre::ensure!(
        fixture.messages().iter().any(|m| m == ARCHIVED_MESSAGE),
        "no archival notification"
    );

    fixture.hub.set_view_filter(ViewFilter::Archived);
    let archived: Vec<_> = fixture.hub.view().iter().map(|task| task.id()).collect();
    eyre::ensure!(archived == [id], "archived view mismatch: {archived:?}");
    Ok(())
}

#[rstest]
fn editing_a_completed_task_does_not_reschedule_archival(mut fixture: HubFixture) {
    let id = fixture.add("Rotate API keys").expect("task added");
    fixture.hub.update_task(id, complete());
    fixture.advance(600);
    fixture
        .hub
        .update_task(id, TaskPatch::new().priority(Priority::Critical));

    assert_eq!(fixture.advance(400), 1);
    assert!(fixture.hub.task(id).is_some_and(|task| task.is_archived()));
}

#[rstest]
fn reopening_before_the_deadline_keeps_the_task_active(mut fixture: HubFixture) {
    let id = fixture.add("Review contract").expect("task added");
    fixture.hub.update_task(id, complete());
    fixture.advance(500);
    fixture
        .hub
        .update_task(id, TaskPatch::new().status(TaskStatus::InProgress));

    assert_eq!(fixture.advance(5_000), 0);
    let task = fixture.hub.task(id).expect("task kept");
    assert!(!task.is_archived());
    assert_eq!(task.status(), TaskStatus::InProgress);
}

#[rstest]
fn reopening_can_be_configured_to_keep_the_archival(clock: Arc<ManualClock>) {
    let config = HubConfig {
        cancel_archive_on_reopen: false,
        ..HubConfig::full()
    };
    let mut fixture = HubFixture::with_config(config, clock);
    let id = fixture.add("Send invoices").expect("task added");
    fixture.hub.update_task(id, complete());
    fixture
        .hub
        .update_task(id, TaskPatch::new().status(TaskStatus::ToDo));

    assert_eq!(fixture.advance(1_000), 1);
    let task = fixture.hub.task(id).expect("task kept");
    assert!(task.is_archived());
    assert_eq!(task.status(), TaskStatus::ToDo);
}

#[rstest]
fn undo_restores_the_deleted_task_unchanged(mut fixture: HubFixture) -> Result<(), eyre::Report> {
    let id = fixture.add("Book venue")?;
    fixture
        .hub
        .update_task(id, TaskPatch::new().description("Seats for forty"));
    fixture.hub.add_subtask(id, "Compare quotes");
    let before = fixture
        .hub
        .task(id)
        .cloned()
        .ok_or_else(|| eyre::eyre!("task missing"))?;

    let notification = fixture
        .hub
        .delete_task(id)
        .ok_or_else(|| eyre::eyre!("delete ignored"))?;
    let raised = fixture
        .hub
        .notifications()
        .iter()
        .find(|n| n.id() == notification)
        .ok_or_else(|| eyre::eyre!("delete notification missing"))?;
    eyre::ensure!(raised.message() == DELETED_MESSAGE, "wrong message");
    eyre::ensure!(raised.kind() == NotificationKind::Info, "wrong kind");
    eyre::ensure!(
        raised.action() == Some(NotificationAction::UndoDelete { task_id: id }),
        "undo action missing"
    );
    eyre::ensure!(fixture.hub.task(id).is_none(), "task still present");

    fixture.advance(4_999);
    eyre::ensure!(
        fixture.hub.undo_delete(notification) == Some(id),
        "undo rejected inside the window"
    );
    eyre::ensure!(fixture.hub.task(id) == Some(&before), "restored task differs");
    eyre::ensure!(
        fixture.messages().iter().any(|m| m == RESTORED_MESSAGE),
        "no restore notification"
    );
    Ok(())
}

#[rstest]
fn undo_is_gone_once_the_window_closes(mut fixture: HubFixture) {
    let id = fixture.add("Renew domain").expect("task added");
    let notification = fixture.hub.delete_task(id).expect("deleted");

    fixture.advance(5_000);

    assert!(fixture.hub.notifications().iter().all(|n| n.id() != notification));
    assert_eq!(fixture.hub.undo_delete(notification), None);
    assert!(fixture.hub.tasks().is_empty());
}

#[rstest]
fn each_deletion_keeps_its_own_undo(mut fixture: HubFixture) {
    let first = fixture.add("First").expect("task added");
    let second = fixture.add("Second").expect("task added");
    let first_undo = fixture.hub.delete_task(first).expect("deleted");
    let second_undo = fixture.hub.delete_task(second).expect("deleted");

    assert_eq!(fixture.hub.undo_delete(first_undo), Some(first));
    assert_eq!(fixture.hub.undo_delete(second_undo), Some(second));
    assert_eq!(fixture.hub.tasks().len(), 2);
}

#[rstest]
fn rejected_intents_change_nothing(mut fixture: HubFixture) {
    assert_eq!(fixture.hub.add_task("   "), None);
    assert!(fixture.hub.tasks().is_empty());
    assert_eq!(fixture.repository.save_count(), 0);
    assert!(fixture.hub.notifications().is_empty());
}

#[rstest]
fn notifications_expire_on_their_own(mut fixture: HubFixture) {
    fixture.add("Water plants").expect("task added");
    assert_eq!(fixture.hub.notifications().len(), 1);

    fixture.advance(5_000);

    assert!(fixture.hub.notifications().is_empty());
    assert_eq!(fixture.hub.next_deadline(), None);
}

#[rstest]
fn every_change_is_saved(mut fixture: HubFixture) {
    let id = fixture.add("Backup laptop").expect("task added");
    fixture.hub.update_task(id, complete());
    fixture.advance(1_000);

    let stored = fixture.repository.stored().expect("snapshot saved");
    assert_eq!(fixture.repository.save_count(), 3);
    assert!(stored.tasks.first().is_some_and(|task| task.is_archived()));
}

#[rstest]
fn a_task_due_today_counts_as_overdue_once_the_day_began(
    mut fixture: HubFixture,
    now: DateTime<Utc>,
) {
    let id = fixture.add("Call accountant").expect("task added");
    let task = fixture.hub.task(id).expect("task present");

    assert_eq!(task.due_date(), now.date_naive());
    assert!(task.is_overdue(now));
    assert_eq!(fixture.hub.report().map(|report| report.overdue_count), Some(1));
}
