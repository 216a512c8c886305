//! Sort modes, manual moves and the board view.

use super::helpers::{HubFixture, day, fixture, now, task, titles};
use chrono::{DateTime, Utc};
use rstest::rstest;
use taskhub::ranking::{SortMode, rank};
use taskhub::task::MoveDirection;
use taskhub::task::domain::{Priority, Task, TaskPatch, TaskStatus};

fn sample(now: DateTime<Utc>) -> Vec<Task> {
    vec![
        task("far critical", Priority::Critical, TaskStatus::ToDo, day(now, 10), now),
        task("overdue low", Priority::Low, TaskStatus::ToDo, day(now, -2), now),
        task("tomorrow high", Priority::High, TaskStatus::InProgress, day(now, 1), now),
        task("finished critical", Priority::Critical, TaskStatus::Done, day(now, -5), now),
    ]
}

#[rstest]
#[case(SortMode::Priority, &["far critical", "finished critical", "tomorrow high", "overdue low"])]
#[case(SortMode::DueDate, &["overdue low", "finished critical", "tomorrow high", "far critical"])]
#[case(SortMode::Status, &["tomorrow high", "far critical", "overdue low", "finished critical"])]
#[case(SortMode::Smart, &["tomorrow high", "overdue low", "far critical", "finished critical"])]
fn each_mode_orders_the_sample(
    now: DateTime<Utc>,
    #[case] mode: SortMode,
    #[case] expected: &[&str],
) {
    let tasks = sample(now);

    assert_eq!(titles(&rank(&tasks, mode, now)), expected);
}

#[rstest]
fn equal_keys_keep_collection_order(now: DateTime<Utc>) {
    let tasks: Vec<Task> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|title| task(title, Priority::Medium, TaskStatus::ToDo, day(now, 3), now))
        .collect();

    for mode in SortMode::ALL {
        assert_eq!(titles(&rank(&tasks, mode, now)), ["a", "b", "c", "d"], "{mode}");
    }
}

#[rstest]
fn finished_work_earns_no_urgency_bonus(now: DateTime<Utc>) {
    let tasks = vec![
        task("done today", Priority::Critical, TaskStatus::Done, day(now, 0), now),
        task("someday", Priority::Low, TaskStatus::ToDo, day(now, 30), now),
    ];

    let ranked = rank(&tasks, SortMode::Smart, now);

    assert_eq!(titles(&ranked), ["done today", "someday"]);
    let scores: Vec<i64> = ranked
        .iter()
        .map(|task| taskhub::ranking::smart_score(task, now))
        .collect();
    assert_eq!(scores, [43, 16]);
}

#[rstest]
fn manual_sort_puts_new_tasks_first_and_moves_swap_neighbours(mut fixture: HubFixture) {
    fixture.hub.set_sort_mode(SortMode::Manual);
    let first = fixture.add("first").expect("task added");
    fixture.add("second").expect("task added");
    let third = fixture.add("third").expect("task added");

    assert_eq!(titles(&fixture.hub.view()), ["third", "second", "first"]);
    assert_eq!(fixture.hub.task(third).map(Task::order), Some(0));

    assert!(fixture.hub.move_adjacent(first, MoveDirection::Up));
    assert_eq!(titles(&fixture.hub.view()), ["third", "first", "second"]);

    assert!(!fixture.hub.move_adjacent(third, MoveDirection::Up));
    assert_eq!(titles(&fixture.hub.view()), ["third", "first", "second"]);
}

#[rstest]
fn moves_are_ignored_outside_manual_sort(mut fixture: HubFixture) {
    let first = fixture.add("first").expect("task added");
    fixture.add("second").expect("task added");
    let saves = fixture.repository.save_count();

    assert!(!fixture.hub.move_adjacent(first, MoveDirection::Up));
    assert_eq!(fixture.repository.save_count(), saves);
}

#[rstest]
fn moves_skip_archived_neighbours(mut fixture: HubFixture) {
    fixture.hub.set_sort_mode(SortMode::Manual);
    let bottom = fixture.add("bottom").expect("task added");
    let middle = fixture.add("middle").expect("task added");
    fixture.add("top").expect("task added");
    fixture
        .hub
        .update_task(middle, TaskPatch::new().status(TaskStatus::Done));
    fixture.advance(1_000);

    assert!(fixture.hub.move_adjacent(bottom, MoveDirection::Up));
    assert_eq!(titles(&fixture.hub.view()), ["bottom", "top"]);
}

#[rstest]
fn board_groups_active_tasks_by_status(mut fixture: HubFixture) {
    let queued = fixture.add("queued").expect("task added");
    let busy = fixture.add("busy").expect("task added");
    let shipped = fixture.add("shipped").expect("task added");
    fixture
        .hub
        .update_task(busy, TaskPatch::new().status(TaskStatus::InProgress));
    fixture
        .hub
        .update_task(shipped, TaskPatch::new().status(TaskStatus::Done));

    let board = fixture.hub.board().expect("board enabled");
    let statuses: Vec<_> = board.columns().iter().map(|column| column.status).collect();
    assert_eq!(statuses, TaskStatus::ALL);
    assert_eq!(board.column(TaskStatus::ToDo).first().map(|t| t.id()), Some(queued));
    assert_eq!(board.column(TaskStatus::InProgress).len(), 1);
    assert_eq!(board.column(TaskStatus::Done).len(), 1);

    fixture.advance(1_000);
    let after_archival = fixture.hub.board().expect("board enabled");
    assert!(after_archival.column(TaskStatus::Done).is_empty());
}
