//! End-to-end edit lifecycle tests through the grid.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use datagrid_lib::edit::{EditFailure, SAVE_REJECTED_MESSAGE};
use datagrid_lib::prelude::*;
use datagrid_lib::validation::Rules;

fn users() -> Vec<Record> {
    vec![
        Record::with_id("1").set("name", "John").set("age", 30),
        Record::with_id("2").set("name", "Jane").set("age", 25),
        Record::with_id("3").set("name", "Bob").set("age", 35),
    ]
}

fn editing() -> GridConfig {
    GridConfig {
        enable_cell_editing: true,
        ..Default::default()
    }
}

/// Save handler that counts calls and answers with `result`.
fn counting_handler(
    calls: Arc<AtomicUsize>,
    result: Result<bool, SaveError>,
) -> impl Fn(Value, Record, ColumnId) -> std::pin::Pin<Box<dyn Future<Output = Result<bool, SaveError>> + Send>>
+ Send
+ Sync {
    move |_value, _row, _column| {
        calls.fetch_add(1, Ordering::SeqCst);
        let result = result.clone();
        Box::pin(async move { result })
    }
}

fn name(grid: &DataGrid, row: &str) -> Value {
    grid.rows().get(&RowId::new(row)).map(|r| r.value("name")).unwrap_or_default()
}

// ============================================================================
// Single editor
// ============================================================================

#[test]
fn test_second_cell_cannot_begin_while_first_is_active() {
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new()));
    let a = grid.cell("1", "name").unwrap();
    let b = grid.cell("2", "name").unwrap();

    assert_eq!(a.activate(Gesture::Click), Ok(true));
    assert_eq!(
        b.activate(Gesture::Click),
        Err(EditError::Busy {
            active: CellId::new("1", "name")
        })
    );

    assert_eq!(grid.active_cell(), Some(CellId::new("1", "name")));
    assert!(a.is_editing());
    assert_eq!(b.state(), EditState::Idle);
    assert!(matches!(b.view(), CellView::Display { .. }));
    assert!(matches!(a.view(), CellView::Editing(_)));
}

#[test]
fn test_at_most_one_session_across_many_attempts() {
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new()))
        .column(GridColumn::new("age", "Age").editable(CellEditConfig::new()));

    let cells = ["1", "2", "3"]
        .iter()
        .flat_map(|row| [grid.cell(*row, "name").unwrap(), grid.cell(*row, "age").unwrap()])
        .collect::<Vec<_>>();
    for cell in &cells {
        let _ = cell.begin();
    }
    assert_eq!(cells.iter().filter(|c| c.state() != EditState::Idle).count(), 1);
    assert_eq!(grid.active_cell(), Some(cells[0].cell().clone()));
}

#[tokio::test]
async fn test_next_cell_can_begin_after_save() {
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new()));
    let a = grid.cell("1", "name").unwrap();
    let b = grid.cell("2", "name").unwrap();

    a.begin().unwrap();
    a.save().await.unwrap();
    assert!(b.begin().is_ok());
}

// ============================================================================
// Validation and persistence
// ============================================================================

#[tokio::test]
async fn test_validation_failure_never_persists() {
    let calls = Arc::new(AtomicUsize::new(0));
    let grid = DataGrid::new(users())
        .config(editing())
        .column(
            GridColumn::new("name", "Name")
                .editable(CellEditConfig::new().validate(Rules::new().required("Name is required").into_fn())),
        )
        .on_cell_edit(counting_handler(calls.clone(), Ok(true)));
    let cell = grid.cell("2", "name").unwrap();

    cell.begin().unwrap();
    cell.set_value("").unwrap();
    let err = cell.trigger(Trigger::Enter).await.unwrap_err();

    assert_eq!(err, EditError::Validation("Name is required".into()));
    assert!(err.is_recoverable());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(cell.state(), EditState::Editing);
    assert_eq!(cell.error().as_deref(), Some("Name is required"));
    assert_eq!(name(&grid, "2"), Value::from("Jane"));
}

#[tokio::test]
async fn test_successful_save_destroys_session() {
    let calls = Arc::new(AtomicUsize::new(0));
    let ended = Arc::new(Mutex::new(None));
    let sink = ended.clone();
    let grid = DataGrid::new(users())
        .config(editing())
        .column(
            GridColumn::new("name", "Name").editable(
                CellEditConfig::new()
                    .validate(Arc::new(|_: &Value, _: &Record| None))
                    .on_edit_end(move |row, _| *sink.lock().unwrap() = Some(row.value("name"))),
            ),
        )
        .on_cell_edit(counting_handler(calls.clone(), Ok(true)));
    let cell = grid.cell("2", "name").unwrap();

    cell.begin().unwrap();
    cell.set_value("Janet").unwrap();
    cell.save().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(grid.active_cell(), None);
    assert_eq!(cell.state(), EditState::Idle);
    assert_eq!(cell.committed_value(), Value::from("Janet"));
    assert_eq!(*ended.lock().unwrap(), Some(Value::from("Janet")));
}

#[tokio::test]
async fn test_rejected_save_keeps_session_and_reports_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let failures = Arc::new(Mutex::new(Vec::<EditFailure>::new()));
    let sink = failures.clone();
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new()))
        .on_cell_edit(counting_handler(calls.clone(), Ok(false)))
        .on_cell_edit_error(move |failure| sink.lock().unwrap().push(failure.clone()));
    let cell = grid.cell("2", "name").unwrap();

    cell.begin().unwrap();
    cell.set_value("Janet").unwrap();
    let err = cell.save().await.unwrap_err();

    assert_eq!(
        err,
        EditError::Persistence {
            message: SAVE_REJECTED_MESSAGE.into()
        }
    );
    assert_eq!(cell.state(), EditState::Editing);
    assert_eq!(cell.error().as_deref(), Some(SAVE_REJECTED_MESSAGE));
    assert_eq!(cell.pending_value(), Some(Value::from("Janet")));
    assert_eq!(name(&grid, "2"), Value::from("Jane"));

    let failures = failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].row_id, RowId::new("2"));
    assert_eq!(failures[0].column, ColumnId::new("name"));
    assert_eq!(failures[0].row.value("name"), Value::from("Jane"));
}

#[tokio::test]
async fn test_failed_save_propagates_message_and_allows_retry() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let errors = Arc::new(AtomicUsize::new(0));
    let error_count = errors.clone();
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("age", "Age").editable(CellEditConfig::new().on_save(
            move |_value: Value, _row: Record, _column: ColumnId| {
                let attempt = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 0 {
                        Err(SaveError::new("Network error"))
                    } else {
                        Ok(true)
                    }
                }
            },
        )))
        .on_cell_edit_error(move |_| {
            error_count.fetch_add(1, Ordering::SeqCst);
        });
    let cell = grid.cell("1", "age").unwrap();

    cell.begin().unwrap();
    cell.set_value(31).unwrap();
    assert_eq!(
        cell.save().await,
        Err(EditError::Persistence {
            message: "Network error".into()
        })
    );
    assert_eq!(cell.error().as_deref(), Some("Network error"));

    cell.save().await.unwrap();
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(errors.load(Ordering::SeqCst), 1);
    assert_eq!(cell.committed_value(), Value::Int(31));
}

#[tokio::test]
async fn test_column_handler_takes_precedence() {
    let grid_calls = Arc::new(AtomicUsize::new(0));
    let column_calls = Arc::new(AtomicUsize::new(0));
    let grid = DataGrid::new(users())
        .config(editing())
        .column(
            GridColumn::new("name", "Name")
                .editable(CellEditConfig::new().on_save(counting_handler(column_calls.clone(), Ok(true)))),
        )
        .on_cell_edit(counting_handler(grid_calls.clone(), Ok(true)));
    let cell = grid.cell("1", "name").unwrap();

    cell.begin().unwrap();
    cell.save().await.unwrap();
    assert_eq!(column_calls.load(Ordering::SeqCst), 1);
    assert_eq!(grid_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_handler_sees_shadow_row() {
    let seen = Arc::new(Mutex::new(None));
    let sink = seen.clone();
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new()))
        .on_cell_edit(move |value: Value, row: Record, column: ColumnId| {
            *sink.lock().unwrap() = Some((value, row.value("name"), column));
            async { Ok::<_, SaveError>(false) }
        });
    let cell = grid.cell("3", "name").unwrap();

    cell.begin().unwrap();
    cell.set_value("Robert").unwrap();
    let _ = cell.save().await;

    let (value, row_name, column) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(value, Value::from("Robert"));
    assert_eq!(row_name, Value::from("Robert"));
    assert_eq!(column, ColumnId::new("name"));
    assert_eq!(name(&grid, "3"), Value::from("Bob"));
}

#[tokio::test]
async fn test_concurrent_save_is_rejected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new()))
        .on_cell_edit(move |_value: Value, _row: Record, _column: ColumnId| {
            counter.fetch_add(1, Ordering::SeqCst);
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, SaveError>(true)
            }
        });
    let cell = grid.cell("1", "name").unwrap();
    cell.begin().unwrap();
    cell.set_value("Johnny").unwrap();

    let other = cell.clone();
    let (first, second) = tokio::join!(cell.save(), async {
        tokio::task::yield_now().await;
        assert_eq!(other.state(), EditState::Saving);
        assert_eq!(other.set_value("Jo"), Err(EditError::SaveInProgress));
        assert_eq!(other.cancel(), Err(EditError::SaveInProgress));
        other.save().await
    });

    assert_eq!(first, Ok(()));
    assert_eq!(second, Err(EditError::SaveInProgress));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(name(&grid, "1"), Value::from("Johnny"));
}

// ============================================================================
// Cancel
// ============================================================================

#[tokio::test]
async fn test_cancel_restores_original_value() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cancelled = Arc::new(AtomicUsize::new(0));
    let cancel_count = cancelled.clone();
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new().on_cancel(move |_, _| {
            cancel_count.fetch_add(1, Ordering::SeqCst);
        })))
        .on_cell_edit(counting_handler(calls.clone(), Ok(false)));
    let cell = grid.cell("2", "name").unwrap();

    cell.begin().unwrap();
    for value in ["J", "Ja", "Jan", "Janice"] {
        cell.set_value(value).unwrap();
    }
    let _ = cell.save().await;
    assert_eq!(cell.trigger(Trigger::Escape).await, Ok(TriggerOutcome::Cancelled));

    assert_eq!(cell.state(), EditState::Idle);
    assert_eq!(cell.pending_value(), None);
    assert_eq!(name(&grid, "2"), Value::from("Jane"));
    assert_eq!(cancelled.load(Ordering::SeqCst), 1);

    // A new session starts from the committed value.
    cell.begin().unwrap();
    assert_eq!(cell.pending_value(), Some(Value::from("Jane")));
    assert_eq!(cell.error(), None);
}

#[test]
fn test_cancel_returns_original() {
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new()));
    let cell = grid.cell("1", "name").unwrap();
    cell.begin().unwrap();
    cell.set_value("Jonathan").unwrap();
    assert_eq!(cell.cancel(), Ok(Value::from("John")));
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_click_to_edit_type_and_enter() {
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new().behavior(EditBehavior::click_to_edit())));
    let cell = grid.cell("2", "name").unwrap();

    assert_eq!(cell.activate(Gesture::Click), Ok(true));
    // Text starts selected, so typing replaces it.
    cell.handle_inputs(InputEvent::typed("Janet")).await.unwrap();
    assert_eq!(cell.pending_value(), Some(Value::from("Janet")));

    assert_eq!(
        cell.handle_input(InputEvent::Key(Key::Enter)).await,
        Ok(TriggerOutcome::Saved)
    );
    assert_eq!(cell.state(), EditState::Idle);
    assert_eq!(name(&grid, "2"), Value::from("Janet"));
}

#[tokio::test]
async fn test_click_to_edit_min_length_failure() {
    let grid = DataGrid::new(users()).config(editing()).column(
        GridColumn::new("name", "Name").editable(
            CellEditConfig::new()
                .behavior(EditBehavior::click_to_edit())
                .validate(Rules::new().min_length(2, "must be at least 2 characters").into_fn()),
        ),
    );
    let cell = grid.cell("2", "name").unwrap();

    cell.activate(Gesture::Click).unwrap();
    cell.handle_inputs(InputEvent::typed("J")).await.unwrap();
    let result = cell.handle_input(InputEvent::Key(Key::Enter)).await;

    assert_eq!(result, Err(EditError::Validation("must be at least 2 characters".into())));
    assert_eq!(cell.state(), EditState::Editing);
    assert_eq!(cell.error().as_deref(), Some("must be at least 2 characters"));
    assert_eq!(name(&grid, "2"), Value::from("Jane"));

    let CellView::Editing(view) = cell.view() else {
        panic!("expected edit surface");
    };
    assert_eq!(view.error.as_deref(), Some("must be at least 2 characters"));
}

#[tokio::test]
async fn test_blur_saves_under_click_to_edit() {
    let grid = DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new()));
    let cell = grid.cell("3", "name").unwrap();

    cell.activate(Gesture::Click).unwrap();
    cell.handle_inputs(InputEvent::typed("Rob")).await.unwrap();
    assert_eq!(cell.handle_input(InputEvent::Blur).await, Ok(TriggerOutcome::Saved));
    assert_eq!(name(&grid, "3"), Value::from("Rob"));
}

#[tokio::test]
async fn test_click_with_buttons_cancel() {
    let calls = Arc::new(AtomicUsize::new(0));
    let grid = DataGrid::new(users())
        .config(editing())
        .column(
            GridColumn::new("name", "Name")
                .editable(CellEditConfig::new().behavior(EditBehavior::click_with_buttons())),
        )
        .on_cell_edit(counting_handler(calls.clone(), Ok(true)));
    let cell = grid.cell("2", "name").unwrap();

    cell.activate(Gesture::Click).unwrap();
    cell.handle_inputs(InputEvent::typed("Janet")).await.unwrap();

    // Keyboard triggers are inert without them in the trigger sets.
    assert_eq!(cell.handle_input(InputEvent::Key(Key::Enter)).await, Ok(TriggerOutcome::Ignored));
    assert_eq!(cell.handle_input(InputEvent::Blur).await, Ok(TriggerOutcome::Ignored));
    assert!(cell.is_editing());

    assert_eq!(cell.handle_input(InputEvent::CancelButton).await, Ok(TriggerOutcome::Cancelled));
    assert_eq!(grid.active_cell(), None);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(name(&grid, "2"), Value::from("Jane"));
}

#[tokio::test]
async fn test_click_with_buttons_save() {
    let calls = Arc::new(AtomicUsize::new(0));
    let grid = DataGrid::new(users())
        .config(editing())
        .column(
            GridColumn::new("name", "Name")
                .editable(CellEditConfig::new().behavior(EditBehavior::click_with_buttons())),
        )
        .on_cell_edit(counting_handler(calls.clone(), Ok(true)));
    let cell = grid.cell("2", "name").unwrap();

    cell.activate(Gesture::Click).unwrap();
    let CellView::Editing(view) = cell.view() else {
        panic!("expected edit surface");
    };
    assert_eq!(view.buttons, Some(ButtonPosition::TopRight));

    cell.handle_inputs(InputEvent::typed("Janet")).await.unwrap();
    assert_eq!(cell.handle_input(InputEvent::SaveButton).await, Ok(TriggerOutcome::Saved));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(name(&grid, "2"), Value::from("Janet"));
}

#[tokio::test]
async fn test_exit_skips_validation_and_persistence() {
    let calls = Arc::new(AtomicUsize::new(0));
    let grid = DataGrid::new(users())
        .config(editing())
        .column(
            GridColumn::new("name", "Name")
                .editable(CellEditConfig::new().validate(Rules::new().required("required").into_fn())),
        )
        .on_cell_edit(counting_handler(calls.clone(), Ok(true)));
    let cell = grid.cell("1", "name").unwrap();

    cell.begin().unwrap();
    cell.set_value("").unwrap();
    cell.exit().unwrap();

    assert_eq!(grid.active_cell(), None);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(name(&grid, "1"), Value::from("John"));
}

#[test]
fn test_disabled_rows_stay_in_display_mode() {
    let started = Arc::new(AtomicUsize::new(0));
    let start_count = started.clone();
    let grid = DataGrid::new(users()).config(editing()).column(
        GridColumn::new("name", "Name").editable(
            CellEditConfig::new()
                .disabled(|row| row.value("age").as_f64().is_some_and(|age| age > 30.0))
                .on_edit_start(move |_, _| {
                    start_count.fetch_add(1, Ordering::SeqCst);
                }),
        ),
    );

    assert_eq!(grid.cell("3", "name").unwrap().activate(Gesture::Click), Err(EditError::Disabled));
    assert_eq!(grid.active_cell(), None);
    assert_eq!(grid.cell("1", "name").unwrap().activate(Gesture::Click), Ok(true));
    assert_eq!(started.load(Ordering::SeqCst), 1);
}

fn slow_grid(ended: Arc<AtomicUsize>) -> DataGrid {
    DataGrid::new(users())
        .config(editing())
        .column(GridColumn::new("name", "Name").editable(CellEditConfig::new().on_edit_end(move |_, _| {
            ended.fetch_add(1, Ordering::SeqCst);
        })))
        .on_cell_edit(|_value: Value, _row: Record, _column: ColumnId| async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok::<_, SaveError>(true)
        })
}

#[tokio::test]
async fn test_row_removed_during_save_fails_commit() {
    let ended = Arc::new(AtomicUsize::new(0));
    let grid = slow_grid(ended.clone());
    let cell = grid.cell("1", "name").unwrap();
    cell.begin().unwrap();
    cell.set_value("Johnny").unwrap();

    let (saved, removed) = tokio::join!(cell.save(), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        grid.remove_row(&RowId::new("1"))
    });

    assert!(removed.is_some());
    assert_eq!(saved, Err(EditError::UnknownRow));
    assert_eq!(ended.load(Ordering::SeqCst), 0);
    assert_eq!(grid.rows().len(), 2);
    assert_eq!(grid.active_cell(), None);
    assert!(grid.cell("2", "name").unwrap().begin().is_ok());
}

#[tokio::test]
async fn test_coordinator_keeps_saving_session() {
    let ended = Arc::new(AtomicUsize::new(0));
    let grid = slow_grid(ended.clone());
    let cell = grid.cell("1", "name").unwrap();
    cell.begin().unwrap();
    cell.set_value("Johnny").unwrap();

    let (saved, second) = tokio::join!(cell.save(), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(cell.exit(), Err(EditError::SaveInProgress));
        assert!(grid.coordinator().end_edit().is_none());
        grid.cell("2", "name").unwrap().begin()
    });

    assert!(matches!(second, Err(EditError::Busy { .. })));
    assert_eq!(saved, Ok(()));
    assert_eq!(ended.load(Ordering::SeqCst), 1);
    assert_eq!(name(&grid, "1"), Value::from("Johnny"));
}
