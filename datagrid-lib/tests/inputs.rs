//! Input strategies driven through the grid.

use std::time::Duration;

use chrono::NaiveDate;
use datagrid_lib::input::{Control, SelectInput};
use datagrid_lib::prelude::*;
use datagrid_lib::presets;

fn users() -> Vec<Record> {
    vec![
        Record::with_id("1")
            .set("name", "John")
            .set("age", 30)
            .set("role", "admin")
            .set("active", true)
            .set("joined", NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()),
        Record::with_id("2")
            .set("name", "Jane")
            .set("age", 25)
            .set("role", "user")
            .set("active", false)
            .set("joined", "2023-02-20"),
    ]
}

fn grid() -> DataGrid {
    let roles = SelectInput::from_pairs([("admin", "Admin"), ("user", "User"), ("viewer", "Viewer")]);
    DataGrid::new(users())
        .config(GridConfig {
            enable_cell_editing: true,
            ..Default::default()
        })
        .columns([
            GridColumn::new("age", "Age").editable(presets::number::range(18.0, 100.0)),
            GridColumn::new("role", "Role").editable(presets::quick_edit(CellEditConfig::new().input(roles))),
            GridColumn::new("active", "Active").editable(presets::boolean::checkbox()),
            GridColumn::new("joined", "Joined").editable(presets::date::basic()),
        ])
}

fn field(grid: &DataGrid, row: &str, name: &str) -> Value {
    grid.rows().get(&RowId::new(row)).map(|r| r.value(name)).unwrap_or_default()
}

// ============================================================================
// Select
// ============================================================================

#[tokio::test]
async fn test_select_commits_on_choose() {
    let grid = grid();
    let cell = grid.cell("2", "role").unwrap();
    cell.activate(Gesture::Click).unwrap();

    let CellView::Editing(view) = cell.view() else {
        panic!("expected edit surface");
    };
    let Control::Select { options } = view.control else {
        panic!("expected select control");
    };
    assert!(options[1].selected);

    assert_eq!(cell.handle_input(InputEvent::Choose(2)).await, Ok(TriggerOutcome::Saved));
    assert_eq!(field(&grid, "2", "role"), Value::from("viewer"));
    assert_eq!(grid.active_cell(), None);
}

#[tokio::test]
async fn test_select_keyboard_and_escape() {
    let grid = grid();
    let cell = grid.cell("1", "role").unwrap();
    cell.begin().unwrap();
    cell.handle_inputs([InputEvent::Key(Key::Down), InputEvent::Key(Key::Down)])
        .await
        .unwrap();
    assert_eq!(cell.handle_input(InputEvent::Key(Key::Escape)).await, Ok(TriggerOutcome::Cancelled));
    assert_eq!(field(&grid, "1", "role"), Value::from("admin"));

    cell.begin().unwrap();
    cell.handle_input(InputEvent::Key(Key::Down)).await.unwrap();
    assert_eq!(cell.handle_input(InputEvent::Key(Key::Enter)).await, Ok(TriggerOutcome::Saved));
    assert_eq!(field(&grid, "1", "role"), Value::from("user"));
}

// ============================================================================
// Checkbox
// ============================================================================

#[tokio::test]
async fn test_checkbox_toggle_commits() {
    let grid = grid();
    let cell = grid.cell("1", "active").unwrap();
    cell.activate(Gesture::Click).unwrap();
    assert_eq!(cell.handle_input(InputEvent::Toggle).await, Ok(TriggerOutcome::Saved));
    assert_eq!(field(&grid, "1", "active"), Value::Bool(false));
}

// ============================================================================
// Number
// ============================================================================

#[tokio::test]
async fn test_number_range_preset() {
    let grid = grid();
    let cell = grid.cell("1", "age").unwrap();

    // Out-of-range entries never reach the pending value.
    cell.activate(Gesture::Click).unwrap();
    cell.handle_inputs(InputEvent::typed("150")).await.unwrap();
    assert_eq!(cell.pending_value(), Some(Value::Int(30)));
    assert_eq!(cell.handle_input(InputEvent::Key(Key::Enter)).await, Ok(TriggerOutcome::Saved));
    assert_eq!(field(&grid, "1", "age"), Value::Int(30));

    cell.begin().unwrap();
    cell.handle_inputs(InputEvent::typed("45")).await.unwrap();
    assert_eq!(cell.pending_value(), Some(Value::Int(45)));
    assert_eq!(cell.handle_input(InputEvent::Key(Key::Enter)).await, Ok(TriggerOutcome::Saved));
    assert_eq!(field(&grid, "1", "age"), Value::Int(45));

    cell.begin().unwrap();
    cell.set_value(150).unwrap();
    assert_eq!(cell.save().await, Err(EditError::Validation("Must be at most 100".into())));
    assert_eq!(field(&grid, "1", "age"), Value::Int(45));
}

#[tokio::test]
async fn test_number_ignores_letters() {
    let grid = grid();
    let cell = grid.cell("2", "age").unwrap();
    cell.begin().unwrap();
    assert_eq!(cell.handle_input(InputEvent::Key(Key::Char('x'))).await, Ok(TriggerOutcome::Ignored));
    assert_eq!(cell.pending_value(), Some(Value::Int(25)));
}

// ============================================================================
// Date
// ============================================================================

#[tokio::test]
async fn test_date_edit_commits_date_value() {
    let grid = grid();
    let cell = grid.cell("2", "joined").unwrap();
    cell.activate(Gesture::Click).unwrap();

    cell.handle_inputs([InputEvent::Key(Key::Backspace), InputEvent::Key(Key::Backspace)])
        .await
        .unwrap();
    cell.handle_inputs(InputEvent::typed("28")).await.unwrap();
    assert_eq!(cell.handle_input(InputEvent::Key(Key::Enter)).await, Ok(TriggerOutcome::Saved));
    assert_eq!(
        field(&grid, "2", "joined"),
        Value::Date(NaiveDate::from_ymd_opt(2023, 2, 28).unwrap())
    );
}

// ============================================================================
// Locking
// ============================================================================

#[tokio::test]
async fn test_input_is_locked_while_saving() {
    let grid = DataGrid::new(users())
        .config(GridConfig {
            enable_cell_editing: true,
            ..Default::default()
        })
        .column(GridColumn::new("name", "Name").editable(presets::text::click_to_edit()))
        .on_cell_edit(|_value: Value, _row: Record, _column: ColumnId| async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, SaveError>(true)
        });
    let cell = grid.cell("1", "name").unwrap();
    cell.begin().unwrap();
    cell.set_value("Johnny").unwrap();

    let other = cell.clone();
    let (saved, typed) = tokio::join!(cell.save(), async {
        tokio::task::yield_now().await;
        let CellView::Editing(view) = other.view() else {
            panic!("expected edit surface");
        };
        assert!(view.inactive);
        other.handle_input(InputEvent::Key(Key::Char('!'))).await
    });

    assert_eq!(saved, Ok(()));
    assert_eq!(typed, Ok(TriggerOutcome::Ignored));
    assert_eq!(field(&grid, "1", "name"), Value::from("Johnny"));
}
