mod paths;

use std::fs::{self, File};
use std::time::Duration;

use datagrid_lib::input::SelectInput;
use datagrid_lib::menu::{self, Clipboard, ColumnState, MemoryClipboard};
use datagrid_lib::prelude::*;
use datagrid_lib::presets;
use log::{error, info, warn};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode, WriteLogger};

fn init_logging() {
    paths::rotate_logs();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = paths::log_file()
        && let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_ok()
        && let Ok(file) = File::create(&path)
    {
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }

    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

/// Settings from `grid.json`, or everything switched on.
fn load_settings() -> GridConfig {
    let fallback = GridConfig {
        enable_cell_editing: true,
        enable_row_selection: true,
        enable_cell_context_menu: true,
        enable_header_context_menu: true,
        ..Default::default()
    };
    let Some(path) = paths::grid_config() else {
        return fallback;
    };
    match fs::read_to_string(&path) {
        Ok(json) => match GridConfig::from_json(&json) {
            Ok(config) => {
                info!("Loaded grid settings from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring {}: {}", path.display(), e);
                fallback
            }
        },
        Err(_) => fallback,
    }
}

fn users() -> Vec<Record> {
    vec![
        Record::with_id("1")
            .set("name", "John Doe")
            .set("email", "john@example.com")
            .set("age", 30)
            .set("role", "admin")
            .set("active", true)
            .set("joined", "2023-01-15"),
        Record::with_id("2")
            .set("name", "Jane")
            .set("email", "jane@example.com")
            .set("age", 25)
            .set("role", "user")
            .set("active", true)
            .set("joined", "2023-02-20"),
        Record::with_id("3")
            .set("name", "Bob Johnson")
            .set("email", "bob@example.com")
            .set("age", 35)
            .set("role", "user")
            .set("active", false)
            .set("joined", "2023-03-10"),
    ]
}

fn build_grid(settings: GridConfig, clipboard: MemoryClipboard) -> DataGrid {
    let roles = SelectInput::from_pairs([("admin", "Admin"), ("user", "User"), ("viewer", "Viewer")]);

    let mut cell_items = menu::common_cell_items();
    cell_items.extend([
        menu::edit_cell(),
        menu::CellMenuItem::separator("sep-2"),
        menu::delete_row(),
    ]);

    DataGrid::new(users())
        .config(settings)
        .columns([
            GridColumn::new("name", "Name").editable(presets::text::required()),
            GridColumn::new("email", "Email").editable(presets::email::basic()),
            GridColumn::new("age", "Age").editable(presets::number::range(18.0, 100.0)),
            GridColumn::new("role", "Role").editable(presets::quick_edit(CellEditConfig::new().input(roles))),
            GridColumn::new("active", "Active").editable(presets::boolean::checkbox()),
            GridColumn::new("joined", "Joined").editable(presets::date::with_buttons()),
        ])
        // Simulated backend: rejects the literal "error".
        .on_cell_edit(|value: Value, row: Record, column: ColumnId| async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if value.as_text() == Some("error") {
                return Err(SaveError::new("Server rejected the value"));
            }
            info!("Saved {}.{} = {}", row.id().unwrap_or("?"), column, value);
            Ok(true)
        })
        .on_cell_edit_error(|failure| {
            error!("Edit of {}:{} failed: {}", failure.row_id, failure.column, failure.message);
        })
        .on_row_selection_change(|rows| info!("{} rows selected", rows.len()))
        .action(GridAction::new("export", "Export", |rows: Vec<Record>| async move {
            info!("Exporting {} rows", rows.len());
            Ok::<_, datagrid_lib::error::ActionError>(())
        }))
        .action(
            GridAction::new("deactivate", "Deactivate", |rows: Vec<Record>| async move {
                info!("Deactivating {} rows", rows.len());
                Ok::<_, datagrid_lib::error::ActionError>(())
            })
            .enabled_when(|rows| rows.iter().any(|r| r.value("active") == Value::Bool(true))),
        )
        .action(
            GridAction::new("delete", "Delete", |rows: Vec<Record>| async move {
                Err::<(), _>(datagrid_lib::error::ActionError::new(format!(
                    "Refusing to delete {} rows",
                    rows.len()
                )))
            })
            .variant(ActionVariant::Destructive),
        )
        .cell_menu(cell_items)
        .header_menu(menu::common_header_items())
        .clipboard(clipboard)
}

fn print_rows(grid: &DataGrid) {
    for row in grid.rows().records() {
        let cells = grid
            .get_columns()
            .iter()
            .map(|c| format!("{}={}", c.header(), row.value(c.accessor_key()).display()))
            .collect::<Vec<_>>();
        println!("  {}", cells.join("  "));
    }
}

async fn edit_name(grid: &DataGrid) -> Result<(), Box<dyn std::error::Error>> {
    let cell = grid.cell("2", "name")?;
    cell.activate(Gesture::Click)?;
    cell.handle_input(InputEvent::Key(Key::End)).await?;
    cell.handle_inputs(InputEvent::typed("t")).await?;
    let outcome = cell.handle_input(InputEvent::Key(Key::Enter)).await?;
    info!("Renamed Jane: {:?}", outcome);
    Ok(())
}

async fn invalid_email(grid: &DataGrid) -> Result<(), Box<dyn std::error::Error>> {
    let cell = grid.cell("1", "email")?;
    cell.begin()?;
    cell.set_value("not-an-email")?;
    if let Err(e) = cell.save().await {
        warn!("Email rejected: {}", e);
    }
    cell.cancel()?;
    Ok(())
}

async fn failing_save(grid: &DataGrid) -> Result<(), Box<dyn std::error::Error>> {
    let cell = grid.cell("3", "name")?;
    cell.begin()?;
    cell.set_value("error")?;
    if let Err(e) = cell.save().await {
        warn!("Save failed, still editing ({:?}): {}", cell.state(), e);
    }

    // A second cell cannot open while this one is active.
    if let Err(e) = grid.cell("1", "age")?.begin() {
        info!("Second editor refused: {}", e);
    }

    cell.set_value("Bob Johnson Jr.")?;
    cell.save().await?;
    Ok(())
}

async fn pick_role_and_date(grid: &DataGrid) -> Result<(), Box<dyn std::error::Error>> {
    let role = grid.cell("3", "role")?;
    role.begin()?;
    role.handle_input(InputEvent::Choose(2)).await?;

    let joined = grid.cell("3", "joined")?;
    joined.begin()?;
    joined
        .handle_inputs([InputEvent::Key(Key::Backspace), InputEvent::Key(Key::Backspace)])
        .await?;
    joined.handle_inputs(InputEvent::typed("11")).await?;
    // Enter does nothing with action buttons shown.
    joined.handle_input(InputEvent::Key(Key::Enter)).await?;
    joined.handle_input(InputEvent::SaveButton).await?;
    Ok(())
}

async fn bulk_actions(grid: &DataGrid) -> Result<(), Box<dyn std::error::Error>> {
    grid.set_row_selected(&RowId::new("1"), true);
    grid.set_row_selected(&RowId::new("3"), true);

    if let Some(dock) = grid.dock_view() {
        let labels = dock.primary.iter().map(|b| b.label.as_str()).collect::<Vec<_>>();
        info!("Dock: {} [{}]", dock.selection_label(), labels.join(", "));
    }
    for action in ["export", "deactivate", "delete"] {
        let ok = grid.run_action(action).await?;
        info!("Action '{}' succeeded: {}", action, ok);
    }
    grid.clear_selection();
    Ok(())
}

fn context_menus(grid: &DataGrid, clipboard: &MemoryClipboard) -> Result<(), Box<dyn std::error::Error>> {
    grid.run_cell_menu_item("copy-cell", "2", "email")?;
    info!("Clipboard: {}", clipboard.read_text().unwrap_or_default());

    grid.run_cell_menu_item("edit-cell", "1", "age")?;
    info!("Active cell after menu edit: {:?}", grid.active_cell());
    if let Some(cell) = grid.active_cell() {
        grid.cell(cell.row_id.clone(), cell.column_id.clone())?.exit()?;
    }

    let mut name: ColumnState = grid
        .get_column(&ColumnId::new("name"))
        .map(|c| c.header_state())
        .unwrap_or_else(|| ColumnState::new("name"));
    grid.run_header_menu_item("sort-desc", &mut name)?;
    grid.run_header_menu_item("pin-left", &mut name)?;
    info!("Header state: sort={:?} pin={:?}", name.sort, name.pin);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    let clipboard = MemoryClipboard::new();
    let grid = build_grid(load_settings(), clipboard.clone());
    println!("Before:");
    print_rows(&grid);

    let result = async {
        edit_name(&grid).await?;
        invalid_email(&grid).await?;
        failing_save(&grid).await?;
        pick_role_and_date(&grid).await?;
        bulk_actions(&grid).await?;
        context_menus(&grid, &clipboard)
    }
    .await;
    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    println!("After:");
    print_rows(&grid);
}
