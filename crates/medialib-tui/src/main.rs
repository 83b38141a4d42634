//! medialib: a terminal browser for a virtual media library.
//!
//! This binary loads the library (a JSON item list, or the built-in demo),
//! initialises the terminal, runs the main event loop, and restores the
//! terminal on exit or panic.

mod app;
mod demo;
mod icons;
mod input;
mod render;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use medialib_core::{Config, CoreError, DragSensor, ItemStore, ViewEvent, ViewState};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{App, AppMode, FrameLayout};
use crate::input::{handle_key, handle_mouse, InputAction, InputState, PointerAction};
use crate::render::render;

/// How long the loop waits for input before advancing timers.
const TICK: Duration = Duration::from_millis(50);

/// Where `W` writes the demo library, relative to the working directory.
const DEMO_SAVE_FILE: &str = "medialib-library.json";

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// `config/medialib.toml` in the working directory, else the user config dir.
fn config_path() -> PathBuf {
    let local = Path::new("config").join("medialib.toml");
    if local.exists() {
        return local;
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("medialib")
        .join("medialib.toml")
}

/// Logs to a file so output never lands on the alternate screen.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log.file)
        .with_context(|| format!("failed to open log file {}", config.log.file))?;
    let level = config
        .log
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config_file = config_path();
    let loaded = Config::load(&config_file);
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };

    init_tracing(&config)?;
    match loaded {
        Ok(_) => tracing::info!("config loaded from {}", config_file.display()),
        Err(CoreError::NotFound(_)) => tracing::info!("no config file, using defaults"),
        Err(e) => tracing::warn!("ignoring config {}: {e}", config_file.display()),
    }

    let source = LibrarySource::from_arg(std::env::args().nth(1).as_deref());
    let store = source.load()?;
    tracing::info!("library has {} items", store.len());

    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, store, &source, &config);

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

/// Where the library comes from: a JSON item list, or the built-in demo.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LibrarySource {
    Demo,
    File(PathBuf),
}

impl LibrarySource {
    fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::Demo,
        }
    }

    fn load(&self) -> anyhow::Result<ItemStore> {
        match self {
            Self::File(path) => ItemStore::load(path)
                .with_context(|| format!("failed to load library from {}", path.display())),
            Self::Demo => demo::demo_store(),
        }
    }

    /// A file source saves in place; the demo saves to the working directory.
    fn save_path(&self) -> PathBuf {
        match self {
            Self::File(path) => path.clone(),
            Self::Demo => PathBuf::from(DEMO_SAVE_FILE),
        }
    }
}

/// Re-reads the library and hands the items to the core as a replacement.
fn reload_library(app: App, source: &LibrarySource) -> App {
    match source.load() {
        Ok(store) => {
            tracing::info!("reloaded {} items", store.len());
            app.dispatch(ViewEvent::ReplaceItems(store.items().to_vec()))
        }
        Err(e) => {
            tracing::warn!("reload failed: {e:#}");
            app.with_status(format!("Reload failed: {e:#}"))
        }
    }
}

/// Writes the current items, moves included, to the library file.
fn save_library(app: App, source: &LibrarySource) -> App {
    let path = source.save_path();
    match app.state().store().save(&path) {
        Ok(()) => {
            let message = format!("Saved {} items to {}", app.state().store().len(), path.display());
            tracing::info!("{message}");
            app.with_status(message)
        }
        Err(e) => {
            tracing::warn!("save failed: {e}");
            app.with_status(format!("Save failed: {e}"))
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: ItemStore,
    source: &LibrarySource,
    config: &Config,
) -> anyhow::Result<()> {
    let state = ViewState::from_config(store, config);
    let sensor = DragSensor::new(config.drag.constraint());
    let mut app =
        App::new(state, sensor, config.view.grid_columns).with_show_icons(config.view.show_icons);
    let mut input_state = InputState::new();

    loop {
        let mut layout = FrameLayout::default();
        terminal.draw(|f| {
            layout = render(f, &app);
        })?;
        app = app.with_layout(layout);

        if app.should_quit() {
            break;
        }

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let (action, next_state) = handle_key(key, app.mode(), &input_state);
                    input_state = next_state;
                    app = apply_action(app.with_clear_status(), action, source);
                }
                Event::Mouse(mouse) => {
                    app = apply_pointer(app, handle_mouse(mouse), Instant::now());
                }
                _ => {}
            }
        }

        app = app.tick(Instant::now());
    }

    Ok(())
}

/// Applies a key action to the app.
fn apply_action(app: App, action: InputAction, source: &LibrarySource) -> App {
    match action {
        InputAction::Event(event) => app.dispatch(event),
        InputAction::EnterMode(AppMode::Search(_)) => app.enter_search(),
        InputAction::EnterMode(mode) => app.with_mode(mode),
        InputAction::Quit => app.with_quit(),
        InputAction::CursorDown => app.with_cursor_vertical(true),
        InputAction::CursorUp => app.with_cursor_vertical(false),
        InputAction::CursorLeft => app.with_cursor_horizontal(false),
        InputAction::CursorRight => app.with_cursor_horizontal(true),
        InputAction::CursorTop => app.with_cursor(0),
        InputAction::CursorBottom => app.with_cursor(usize::MAX),
        InputAction::RangeDown => app.with_range_step(true),
        InputAction::RangeUp => app.with_range_step(false),
        InputAction::Click(modifiers) => app.click_cursor(modifiers),
        InputAction::Open => app.open_cursor(),
        InputAction::SelectAll => app.select_all(),
        InputAction::ToggleFavorite => app.toggle_favorite(),
        InputAction::NextFavorite => app.next_favorite(),
        InputAction::Reload => reload_library(app, source),
        InputAction::Save => save_library(app, source),
        InputAction::CycleSort => app.cycle_sort(),
        InputAction::FlipSort => app.flip_sort(),
        InputAction::Mark => app.mark_cursor(),
        InputAction::DropMarked => app.drop_marked(),
        InputAction::SearchChar(c) => {
            let mut query = app.state().search().to_owned();
            query.push(c);
            app.search_input(query)
        }
        InputAction::SearchBackspace => {
            let mut query = app.state().search().to_owned();
            query.pop();
            app.search_input(query)
        }
        InputAction::SearchConfirm => app.with_mode(AppMode::Normal),
        InputAction::SearchCancel => app.search_cancel(),
        InputAction::None => app,
    }
}

/// Applies a mouse gesture to the app.
fn apply_pointer(app: App, action: PointerAction, now: Instant) -> App {
    match action {
        PointerAction::Down { x, y, modifiers } => app.pointer_down(x, y, modifiers, now),
        PointerAction::Drag { x, y } => app.pointer_drag(x, y, now),
        PointerAction::Up { x, y } => app.pointer_up(x, y, now),
        PointerAction::ScrollDown => app.with_cursor_vertical(true),
        PointerAction::ScrollUp => app.with_cursor_vertical(false),
        PointerAction::None => app,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medialib_core::{ItemId, Modifiers, ViewMode};

    const DEMO: LibrarySource = LibrarySource::Demo;

    fn setup_app() -> App {
        let state = ViewState::new(demo::demo_store().unwrap());
        App::new(state, DragSensor::default(), 4)
    }

    fn write_library(dir: &Path) -> PathBuf {
        let path = dir.join("library.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "a", "name": "Album", "type": "folder"},
                {"id": "b", "name": "cover.png", "type": "image", "parentId": "a", "size": 120},
                {"id": "c", "name": "notes.txt", "type": "file"}
            ]"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn search_chars_build_query() {
        let app = apply_action(
            setup_app(),
            InputAction::EnterMode(AppMode::Search(String::new())),
            &DEMO,
        );
        let app = apply_action(app, InputAction::SearchChar('h'), &DEMO);
        let app = apply_action(app, InputAction::SearchChar('e'), &DEMO);
        assert_eq!(app.state().search(), "he");
        assert_eq!(app.mode(), &AppMode::Search("he".to_string()));

        let app = apply_action(app, InputAction::SearchBackspace, &DEMO);
        assert_eq!(app.state().search(), "h");
    }

    #[test]
    fn search_confirm_keeps_filter() {
        let app = apply_action(
            setup_app(),
            InputAction::EnterMode(AppMode::Search(String::new())),
            &DEMO,
        );
        let app = apply_action(app, InputAction::SearchChar('n'), &DEMO);
        let app = apply_action(app, InputAction::SearchConfirm, &DEMO);
        assert_eq!(app.mode(), &AppMode::Normal);
        assert_eq!(app.state().search(), "n");
    }

    #[test]
    fn cursor_bottom_lands_on_last_item() {
        let app = apply_action(setup_app(), InputAction::CursorBottom, &DEMO);
        assert_eq!(app.cursor_id(), Some(ItemId::from("notes")));
    }

    #[test]
    fn tab_cycles_view_mode() {
        let app = apply_action(setup_app(), InputAction::Event(ViewEvent::CycleViewMode), &DEMO);
        assert_eq!(app.state().mode(), ViewMode::List);
    }

    #[test]
    fn quit_sets_flag() {
        assert!(apply_action(setup_app(), InputAction::Quit, &DEMO).should_quit());
    }

    #[test]
    fn toggle_click_adds_to_selection() {
        let app = apply_action(setup_app(), InputAction::Click(Modifiers::NONE), &DEMO);
        let app = apply_action(app, InputAction::CursorRight, &DEMO);
        let app = apply_action(app, InputAction::Click(Modifiers::CTRL), &DEMO);
        assert_eq!(app.state().selection().len(), 2);
    }

    #[test]
    fn favorite_then_jump_reveals_it() {
        let app = setup_app().reveal(ItemId::from("palette"));
        let app = apply_action(app, InputAction::ToggleFavorite, &DEMO);
        let app = apply_action(app, InputAction::Event(ViewEvent::Home), &DEMO);
        assert!(app.state().path().is_root());

        let app = apply_action(app, InputAction::NextFavorite, &DEMO);
        assert_eq!(app.state().current_folder_id(), Some(&ItemId::from("brand")));
        assert_eq!(app.cursor_id(), Some(ItemId::from("palette")));
    }

    #[test]
    fn scroll_moves_cursor() {
        let app = apply_pointer(
            setup_app().dispatch(ViewEvent::SetViewMode(ViewMode::List)),
            PointerAction::ScrollDown,
            Instant::now(),
        );
        assert_eq!(app.cursor(), 1);
    }

    #[test]
    fn demo_source_loads_demo_items() {
        let store = LibrarySource::from_arg(None).load().unwrap();
        assert_eq!(store.len(), demo::demo_items().len());
    }

    #[test]
    fn file_source_reads_json_items() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_library(tmp.path());

        let store = LibrarySource::from_arg(path.to_str()).load().unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(
            store.get(&ItemId::from("b")).unwrap().parent_id(),
            Some(&ItemId::from("a"))
        );
    }

    #[test]
    fn file_source_reports_missing_file() {
        let err = LibrarySource::from_arg(Some("/nonexistent/library.json"))
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/library.json"));
    }

    #[test]
    fn demo_saves_to_working_directory_file() {
        assert_eq!(DEMO.save_path(), PathBuf::from(DEMO_SAVE_FILE));
    }

    #[test]
    fn save_then_reload_keeps_moves() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = LibrarySource::File(write_library(tmp.path()));
        let app = App::new(
            ViewState::new(source.load().unwrap()),
            DragSensor::default(),
            4,
        )
        .dispatch(ViewEvent::Drop {
            active: ItemId::from("c"),
            target: Some(ItemId::from("a")),
        });

        let app = apply_action(app, InputAction::Save, &source);
        assert!(app.status_message().unwrap().starts_with("Saved 3 items"));

        let reloaded = source.load().unwrap();
        assert_eq!(
            reloaded.get(&ItemId::from("c")).unwrap().parent_id(),
            Some(&ItemId::from("a"))
        );
        let app = apply_action(app, InputAction::Reload, &source);
        assert_eq!(app.status_message(), Some("3 items loaded"));
    }

    #[test]
    fn reload_picks_up_external_edits_and_prune_clears_stale_ids() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_library(tmp.path());
        let source = LibrarySource::File(path.clone());
        let app = App::new(
            ViewState::new(source.load().unwrap()),
            DragSensor::default(),
            4,
        )
        .dispatch(ViewEvent::Reveal(ItemId::from("b")));
        assert_eq!(app.state().selection().ids(), &[ItemId::from("b")]);

        std::fs::write(&path, r#"[{"id": "a", "name": "Album", "type": "folder"}]"#).unwrap();
        let app = apply_action(app, InputAction::Reload, &source);
        assert_eq!(app.state().store().len(), 1);
        assert_eq!(app.state().selection().ids(), &[ItemId::from("b")]);

        let app = apply_action(app, InputAction::Event(ViewEvent::PruneSelection), &source);
        assert!(app.state().selection().is_empty());
    }

    #[test]
    fn failed_reload_keeps_items() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = LibrarySource::File(tmp.path().join("missing.json"));
        let app = apply_action(setup_app(), InputAction::Reload, &source);
        assert!(app.status_message().unwrap().starts_with("Reload failed"));
        assert_eq!(app.state().store().len(), demo::demo_items().len());
    }

    #[test]
    fn config_path_ends_with_file_name() {
        assert!(config_path().ends_with("medialib.toml"));
    }
}
