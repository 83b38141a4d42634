use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use medialib_core::{Modifiers, ViewEvent};

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug)]
pub enum InputAction {
    /// Dispatch a core event as-is.
    Event(ViewEvent),
    /// Enter a new AppMode.
    EnterMode(AppMode),
    /// Quit the application.
    Quit,
    CursorDown,
    CursorUp,
    /// Previous tile in the grid, previous column in columns view.
    CursorLeft,
    /// Next tile in the grid, next column in columns view.
    CursorRight,
    /// Jump cursor to top (gg).
    CursorTop,
    /// Jump cursor to bottom (G).
    CursorBottom,
    /// Move down and extend the selection (J).
    RangeDown,
    /// Move up and extend the selection (K).
    RangeUp,
    /// Click the cursor item with the given modifiers.
    Click(Modifiers),
    /// Open the cursor item.
    Open,
    SelectAll,
    ToggleFavorite,
    /// Reveal the next favorite.
    NextFavorite,
    /// Re-read the library and replace every item.
    Reload,
    /// Write the library back to its file.
    Save,
    /// Cycle the sort field.
    CycleSort,
    /// Flip the sort direction.
    FlipSort,
    /// Mark the cursor item for a keyboard move.
    Mark,
    /// Drop the marked item onto the cursor item.
    DropMarked,
    /// Append a character to the search query.
    SearchChar(char),
    /// Remove the last character from the search query.
    SearchBackspace,
    /// Keep the filter and return to Normal.
    SearchConfirm,
    /// Clear the filter and return to Normal.
    SearchCancel,
    /// No action for this key.
    None,
}

/// Tracks state for multi-key sequences like "gg".
#[derive(Debug, Default)]
pub struct InputState {
    pending_g: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self { pending_g: false }
    }
}

/// Maps a key event to an InputAction based on the current mode.
/// Returns the action and a new InputState (immutable pattern).
pub fn handle_key(key: KeyEvent, mode: &AppMode, state: &InputState) -> (InputAction, InputState) {
    match mode {
        AppMode::Normal => handle_normal_key(key, state),
        AppMode::Search(_) => handle_search_key(key),
        AppMode::Help => handle_help_key(key),
    }
}

fn handle_normal_key(key: KeyEvent, state: &InputState) -> (InputAction, InputState) {
    // Handle "gg" sequence
    if state.pending_g {
        let new_state = InputState { pending_g: false };
        return match key.code {
            KeyCode::Char('g') => (InputAction::CursorTop, new_state),
            _ => (InputAction::None, new_state),
        };
    }

    let new_state = InputState { pending_g: false };

    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::SelectAll
        }
        KeyCode::Char('g') => {
            return (InputAction::None, InputState { pending_g: true });
        }
        KeyCode::Char('G') => InputAction::CursorBottom,
        KeyCode::Down | KeyCode::Char('j') => InputAction::CursorDown,
        KeyCode::Up | KeyCode::Char('k') => InputAction::CursorUp,
        KeyCode::Left | KeyCode::Char('h') => InputAction::CursorLeft,
        KeyCode::Right | KeyCode::Char('l') => InputAction::CursorRight,
        KeyCode::Char('J') => InputAction::RangeDown,
        KeyCode::Char('K') => InputAction::RangeUp,
        KeyCode::Char(' ') => InputAction::Click(Modifiers::NONE),
        KeyCode::Char('t') => InputAction::Click(Modifiers::CTRL),
        KeyCode::Char('v') => InputAction::Click(Modifiers::SHIFT),
        KeyCode::Char('a') => InputAction::SelectAll,
        KeyCode::Esc => InputAction::Event(ViewEvent::ClearSelection),
        KeyCode::Char('x') => InputAction::Event(ViewEvent::PruneSelection),
        KeyCode::Enter | KeyCode::Char('o') => InputAction::Open,
        KeyCode::Backspace | KeyCode::Char('u') => InputAction::Event(ViewEvent::NavigateUp),
        KeyCode::Char('~') => InputAction::Event(ViewEvent::Home),
        KeyCode::Char('[') => InputAction::Event(ViewEvent::Back),
        KeyCode::Char(']') => InputAction::Event(ViewEvent::Forward),
        KeyCode::Char(c @ '0'..='9') => {
            let len = c.to_digit(10).map_or(0, |d| d as usize);
            InputAction::Event(ViewEvent::NavigateTo(len))
        }
        KeyCode::Tab => InputAction::Event(ViewEvent::CycleViewMode),
        KeyCode::Char('p') => InputAction::Event(ViewEvent::TogglePreview),
        KeyCode::Char('F') => InputAction::Event(ViewEvent::ToggleFoldersFirst),
        KeyCode::Char('f') => InputAction::ToggleFavorite,
        KeyCode::Char('\'') => InputAction::NextFavorite,
        KeyCode::Char('R') => InputAction::Reload,
        KeyCode::Char('W') => InputAction::Save,
        KeyCode::Char('s') => InputAction::CycleSort,
        KeyCode::Char('S') => InputAction::FlipSort,
        KeyCode::Char('m') => InputAction::Mark,
        KeyCode::Char('M') => InputAction::DropMarked,
        KeyCode::Char('/') => InputAction::EnterMode(AppMode::Search(String::new())),
        KeyCode::Char('?') => InputAction::EnterMode(AppMode::Help),
        KeyCode::Char('q') => InputAction::Quit,
        _ => InputAction::None,
    };

    (action, new_state)
}

fn handle_search_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc => InputAction::SearchCancel,
        KeyCode::Enter => InputAction::SearchConfirm,
        KeyCode::Backspace => InputAction::SearchBackspace,
        KeyCode::Down => InputAction::CursorDown,
        KeyCode::Up => InputAction::CursorUp,
        KeyCode::Char(c) => InputAction::SearchChar(c),
        _ => InputAction::None,
    };
    (action, new_state)
}

fn handle_help_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            InputAction::EnterMode(AppMode::Normal)
        }
        _ => InputAction::None,
    };
    (action, new_state)
}

/// Pointer gestures the app understands. Only the left button drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down { x: u16, y: u16, modifiers: Modifiers },
    Drag { x: u16, y: u16 },
    Up { x: u16, y: u16 },
    ScrollDown,
    ScrollUp,
    None,
}

/// Maps a terminal mouse event to a pointer gesture.
pub fn handle_mouse(event: MouseEvent) -> PointerAction {
    let (x, y) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerAction::Down {
            x,
            y,
            modifiers: modifiers_from(event.modifiers),
        },
        MouseEventKind::Drag(MouseButton::Left) => PointerAction::Drag { x, y },
        MouseEventKind::Up(MouseButton::Left) => PointerAction::Up { x, y },
        MouseEventKind::ScrollDown => PointerAction::ScrollDown,
        MouseEventKind::ScrollUp => PointerAction::ScrollUp,
        _ => PointerAction::None,
    }
}

/// Terminal modifier keys as click modifiers. Alt stands in for Meta,
/// which most terminals never report.
pub fn modifiers_from(keys: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: keys.contains(KeyModifiers::CONTROL),
        meta: keys.intersects(KeyModifiers::SUPER | KeyModifiers::META | KeyModifiers::ALT),
        shift: keys.contains(KeyModifiers::SHIFT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn normal(code: KeyCode) -> InputAction {
        handle_key(key(code), &AppMode::Normal, &InputState::new()).0
    }

    fn mouse(kind: MouseEventKind, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers,
        }
    }

    // --- Normal mode: movement ---

    #[test]
    fn normal_j_and_down_move_down() {
        assert!(matches!(normal(KeyCode::Char('j')), InputAction::CursorDown));
        assert!(matches!(normal(KeyCode::Down), InputAction::CursorDown));
    }

    #[test]
    fn normal_k_and_up_move_up() {
        assert!(matches!(normal(KeyCode::Char('k')), InputAction::CursorUp));
        assert!(matches!(normal(KeyCode::Up), InputAction::CursorUp));
    }

    #[test]
    fn normal_h_l_move_sideways() {
        assert!(matches!(normal(KeyCode::Char('h')), InputAction::CursorLeft));
        assert!(matches!(normal(KeyCode::Right), InputAction::CursorRight));
    }

    #[test]
    fn normal_capital_j_extends_selection() {
        assert!(matches!(normal(KeyCode::Char('J')), InputAction::RangeDown));
        assert!(matches!(normal(KeyCode::Char('K')), InputAction::RangeUp));
    }

    // --- Normal mode: gg sequence ---

    #[test]
    fn normal_g_sets_pending() {
        let (action, new_state) =
            handle_key(key(KeyCode::Char('g')), &AppMode::Normal, &InputState::new());
        assert!(matches!(action, InputAction::None));
        assert!(new_state.pending_g);
    }

    #[test]
    fn normal_gg_cursor_top() {
        let state = InputState { pending_g: true };
        let (action, new_state) = handle_key(key(KeyCode::Char('g')), &AppMode::Normal, &state);
        assert!(matches!(action, InputAction::CursorTop));
        assert!(!new_state.pending_g);
    }

    #[test]
    fn normal_g_then_other_key_cancels() {
        let state = InputState { pending_g: true };
        let (action, new_state) = handle_key(key(KeyCode::Char('j')), &AppMode::Normal, &state);
        assert!(matches!(action, InputAction::None));
        assert!(!new_state.pending_g);
    }

    #[test]
    fn normal_capital_g_cursor_bottom() {
        assert!(matches!(normal(KeyCode::Char('G')), InputAction::CursorBottom));
    }

    // --- Normal mode: selection ---

    #[test]
    fn normal_space_plain_click() {
        assert!(matches!(
            normal(KeyCode::Char(' ')),
            InputAction::Click(Modifiers::NONE)
        ));
    }

    #[test]
    fn normal_t_toggle_click() {
        assert!(matches!(
            normal(KeyCode::Char('t')),
            InputAction::Click(Modifiers::CTRL)
        ));
    }

    #[test]
    fn normal_v_range_click() {
        assert!(matches!(
            normal(KeyCode::Char('v')),
            InputAction::Click(Modifiers::SHIFT)
        ));
    }

    #[test]
    fn normal_esc_clears_selection() {
        assert!(matches!(
            normal(KeyCode::Esc),
            InputAction::Event(ViewEvent::ClearSelection)
        ));
    }

    #[test]
    fn normal_x_prunes_selection() {
        assert!(matches!(
            normal(KeyCode::Char('x')),
            InputAction::Event(ViewEvent::PruneSelection)
        ));
    }

    #[test]
    fn normal_ctrl_a_selects_all() {
        let (action, _) = handle_key(ctrl_key('a'), &AppMode::Normal, &InputState::new());
        assert!(matches!(action, InputAction::SelectAll));
    }

    // --- Normal mode: navigation ---

    #[test]
    fn normal_enter_opens() {
        assert!(matches!(normal(KeyCode::Enter), InputAction::Open));
    }

    #[test]
    fn normal_backspace_goes_up() {
        assert!(matches!(
            normal(KeyCode::Backspace),
            InputAction::Event(ViewEvent::NavigateUp)
        ));
    }

    #[test]
    fn normal_tilde_goes_home() {
        assert!(matches!(
            normal(KeyCode::Char('~')),
            InputAction::Event(ViewEvent::Home)
        ));
    }

    #[test]
    fn normal_digit_jumps_to_breadcrumb() {
        assert!(matches!(
            normal(KeyCode::Char('2')),
            InputAction::Event(ViewEvent::NavigateTo(2))
        ));
        assert!(matches!(
            normal(KeyCode::Char('0')),
            InputAction::Event(ViewEvent::NavigateTo(0))
        ));
    }

    #[test]
    fn normal_brackets_walk_history() {
        assert!(matches!(
            normal(KeyCode::Char('[')),
            InputAction::Event(ViewEvent::Back)
        ));
        assert!(matches!(
            normal(KeyCode::Char(']')),
            InputAction::Event(ViewEvent::Forward)
        ));
    }

    // --- Normal mode: view and move ---

    #[test]
    fn normal_tab_cycles_view_mode() {
        assert!(matches!(
            normal(KeyCode::Tab),
            InputAction::Event(ViewEvent::CycleViewMode)
        ));
    }

    #[test]
    fn normal_m_marks_and_capital_m_drops() {
        assert!(matches!(normal(KeyCode::Char('m')), InputAction::Mark));
        assert!(matches!(normal(KeyCode::Char('M')), InputAction::DropMarked));
    }

    #[test]
    fn normal_quote_jumps_to_favorite() {
        assert!(matches!(normal(KeyCode::Char('\'')), InputAction::NextFavorite));
    }

    #[test]
    fn normal_capital_r_and_w_reload_and_save() {
        assert!(matches!(normal(KeyCode::Char('R')), InputAction::Reload));
        assert!(matches!(normal(KeyCode::Char('W')), InputAction::Save));
    }

    #[test]
    fn normal_slash_enters_search() {
        assert!(matches!(
            normal(KeyCode::Char('/')),
            InputAction::EnterMode(AppMode::Search(ref q)) if q.is_empty()
        ));
    }

    #[test]
    fn normal_quit_keys() {
        assert!(matches!(normal(KeyCode::Char('q')), InputAction::Quit));
        let (action, _) = handle_key(ctrl_key('c'), &AppMode::Normal, &InputState::new());
        assert!(matches!(action, InputAction::Quit));
    }

    #[test]
    fn normal_unhandled_key_returns_none() {
        assert!(matches!(normal(KeyCode::F(5)), InputAction::None));
    }

    // --- Search mode ---

    #[test]
    fn search_char_appends() {
        let mode = AppMode::Search("he".to_string());
        let (action, _) = handle_key(key(KeyCode::Char('r')), &mode, &InputState::new());
        assert!(matches!(action, InputAction::SearchChar('r')));
    }

    #[test]
    fn search_q_is_text_not_quit() {
        let mode = AppMode::Search(String::new());
        let (action, _) = handle_key(key(KeyCode::Char('q')), &mode, &InputState::new());
        assert!(matches!(action, InputAction::SearchChar('q')));
    }

    #[test]
    fn search_esc_cancels_and_enter_confirms() {
        let mode = AppMode::Search(String::new());
        let (action, _) = handle_key(key(KeyCode::Esc), &mode, &InputState::new());
        assert!(matches!(action, InputAction::SearchCancel));
        let (action, _) = handle_key(key(KeyCode::Enter), &mode, &InputState::new());
        assert!(matches!(action, InputAction::SearchConfirm));
    }

    // --- Help mode ---

    #[test]
    fn help_esc_returns_to_normal() {
        let (action, _) = handle_key(key(KeyCode::Esc), &AppMode::Help, &InputState::new());
        assert!(matches!(action, InputAction::EnterMode(AppMode::Normal)));
    }

    #[test]
    fn help_other_key_ignored() {
        let (action, _) = handle_key(key(KeyCode::Char('j')), &AppMode::Help, &InputState::new());
        assert!(matches!(action, InputAction::None));
    }

    // --- Mouse ---

    #[test]
    fn left_press_carries_modifiers() {
        let action = handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            KeyModifiers::CONTROL,
        ));
        assert_eq!(
            action,
            PointerAction::Down {
                x: 7,
                y: 3,
                modifiers: Modifiers::CTRL
            }
        );
    }

    #[test]
    fn left_drag_and_release() {
        let drag = handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), KeyModifiers::NONE));
        assert_eq!(drag, PointerAction::Drag { x: 7, y: 3 });
        let up = handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), KeyModifiers::NONE));
        assert_eq!(up, PointerAction::Up { x: 7, y: 3 });
    }

    #[test]
    fn right_button_ignored() {
        let action = handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Right),
            KeyModifiers::NONE,
        ));
        assert_eq!(action, PointerAction::None);
    }

    #[test]
    fn alt_counts_as_meta() {
        let m = modifiers_from(KeyModifiers::ALT | KeyModifiers::SHIFT);
        assert!(m.meta);
        assert!(m.shift);
        assert!(!m.ctrl);
    }
}
