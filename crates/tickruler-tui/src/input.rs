use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Columns moved by a shifted arrow key
const FAST_NUDGE_COLUMNS: i32 = 5;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Drag the strip by whole columns; positive moves toward larger values
    Nudge(i32),
    JumpToMin,
    JumpToMax,
    /// Mouse pressed at a column
    DragStart(u16),
    /// Mouse dragged to a column
    DragTo(u16),
    DragEnd,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Left if shift => Action::Nudge(-FAST_NUDGE_COLUMNS),
        KeyCode::Right if shift => Action::Nudge(FAST_NUDGE_COLUMNS),
        KeyCode::Char('H') => Action::Nudge(-FAST_NUDGE_COLUMNS),
        KeyCode::Char('L') => Action::Nudge(FAST_NUDGE_COLUMNS),
        KeyCode::Left | KeyCode::Char('h') => Action::Nudge(-1),
        KeyCode::Right | KeyCode::Char('l') => Action::Nudge(1),
        KeyCode::Home | KeyCode::Char('g') => Action::JumpToMin,
        KeyCode::End | KeyCode::Char('G') => Action::JumpToMax,
        _ => Action::None,
    }
}

/// Handle a mouse event and return the corresponding action
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::DragStart(mouse.column),
        MouseEventKind::Drag(MouseButton::Left) => Action::DragTo(mouse.column),
        MouseEventKind::Up(MouseButton::Left) => Action::DragEnd,
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => Action::Nudge(-1),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => Action::Nudge(1),
        _ => Action::None,
    }
}
