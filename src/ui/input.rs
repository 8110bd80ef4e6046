//! 键盘/鼠标事件映射 (Input -> Action)
//!
//! 将按键和点击转换为 Action

use std::io;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use super::actions::Action;
use super::state::{App, AppMode, hit};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('a') | KeyCode::Char('i') => Some(Action::FocusInput),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::ToggleSelected),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteSelected),
            KeyCode::Char('t') => Some(Action::ToggleDarkMode),
            KeyCode::Char('C') => Some(Action::StartClearAll),
            _ => None,
        },
        AppMode::Editing => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::AddHabit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Confirm(_) => match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
    }
}

/// 根据上一帧记录的点击区域获取对应的 Action
pub fn get_mouse_action(app: &App, event: MouseEvent) -> Option<Action> {
    if event.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    // 确认框打开时忽略点击
    if matches!(app.mode, AppMode::Confirm(_)) {
        return None;
    }

    let (x, y) = (event.column, event.row);
    let areas = &app.hit_areas;

    if hit(areas.add_button, x, y) {
        return Some(Action::AddHabit);
    }
    if hit(areas.theme_toggle, x, y) {
        return Some(Action::ToggleDarkMode);
    }
    if hit(areas.input, x, y) {
        return Some(Action::FocusInput);
    }
    if hit(areas.clear_all, x, y) {
        return Some(Action::StartClearAll);
    }

    areas.rows.iter().find_map(|row| {
        if hit(Some(row.toggle), x, y) {
            Some(Action::ToggleHabit(row.id))
        } else if hit(Some(row.delete), x, y) {
            Some(Action::DeleteHabit(row.id))
        } else if hit(Some(row.row), x, y) {
            Some(Action::Select(row.index))
        } else {
            None
        }
    })
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyCode) -> io::Result<bool> {
    if let Some(action) = get_action(&app.mode, key) {
        Ok(app.dispatch(action))
    } else {
        Ok(false)
    }
}

/// 处理鼠标事件
pub fn handle_mouse_event(app: &mut App, event: MouseEvent) {
    if let Some(action) = get_mouse_action(app, event) {
        app.dispatch(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::{ConfirmAction, RowHit};
    use crate::ui::tests::test_app;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_normal_mode_keys() {
        let mode = AppMode::Normal;
        assert_eq!(get_action(&mode, KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(get_action(&mode, KeyCode::Enter), Some(Action::ToggleSelected));
        assert_eq!(get_action(&mode, KeyCode::Char('d')), Some(Action::DeleteSelected));
        assert_eq!(get_action(&mode, KeyCode::Char('C')), Some(Action::StartClearAll));
        assert_eq!(get_action(&mode, KeyCode::Char('c')), None);
    }

    #[test]
    fn test_editing_mode_keys() {
        let mode = AppMode::Editing;
        assert_eq!(get_action(&mode, KeyCode::Enter), Some(Action::AddHabit));
        assert_eq!(get_action(&mode, KeyCode::Char('q')), Some(Action::Input('q')));
        assert_eq!(get_action(&mode, KeyCode::Esc), Some(Action::Cancel));
    }

    #[test]
    fn test_confirm_mode_keys() {
        let mode = AppMode::Confirm(ConfirmAction::ClearAll);
        assert_eq!(get_action(&mode, KeyCode::Char('y')), Some(Action::Confirm));
        assert_eq!(get_action(&mode, KeyCode::Esc), Some(Action::Cancel));
        assert_eq!(get_action(&mode, KeyCode::Char('q')), None);
    }

    #[test]
    fn test_mouse_hits() {
        let mut app = test_app();
        app.hit_areas.add_button = Some(Rect::new(50, 10, 7, 3));
        app.hit_areas.theme_toggle = Some(Rect::new(50, 0, 6, 3));
        app.hit_areas.rows = vec![RowHit {
            index: 0,
            id: 77,
            row: Rect::new(1, 15, 56, 1),
            delete: Rect::new(47, 15, 3, 1),
            toggle: Rect::new(52, 15, 4, 1),
        }];

        assert_eq!(get_mouse_action(&app, click(52, 11)), Some(Action::AddHabit));
        assert_eq!(get_mouse_action(&app, click(51, 1)), Some(Action::ToggleDarkMode));
        assert_eq!(get_mouse_action(&app, click(53, 15)), Some(Action::ToggleHabit(77)));
        assert_eq!(get_mouse_action(&app, click(48, 15)), Some(Action::DeleteHabit(77)));
        assert_eq!(get_mouse_action(&app, click(5, 15)), Some(Action::Select(0)));
        assert_eq!(get_mouse_action(&app, click(5, 25)), None);

        app.mode = AppMode::Confirm(ConfirmAction::ClearAll);
        assert_eq!(get_mouse_action(&app, click(52, 11)), None);
    }
}
