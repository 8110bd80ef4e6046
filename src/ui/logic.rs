//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑；每次状态变更后显式调用 persist

use chrono::Local;
use tracing::{debug, info};

use super::actions::Action;
use super::state::{App, AppMode, ConfirmAction};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),
            Action::Select(index) => self.select(index),

            Action::ToggleSelected => {
                if let Some(id) = self.selected_habit_id() {
                    self.toggle_habit(id);
                }
            }
            Action::DeleteSelected => {
                if let Some(id) = self.selected_habit_id() {
                    self.delete_habit(id);
                }
            }
            Action::ToggleHabit(id) => self.toggle_habit(id),
            Action::DeleteHabit(id) => self.delete_habit(id),
            Action::StartClearAll => self.start_clear_all(),
            Action::ToggleDarkMode => self.toggle_dark_mode(),

            Action::FocusInput => self.mode = AppMode::Editing,
            Action::AddHabit => self.add_habit(),
            Action::Input(c) => {
                if self.mode == AppMode::Editing {
                    self.input_buffer.push(c);
                }
            }
            Action::DeleteChar => {
                if self.mode == AppMode::Editing {
                    self.input_buffer.pop();
                }
            }

            Action::Confirm => self.execute_confirm(),
            Action::Cancel => self.cancel(),
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.state.habits.len() {
            self.selected_index += 1;
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.state.habits.len() {
            self.selected_index = index;
        }
    }

    // ============ 习惯相关 ============

    /// 用输入框内容添加习惯；空白输入被忽略且保留原样
    pub fn add_habit(&mut self) {
        let now_ms = Local::now().timestamp_millis();
        let Some(id) = self.state.add(&self.input_buffer, now_ms, &mut self.rng) else {
            return;
        };

        debug!(id, "habit added");
        self.input_buffer.clear();
        self.selected_index = self.state.habits.len() - 1;
        self.message = None;
        self.persist();
    }

    pub fn toggle_habit(&mut self, id: i64) {
        if !self.state.toggle(id) {
            return;
        }
        if let Some(habit) = self.state.find(id) {
            debug!(id, done = habit.done, "habit toggled");
        }
        self.persist();
    }

    pub fn delete_habit(&mut self, id: i64) {
        if self.state.delete(id) {
            debug!(id, "habit deleted");
            self.clamp_selection();
            self.persist();
        }
    }

    pub fn toggle_dark_mode(&mut self) {
        let value = !self.state.dark_mode;
        self.state.set_dark_mode(value);
        debug!(dark_mode = value, "theme switched");
        self.persist();
    }

    // ============ 清空相关 ============

    /// 列表非空时才进入确认
    pub fn start_clear_all(&mut self) {
        if !self.state.habits.is_empty() {
            self.mode = AppMode::Confirm(ConfirmAction::ClearAll);
        }
    }

    /// 执行确认操作
    pub fn execute_confirm(&mut self) {
        if self.mode != AppMode::Confirm(ConfirmAction::ClearAll) {
            return;
        }

        let removed = self.state.clear_all();
        info!(removed, "cleared all habits");
        self.clamp_selection();
        self.mode = AppMode::Normal;
        self.message = Some(format!("Removed {removed} habits"));
        self.persist();
    }

    // ============ 通用操作 ============

    /// 取消当前操作；离开输入框时保留已输入的文字
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{DARK_MODE_KEY, load_state};
    use crate::ui::actions::Action;
    use crate::ui::state::{AppMode, ConfirmAction};
    use crate::ui::tests::test_app;

    fn type_text(app: &mut crate::ui::App, text: &str) {
        app.dispatch(Action::FocusInput);
        for c in text.chars() {
            app.dispatch(Action::Input(c));
        }
    }

    #[test]
    fn test_add_clears_input_and_persists() {
        let mut app = test_app();
        type_text(&mut app, "Drink water");
        app.dispatch(Action::AddHabit);

        assert_eq!(app.input_buffer, "");
        assert_eq!(app.mode, AppMode::Editing);
        assert_eq!(app.state.metrics().total, 1);
        assert_eq!(load_state(app.storage()), app.state);
    }

    #[test]
    fn test_rejected_add_keeps_input() {
        let mut app = test_app();
        type_text(&mut app, "   ");
        app.dispatch(Action::AddHabit);

        assert_eq!(app.input_buffer, "   ");
        assert_eq!(app.state.metrics().total, 0);
        assert_eq!(app.storage().get_item(crate::storage::HABITS_KEY).unwrap(), None);
    }

    #[test]
    fn test_typing_ignored_outside_input() {
        let mut app = test_app();
        app.dispatch(Action::Input('x'));
        app.dispatch(Action::DeleteChar);
        assert_eq!(app.input_buffer, "");
    }

    #[test]
    fn test_cancel_keeps_typed_text() {
        let mut app = test_app();
        type_text(&mut app, "Stretch");
        app.dispatch(Action::Cancel);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.input_buffer, "Stretch");

        // 点击 [ + ] 在普通模式下也能提交
        app.dispatch(Action::AddHabit);
        assert_eq!(app.state.habits[0].text, "Stretch");
    }

    #[test]
    fn test_toggle_selected_reaches_all_done() {
        let mut app = test_app();
        type_text(&mut app, "Drink water");
        app.dispatch(Action::AddHabit);
        app.dispatch(Action::Cancel);
        app.dispatch(Action::ToggleSelected);

        let m = app.state.metrics();
        assert_eq!((m.completed, m.progress_percent), (1, 100));
        assert!(load_state(app.storage()).habits[0].done);
    }

    #[test]
    fn test_delete_then_delete_again() {
        let mut app = test_app();
        for text in ["A", "B"] {
            type_text(&mut app, text);
            app.dispatch(Action::AddHabit);
        }
        let id_a = app.state.habits[0].id;

        app.dispatch(Action::DeleteHabit(id_a));
        app.dispatch(Action::DeleteHabit(id_a));

        assert_eq!(app.state.metrics().total, 1);
        assert_eq!(app.state.habits[0].text, "B");
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = test_app();
        for text in ["A", "B", "C"] {
            type_text(&mut app, text);
            app.dispatch(Action::AddHabit);
        }
        app.dispatch(Action::Cancel);
        assert_eq!(app.selected_index, 2);

        app.dispatch(Action::MoveSelectionDown);
        assert_eq!(app.selected_index, 2);
        app.dispatch(Action::DeleteSelected);
        assert_eq!(app.selected_index, 1);

        app.dispatch(Action::Select(9));
        assert_eq!(app.selected_index, 1);
        app.dispatch(Action::MoveSelectionUp);
        app.dispatch(Action::MoveSelectionUp);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_clear_all_requires_confirmation() {
        let mut app = test_app();
        for text in ["A", "B", "C"] {
            type_text(&mut app, text);
            app.dispatch(Action::AddHabit);
        }
        app.dispatch(Action::Cancel);

        app.dispatch(Action::StartClearAll);
        assert_eq!(app.mode, AppMode::Confirm(ConfirmAction::ClearAll));
        app.dispatch(Action::Cancel);
        assert_eq!(app.state.metrics().total, 3);

        app.dispatch(Action::StartClearAll);
        app.dispatch(Action::Confirm);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.state.metrics().total, 0);
        assert!(load_state(app.storage()).habits.is_empty());
    }

    #[test]
    fn test_clear_all_ignored_when_empty() {
        let mut app = test_app();
        app.dispatch(Action::StartClearAll);
        assert_eq!(app.mode, AppMode::Normal);
        app.dispatch(Action::Confirm);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_toggle_dark_mode_persists() {
        let mut app = test_app();
        app.dispatch(Action::ToggleDarkMode);
        assert!(app.state.dark_mode);
        assert_eq!(
            app.storage().get_item(DARK_MODE_KEY).unwrap().as_deref(),
            Some("true")
        );
        app.dispatch(Action::ToggleDarkMode);
        assert!(!load_state(app.storage()).dark_mode);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert!(app.dispatch(Action::Quit));
        assert!(!app.dispatch(Action::MoveSelectionDown));
    }
}
