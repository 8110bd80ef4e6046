//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use rand::rngs::StdRng;
use ratatui::layout::{Position, Rect};
use tracing::error;

use crate::models::{AppState, HabitEntry};
use crate::storage::{Storage, save_state};

/// 应用状态
pub struct App {
    pub state: AppState,
    pub selected_index: usize,
    pub mode: AppMode,
    pub input_buffer: String,
    pub message: Option<String>,
    pub hit_areas: HitAreas,
    pub(crate) rng: StdRng,
    storage: Box<dyn Storage>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Editing,
    Confirm(ConfirmAction),
}

/// 确认操作类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    ClearAll,
}

/// 上一帧渲染出的可点击区域
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub theme_toggle: Option<Rect>,
    pub input: Option<Rect>,
    pub add_button: Option<Rect>,
    pub clear_all: Option<Rect>,
    pub rows: Vec<RowHit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowHit {
    pub index: usize,
    pub id: i64,
    pub row: Rect,
    pub delete: Rect,
    pub toggle: Rect,
}

pub(crate) fn hit(area: Option<Rect>, column: u16, row: u16) -> bool {
    area.is_some_and(|r| r.contains(Position::new(column, row)))
}

impl App {
    /// 创建新的应用实例
    pub fn new(state: AppState, storage: Box<dyn Storage>, rng: StdRng) -> Self {
        Self {
            state,
            selected_index: 0,
            mode: AppMode::Normal,
            input_buffer: String::new(),
            message: None,
            hit_areas: HitAreas::default(),
            rng,
            storage,
        }
    }

    /// 确保选中索引有效
    pub fn clamp_selection(&mut self) {
        let len = self.state.habits.len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// 获取当前选中的习惯
    pub fn selected_habit(&self) -> Option<&HabitEntry> {
        self.state.habits.get(self.selected_index)
    }

    pub fn selected_habit_id(&self) -> Option<i64> {
        self.selected_habit().map(|h| h.id)
    }

    /// 变更后立即写回存储；失败只记录，不影响内存中的状态
    pub fn persist(&mut self) {
        if let Err(e) = save_state(self.storage.as_mut(), &self.state) {
            error!(error = %e, "failed to save state");
            self.message = Some(format!("Could not save: {e}"));
        }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}
