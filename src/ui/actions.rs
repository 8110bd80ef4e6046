//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,
    Select(usize),

    // 习惯操作
    ToggleSelected,
    DeleteSelected,
    ToggleHabit(i64),
    DeleteHabit(i64),
    StartClearAll,
    ToggleDarkMode,

    // 输入框
    FocusInput,
    AddHabit,    // Enter / 点击 [ + ]
    Input(char), // 输入字符
    DeleteChar,  // Backspace

    // 确认框/通用交互
    Confirm, // y
    Cancel,  // Esc / n
}
