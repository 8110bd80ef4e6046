//! 通用 UI 组件
//!
//! 对话框、输入框、按钮等通用组件

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme::Theme;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(theme.danger).bg(theme.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 带占位提示的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    value: &str,
    placeholder: &str,
    is_focused: bool,
    theme: &Theme,
) {
    let border = if is_focused { theme.accent } else { theme.track };
    let (text, style) = if value.is_empty() {
        (placeholder, Style::default().fg(theme.muted))
    } else {
        (value, Style::default().fg(theme.text))
    };
    let text = if is_focused {
        format!("{text}▏")
    } else {
        text.to_string()
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(input, area);
}

/// [组件] 带边框的按钮
pub fn render_button(frame: &mut Frame, area: Rect, label: &str, style: Style) {
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style.add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(button, area);
}
