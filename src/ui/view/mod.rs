//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件；渲染时顺便记录鼠标可点击的区域

pub mod components;
pub mod layouts;
pub mod theme;

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::state::{App, AppMode, ConfirmAction, HitAreas, RowHit};
use crate::models::{HabitEntry, Metrics};
use crate::summary;
use components::{render_button, render_dialog_framework, render_input_widget};
use layouts::centered_rect;
use theme::Theme;

pub const EMPTY_MESSAGE: &str = "Your list is empty.";
pub const PLACEHOLDER: &str = "Add a new goal...";

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = Theme::for_mode(app.state.dark_mode);
    let metrics = app.state.metrics();
    app.hit_areas = HitAreas::default();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // 头部
            Constraint::Length(2), // 进度
            Constraint::Length(3), // 输入
            Constraint::Min(3),    // 列表
            Constraint::Length(1), // 清空
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_header(frame, app, &metrics, &theme, chunks[0]);
    render_progress(frame, &metrics, &theme, chunks[1]);
    render_input(frame, app, &theme, chunks[2]);
    render_list(frame, app, &theme, chunks[3]);
    render_clear_all(frame, app, &metrics, &theme, chunks[4]);
    render_help(frame, app, &theme, chunks[5]);

    if let AppMode::Confirm(action) = &app.mode {
        render_confirm_dialog(frame, action, &theme);
    }
}

fn render_header(frame: &mut Frame, app: &mut App, metrics: &Metrics, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.track));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(5)])
        .split(inner);

    let now = Local::now();
    let status = if metrics.all_done() {
        format!("🎉 {}", summary::status_line(metrics))
    } else {
        summary::status_line(metrics)
    };
    let lines = vec![
        Line::styled(
            summary::date_line(&now).to_uppercase(),
            Style::default().fg(theme.muted),
        ),
        Line::styled(
            summary::greeting_at(&now),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Line::styled(status, Style::default().fg(theme.muted)),
    ];
    frame.render_widget(Paragraph::new(lines), cols[0]);

    let icon = if theme.dark { "☀" } else { "☾" };
    render_button(frame, cols[1], icon, Style::default().fg(theme.accent));
    app.hit_areas.theme_toggle = Some(cols[1]);
}

fn render_progress(frame: &mut Frame, metrics: &Metrics, theme: &Theme, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let label = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(16)])
        .split(rows[0]);

    let label_style = Style::default().fg(theme.muted).add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(" DAILY PROGRESS").style(label_style), label[0]);

    let counts = format!(
        "{}/{}  {}% ",
        metrics.completed, metrics.total, metrics.progress_percent
    );
    frame.render_widget(
        Paragraph::new(counts)
            .alignment(Alignment::Right)
            .style(label_style),
        label[1],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent).bg(theme.track))
        .percent(metrics.progress_percent)
        .label("");
    frame.render_widget(gauge, rows[1]);
}

fn render_input(frame: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(7)])
        .split(area);

    render_input_widget(
        frame,
        cols[0],
        &app.input_buffer,
        PLACEHOLDER,
        app.mode == AppMode::Editing,
        theme,
    );
    render_button(frame, cols[1], "+", Style::default().fg(theme.accent));

    app.hit_areas.input = Some(cols[0]);
    app.hit_areas.add_button = Some(cols[1]);
}

fn render_list(frame: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title("Goals")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.track));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.state.habits.is_empty() {
        let empty = Paragraph::new(EMPTY_MESSAGE)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            );
        frame.render_widget(empty, inner);
        return;
    }

    // 保证选中行可见
    let height = usize::from(inner.height.max(1));
    let offset = app.selected_index.saturating_sub(height - 1);

    let mut rows = Vec::new();
    for (line, (index, habit)) in app
        .state
        .habits
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .enumerate()
    {
        let row = Rect {
            x: inner.x,
            y: inner.y + line as u16,
            width: inner.width,
            height: 1,
        };
        let selected = index == app.selected_index && app.mode == AppMode::Normal;
        rows.push(render_row(frame, habit, index, selected, theme, row));
    }
    app.hit_areas.rows = rows;
}

fn render_row(
    frame: &mut Frame,
    habit: &HabitEntry,
    index: usize,
    selected: bool,
    theme: &Theme,
    area: Rect,
) -> RowHit {
    let background = theme.row_background(habit.color);
    frame.render_widget(Block::default().style(Style::default().bg(background)), area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(4), // 图标
            Constraint::Min(1),    // 文本
            Constraint::Length(3), // 删除
            Constraint::Length(4), // 勾选框
        ])
        .split(area);

    let marker = if selected { "▌✨" } else { " ✨" };
    frame.render_widget(Paragraph::new(marker).style(Style::default().fg(theme.accent)), cols[0]);

    let mut text_style = if habit.done {
        Style::default()
            .fg(theme.muted)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    };
    if selected {
        text_style = text_style.add_modifier(Modifier::UNDERLINED);
    }
    frame.render_widget(Paragraph::new(habit.text.as_str()).style(text_style), cols[1]);

    // 未选中时删除按钮弱化显示
    let delete_style = if selected {
        Style::default().fg(theme.danger)
    } else {
        Style::default().fg(theme.muted).add_modifier(Modifier::DIM)
    };
    frame.render_widget(
        Paragraph::new("✕").alignment(Alignment::Center).style(delete_style),
        cols[2],
    );

    let (checkbox, checkbox_style) = if habit.done {
        ("[✓]", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    } else {
        ("[ ]", Style::default().fg(theme.muted))
    };
    frame.render_widget(Paragraph::new(checkbox).style(checkbox_style), cols[3]);

    RowHit {
        index,
        id: habit.id,
        row: area,
        delete: cols[2],
        toggle: cols[3],
    }
}

fn render_clear_all(frame: &mut Frame, app: &mut App, metrics: &Metrics, theme: &Theme, area: Rect) {
    if metrics.total == 0 {
        return;
    }

    let clear = Paragraph::new("CLEAR ALL")
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.muted).add_modifier(Modifier::BOLD));
    frame.render_widget(clear, area);
    app.hit_areas.clear_all = Some(area);
}

fn render_help(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => {
            "[a] add  [space] done  [d] delete  [t] theme  [C] clear all  [j/k] move  [q] quit"
        }
        AppMode::Editing => "Type a goal, [Enter] add  [Esc] back to list",
        AppMode::Confirm(_) => "[y] confirm  [n] cancel",
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{help_text}  |  {message}"),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(theme.muted))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.track)),
        );

    frame.render_widget(help, area);
}

fn render_confirm_dialog(frame: &mut Frame, action: &ConfirmAction, theme: &Theme) {
    let area = centered_rect(50, 30, frame.area());
    let inner = render_dialog_framework(frame, area, "Confirm", theme);

    let message = match action {
        ConfirmAction::ClearAll => "Clear everything?",
    };

    let dialog = Paragraph::new(format!("{message}\n\n[y] Yes  [n] No"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text));
    frame.render_widget(dialog, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::actions::Action;
    use crate::ui::tests::test_app;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(72, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn add(app: &mut App, text: &str) {
        app.input_buffer = text.to_string();
        app.dispatch(Action::AddHabit);
    }

    #[test]
    fn test_empty_state() {
        let mut app = test_app();
        let screen = draw(&mut app);

        assert!(screen.contains(EMPTY_MESSAGE));
        assert!(screen.contains(PLACEHOLDER));
        assert!(screen.contains("You have 0 tasks to go"));
        assert!(screen.contains("0%"));
        assert!(!screen.contains("CLEAR ALL"));
        assert!(
            ["Good Morning", "Good Afternoon", "Good Evening"]
                .iter()
                .any(|g| screen.contains(g))
        );
        assert!(app.hit_areas.clear_all.is_none());
        assert!(app.hit_areas.rows.is_empty());
    }

    #[test]
    fn test_rows_and_all_done() {
        let mut app = test_app();
        add(&mut app, "Drink water");
        add(&mut app, "Read");

        let screen = draw(&mut app);
        assert!(screen.contains("Drink water"));
        assert!(screen.contains("You have 2 tasks to go"));
        assert!(screen.contains("CLEAR ALL"));
        assert!(!screen.contains(EMPTY_MESSAGE));
        assert_eq!(app.hit_areas.rows.len(), 2);

        let ids: Vec<_> = app.hit_areas.rows.iter().map(|r| r.id).collect();
        for id in ids {
            app.dispatch(Action::ToggleHabit(id));
        }
        let screen = draw(&mut app);
        assert!(screen.contains("All goals met!"));
        assert!(screen.contains("100%"));
        assert!(screen.contains("[✓]"));
    }

    #[test]
    fn test_confirm_dialog_and_clear() {
        let mut app = test_app();
        for text in ["A", "B", "C"] {
            add(&mut app, text);
        }
        app.dispatch(Action::StartClearAll);
        assert!(draw(&mut app).contains("Clear everything?"));

        app.dispatch(Action::Confirm);
        let screen = draw(&mut app);
        assert!(screen.contains(EMPTY_MESSAGE));
        assert!(!screen.contains("Clear everything?"));
    }

    #[test]
    fn test_theme_toggle_glyph() {
        let mut app = test_app();
        assert!(draw(&mut app).contains('☾'));
        app.dispatch(Action::ToggleDarkMode);
        assert!(draw(&mut app).contains('☀'));
    }

    #[test]
    fn test_selected_row_scrolls_into_view() {
        let mut app = test_app();
        for i in 0..40 {
            add(&mut app, &format!("Goal {i}"));
        }
        app.dispatch(Action::Cancel);

        let screen = draw(&mut app);
        assert!(screen.contains("Goal 39"));
        assert!(!screen.contains("Goal 0 "));
        assert_eq!(app.hit_areas.rows.last().map(|r| r.index), Some(39));
    }
}
