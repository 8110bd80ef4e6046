//! 明/暗两套配色，只影响颜色不影响行为

use ratatui::style::Color;

use crate::models::HabitColor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub track: Color,
    pub row: Color,
    pub danger: Color,
    pub dark: bool,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(248, 250, 252),
            text: Color::Rgb(15, 23, 42),
            muted: Color::Rgb(148, 163, 184),
            accent: Color::Rgb(15, 23, 42),
            track: Color::Rgb(226, 232, 240),
            row: Color::White,
            danger: Color::Rgb(244, 63, 94),
            dark: false,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(2, 6, 23),
            text: Color::White,
            muted: Color::Rgb(100, 116, 139),
            accent: Color::Rgb(99, 102, 241),
            track: Color::Rgb(30, 41, 59),
            row: Color::Rgb(15, 23, 42),
            danger: Color::Rgb(244, 63, 94),
            dark: true,
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    /// 亮色模式下按标签着色，暗色模式统一底色
    pub fn row_background(&self, color: HabitColor) -> Color {
        if self.dark {
            return self.row;
        }
        match color {
            HabitColor::Rose => Color::Rgb(255, 228, 230),
            HabitColor::Sky => Color::Rgb(224, 242, 254),
            HabitColor::Amber => Color::Rgb(254, 243, 199),
            HabitColor::Indigo => Color::Rgb(224, 231, 255),
            HabitColor::Emerald => Color::Rgb(209, 250, 229),
        }
    }
}
