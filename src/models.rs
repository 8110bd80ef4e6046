use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 习惯条目的颜色标签（仅用于显示）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum HabitColor {
    #[default]
    Rose,
    Sky,
    Amber,
    Indigo,
    Emerald,
}

impl HabitColor {
    pub const PALETTE: [HabitColor; 5] = [
        HabitColor::Rose,
        HabitColor::Sky,
        HabitColor::Amber,
        HabitColor::Indigo,
        HabitColor::Emerald,
    ];

    /// 从调色板中均匀随机选取一种颜色
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::PALETTE[rng.random_range(0..Self::PALETTE.len())]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HabitColor::Rose => "rose",
            HabitColor::Sky => "sky",
            HabitColor::Amber => "amber",
            HabitColor::Indigo => "indigo",
            HabitColor::Emerald => "emerald",
        }
    }
}

impl fmt::Display for HabitColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// 未知标签回退为默认颜色，不让整张列表失效
impl From<String> for HabitColor {
    fn from(tag: String) -> Self {
        let tag = tag.trim();
        let tag = tag.strip_prefix("bg-").unwrap_or(tag);
        let tag = tag.strip_suffix("-100").unwrap_or(tag);
        Self::PALETTE
            .into_iter()
            .find(|color| color.as_str() == tag)
            .unwrap_or_default()
    }
}

impl From<HabitColor> for String {
    fn from(color: HabitColor) -> Self {
        color.as_str().to_string()
    }
}

/// 习惯条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitEntry {
    pub id: i64,
    pub text: String,
    pub done: bool,
    pub color: HabitColor,
}

impl HabitEntry {
    pub fn new(id: i64, text: impl Into<String>, color: HabitColor) -> Self {
        Self {
            id,
            text: text.into(),
            done: false,
            color,
        }
    }
}

/// 派生指标，每次读取时重新计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub progress_percent: u16,
}

impl Metrics {
    pub fn all_done(&self) -> bool {
        self.total > 0 && self.remaining == 0
    }
}

/// 完整的应用状态：习惯列表 + 主题偏好
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub habits: Vec<HabitEntry>,
    pub dark_mode: bool,
}

impl AppState {
    pub fn new(habits: Vec<HabitEntry>, dark_mode: bool) -> Self {
        Self { habits, dark_mode }
    }

    pub fn find(&self, id: i64) -> Option<&HabitEntry> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// 生成新 id：毫秒时间戳，且严格大于现有最大 id
    ///
    /// 最大 id 已到 `i64::MAX` 时退回到最小的未占用非负 id。
    pub fn next_id(&self, now_ms: i64) -> i64 {
        match self.habits.iter().map(|h| h.id).max() {
            None => now_ms,
            Some(last) => match last.checked_add(1) {
                Some(next) => now_ms.max(next),
                None => self.smallest_free_id(),
            },
        }
    }

    fn smallest_free_id(&self) -> i64 {
        let used: HashSet<i64> = self.habits.iter().map(|h| h.id).collect();
        (0..).find(|id| !used.contains(id)).unwrap_or_default()
    }

    /// 添加习惯；文本去除首尾空白后为空则拒绝
    pub fn add<R: Rng + ?Sized>(&mut self, text: &str, now_ms: i64, rng: &mut R) -> Option<i64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.next_id(now_ms);
        self.habits.push(HabitEntry::new(id, text, HabitColor::pick(rng)));
        Some(id)
    }

    /// 切换完成状态，找不到 id 时不做任何事
    pub fn toggle(&mut self, id: i64) -> bool {
        match self.habits.iter_mut().find(|h| h.id == id) {
            Some(habit) => {
                habit.done = !habit.done;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        self.habits.len() != before
    }

    /// 清空列表，返回被移除的条目数
    pub fn clear_all(&mut self) -> usize {
        let removed = self.habits.len();
        self.habits.clear();
        removed
    }

    pub fn set_dark_mode(&mut self, value: bool) -> bool {
        let changed = self.dark_mode != value;
        self.dark_mode = value;
        changed
    }

    pub fn metrics(&self) -> Metrics {
        let total = self.habits.len();
        let completed = self.habits.iter().filter(|h| h.done).count();
        let progress_percent = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u16
        } else {
            0
        };

        Metrics {
            total,
            completed,
            remaining: total - completed,
            progress_percent,
        }
    }
}
