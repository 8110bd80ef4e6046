use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::StorageError;
use crate::models::{AppState, HabitEntry};

/// 习惯列表所在的键
pub const HABITS_KEY: &str = "habit-tracker-final";
/// 主题偏好所在的键
pub const DARK_MODE_KEY: &str = "dark-mode";

/// 简单的键值存储
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// 以目录为介质的存储，每个键对应一个文件
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source: io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // 先写临时文件再重命名，避免中途退出留下半截数据
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}

/// 内存存储，进程退出即丢弃
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 从存储加载状态
///
/// 每个键独立回退：读取失败、缺失或无法解析时使用默认值，永不报错。
pub fn load_state(storage: &dyn Storage) -> AppState {
    let habits = read_key(storage, HABITS_KEY)
        .and_then(|raw| match serde_json::from_str::<Vec<HabitEntry>>(&raw) {
            Ok(habits) => Some(habits),
            Err(e) => {
                warn!(key = HABITS_KEY, error = %e, "discarding unparsable habit list");
                None
            }
        })
        .map(sanitize)
        .unwrap_or_default();

    let dark_mode = read_key(storage, DARK_MODE_KEY)
        .map(|raw| raw.trim() == "true")
        .unwrap_or(false);

    debug!(habits = habits.len(), dark_mode, "state loaded");
    AppState::new(habits, dark_mode)
}

/// 把完整状态写回存储
pub fn save_state(storage: &mut dyn Storage, state: &AppState) -> Result<(), StorageError> {
    let habits = serde_json::to_string(&state.habits)?;
    storage.set_item(HABITS_KEY, &habits)?;
    storage.set_item(DARK_MODE_KEY, if state.dark_mode { "true" } else { "false" })?;
    debug!(habits = state.habits.len(), "state saved");
    Ok(())
}

fn read_key(storage: &dyn Storage, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "failed to read stored value, using default");
            None
        }
    }
}

// 丢弃空文本和重复 id 的条目（保留先出现的）
fn sanitize(habits: Vec<HabitEntry>) -> Vec<HabitEntry> {
    let before = habits.len();
    let mut seen = HashSet::new();
    let kept: Vec<HabitEntry> = habits
        .into_iter()
        .filter(|h| !h.text.trim().is_empty() && seen.insert(h.id))
        .collect();

    if kept.len() != before {
        warn!(dropped = before - kept.len(), "dropped invalid stored habits");
    }
    kept
}
