//! 错误类型
//!
//! 存储层错误与启动期错误分开定义，UI 只需要处理 `StorageError`

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 键值存储读写错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode habits: {0}")]
    Encode(#[from] serde_json::Error),
}

/// 启动及运行期的顶层错误
#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("could not determine the user data directory")]
    NoDataDir,
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
