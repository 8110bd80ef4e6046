//! 配置：默认值 → 配置文件 → 命令行参数，逐层覆盖

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::AppError;

const APP_DIR: &str = "habit-tracker";

/// 命令行参数
#[derive(Debug, Default, Parser)]
#[command(name = "habit-tracker", version, about = "Track daily habits in the terminal")]
pub struct Cli {
    /// Directory where habits are stored
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "habit_tracker=debug"
    #[arg(long)]
    pub log_level: Option<String>,

    /// Seed for the color picker
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep habits in memory; nothing is written to disk unless a log file is given
    #[arg(long)]
    pub ephemeral: bool,
}

/// config.toml 的内容，所有字段可选
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub seed: Option<u64>,
}

/// 合并后的最终配置
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// 为 None 时不写日志（仅内存运行且未指定日志文件）
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub seed: Option<u64>,
    pub ephemeral: bool,
}

impl Config {
    /// 读取配置文件并与命令行参数合并
    pub fn load(cli: Cli) -> Result<Self, AppError> {
        let path = match &cli.config {
            Some(path) => Some(path.clone()),
            None => dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml")),
        };
        // 显式指定的配置文件必须存在
        let required = cli.config.is_some();
        let file = match path {
            Some(path) => read_file_config(&path, required)?,
            None => FileConfig::default(),
        };

        let default_data_dir = || {
            dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(AppError::NoDataDir)
        };
        Self::merge(cli, file, default_data_dir)
    }

    fn merge(
        cli: Cli,
        file: FileConfig,
        default_data_dir: impl FnOnce() -> Result<PathBuf, AppError>,
    ) -> Result<Self, AppError> {
        let data_dir = match cli.data_dir.or(file.data_dir) {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let log_file = match cli.log_file.or(file.log_file) {
            Some(path) => Some(path),
            None if cli.ephemeral => None,
            None => Some(data_dir.join("habit-tracker.log")),
        };

        Ok(Self {
            log_file,
            log_level: cli
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| "info".to_string()),
            seed: cli.seed.or(file.seed),
            ephemeral: cli.ephemeral,
            data_dir,
        })
    }
}

fn read_file_config(path: &Path, required: bool) -> Result<FileConfig, AppError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(FileConfig::default());
        }
        Err(source) => {
            return Err(AppError::ConfigRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&content).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
