use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// 应用配置的根结构。
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            conversion: ConversionConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从显式路径加载配置。
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 自动发现配置文件：优先读取环境变量 `PLOTGEO_CONFIG`，否则寻找
    /// `./config/default.toml`。若文件缺失，则返回默认配置。
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os("PLOTGEO_CONFIG") {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()
            .map(|dir| dir.join("config").join("default.toml"))
            .map_err(|source| ConfigError::Context {
                message: "获取当前工作目录失败".to_string(),
                source,
            })?;

        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// 日志配置，支持设置默认等级。
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// 降级目标种类，与引擎的几何种类一一对应。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Point,
    Line,
    Arc,
}

impl Default for TargetKind {
    fn default() -> Self {
        TargetKind::Line
    }
}

/// 退化三点组策略的配置侧表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateMode {
    Fail,
    Skip,
}

impl Default for DegenerateMode {
    fn default() -> Self {
        DegenerateMode::Fail
    }
}

/// 批量失败策略的配置侧表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
    Abort,
    Skip,
}

impl Default for BatchMode {
    fn default() -> Self {
        BatchMode::Abort
    }
}

/// 转换默认参数。段数与段长同时给出时以段数优先。
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    #[serde(default)]
    pub target: TargetKind,
    #[serde(default)]
    pub segment_count: Option<u32>,
    #[serde(default)]
    pub segment_length: Option<f64>,
    #[serde(default = "ConversionConfig::default_unit")]
    pub unit: String,
    #[serde(default)]
    pub degenerate: DegenerateMode,
    #[serde(default)]
    pub batch: BatchMode,
}

impl ConversionConfig {
    fn default_unit() -> String {
        "um".to_string()
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            target: TargetKind::default(),
            segment_count: None,
            segment_length: None,
            unit: Self::default_unit(),
            degenerate: DegenerateMode::default(),
            batch: BatchMode::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件 {path:?} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析配置文件 {path:?} 失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_returned_when_file_missing() {
        let cfg = AppConfig::discover().expect("discover should succeed");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.conversion.target, TargetKind::Line);
        assert!(cfg.conversion.segment_count.is_none());
        assert!(cfg.conversion.segment_length.is_none());
        assert_eq!(cfg.conversion.unit, "um");
        assert_eq!(cfg.conversion.degenerate, DegenerateMode::Fail);
        assert_eq!(cfg.conversion.batch, BatchMode::Abort);
    }

    #[test]
    fn load_from_temp_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(
            file,
            r#"
            [logging]
            level = "debug"

            [conversion]
            target = "point"
            segment_count = 24
            unit = "mm"
            degenerate = "skip"
            batch = "skip"
            "#
        )
        .unwrap();

        let cfg = AppConfig::from_file(file.path()).expect("load config");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.conversion.target, TargetKind::Point);
        assert_eq!(cfg.conversion.segment_count, Some(24));
        assert_eq!(cfg.conversion.unit, "mm");
        assert_eq!(cfg.conversion.degenerate, DegenerateMode::Skip);
        assert_eq!(cfg.conversion.batch, BatchMode::Skip);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "conversion = 42").unwrap();
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
