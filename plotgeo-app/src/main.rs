use std::path::PathBuf;

use plotgeo_config::{AppConfig, ConfigError, TargetKind};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod demo;

fn main() {
    let mut args = std::env::args().skip(1);
    let mut config_override: Option<PathBuf> = None;
    let mut target_override: Option<TargetKind> = None;
    let mut count_override: Option<u32> = None;
    let mut length_override: Option<f64> = None;
    let mut unit_override: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let Some(path) = args.next() else {
                    eprintln!("`--config` 需要提供配置文件路径");
                    std::process::exit(1);
                };
                config_override = Some(PathBuf::from(path));
            }
            "--target" => {
                let Some(value) = args.next() else {
                    eprintln!("`--target` 需要提供目标种类（point / line / arc）");
                    std::process::exit(1);
                };
                target_override = Some(match value.as_str() {
                    "point" => TargetKind::Point,
                    "line" => TargetKind::Line,
                    "arc" => TargetKind::Arc,
                    other => {
                        eprintln!("未知目标种类：{other}");
                        std::process::exit(1);
                    }
                });
            }
            "--count" => {
                let Some(value) = args.next() else {
                    eprintln!("`--count` 需要提供段数");
                    std::process::exit(1);
                };
                match value.parse::<u32>() {
                    Ok(count) => count_override = Some(count),
                    Err(_) => {
                        eprintln!("无法解析段数：{value}");
                        std::process::exit(1);
                    }
                }
            }
            "--length" => {
                let Some(value) = args.next() else {
                    eprintln!("`--length` 需要提供段长");
                    std::process::exit(1);
                };
                match value.parse::<f64>() {
                    Ok(length) => length_override = Some(length),
                    Err(_) => {
                        eprintln!("无法解析段长：{value}");
                        std::process::exit(1);
                    }
                }
            }
            "--unit" => {
                let Some(value) = args.next() else {
                    eprintln!("`--unit` 需要提供单位符号");
                    std::process::exit(1);
                };
                unit_override = Some(value);
            }
            other => {
                eprintln!("未知参数：{other}");
                std::process::exit(1);
            }
        }
    }

    let config = load_configuration(config_override);
    init_logging(&config);
    info!("启动 plotgeo 演示转换");

    let mut conversion = config.conversion.clone();
    if let Some(target) = target_override {
        conversion.target = target;
    }
    if let Some(count) = count_override {
        conversion.segment_count = Some(count);
    }
    if let Some(length) = length_override {
        conversion.segment_length = Some(length);
    }
    if let Some(unit) = unit_override {
        conversion.unit = unit;
    }

    if let Err(err) = demo::run(&conversion) {
        error!(error = %err, "演示转换失败");
        std::process::exit(1);
    }
}

fn load_configuration(override_path: Option<PathBuf>) -> AppConfig {
    match override_path {
        Some(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "加载指定配置失败，使用默认配置");
            AppConfig::default()
        }),
        None => match AppConfig::discover() {
            Ok(cfg) => cfg,
            Err(err) => {
                match &err {
                    ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => {
                        warn!(path = %path.display(), error = %err, "加载默认配置失败，使用内建默认值");
                    }
                    ConfigError::Context { .. } => {
                        warn!(error = %err, "加载默认配置失败，使用内建默认值");
                    }
                }
                AppConfig::default()
            }
        },
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_new(config.logging.level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter);
    if subscriber.try_init().is_err() {
        // 已初始化，忽略
    }
}
