use crate::level::Level;
use crate::sink::system_msg;
use anyhow::Result;
use serde_json::{json, Value};
use smart_default::SmartDefault;
use std::fs;
use std::path::Path;

/// 默认配置文件名
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// 磁盘配置
///
/// 只认四个键：`log_file`、`min_level`、`color`、`timestamp`。
/// `min_level` 同时作为两个 sink 的初始阈值。
#[derive(Debug, Clone, PartialEq, SmartDefault)]
pub struct LogConfig {
    /// 日志文件路径
    #[default("log.txt".to_string())]
    pub log_file: String,

    /// 初始最低级别（终端和文件共用）
    #[default(Level::Info)]
    pub min_level: Level,

    /// 终端是否着色
    #[default = true]
    pub color: bool,

    /// 是否输出时间戳
    #[default = true]
    pub timestamp: bool,
}

impl LogConfig {
    /// 加载配置文件
    ///
    /// 文件不存在视为"使用默认值"而不是错误：先把默认配置写回磁盘再返回。
    /// 文件存在但整体解析失败时终端提示一声并退回默认值。
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            system_msg(&format!(
                "no {} found, creating one with defaults",
                path.display()
            ));
            let config = LogConfig::default();
            config.write_to(path)?;
            return Ok(config);
        }

        let text = fs::read_to_string(path)?;
        Ok(Self::from_json(&text))
    }

    /// 把配置写回磁盘
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let value = json!({
            "log_file": self.log_file,
            "min_level": self.min_level.to_string(),
            "color": self.color,
            "timestamp": self.timestamp,
        });
        fs::write(path, serde_json::to_string_pretty(&value)?)?;
        Ok(())
    }

    /// 从 JSON 文本提取配置
    ///
    /// 这里是一个只认四个键的窄扫描，不是通用解析器：逐键独立提取，
    /// 类型不对、级别名不认识、或者多出来的键一律忽略，对应字段保持默认值。
    pub fn from_json(text: &str) -> Self {
        let mut config = LogConfig::default();

        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(err) => {
                system_msg(&format!("unreadable config, using defaults: {}", err));
                return config;
            }
        };

        if let Some(log_file) = value.get("log_file").and_then(Value::as_str) {
            config.log_file = log_file.to_string();
        }
        if let Some(name) = value.get("min_level").and_then(Value::as_str) {
            if let Ok(level) = name.parse::<Level>() {
                config.min_level = level;
            }
        }
        if let Some(color) = value.get("color").and_then(Value::as_bool) {
            config.color = color;
        }
        if let Some(timestamp) = value.get("timestamp").and_then(Value::as_bool) {
            config.timestamp = timestamp;
        }

        config
    }
}
