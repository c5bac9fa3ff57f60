use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 日志级别
///
/// 排序关系是所有 sink 过滤的基础：级别值越大越严重。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    /// 最详细的日志
    Trace = 0,
    /// 调试信息
    Debug = 1,
    /// 一般信息
    Info = 2,
    /// 警告信息
    Warn = 3,
    /// 错误信息
    Error = 4,
    /// 致命错误，记录后向调用方升级
    Fatal = 5,
}

impl Level {
    /// 终端输出使用的 ANSI 颜色码
    pub fn color_code(&self) -> &'static str {
        match self {
            Level::Trace => "\x1b[95m",      // 亮洋红
            Level::Debug => "\x1b[36m",      // 青色
            Level::Info => "\x1b[32m",       // 绿色
            Level::Warn => "\x1b[33m",       // 黄色
            Level::Error => "\x1b[31m",      // 红色
            Level::Fatal => "\x1b[38;5;1m",  // 暗红
        }
    }
}

/// ANSI 颜色重置码
pub const COLOR_RESET: &str = "\x1b[0m";

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(format!("invalid log level: {}", s)),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Trace => write!(f, "TRACE"),
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
            Level::Error => write!(f, "ERROR"),
            Level::Fatal => write!(f, "FATAL"),
        }
    }
}
