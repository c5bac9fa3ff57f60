use crate::level::Level;
use chrono::{DateTime, Local};

/// 日志记录
///
/// 每次调用创建一条，写入后即丢弃，不做持久化。
pub struct LogRecord {
    /// 日志级别
    pub level: Level,
    /// 日志消息
    pub message: String,
    /// 时间戳（本地时区，创建记录时捕获）
    pub timestamp: DateTime<Local>,
    /// 源文件路径（fatal 调用点捕获）
    pub file: Option<String>,
    /// 行号
    pub line: Option<u32>,
}

impl LogRecord {
    /// 创建新的日志记录
    pub fn new(level: Level, message: String) -> Self {
        Self {
            level,
            message,
            timestamp: Local::now(),
            file: None,
            line: None,
        }
    }

    /// 设置调用点信息（文件和行号）
    pub fn with_location(mut self, file: String, line: u32) -> Self {
        self.file = Some(file);
        self.line = Some(line);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = LogRecord::new(Level::Info, "hello".to_string());
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.message, "hello");
        assert!(record.file.is_none());
        assert!(record.line.is_none());
    }

    #[test]
    fn test_record_with_location() {
        let record =
            LogRecord::new(Level::Fatal, "boom".to_string()).with_location("main.rs".to_string(), 42);
        assert_eq!(record.file.as_deref(), Some("main.rs"));
        assert_eq!(record.line, Some(42));
    }

    #[test]
    fn test_record_timestamp_is_recent() {
        let before = Local::now();
        let record = LogRecord::new(Level::Debug, "t".to_string());
        let after = Local::now();
        assert!(record.timestamp >= before);
        assert!(record.timestamp <= after);
    }
}
