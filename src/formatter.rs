use crate::record::LogRecord;
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::fmt::Write;

/// 日志格式化器 trait
///
/// 负责把一条日志记录渲染为单行文本，本身不持有任何共享状态。
pub trait LogFormatter: Send + Sync {
    /// 格式化日志记录
    fn format(&self, record: &LogRecord) -> Result<String>;
}

/// TextFormatter 配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct TextFormatterConfig {
    /// 是否输出时间戳段
    #[default = true]
    pub timestamp: bool,
}

/// 文本格式化器
///
/// 输出格式：`[YYYY-MM-DD HH:MM:SS] [LEVEL] message`，本地时区，秒级精度。
/// 颜色不在这里处理，终端着色是 sink 的职责，文件里永远是纯文本。
pub struct TextFormatter {
    config: TextFormatterConfig,
}

impl TextFormatter {
    pub fn new(config: TextFormatterConfig) -> Self {
        Self { config }
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        // 预分配容量：时间戳 22 字节 + 级别 8 字节 + 消息 + 可选的调用点后缀
        let capacity = 32
            + record.message.len()
            + record.file.as_ref().map_or(0, |f| f.len() + 24);
        let mut result = String::with_capacity(capacity);

        if self.config.timestamp {
            result.push('[');
            write!(result, "{}", record.timestamp.format("%Y-%m-%d %H:%M:%S")).unwrap();
            result.push_str("] ");
        }

        result.push('[');
        write!(result, "{}", record.level).unwrap();
        result.push_str("] ");

        result.push_str(&record.message);

        // fatal 调用点后缀
        if let (Some(file), Some(line)) = (&record.file, record.line) {
            write!(result, " [at line {} in {}]", line, file).unwrap();
        }

        Ok(result)
    }
}
