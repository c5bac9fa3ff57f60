use crate::config::LogConfig;
use crate::error::FatalError;
use crate::formatter::{LogFormatter, TextFormatter, TextFormatterConfig};
use crate::gate::LevelGate;
use crate::level::Level;
use crate::record::LogRecord;
use crate::rotation::RotationState;
use crate::sink::{system_msg, SinkWriter};
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;

/// Logger 创建配置
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// 日志文件路径，None 表示仅终端输出
    #[default(Some("log.txt".to_string()))]
    pub file_path: Option<String>,

    /// 终端 sink 阈值
    #[default(Level::Trace)]
    pub console_level: Level,

    /// 文件 sink 阈值
    #[default(Level::Trace)]
    pub file_level: Level,

    /// 终端是否着色
    #[default = true]
    pub color: bool,

    /// 是否输出时间戳
    #[default = true]
    pub timestamp: bool,

    /// 单个文件最大大小（字节）
    #[default(1024 * 1024)]
    pub max_file_size: u64,

    /// 保留的备份文件数量
    #[default(3)]
    pub max_backup_files: usize,
}

impl LoggerConfig {
    /// 由磁盘配置推导 Logger 配置
    ///
    /// 磁盘配置的 `min_level` 同时初始化两个 sink 的阈值。
    pub fn from_log_config(config: &LogConfig) -> Self {
        Self {
            file_path: Some(config.log_file.clone()),
            console_level: config.min_level,
            file_level: config.min_level,
            color: config.color,
            timestamp: config.timestamp,
            ..Default::default()
        }
    }
}

/// 核心日志器
///
/// 进程级上下文对象：格式化管线 + 双 sink 写入器。构造在启动期单线程完成，
/// 之后的所有修改（阈值、滚动上限、滚动本身）都通过 sink 的锁串行化。
pub struct Logger {
    formatter: Box<dyn LogFormatter>,
    sink: SinkWriter,
}

impl Logger {
    /// 从配置创建 Logger
    ///
    /// 构造不会失败：日志文件打不开时降级为仅终端输出并在终端提示。
    pub fn new(config: LoggerConfig) -> Self {
        let formatter = Box::new(TextFormatter::new(TextFormatterConfig {
            timestamp: config.timestamp,
        }));

        let rotation = config
            .file_path
            .map(|path| RotationState::new(path, config.max_file_size, config.max_backup_files));
        let gate = LevelGate::new(config.console_level, config.file_level);
        let sink = SinkWriter::new(gate, config.color, rotation);

        Self { formatter, sink }
    }

    /// 记录一条日志
    ///
    /// 先整行格式化一次，再交给 sink 在锁内做双阈值判断和写入。
    pub fn log(&self, record: LogRecord) -> Result<()> {
        let line = self.formatter.format(&record)?;
        self.sink.write(record.level, &line)
    }

    /// 记录 TRACE 级别日志
    pub fn trace(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(Level::Trace, message.into()))
    }

    /// 记录 DEBUG 级别日志
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(Level::Debug, message.into()))
    }

    /// 记录 INFO 级别日志
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(Level::Info, message.into()))
    }

    /// 记录 WARN 级别日志
    pub fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(Level::Warn, message.into()))
    }

    /// 记录 ERROR 级别日志
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(Level::Error, message.into()))
    }

    /// 记录 FATAL 级别日志并升级
    ///
    /// 记录先完整写入各 sink（仍受阈值约束），然后固定返回
    /// `Err(FatalError)`，由调用方选择传播或终止。写入失败不吞掉升级信号，
    /// 只在终端提示。
    pub fn fatal(&self, message: impl Into<String>) -> Result<(), FatalError> {
        self.emit_fatal(LogRecord::new(Level::Fatal, message.into()))
    }

    /// 带调用点信息的 FATAL 记录，`fatal!` 宏经由这里捕获 file!/line!
    pub fn fatal_at(
        &self,
        message: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Result<(), FatalError> {
        let record = LogRecord::new(Level::Fatal, message.into()).with_location(file.into(), line);
        self.emit_fatal(record)
    }

    fn emit_fatal(&self, record: LogRecord) -> Result<(), FatalError> {
        if let Err(err) = self.log(record) {
            system_msg(&format!("failed to write fatal record: {}", err));
        }
        Err(FatalError)
    }

    /// 设置终端 sink 阈值，对后续记录立即生效
    pub fn set_console_level(&self, level: Level) {
        self.sink.set_console_level(level);
    }

    /// 设置文件 sink 阈值，对后续记录立即生效
    pub fn set_file_level(&self, level: Level) {
        self.sink.set_file_level(level);
    }

    pub fn console_level(&self) -> Level {
        self.sink.console_level()
    }

    pub fn file_level(&self) -> Level {
        self.sink.file_level()
    }

    pub fn set_color(&self, color: bool) {
        self.sink.set_color(color);
    }

    /// 设置触发滚动的文件大小上限
    pub fn set_max_file_size(&self, bytes: u64) {
        self.sink.set_max_file_size(bytes);
    }

    /// 设置保留的备份文件数量
    pub fn set_max_backup_files(&self, count: usize) {
        self.sink.set_max_backup_files(count);
    }

    /// 手动触发一次滚动检查
    ///
    /// 写入路径不会自动滚动，由调用方周期性调用这里。返回是否真的滚动了。
    pub fn rotate(&self) -> bool {
        self.sink.rotate()
    }

    /// 文件 sink 当前是否可用
    pub fn file_is_open(&self) -> bool {
        self.sink.file_is_open()
    }
}
