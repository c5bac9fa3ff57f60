//! TinyLog - 同步结构化日志引擎
//!
//! 把带级别的日志请求过滤、格式化后写入两个 sink：终端流和一个按大小
//! 滚动的日志文件。核心是一把互斥锁下的双 sink 写入与滚动引擎。
//!
//! # 特性
//!
//! - 六个有序级别：Trace, Debug, Info, Warn, Error, Fatal
//! - 终端和文件各自独立的阈值过滤
//! - 单锁并发模型：多线程写入不会出现交错或截断的行
//! - 显式触发的按大小滚动，编号备份 `stem_1.ext … stem_N.ext`
//! - `config.json` 四键配置，缺失时自动写入默认值
//! - fatal 级别记录写入后通过 `Err(FatalError)` 向调用方升级
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use tinylog::{Level, Logger, LoggerConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     // 全局方式：加载 config.json 并安装全局 logger
//!     tinylog::init("log.txt")?;
//!     tinylog::set_console_level(Level::Warn);
//!     tinylog::info!("service started on port {}", 8080)?;
//!
//!     // 实例方式：显式构建上下文对象
//!     let logger = Logger::new(LoggerConfig {
//!         file_path: Some("app.log".to_string()),
//!         max_file_size: 1024 * 1024,
//!         max_backup_files: 3,
//!         ..Default::default()
//!     });
//!     logger.info("hello")?;
//!     logger.rotate();
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod formatter;
pub mod gate;
pub mod global;
pub mod level;
pub mod logger;
pub mod macros;
pub mod record;
pub mod rotation;
pub mod sink;

// 重新导出核心类型
pub use config::{LogConfig, DEFAULT_CONFIG_PATH};
pub use error::FatalError;
pub use formatter::{LogFormatter, TextFormatter, TextFormatterConfig};
pub use gate::{should_emit, LevelGate};
pub use level::Level;
pub use logger::{Logger, LoggerConfig};
pub use record::LogRecord;
pub use rotation::RotationState;
pub use sink::SinkWriter;

pub use global::{
    debug, error, fatal, fatal_at, global_logger, info, init, init_with, log, rotate_logs,
    set_console_level, set_file_level, set_global, set_max_backup_files, set_max_file_size, trace,
    warn,
};
