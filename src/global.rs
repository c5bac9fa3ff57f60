use crate::config::{LogConfig, DEFAULT_CONFIG_PATH};
use crate::error::FatalError;
use crate::level::Level;
use crate::logger::{Logger, LoggerConfig};
use crate::record::LogRecord;
use crate::sink::system_msg;
use anyhow::Result;
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// 全局 Logger 单例
///
/// init 之前是一个仅终端输出的 logger，不会隐式创建日志文件。
static GLOBAL_LOGGER: Lazy<RwLock<Arc<Logger>>> = Lazy::new(|| {
    RwLock::new(Arc::new(Logger::new(LoggerConfig {
        file_path: None,
        ..Default::default()
    })))
});

/// 获取当前的全局 Logger
pub fn global_logger() -> Arc<Logger> {
    Arc::clone(&GLOBAL_LOGGER.read().unwrap())
}

/// 替换全局 Logger
pub fn set_global(logger: Logger) {
    *GLOBAL_LOGGER.write().unwrap() = Arc::new(logger);
}

/// 初始化全局日志
///
/// 加载 `config.json`（不存在时先写入默认配置），按其中的设置构建 Logger
/// 并安装为全局单例。配置加载成功时文件路径以配置里的 `log_file` 为准，
/// `file_path` 参数只在配置加载失败时兜底。
pub fn init(file_path: impl Into<String>) -> Result<()> {
    init_with(DEFAULT_CONFIG_PATH, file_path)
}

/// 指定配置文件位置的初始化入口
pub fn init_with(config_path: impl AsRef<Path>, file_path: impl Into<String>) -> Result<()> {
    let config = match LogConfig::load(config_path) {
        Ok(config) => config,
        Err(err) => {
            system_msg(&format!("failed to load config, using defaults: {}", err));
            LogConfig {
                log_file: file_path.into(),
                ..Default::default()
            }
        }
    };

    set_global(Logger::new(LoggerConfig::from_log_config(&config)));
    Ok(())
}

/// 使用全局 Logger 记录日志
pub fn log(record: LogRecord) -> Result<()> {
    global_logger().log(record)
}

/// 记录 TRACE 级别日志
pub fn trace(message: impl Into<String>) -> Result<()> {
    global_logger().trace(message)
}

/// 记录 DEBUG 级别日志
pub fn debug(message: impl Into<String>) -> Result<()> {
    global_logger().debug(message)
}

/// 记录 INFO 级别日志
pub fn info(message: impl Into<String>) -> Result<()> {
    global_logger().info(message)
}

/// 记录 WARN 级别日志
pub fn warn(message: impl Into<String>) -> Result<()> {
    global_logger().warn(message)
}

/// 记录 ERROR 级别日志
pub fn error(message: impl Into<String>) -> Result<()> {
    global_logger().error(message)
}

/// 记录 FATAL 级别日志并升级
pub fn fatal(message: impl Into<String>) -> Result<(), FatalError> {
    global_logger().fatal(message)
}

/// 带调用点信息的 FATAL 记录，`fatal!` 宏的落点
pub fn fatal_at(
    message: impl Into<String>,
    file: impl Into<String>,
    line: u32,
) -> Result<(), FatalError> {
    global_logger().fatal_at(message, file, line)
}

/// 设置终端 sink 阈值
pub fn set_console_level(level: Level) {
    global_logger().set_console_level(level);
}

/// 设置文件 sink 阈值
pub fn set_file_level(level: Level) {
    global_logger().set_file_level(level);
}

/// 手动触发一次滚动检查
pub fn rotate_logs() -> bool {
    global_logger().rotate()
}

/// 设置触发滚动的文件大小上限
pub fn set_max_file_size(bytes: u64) {
    global_logger().set_max_file_size(bytes);
}

/// 设置保留的备份文件数量
pub fn set_max_backup_files(count: usize) {
    global_logger().set_max_backup_files(count);
}
