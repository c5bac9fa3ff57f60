//! 日志宏
//!
//! 针对全局 Logger 的便捷调用层：消息用 `format!` 语法组装，
//! `fatal!` 额外捕获调用点的文件和行号。
//!
//! # 示例
//!
//! ```rust,no_run
//! fn main() -> anyhow::Result<()> {
//!     tinylog::init("log.txt")?;
//!
//!     tinylog::info!("service started on port {}", 8080)?;
//!     tinylog::warn!("queue depth {} over threshold {}", 120, 100)?;
//!
//!     // 记录后升级，调用方传播或终止
//!     tinylog::fatal!("config missing key {}", "db_url")?;
//!     unreachable!()
//! }
//! ```

/// 记录 TRACE 级别日志
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::global::trace(format!($($arg)*))
    };
}

/// 记录 DEBUG 级别日志
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::global::debug(format!($($arg)*))
    };
}

/// 记录 INFO 级别日志
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::global::info(format!($($arg)*))
    };
}

/// 记录 WARN 级别日志
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::global::warn(format!($($arg)*))
    };
}

/// 记录 ERROR 级别日志
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::global::error(format!($($arg)*))
    };
}

/// 记录 FATAL 级别日志并升级
///
/// 自动附上调用点的 `file!()` 和 `line!()`，固定返回 `Err(FatalError)`。
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        $crate::global::fatal_at(format!($($arg)*), file!().to_string(), line!())
    };
}
