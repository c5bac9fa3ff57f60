use crate::level::Level;

/// 判断一条记录是否应该进入某个 sink
///
/// 规则：记录级别不低于该 sink 的阈值。
pub fn should_emit(record_level: Level, sink_threshold: Level) -> bool {
    record_level >= sink_threshold
}

/// 双阈值过滤器
///
/// 终端和文件各自持有独立阈值，一条记录可以只进入其中一个 sink。
/// 阈值修改对后续记录立即生效，不影响已经在写入途中的记录。
#[derive(Debug, Clone, Copy)]
pub struct LevelGate {
    console: Level,
    file: Level,
}

impl LevelGate {
    pub fn new(console: Level, file: Level) -> Self {
        Self { console, file }
    }

    /// 记录是否进入终端 sink
    pub fn console_passes(&self, level: Level) -> bool {
        should_emit(level, self.console)
    }

    /// 记录是否进入文件 sink
    pub fn file_passes(&self, level: Level) -> bool {
        should_emit(level, self.file)
    }

    pub fn set_console_level(&mut self, level: Level) {
        self.console = level;
    }

    pub fn set_file_level(&mut self, level: Level) {
        self.file = level;
    }

    pub fn console_level(&self) -> Level {
        self.console
    }

    pub fn file_level(&self) -> Level {
        self.file
    }
}
