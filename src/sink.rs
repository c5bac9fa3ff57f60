use crate::gate::LevelGate;
use crate::level::{Level, COLOR_RESET};
use crate::rotation::RotationState;
use anyhow::Result;
use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;

/// 打印引擎自身的诊断信息
///
/// 降级、滚动失败等情况只在终端提示，不允许让日志调用方崩溃。
pub(crate) fn system_msg(msg: &str) {
    eprintln!("[tinylog] {}", msg);
}

/// 终端流
///
/// 正常运行永远指向标准输出；测试通过 Custom 注入可控的流。
enum ConsoleStream {
    Stdout,
    #[cfg(test)]
    Custom(Box<dyn Write + Send>),
}

impl ConsoleStream {
    fn write_line(&mut self, level: Level, line: &str, color: bool) -> io::Result<()> {
        fn emit(out: &mut dyn Write, level: Level, line: &str, color: bool) -> io::Result<()> {
            if color {
                writeln!(out, "{}{}{}", level.color_code(), line, COLOR_RESET)?;
            } else {
                writeln!(out, "{}", line)?;
            }
            out.flush()
        }

        match self {
            ConsoleStream::Stdout => emit(&mut io::stdout().lock(), level, line, color),
            #[cfg(test)]
            ConsoleStream::Custom(out) => emit(out, level, line, color),
        }
    }
}

/// sink 共享状态，整体放在一把互斥锁下
struct SinkState {
    gate: LevelGate,
    color: bool,
    console: ConsoleStream,
    /// 文件句柄：None 表示降级为仅终端输出
    file: Option<File>,
    /// 文件 sink 的滚动状态，未配置文件路径时为 None
    rotation: Option<RotationState>,
}

/// sink 写入器
///
/// 持有终端流和文件句柄，所有写入、阈值判断和滚动都在同一把锁下进行：
/// 不同线程的行不会交错，写入也不会撞上滚动过程中关闭又重开的句柄。
pub struct SinkWriter {
    state: Mutex<SinkState>,
}

impl SinkWriter {
    /// 创建 sink 写入器
    ///
    /// 配置了文件路径时立即以追加模式打开；打不开不算错误，
    /// 降级为仅终端输出并在终端提示一次。
    pub fn new(gate: LevelGate, color: bool, rotation: Option<RotationState>) -> Self {
        let file = match &rotation {
            Some(state) => match state.open_append() {
                Ok(file) => Some(file),
                Err(err) => {
                    system_msg(&format!(
                        "failed to open log file {}: {}. logging to console only",
                        state.path.display(),
                        err
                    ));
                    None
                }
            },
            None => None,
        };

        Self {
            state: Mutex::new(SinkState {
                gate,
                color,
                console: ConsoleStream::Stdout,
                file,
                rotation,
            }),
        }
    }

    /// 写入一条已格式化的行
    ///
    /// 两个 sink 的阈值判断和写入都在锁内完成。终端行按级别着色（如启用），
    /// 文件行保持纯文本并立即刷盘。文件句柄缺失时静默跳过文件写入。
    ///
    /// 终端流坏掉（比如下游 pager 退出后的 EPIPE）不能连累健康的文件 sink：
    /// 文件写入无条件先完成，终端错误最后才返回给调用方。
    pub fn write(&self, level: Level, line: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let SinkState {
            gate,
            color,
            console,
            file,
            ..
        } = &mut *state;

        let console_result = if gate.console_passes(level) {
            console.write_line(level, line, *color)
        } else {
            Ok(())
        };

        if gate.file_passes(level) {
            if let Some(file) = file.as_mut() {
                writeln!(file, "{}", line)?;
                file.flush()?;
            }
        }

        console_result?;
        Ok(())
    }

    /// 触发一次滚动检查，返回是否真的滚动了
    ///
    /// 文件系统错误在这里兜底：终端提示一声，尽量把句柄恢复成追加模式，
    /// 绝不向调用方传播。
    pub fn rotate(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        let SinkState { file, rotation, .. } = &mut *state;

        let Some(rotation) = rotation else {
            return false;
        };

        match rotation.rotate(file) {
            Ok(rotated) => rotated,
            Err(err) => {
                system_msg(&format!("log rotation failed: {}", err));
                if file.is_none() {
                    match rotation.open_append() {
                        Ok(reopened) => *file = Some(reopened),
                        Err(err) => system_msg(&format!(
                            "failed to reopen log file {}: {}. logging to console only",
                            rotation.path.display(),
                            err
                        )),
                    }
                }
                false
            }
        }
    }

    pub fn set_console_level(&self, level: Level) {
        self.state.lock().unwrap().gate.set_console_level(level);
    }

    pub fn set_file_level(&self, level: Level) {
        self.state.lock().unwrap().gate.set_file_level(level);
    }

    pub fn console_level(&self) -> Level {
        self.state.lock().unwrap().gate.console_level()
    }

    pub fn file_level(&self) -> Level {
        self.state.lock().unwrap().gate.file_level()
    }

    pub fn set_color(&self, color: bool) {
        self.state.lock().unwrap().color = color;
    }

    pub fn set_max_file_size(&self, bytes: u64) {
        if let Some(rotation) = &mut self.state.lock().unwrap().rotation {
            rotation.max_file_size = bytes;
        }
    }

    pub fn set_max_backup_files(&self, count: usize) {
        if let Some(rotation) = &mut self.state.lock().unwrap().rotation {
            rotation.max_backup_files = count;
        }
    }

    /// 当前是否有打开的文件句柄
    pub fn file_is_open(&self) -> bool {
        self.state.lock().unwrap().file.is_some()
    }

    /// 替换终端流，测试用
    #[cfg(test)]
    fn set_console_stream(&self, stream: Box<dyn Write + Send>) {
        self.state.lock().unwrap().console = ConsoleStream::Custom(stream);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn file_sink(temp_dir: &TempDir, console: Level, file: Level) -> (SinkWriter, std::path::PathBuf) {
        let path = temp_dir.path().join("app.log");
        let rotation = RotationState::new(path.clone(), 1024 * 1024, 2);
        let sink = SinkWriter::new(LevelGate::new(console, file), false, Some(rotation));
        (sink, path)
    }

    #[test]
    fn test_sink_writes_to_file_when_file_gate_passes() {
        let temp_dir = TempDir::new().unwrap();
        // 终端阈值 FATAL 保持测试输出安静
        let (sink, path) = file_sink(&temp_dir, Level::Fatal, Level::Info);

        sink.write(Level::Info, "[INFO] hello file").unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, "[INFO] hello file\n");
    }

    #[test]
    fn test_sink_skips_file_below_threshold() {
        let temp_dir = TempDir::new().unwrap();
        let (sink, path) = file_sink(&temp_dir, Level::Fatal, Level::Warn);

        sink.write(Level::Info, "[INFO] filtered out").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn test_sink_thresholds_independent() {
        // 阈值分叉：终端 ERROR、文件 INFO，INFO 记录只落到文件
        let temp_dir = TempDir::new().unwrap();
        let (sink, path) = file_sink(&temp_dir, Level::Error, Level::Info);

        sink.write(Level::Info, "[INFO] one info record").unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("[INFO]"));
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_sink_console_only_when_no_rotation() {
        let sink = SinkWriter::new(LevelGate::new(Level::Fatal, Level::Trace), false, None);
        assert!(!sink.file_is_open());
        // 文件 sink 缺席时写入静默跳过，不报错
        sink.write(Level::Error, "[ERROR] console only").unwrap();
        assert!(!sink.rotate());
    }

    #[test]
    fn test_sink_degrades_when_file_unopenable() {
        let temp_dir = TempDir::new().unwrap();
        // 把"文件"路径指向一个已存在的目录，打开必然失败
        let dir_as_file = temp_dir.path().join("occupied");
        fs::create_dir(&dir_as_file).unwrap();

        let rotation = RotationState::new(dir_as_file, 1024, 2);
        let sink = SinkWriter::new(LevelGate::new(Level::Fatal, Level::Trace), false, Some(rotation));

        assert!(!sink.file_is_open());
        sink.write(Level::Error, "[ERROR] still works").unwrap();
    }

    #[test]
    fn test_sink_set_levels() {
        let temp_dir = TempDir::new().unwrap();
        let (sink, path) = file_sink(&temp_dir, Level::Fatal, Level::Trace);

        sink.set_file_level(Level::Error);
        assert_eq!(sink.file_level(), Level::Error);
        sink.write(Level::Warn, "[WARN] dropped").unwrap();
        sink.write(Level::Error, "[ERROR] kept").unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, "[ERROR] kept\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_sink_console_failure_does_not_drop_file_output() {
        // 终端流断掉（EPIPE）时文件 sink 照常落盘，错误事后返回
        let temp_dir = TempDir::new().unwrap();
        let (sink, path) = file_sink(&temp_dir, Level::Trace, Level::Trace);
        sink.set_console_stream(Box::new(BrokenPipe));

        let result = sink.write(Level::Info, "[INFO] survives broken console");
        assert!(result.is_err());

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[INFO] survives broken console\n"
        );

        // 后续写入同样不受影响
        assert!(sink.write(Level::Warn, "[WARN] again").is_err());
        assert!(fs::read_to_string(&path).unwrap().contains("[WARN] again"));
    }

    #[test]
    fn test_sink_rotation_failure_downgrades_and_recovers() {
        // 把 1 号备份位占成非空目录：删除和改名都会失败
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let rotation = RotationState::new(path.clone(), 4, 1);
        fs::create_dir(rotation.backup_path(1)).unwrap();
        fs::write(rotation.backup_path(1).join("occupied"), "x").unwrap();

        let sink = SinkWriter::new(LevelGate::new(Level::Fatal, Level::Trace), false, Some(rotation));
        sink.write(Level::Info, "[INFO] fills past the limit").unwrap();

        // 滚动失败被兜底：不报告滚动、句柄恢复成追加模式
        assert!(!sink.rotate());
        assert!(sink.file_is_open());

        // 旧内容还在，写入继续生效
        sink.write(Level::Info, "[INFO] still logging").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[INFO] fills past the limit"));
        assert!(content.contains("[INFO] still logging"));
    }

    #[test]
    fn test_sink_rotate_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let (sink, path) = file_sink(&temp_dir, Level::Fatal, Level::Trace);
        sink.set_max_file_size(8);

        sink.write(Level::Info, "[INFO] long enough line").unwrap();
        assert!(sink.rotate());

        // 滚动后句柄指向新的空文件，写入继续生效
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        sink.write(Level::Info, "[INFO] after rotate").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[INFO] after rotate\n");
    }
}
