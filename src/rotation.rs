use anyhow::Result;
use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

/// 滚动状态
///
/// 活动文件路径和滚动上限。文件句柄本身和本状态一起放在 sink 的互斥锁里，
/// 句柄要么以追加模式打开，要么明确处于关闭状态，不存在悬空句柄。
#[derive(Debug, Clone)]
pub struct RotationState {
    /// 活动日志文件路径
    pub path: PathBuf,
    /// 单个文件最大大小（字节），达到即触发滚动
    pub max_file_size: u64,
    /// 保留的备份文件数量
    pub max_backup_files: usize,
}

impl RotationState {
    pub fn new(path: impl Into<PathBuf>, max_file_size: u64, max_backup_files: usize) -> Self {
        Self {
            path: path.into(),
            max_file_size,
            max_backup_files,
        }
    }

    /// 以追加模式打开活动文件，父目录不存在时先创建
    pub fn open_append(&self) -> std::io::Result<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&self.path)
    }

    /// 备份文件路径：`stem.ext` 的第 index 个备份是 `stem_<index>.ext`
    ///
    /// index 为 1 的备份永远是最近一次滚动出来的文件。
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("log");
        match self.path.extension().and_then(OsStr::to_str) {
            Some(ext) => self.path.with_file_name(format!("{}_{}.{}", stem, index, ext)),
            None => self.path.with_file_name(format!("{}_{}", stem, index)),
        }
    }

    /// 执行一次滚动检查
    ///
    /// 由调用方显式触发，写入路径上不会自动调用。传入的 `file` 是当前句柄，
    /// 滚动过程中先关闭再重新打开，保证重命名不会作用在打开的文件上。
    ///
    /// 返回是否真的发生了滚动：
    /// - 活动文件不存在 → 不滚动；
    /// - 文件大小低于上限 → 重新以追加模式打开后返回，可以无代价地反复调用；
    /// - 否则先删除最老的备份 `stem_N.ext`，再从 N-1 到 1 逐个后移
    ///   （必须从大到小遍历，否则会先覆盖还没移走的备份），
    ///   把活动文件改名为 `stem_1.ext`，最后在原路径新建空文件。
    pub fn rotate(&self, file: &mut Option<File>) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        // 关闭当前句柄再检查大小
        *file = None;

        let size = fs::metadata(&self.path)?.len();
        if size < self.max_file_size {
            *file = Some(self.open_append()?);
            return Ok(false);
        }

        if self.max_backup_files == 0 {
            // 不保留备份，直接丢弃已满的活动文件
            fs::remove_file(&self.path)?;
        } else {
            // 先显式删除最老的备份，避免被后移操作复活
            let oldest = self.backup_path(self.max_backup_files);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }

            for index in (1..self.max_backup_files).rev() {
                let src = self.backup_path(index);
                if src.exists() {
                    fs::rename(&src, self.backup_path(index + 1))?;
                }
            }

            fs::rename(&self.path, self.backup_path(1))?;
        }

        *file = Some(self.open_append()?);
        Ok(true)
    }
}
