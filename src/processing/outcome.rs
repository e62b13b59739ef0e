//! 单项结果与整批统计

use crate::tools::constants::naming;
use crate::tools::utils;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 单个输入文件的转换结果
///
/// 用带标签的枚举区分成功与失败，显示层才拼接 `Error:` 前缀，
/// 因此输出路径本身以该前缀开头时不会被误判为失败。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 转换成功，携带输出文件路径
    Converted(PathBuf),
    /// 转换失败，携带诊断文本（解码器标准错误或本地错误信息）
    Failed(String),
}

impl Outcome {
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// 成功时的输出路径
    #[inline]
    pub fn output_path(&self) -> Option<&Path> {
        match self {
            Self::Converted(path) => Some(path),
            Self::Failed(_) => None,
        }
    }

    /// 完整显示文本：成功为完整输出路径，失败为 `Error:<诊断>`
    pub fn display_text(&self) -> String {
        match self {
            Self::Converted(path) => path.display().to_string(),
            Self::Failed(message) => format!("{}{message}", naming::ERROR_PREFIX),
        }
    }

    /// 表格中的简短显示：成功只显示文件名，失败显示完整错误文本
    pub fn short_text(&self) -> String {
        match self {
            Self::Converted(path) => utils::extract_filename_lossy(path),
            Self::Failed(_) => self.display_text(),
        }
    }
}

/// 一次运行的统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// 输入文件总数
    pub total: usize,
    /// 成功数
    pub converted: usize,
    /// 失败数
    pub failed: usize,
    /// 输出目录
    pub output_dir: PathBuf,
    /// 耗时
    pub elapsed: Duration,
}

impl RunSummary {
    /// 空运行（输入列表为空）
    pub fn empty(output_dir: PathBuf) -> Self {
        Self {
            total: 0,
            converted: 0,
            failed: 0,
            output_dir,
            elapsed: Duration::ZERO,
        }
    }

    #[inline]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.converted as f64 / self.total as f64 * 100.0
        }
    }
}
