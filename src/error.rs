//! 统一错误处理
//!
//! 区分"整批致命"错误与"单文件"错误：单文件失败只会成为该行的 [`Outcome::Failed`]，
//! 从不经由本类型向上传播。
//!
//! [`Outcome::Failed`]: crate::processing::Outcome::Failed

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 转换流程相关的统一错误类型
#[derive(Debug, Error)]
pub enum ConvertError {
    /// 解码器可执行文件不存在（致命，处理任何文件之前中止）
    #[error("解码器不存在 / decoder executable not found: {}", .0.display())]
    DecoderMissing(PathBuf),

    /// 输入验证错误（例如拖入了非 .wem 文件）
    #[error("输入验证失败 / invalid input: {0}")]
    InvalidInput(String),

    /// 文件I/O错误
    #[error("文件I/O错误 / I/O error: {0}")]
    Io(#[from] io::Error),

    /// 已有转换任务在运行
    #[error("转换正在进行中 / a conversion run is already in progress")]
    AlreadyRunning,

    /// 工作线程异常退出
    #[error("工作线程异常退出 / worker thread panicked")]
    WorkerPanicked,

    /// 剪贴板访问失败
    #[error("剪贴板错误 / clipboard error: {0}")]
    Clipboard(String),

    /// 默认程序打开失败
    #[error("无法打开文件 / failed to open {}: {message}", .path.display())]
    Launch { path: PathBuf, message: String },

    /// 报告写入失败
    #[error("报告生成失败 / report error: {0}")]
    Report(String),
}

/// 转换操作的标准Result类型
pub type ConvertResult<T> = Result<T, ConvertError>;

/// 错误类别（用于退出码与建议文本）
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ErrorCategory {
    /// 输入相关
    Input,
    /// 解码器缺失
    Decoder,
    /// I/O相关
    Io,
    /// 资源/并发相关
    Resource,
    /// 其他
    Other,
}

impl ErrorCategory {
    /// 从 ConvertError 提取错误类别
    pub fn from_error(e: &ConvertError) -> Self {
        match e {
            ConvertError::InvalidInput(_) => Self::Input,
            ConvertError::DecoderMissing(_) => Self::Decoder,
            ConvertError::Io(_) | ConvertError::Report(_) => Self::Io,
            ConvertError::AlreadyRunning | ConvertError::WorkerPanicked => Self::Resource,
            ConvertError::Clipboard(_) | ConvertError::Launch { .. } => Self::Other,
        }
    }

    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Input => "输入错误",
            Self::Decoder => "解码器错误",
            Self::Io => "I/O错误",
            Self::Resource => "资源错误",
            Self::Other => "其他错误",
        }
    }
}
