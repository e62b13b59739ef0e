//! 解码器模块
//!
//! 转换本身交给外部命令行解码器完成，本模块只定义调用契约。
//!
//! **使用 `VgmstreamDecoder`** - 调用随程序分发的 vgmstream-cli

mod vgmstream_bridge;

pub use vgmstream_bridge::VgmstreamDecoder;

use crate::error::ConvertResult;
use std::io;
use std::path::Path;

/// 单次解码调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStatus {
    /// 进程以退出码0结束
    Success,
    /// 进程以非零退出码结束，`stderr` 为原样捕获的诊断文本
    Failed { code: Option<i32>, stderr: String },
}

/// 外部解码器契约
///
/// 给定输入路径和目标输出路径，要么生成文件，要么以标准错误上的诊断文本失败。
/// 实现必须可以跨线程移动，工作线程会独占地顺序调用 [`Decoder::decode`]。
pub trait Decoder: Send + Sync {
    /// 解码器名称（用于日志）
    fn name(&self) -> &str;

    /// 启动前置检查
    ///
    /// 失败即整批致命错误，调用方必须在处理任何文件之前中止。
    fn ensure_available(&self) -> ConvertResult<()>;

    /// 同步执行一次转换
    ///
    /// - `Ok(DecodeStatus)` - 进程已运行并退出
    /// - `Err(_)` - 本地错误（例如无法启动进程），由调用方记为该文件的失败结果
    fn decode(&self, input: &Path, output: &Path) -> io::Result<DecodeStatus>;
}
