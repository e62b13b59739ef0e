//! 转换处理模块
//!
//! 工作线程按输入顺序逐个调用外部解码器，并通过事件报告单项结果与总体进度。

pub mod outcome;
pub mod worker;

// 重新导出公共接口
pub use outcome::{Outcome, RunSummary};
pub use worker::{ConversionWorker, WorkerEvent, WorkerHandle, progress_percent};
