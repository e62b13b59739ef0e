//! WemConv - WEM 批量转换工具
//!
//! 通过外部命令行解码器（vgmstream-cli）把 `.wem` 音频批量转换为 `.wav`。
//!
//! ## 核心特性
//! - 工作线程严格按输入顺序串行调用解码器，单个失败不中断整批
//! - 每个文件产生一个完成事件与一个累计进度事件，由控制器在自身线程上应用
//! - 控制器以状态机拒绝并发运行，结果以带标签的枚举区分成功与失败

pub mod audio;
pub mod controller;
pub mod desktop;
pub mod error;
pub mod processing;
pub mod tools;

// 重新导出核心类型
pub use audio::{DecodeStatus, Decoder, VgmstreamDecoder};
pub use controller::{Controller, FileList, RowState, RunState, Update};
pub use error::{ConvertError, ConvertResult};
pub use processing::{ConversionWorker, Outcome, RunSummary, WorkerEvent};
