//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// 解码器定位常量
pub mod decoder {
    /// 随程序分发的解码器目录（相对当前工作目录）
    pub const BUNDLE_DIR: &str = "vgmstream";

    /// 非Windows平台的可执行文件名
    pub const EXECUTABLE: &str = "vgmstream-cli";

    /// Windows平台的可执行文件名
    pub const EXECUTABLE_WINDOWS: &str = "vgmstream-cli.exe";

    /// 覆盖解码器路径的环境变量
    pub const ENV_OVERRIDE: &str = "WEMCONV_DECODER";
}

/// 文件命名常量
pub mod naming {
    /// 接受的输入后缀（区分大小写，按路径文本后缀匹配）
    pub const INPUT_SUFFIX: &str = ".wem";

    /// 输出文件扩展名
    pub const OUTPUT_EXTENSION: &str = "wav";

    /// 失败结果的显示前缀
    pub const ERROR_PREFIX: &str = "Error:";
}

/// 默认配置值
pub mod defaults {
    use std::time::Duration;

    /// 默认输出目录（相对当前工作目录）
    pub const OUTPUT_DIR: &str = "output";

    /// 工作线程名称
    pub const WORKER_THREAD_NAME: &str = "wem-worker";

    /// 主线程等待工作事件的轮询间隔
    ///
    /// 超时只用于让主线程有机会刷新显示，不影响事件顺序
    pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);
}
