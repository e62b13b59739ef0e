//! 桌面集成：剪贴板与默认程序打开
//!
//! 控制器只依赖这里的两个trait；系统实现位于 `desktop` feature 之后。

use crate::error::ConvertResult;
use std::path::Path;

/// 剪贴板写入端
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> ConvertResult<()>;
}

/// 以宿主默认程序打开文件
pub trait Launcher {
    fn open(&self, path: &Path) -> ConvertResult<()>;
}

#[cfg(feature = "desktop")]
pub use system::{SystemClipboard, SystemLauncher};

#[cfg(feature = "desktop")]
mod system {
    use super::{ClipboardSink, Launcher};
    use crate::error::{ConvertError, ConvertResult};
    use std::path::Path;

    /// 系统剪贴板（arboard）
    pub struct SystemClipboard {
        inner: arboard::Clipboard,
    }

    impl SystemClipboard {
        pub fn new() -> ConvertResult<Self> {
            let inner =
                arboard::Clipboard::new().map_err(|e| ConvertError::Clipboard(e.to_string()))?;
            Ok(Self { inner })
        }
    }

    impl ClipboardSink for SystemClipboard {
        fn set_text(&mut self, text: &str) -> ConvertResult<()> {
            // X11/Wayland 下剪贴板内容归本进程所有，进程退出后可能丢失
            self.inner
                .set_text(text.to_owned())
                .map_err(|e| ConvertError::Clipboard(e.to_string()))
        }
    }

    /// 系统默认程序（open）
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SystemLauncher;

    impl Launcher for SystemLauncher {
        fn open(&self, path: &Path) -> ConvertResult<()> {
            open::that(path).map_err(|e| ConvertError::Launch {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    }
}
