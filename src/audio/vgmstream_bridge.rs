//! vgmstream 桥接解码器
//!
//! 以子进程方式调用 `vgmstream-cli -o <输出> <输入>`，同步等待退出并捕获标准错误。

use super::{DecodeStatus, Decoder};
use crate::error::{ConvertError, ConvertResult};
use crate::tools::constants::decoder;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// vgmstream安装说明
const VGMSTREAM_INSTALL_GUIDE: &str = r#"
vgmstream-cli is required to convert WEM files / 需要 vgmstream-cli 才能转换 WEM 文件

Place the command-line build under ./vgmstream/ next to the working directory,
or pass its location with --decoder (or WEMCONV_DECODER).
将命令行版本放在工作目录下的 ./vgmstream/ 中，或通过 --decoder 指定路径。

Official site / 官方网站: https://vgmstream.org
"#;

/// vgmstream-cli 解码器
#[derive(Debug, Clone)]
pub struct VgmstreamDecoder {
    /// 可执行文件路径
    executable: PathBuf,
}

impl VgmstreamDecoder {
    /// 使用指定的可执行文件路径创建解码器（不做存在性检查）
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// 查找解码器：显式路径优先，否则使用 `<cwd>/vgmstream/vgmstream-cli`
    pub fn locate(explicit: Option<&Path>) -> ConvertResult<Self> {
        match explicit {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(Self::default_location()?)),
        }
    }

    /// 默认位置（相对当前工作目录，按平台选择文件名）
    pub fn default_location() -> ConvertResult<PathBuf> {
        let cwd = std::env::current_dir()?;

        #[cfg(target_os = "windows")]
        let file_name = decoder::EXECUTABLE_WINDOWS;
        #[cfg(not(target_os = "windows"))]
        let file_name = decoder::EXECUTABLE;

        Ok(cwd.join(decoder::BUNDLE_DIR).join(file_name))
    }

    /// 可执行文件路径
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// 构建调用命令：`<exe> -o <output> <input>`
    fn build_command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("-o")
            .arg(output)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            // CREATE_NO_WINDOW：不弹出控制台窗口
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        cmd
    }
}

impl Decoder for VgmstreamDecoder {
    fn name(&self) -> &str {
        "vgmstream-cli"
    }

    fn ensure_available(&self) -> ConvertResult<()> {
        if self.executable.is_file() {
            Ok(())
        } else {
            tracing::error!(
                executable = %self.executable.display(),
                "{}",
                VGMSTREAM_INSTALL_GUIDE.trim()
            );
            Err(ConvertError::DecoderMissing(self.executable.clone()))
        }
    }

    fn decode(&self, input: &Path, output: &Path) -> io::Result<DecodeStatus> {
        let result = self.build_command(input, output).output()?;

        if result.status.success() {
            Ok(DecodeStatus::Success)
        } else {
            Ok(DecodeStatus::Failed {
                code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            })
        }
    }
}
