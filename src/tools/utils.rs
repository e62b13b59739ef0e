//! 工具函数模块
//!
//! 提供文件路径处理等通用工具函数。

/// 文件路径处理工具函数
pub mod path {
    use crate::tools::constants::naming;
    use std::path::{Path, PathBuf};

    /// 提取文件名（返回String，用于显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// 是否为可接受的输入文件（路径文本以 `.wem` 结尾，区分大小写）
    #[inline]
    pub fn has_input_suffix(path: &Path) -> bool {
        path.to_string_lossy().ends_with(naming::INPUT_SUFFIX)
    }

    /// 推导输出路径：`<output_dir>/<源文件名替换扩展名为 wav>`
    ///
    /// 只替换最后一个扩展名；没有扩展名的文件直接追加 `.wav`。
    pub fn derive_output_path(source: &Path, output_dir: &Path) -> PathBuf {
        let file_name = source
            .file_name()
            .map(Path::new)
            .unwrap_or_else(|| Path::new("audio"));
        output_dir.join(file_name.with_extension(naming::OUTPUT_EXTENSION))
    }
}

pub use path::{derive_output_path, extract_filename_lossy, has_input_suffix};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_derive_output_path_replaces_extension() {
        let out = derive_output_path(Path::new("track1.wem"), Path::new("output"));
        assert_eq!(out, Path::new("output").join("track1.wav"));
    }

    #[test]
    fn test_derive_output_path_uses_only_file_name() {
        let out = derive_output_path(Path::new("/music/bank/vo_01.wem"), Path::new("output"));
        assert_eq!(out, Path::new("output").join("vo_01.wav"));
    }

    #[test]
    fn test_derive_output_path_only_last_extension() {
        let out = derive_output_path(Path::new("a.wem.wem"), Path::new("out"));
        assert_eq!(out, Path::new("out").join("a.wem.wav"));
    }

    #[test]
    fn test_input_suffix_is_case_sensitive() {
        assert!(has_input_suffix(Path::new("x/y/a.wem")));
        assert!(!has_input_suffix(Path::new("x/y/a.WEM")));
        assert!(!has_input_suffix(Path::new("x/y/a.wav")));
        assert!(!has_input_suffix(Path::new("x/y/wem")));
    }

    #[test]
    fn test_extract_filename_lossy() {
        assert_eq!(extract_filename_lossy(Path::new("dir/a.wem")), "a.wem");
        assert_eq!(extract_filename_lossy(Path::new("/")), "");
    }
}
