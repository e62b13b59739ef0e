//! 输入收集模块
//!
//! 把命令行参数展开成一次"拖放"：文件原样保留，目录扫描其中的 .wem 文件。

use super::cli::AppConfig;
use super::utils;
use crate::error::{ConvertError, ConvertResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 展开所有输入参数
///
/// 文件参数不在此处校验后缀，交给 [`FileList::from_drop`] 整批判定。
///
/// [`FileList::from_drop`]: crate::controller::FileList::from_drop
pub fn collect_inputs(config: &AppConfig) -> ConvertResult<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for input in &config.inputs {
        if input.is_dir() {
            inputs.extend(scan_wem_files(input, config.recursive)?);
        } else {
            inputs.push(input.clone());
        }
    }

    Ok(inputs)
}

/// 扫描目录中的 .wem 文件（按路径排序）
pub fn scan_wem_files(dir_path: &Path, recursive: bool) -> ConvertResult<Vec<PathBuf>> {
    if !dir_path.is_dir() {
        return Err(ConvertError::InvalidInput(format!(
            "路径不是目录 / not a directory: {}",
            dir_path.display()
        )));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(dir_path).min_depth(1).max_depth(max_depth) {
        let entry = entry.map_err(|e| {
            ConvertError::Io(
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            )
        })?;

        if entry.file_type().is_file() && utils::has_input_suffix(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// 显示收集结果
pub fn show_scan_results(config: &AppConfig, inputs: &[PathBuf]) {
    if inputs.is_empty() {
        println!("⚠️  没有找到 .wem 文件 / no .wem files found");
        return;
    }

    println!("🎵 找到 {} 个文件 / {} file(s)", inputs.len(), inputs.len());

    if config.verbose {
        for (i, file) in inputs.iter().enumerate() {
            println!("   {}. {}", i + 1, utils::extract_filename_lossy(file));
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn layout() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.wem"), b"").unwrap();
        fs::write(tmp.path().join("a.wem"), b"").unwrap();
        fs::write(tmp.path().join("notes.txt"), b"").unwrap();
        fs::write(tmp.path().join("loud.WEM"), b"").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("c.wem"), b"").unwrap();
        tmp
    }

    #[test]
    fn test_scan_non_recursive() {
        let tmp = layout();
        let files = scan_wem_files(tmp.path(), false).unwrap();
        assert_eq!(files, vec![tmp.path().join("a.wem"), tmp.path().join("b.wem")]);
    }

    #[test]
    fn test_scan_recursive() {
        let tmp = layout();
        let files = scan_wem_files(tmp.path(), true).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.contains(&tmp.path().join("sub").join("c.wem")));
    }

    #[test]
    fn test_collect_keeps_file_arguments_verbatim() {
        let tmp = layout();
        let config = AppConfig {
            inputs: vec![PathBuf::from("x/track.wav"), tmp.path().to_path_buf()],
            ..AppConfig::default()
        };

        let inputs = collect_inputs(&config).unwrap();
        assert_eq!(inputs[0], PathBuf::from("x/track.wav"));
        assert_eq!(inputs.len(), 3);
    }

    #[test]
    fn test_scan_rejects_file_path() {
        let tmp = layout();
        assert!(scan_wem_files(&tmp.path().join("a.wem"), false).is_err());
    }
}
