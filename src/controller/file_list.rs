//! 保留的输入文件列表
//!
//! 列表是显式持有的值：拖入与清空都返回新的列表，由控制器整体替换。

use crate::error::{ConvertError, ConvertResult};
use crate::tools::utils;
use std::path::PathBuf;

/// 一次运行的有序输入列表，下标即行号
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    paths: Vec<PathBuf>,
}

impl FileList {
    /// 由一次"拖放"构建列表
    ///
    /// 只有全部路径都以 `.wem` 结尾（区分大小写）时才接受，否则整批拒绝。
    /// 接受后按文件名排序。
    pub fn from_drop<I>(paths: I) -> ConvertResult<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut paths: Vec<PathBuf> = paths.into_iter().collect();

        if paths.is_empty() {
            return Err(ConvertError::InvalidInput(
                "没有可接受的文件 / nothing to drop".to_string(),
            ));
        }

        if let Some(rejected) = paths.iter().find(|p| !utils::has_input_suffix(p)) {
            return Err(ConvertError::InvalidInput(format!(
                "仅支持 .wem 文件 / only .wem files are accepted: {}",
                rejected.display()
            )));
        }

        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(Self { paths })
    }

    /// 清空后的列表
    #[inline]
    pub fn cleared() -> Self {
        Self::default()
    }

    #[inline]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_sorted_by_file_name() {
        let list = FileList::from_drop(vec![
            PathBuf::from("/z/b.wem"),
            PathBuf::from("/a/c.wem"),
            PathBuf::from("/y/a.wem"),
        ])
        .unwrap();

        let names: Vec<String> = list
            .paths()
            .iter()
            .map(|p| utils::extract_filename_lossy(p))
            .collect();
        assert_eq!(names, ["a.wem", "b.wem", "c.wem"]);
    }

    #[test]
    fn test_drop_rejected_if_any_non_wem() {
        let err = FileList::from_drop(vec![PathBuf::from("a.wem"), PathBuf::from("b.WEM")])
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInput(msg) if msg.contains("b.WEM")));
    }

    #[test]
    fn test_empty_drop_rejected() {
        assert!(FileList::from_drop(Vec::new()).is_err());
    }

    #[test]
    fn test_cleared_is_empty() {
        let list = FileList::cleared();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }
}
