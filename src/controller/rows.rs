//! 表格行状态

use crate::processing::Outcome;
use crate::tools::utils;
use std::path::{Path, PathBuf};

/// 单行：源文件与转换结果
///
/// `outcome` 为 `None` 表示尚未处理。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowState {
    source: PathBuf,
    outcome: Option<Outcome>,
}

impl RowState {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            outcome: None,
        }
    }

    #[inline]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// 源文件列显示（只显示文件名）
    #[inline]
    pub fn source_name(&self) -> String {
        utils::extract_filename_lossy(&self.source)
    }

    #[inline]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// 输出列显示，未处理时为空串
    pub fn output_text(&self) -> String {
        self.outcome
            .as_ref()
            .map(Outcome::short_text)
            .unwrap_or_default()
    }

    /// 成功时的输出路径
    #[inline]
    pub fn output_path(&self) -> Option<&Path> {
        self.outcome.as_ref().and_then(Outcome::output_path)
    }

    #[inline]
    pub(crate) fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        self.outcome = None;
    }
}
