//! 界面控制器
//!
//! 持有输入列表、表格行与总进度，负责启动工作线程并在自身线程上应用其事件。
//!
//! ## 状态机
//!
//! `Idle → Running → (ItemDone)* → Completed → Idle`
//!
//! - 运行中再次启动返回 [`ConvertError::AlreadyRunning`]，而不是依赖按钮禁用
//! - 运行中替换或清空列表同样被拒绝
//! - 单项失败不改变批次状态；只有解码器缺失会让本次运行以错误结束

mod file_list;
mod rows;

pub use file_list::FileList;
pub use rows::RowState;

use crate::audio::Decoder;
use crate::desktop::{ClipboardSink, Launcher};
use crate::error::{ConvertError, ConvertResult};
use crate::processing::{ConversionWorker, RunSummary, WorkerEvent, WorkerHandle};
use crossbeam_channel::RecvTimeoutError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// 控制器运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
}

/// 应用一次工作事件后的界面更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// 第 n 行的结果已写入
    Row(usize),
    /// 总进度已更新
    Progress(u8),
    /// 本次运行结束
    Completed(RunSummary),
}

pub struct Controller {
    decoder: Arc<dyn Decoder>,
    output_dir: PathBuf,
    files: FileList,
    rows: Vec<RowState>,
    progress: u8,
    state: RunState,
    worker: Option<WorkerHandle>,
}

impl Controller {
    pub fn new(decoder: Arc<dyn Decoder>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            decoder,
            output_dir: output_dir.into(),
            files: FileList::cleared(),
            rows: Vec::new(),
            progress: 0,
            state: RunState::Idle,
            worker: None,
        }
    }

    // ==================== 列表管理 ====================

    /// 接受一次拖放，替换当前列表并重建表格
    pub fn accept_drop<I>(&mut self, paths: I) -> ConvertResult<usize>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.ensure_not_running()?;
        let files = FileList::from_drop(paths)?;
        self.replace_files(files)?;
        Ok(self.rows.len())
    }

    /// 用给定列表替换当前列表，运行中拒绝
    fn replace_files(&mut self, files: FileList) -> ConvertResult<()> {
        self.ensure_not_running()?;
        self.rows = files.paths().iter().cloned().map(RowState::new).collect();
        self.files = files;
        self.state = RunState::Idle;
        tracing::debug!(rows = self.rows.len(), "file list replaced");
        Ok(())
    }

    /// 清空表格与列表
    pub fn clear(&mut self) -> ConvertResult<()> {
        self.replace_files(FileList::cleared())?;
        self.progress = 0;
        Ok(())
    }

    // ==================== 运行控制 ====================

    /// 启动转换
    ///
    /// - `Ok(true)` - 已启动工作线程
    /// - `Ok(false)` - 列表为空，未创建工作线程
    /// - `Err(AlreadyRunning)` - 已有运行中的任务
    pub fn start_conversion(&mut self) -> ConvertResult<bool> {
        self.ensure_not_running()?;

        if self.files.is_empty() {
            return Ok(false);
        }

        self.progress = 0;
        self.rows.iter_mut().for_each(RowState::reset);

        let worker = ConversionWorker::new(
            self.files.paths().to_vec(),
            Arc::clone(&self.decoder),
            self.output_dir.clone(),
        );
        self.worker = Some(worker.spawn()?);
        self.state = RunState::Running;

        tracing::info!(files = self.files.len(), "worker started");
        Ok(true)
    }

    /// 等待并应用下一个工作事件
    ///
    /// 超时或空闲时返回 `Ok(None)`；事件通道断开时回收工作线程并返回 `Completed`。
    /// 工作线程以致命错误结束时控制器回到 `Idle` 并返回该错误。
    pub fn next_update(&mut self, timeout: Duration) -> ConvertResult<Option<Update>> {
        let Some(worker) = self.worker.as_ref() else {
            return Ok(None);
        };

        match worker.events().recv_timeout(timeout) {
            Ok(event) => Ok(self.apply_event(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => self.finish_run().map(Some),
        }
    }

    /// 阻塞直到本次运行结束，每次更新后回调
    ///
    /// 没有运行中的任务时立即返回 `Ok(None)`。
    pub fn run_to_completion<F>(
        &mut self,
        poll_interval: Duration,
        mut on_update: F,
    ) -> ConvertResult<Option<RunSummary>>
    where
        F: FnMut(&Self, &Update),
    {
        while self.is_running() {
            if let Some(update) = self.next_update(poll_interval)? {
                on_update(self, &update);
                if let Update::Completed(summary) = update {
                    return Ok(Some(summary));
                }
            }
        }
        Ok(None)
    }

    /// 应用事件；指向不存在的行时不产生更新
    fn apply_event(&mut self, event: WorkerEvent) -> Option<Update> {
        match event {
            WorkerEvent::ItemDone { index, outcome } => match self.rows.get_mut(index) {
                Some(row) => {
                    row.set_outcome(outcome);
                    Some(Update::Row(index))
                }
                None => {
                    tracing::warn!(index, "completion event for unknown row");
                    None
                }
            },
            WorkerEvent::Progress(value) => {
                self.progress = value;
                Some(Update::Progress(value))
            }
        }
    }

    fn finish_run(&mut self) -> ConvertResult<Update> {
        let worker = self.worker.take().ok_or(ConvertError::WorkerPanicked)?;

        match worker.join() {
            Ok(summary) => {
                self.state = RunState::Completed;
                Ok(Update::Completed(summary))
            }
            Err(e) => {
                self.state = RunState::Idle;
                tracing::error!("run aborted: {e}");
                Err(e)
            }
        }
    }

    fn ensure_not_running(&self) -> ConvertResult<()> {
        if self.is_running() {
            Err(ConvertError::AlreadyRunning)
        } else {
            Ok(())
        }
    }

    // ==================== 状态查询 ====================

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// "转换"动作是否可用
    #[inline]
    pub fn is_start_enabled(&self) -> bool {
        !self.is_running()
    }

    #[inline]
    pub fn rows(&self) -> &[RowState] {
        &self.rows
    }

    #[inline]
    pub fn files(&self) -> &FileList {
        &self.files
    }

    #[inline]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[inline]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    // ==================== 选择操作 ====================
    // 复制与播放共用同一规则：只有转换成功的行参与，失败行与未处理行都跳过。

    /// 选中行中转换成功的输出路径（去重，按行号升序）
    fn selected_outputs<'a>(&'a self, selection: &[usize]) -> impl Iterator<Item = &'a Path> {
        selection
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(move |row| self.rows.get(row))
            .filter_map(RowState::output_path)
    }

    /// 选中行的输出路径文本，每个路径一项
    fn copy_lines(&self, selection: &[usize]) -> Vec<String> {
        self.selected_outputs(selection)
            .map(|p| p.display().to_string())
            .collect()
    }

    /// 复制到剪贴板的文本（每行一个路径），没有可复制内容时为 `None`
    pub fn copy_text(&self, selection: &[usize]) -> Option<String> {
        let lines = self.copy_lines(selection);

        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    /// 可播放的输出文件
    pub fn playable_paths(&self, selection: &[usize]) -> Vec<PathBuf> {
        self.selected_outputs(selection)
            .map(Path::to_path_buf)
            .collect()
    }

    /// 单行的完整输出路径（右键菜单"复制路径"）
    pub fn copy_row_path(&self, row: usize) -> Option<&Path> {
        self.rows.get(row).and_then(RowState::output_path)
    }

    /// 复制选中行到剪贴板，返回复制的路径数
    pub fn copy_selected(
        &self,
        selection: &[usize],
        clipboard: &mut dyn ClipboardSink,
    ) -> ConvertResult<usize> {
        let lines = self.copy_lines(selection);
        if lines.is_empty() {
            return Ok(0);
        }

        clipboard.set_text(&lines.join("\n"))?;
        Ok(lines.len())
    }

    /// 用默认程序打开选中行的输出文件，返回打开的文件数
    pub fn play_selected(
        &self,
        selection: &[usize],
        launcher: &dyn Launcher,
    ) -> ConvertResult<usize> {
        let paths = self.playable_paths(selection);
        for path in &paths {
            launcher.open(path)?;
        }
        Ok(paths.len())
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        // 等待工作线程结束，避免输出文件写到一半
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
