//! 输出格式化模块
//!
//! 负责结果表格、进度条与JSON运行报告。

use crate::controller::{Controller, RowState};
use crate::error::{ConvertError, ConvertResult};
use crate::processing::{Outcome, RunSummary};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;
use std::path::Path;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 进度条宽度（字符）
const PROGRESS_BAR_WIDTH: usize = 20;

/// 渲染结果表格（源文件 / 输出文件）
pub fn render_rows(rows: &[RowState]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "源文件 / Source", "输出文件 / Output"]);

    for (index, row) in rows.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(row.source_name()),
            Cell::new(row.output_text()),
        ]);
    }

    table.to_string()
}

/// 渲染文本进度条：`[#####...............]  25%`
pub fn render_progress(value: u8) -> String {
    let value = value.min(100) as usize;
    let filled = value * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}] {value:>3}%",
        "#".repeat(filled),
        ".".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

/// 单行报告
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RowReport {
    pub index: usize,
    pub source: String,
    pub status: RowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 行状态（报告用）
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Pending,
    Converted,
    Failed,
}

/// 完整运行报告
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub tool_version: String,
    pub timestamp: String,
    pub output_dir: String,
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
    pub rows: Vec<RowReport>,
}

impl RowReport {
    fn from_row(index: usize, row: &RowState) -> Self {
        let (status, output, error) = match row.outcome() {
            None => (RowStatus::Pending, None, None),
            Some(Outcome::Converted(path)) => {
                (RowStatus::Converted, Some(path.display().to_string()), None)
            }
            Some(Outcome::Failed(message)) => (RowStatus::Failed, None, Some(message.clone())),
        };

        Self {
            index,
            source: row.source().display().to_string(),
            status,
            output,
            error,
        }
    }
}

/// 由控制器当前状态与运行统计生成报告
pub fn build_report(controller: &Controller, summary: &RunSummary) -> RunReport {
    RunReport {
        tool_version: VERSION.to_string(),
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        output_dir: summary.output_dir.display().to_string(),
        total: summary.total,
        converted: summary.converted,
        failed: summary.failed,
        elapsed_ms: summary.elapsed.as_millis() as u64,
        rows: controller
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| RowReport::from_row(index, row))
            .collect(),
    }
}

/// 写出JSON报告
pub fn write_report(path: &Path, report: &RunReport) -> ConvertResult<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| ConvertError::Report(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// 显示运行统计
pub fn show_run_summary(summary: &RunSummary) {
    println!();
    println!("📊 转换完成 / Conversion finished");
    println!("   成功 / Converted: {} / {}", summary.converted, summary.total);
    if summary.failed > 0 {
        println!("   失败 / Failed: {}", summary.failed);
    }
    println!("   成功率 / Success rate: {:.1}%", summary.success_rate());
    println!("   输出目录 / Output: {}", summary.output_dir.display());
}
