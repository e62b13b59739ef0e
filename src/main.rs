//! WemConv - 主程序入口
//!
//! 纯流程控制器：主线程扮演界面线程，驱动控制器并渲染其状态。

use anyhow::Context;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wem_converter::{
    Controller, ConvertError, Update, VgmstreamDecoder,
    error::ErrorCategory,
    tools::{self, AppConfig, constants::defaults},
};

/// 错误退出码定义
mod exit_codes {
    /// 通用错误
    pub const GENERAL_ERROR: i32 = 1;
    /// 输入错误
    pub const INPUT_ERROR: i32 = 2;
    /// 解码器缺失
    pub const DECODER_ERROR: i32 = 3;
    /// 资源/并发错误
    pub const RESOURCE_ERROR: i32 = 5;
}

/// 获取错误建议文本
fn get_error_suggestion(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Input => {
            "仅接受 .wem 文件，使用 --help 查看完整用法 / Only .wem files are accepted, use --help to see full usage"
        }
        ErrorCategory::Decoder => {
            "将 vgmstream-cli 放在 ./vgmstream/ 下或使用 --decoder 指定 / Put vgmstream-cli under ./vgmstream/ or pass --decoder"
        }
        ErrorCategory::Io => {
            "检查路径是否存在且可写 / Check that paths exist and are writable"
        }
        ErrorCategory::Resource => {
            "资源不可用，请稍后重试 / Resource unavailable, retry later"
        }
        ErrorCategory::Other => "请检查输入与参数设置 / Please check inputs and options",
    }
}

/// 错误处理和建议
fn handle_error(error: anyhow::Error) -> ! {
    eprintln!("[ERROR] 错误 / Error: {error:#}");

    let category = error
        .downcast_ref::<ConvertError>()
        .map(ErrorCategory::from_error)
        .unwrap_or(ErrorCategory::Other);
    eprintln!("[INFO] 类别 / Category: {}", category.display_name());
    eprintln!("[INFO] 建议 / Suggestion: {}", get_error_suggestion(category));

    let exit_code = match category {
        ErrorCategory::Input => exit_codes::INPUT_ERROR,
        ErrorCategory::Decoder => exit_codes::DECODER_ERROR,
        ErrorCategory::Resource => exit_codes::RESOURCE_ERROR,
        ErrorCategory::Io | ErrorCategory::Other => exit_codes::GENERAL_ERROR,
    };

    process::exit(exit_code);
}

/// 初始化日志（RUST_LOG 优先，--verbose 时默认 debug）
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wem_converter={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 复制/播放：对所有行执行，规则由控制器统一过滤
#[cfg(feature = "desktop")]
fn apply_selection_actions(config: &AppConfig, controller: &Controller) -> anyhow::Result<()> {
    use wem_converter::desktop::{SystemClipboard, SystemLauncher};

    let selection: Vec<usize> = (0..controller.rows().len()).collect();

    if config.copy {
        let mut clipboard = SystemClipboard::new()?;
        let copied = controller.copy_selected(&selection, &mut clipboard)?;
        println!("📋 已复制 {copied} 个路径 / copied {copied} path(s)");
    }

    if config.play {
        let opened = controller.play_selected(&selection, &SystemLauncher)?;
        println!("▶️  已打开 {opened} 个文件 / opened {opened} file(s)");
    }

    Ok(())
}

#[cfg(not(feature = "desktop"))]
fn apply_selection_actions(config: &AppConfig, _controller: &Controller) -> anyhow::Result<()> {
    if config.copy || config.play {
        eprintln!(
            "[WARNING] 未启用 desktop 功能，跳过复制/播放 / desktop feature disabled, skipping copy/play"
        );
    }
    Ok(())
}

/// 应用程序主逻辑
fn run(config: &AppConfig) -> anyhow::Result<()> {
    // 1. 收集输入（相当于一次拖放）
    let inputs = tools::collect_inputs(config)?;
    tools::show_scan_results(config, &inputs);
    if inputs.is_empty() {
        return Ok(());
    }

    // 2. 准备控制器
    let decoder = VgmstreamDecoder::locate(config.decoder_path.as_deref())?;
    if config.verbose {
        println!("🔧 解码器 / Decoder: {}", decoder.executable().display());
    }
    let mut controller = Controller::new(Arc::new(decoder), config.output_dir.clone());
    controller.accept_drop(inputs)?;

    // 3. 启动并在主线程上应用事件
    if !controller.start_conversion()? {
        return Ok(());
    }

    let total = controller.rows().len();
    let summary = controller.run_to_completion(defaults::EVENT_POLL_INTERVAL, |c, update| {
        match update {
            Update::Row(index) => {
                let Some(row) = c.rows().get(*index) else {
                    return;
                };
                println!(
                    "[{}/{}] {} -> {}",
                    index + 1,
                    total,
                    row.source_name(),
                    row.output_text()
                );
            }
            Update::Progress(value) => {
                if config.verbose {
                    println!("   {}", tools::render_progress(*value));
                }
            }
            Update::Completed(_) => {}
        }
    })?;

    println!();
    println!("{}", tools::render_rows(controller.rows()));

    // 4. 报告与后续动作
    if let Some(summary) = summary {
        tools::show_run_summary(&summary);

        if let Some(report_path) = &config.report_path {
            let report = tools::build_report(&controller, &summary);
            tools::write_report(report_path, &report)
                .with_context(|| format!("写出报告失败 / writing {}", report_path.display()))?;
            println!("📄 报告 / Report: {}", report_path.display());
        }
    }

    apply_selection_actions(config, &controller)
}

fn main() {
    let config = tools::parse_args();
    init_tracing(config.verbose);

    tools::show_startup_info(&config);

    match run(&config) {
        Ok(()) => tools::show_completion_info(&config),
        Err(error) => handle_error(error),
    }
}
