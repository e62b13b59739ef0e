//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。

use super::constants::{decoder, defaults};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// 使用说明（对应窗口版的"帮助"对话框）
const USAGE_NOTES: &str = "\
基本功能 / Basics:
  1. 传入 .wem 文件或包含 .wem 的目录 / pass .wem files or directories containing them
  2. 转换后的 .wav 保存在输出目录（默认 ./output）/ results go to the output directory
  3. --copy 复制成功行的输出路径，--play 用默认程序打开 / copy or play converted files

注意事项 / Notes:
  - 需要 vgmstream-cli 位于 ./vgmstream/ 下，或用 --decoder 指定
  - 仅接受 .wem 后缀（区分大小写）/ only the .wem suffix is accepted (case-sensitive)";

/// 应用程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 输入文件或目录
    pub inputs: Vec<PathBuf>,

    /// 解码器路径（未指定时使用 ./vgmstream/vgmstream-cli）
    pub decoder_path: Option<PathBuf>,

    /// 输出目录
    pub output_dir: PathBuf,

    /// 目录输入是否递归扫描
    pub recursive: bool,

    /// JSON报告路径
    pub report_path: Option<PathBuf>,

    /// 完成后复制成功行的输出路径到剪贴板
    pub copy: bool,

    /// 完成后用默认程序打开成功行的输出文件
    pub play: bool,

    /// 是否显示详细信息
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            decoder_path: None,
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            recursive: false,
            report_path: None,
            copy: false,
            play: false,
            verbose: false,
        }
    }
}

/// 构建命令行定义
pub fn build_command() -> Command {
    Command::new("wemconv")
        .version(VERSION)
        .about(DESCRIPTION)
        .author("WemConv Team")
        .after_help(USAGE_NOTES)
        .arg(
            Arg::new("INPUT")
                .help("要转换的 .wem 文件或目录 / .wem files or directories to convert")
                .required(true)
                .num_args(1..)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("decoder")
                .long("decoder")
                .short('d')
                .help("vgmstream-cli 可执行文件路径 / path to the vgmstream-cli executable")
                .value_name("EXE")
                .env(decoder::ENV_OVERRIDE)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .help("输出目录 / output directory")
                .value_name("DIR")
                .default_value(defaults::OUTPUT_DIR)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .long("recursive")
                .short('r')
                .help("递归扫描目录 / scan directories recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("写出JSON运行报告 / write a JSON run report")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("copy")
                .long("copy")
                .help("复制输出路径到剪贴板 / copy output paths to the clipboard")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("play")
                .long("play")
                .help("用默认程序打开输出文件 / open outputs with the default player")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("显示详细处理信息 / verbose output")
                .action(ArgAction::SetTrue),
        )
}

/// 从解析结果创建配置
pub fn config_from_matches(matches: &ArgMatches) -> AppConfig {
    AppConfig {
        inputs: matches
            .get_many::<PathBuf>("INPUT")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        decoder_path: matches.get_one::<PathBuf>("decoder").cloned(),
        output_dir: matches
            .get_one::<PathBuf>("output-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(defaults::OUTPUT_DIR)),
        recursive: matches.get_flag("recursive"),
        report_path: matches.get_one::<PathBuf>("report").cloned(),
        copy: matches.get_flag("copy"),
        play: matches.get_flag("play"),
        verbose: matches.get_flag("verbose"),
    }
}

/// 解析命令行参数并创建配置
pub fn parse_args() -> AppConfig {
    config_from_matches(&build_command().get_matches())
}

/// 显示程序启动信息
pub fn show_startup_info(config: &AppConfig) {
    println!("🚀 WemConv v{VERSION} 启动");
    println!("📝 {DESCRIPTION}");
    if config.verbose {
        println!("📂 输出目录 / Output: {}", config.output_dir.display());
    }
    println!();
}

/// 显示程序完成信息
pub fn show_completion_info(config: &AppConfig) {
    if config.verbose {
        println!("✅ 所有任务处理完成！");
    }
}
