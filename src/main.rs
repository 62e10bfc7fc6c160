//! # favicon 生成工具 — 应用入口
//!
//! 本文件仅负责日志初始化与错误出口。
//! 业务流程在 `generator` 模块中编排，详见 `lib.rs` 架构文档。

use std::process;

use favicon_gen::{FaviconConfig, FaviconError, FaviconGenerator};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        report_failure(&err);
        process::exit(1);
    }
}

fn run() -> Result<(), FaviconError> {
    let generator = FaviconGenerator::new(FaviconConfig::default())?;
    generator.run()?;
    Ok(())
}

/// 将错误输出到标准错误；缺少源图像时附带全部候选路径指引。
fn report_failure(err: &FaviconError) {
    match err {
        FaviconError::MissingSource { candidates } => {
            eprintln!("错误: 未找到源图像。");
            eprintln!("请在以下任一路径放置源图像:");
            for candidate in candidates {
                eprintln!("  - {}", candidate.display());
            }
        }
        other => eprintln!("错误: {}", other),
    }
}
