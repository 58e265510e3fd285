/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use std::path::Path;
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
/// - `input`: 待处理的 PDF 路径
pub fn log_startup(config: &Config, input: &Path) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 试题生成");
    info!("📄 输入文件: {}", input.display());
    info!("🤖 模型: {} @ {}", config.llm_model_name, config.llm_api_base_url);
    info!("📁 输出目录: {}", config.output_dir);
    info!("{}", "=".repeat(60));
}

/// 记录生成完成信息
///
/// # 参数
/// - `question_pages`: 试题文档页数
/// - `answer_pages`: 答案文档页数
/// - `question_path`: 试题文件路径
/// - `answer_path`: 答案文件路径
pub fn log_run_complete(
    question_pages: usize,
    answer_pages: usize,
    question_path: &Path,
    answer_path: &Path,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 生成完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 试题: {} ({} 页)", question_path.display(), question_pages);
    info!("✅ 答案: {} ({} 页)", answer_path.display(), answer_pages);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars_not_bytes() {
        assert_eq!(truncate_text("λλλλ", 2), "λλ...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}
