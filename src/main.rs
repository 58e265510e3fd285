use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use quiz_generator::models::QuestionCounts;
use quiz_generator::{logger, App, AppError, Config};
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "quizgen", version, about = "根据 PDF 讲义生成选择题、判断题和答案")]
struct Cli {
    /// 上传的 PDF 文件
    pdf: PathBuf,
    /// 选择题数量（默认取配置）
    #[arg(long, value_parser = parse_count)]
    mcq: Option<u32>,
    /// 判断题数量（默认取配置）
    #[arg(long, value_parser = parse_count)]
    tf: Option<u32>,
    /// 输出目录
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// TOML 配置文件，不指定时读取环境变量
    #[arg(long)]
    config: Option<PathBuf>,
    /// 输出文件名带时间戳前缀
    #[arg(long)]
    unique_names: bool,
    /// 只在终端预览排版结果，不写文件
    #[arg(long)]
    dry_run: bool,
}

fn parse_count(raw: &str) -> Result<u32, String> {
    QuestionCounts::parse_count(raw).map_err(|e| e.to_string())
}

/// 输入和上游错误直接展示给用户，其余属于内部故障
fn report(err: &AppError) {
    if err.is_user_facing() {
        error!("❌ 生成失败: {}", err);
    } else {
        error!("💥 内部错误: {}", err);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::from_env(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.display().to_string();
    }
    config.unique_output_names |= cli.unique_names;

    // 初始化日志
    logger::init_with_level(if config.verbose_logging { "debug" } else { "info" });

    let app = App::initialize(config)?;
    let defaults = app.default_counts();
    let counts = QuestionCounts::new(
        cli.mcq.unwrap_or(defaults.mcq),
        cli.tf.unwrap_or(defaults.true_false),
    );

    if cli.dry_run {
        let generated = app.preview(&cli.pdf, counts).await.inspect_err(report)?;
        for page in generated
            .question_doc
            .content
            .iter()
            .chain(generated.answer_doc.content.iter())
        {
            println!("{}", "-".repeat(72));
            print!("{}", page);
        }
        return Ok(());
    }

    let paths = app.run(&cli.pdf, counts).await.inspect_err(report)?;

    println!("{}", paths.question_path.display());
    println!("{}", paths.answer_path.display());
    Ok(())
}
