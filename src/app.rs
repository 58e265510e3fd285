//! 编排层（Orchestration Layer）
//!
//! 持有配置和模型服务，负责读取上传的 PDF、调用流程、写出结果文件。
//!
//! ```text
//! App (读文件 / 写文件)
//!     ↓
//! workflow::AssessmentFlow (模型 → 拆分 → 渲染)
//!     ↓
//! services (能力层：pdf_extractor / llm_service)
//! ```

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppResult, FileError, InputError};
use crate::models::{DocumentKind, GeneratedAssessment, QuestionCounts};
use crate::render::{MemorySink, PageLayout, PdfSink, RecordedPage};
use crate::services::{AssessmentModel, LlmService, PdfExtractor};
use crate::utils::logging::{log_run_complete, log_startup};
use crate::workflow::AssessmentFlow;

/// 写出的两份文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub question_path: PathBuf,
    pub answer_path: PathBuf,
}

/// 应用主结构
pub struct App<M: AssessmentModel = LlmService> {
    config: Config,
    flow: AssessmentFlow<M>,
}

impl App<LlmService> {
    /// 初始化应用：检查配置并创建 LLM 服务
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        let model = LlmService::new(&config);
        Ok(Self::with_model(config, model))
    }
}

impl<M: AssessmentModel> App<M> {
    /// 使用指定的模型实现创建应用
    pub fn with_model(config: Config, model: M) -> Self {
        let flow = AssessmentFlow::new(model, PageLayout::A4)
            .with_verbose_logging(config.verbose_logging);
        Self { config, flow }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 未指定数量时使用配置里的默认值
    pub fn default_counts(&self) -> QuestionCounts {
        QuestionCounts::new(self.config.default_mcq_count, self.config.default_tf_count)
    }

    /// 生成试题并写出 PDF 文件
    ///
    /// # 参数
    /// - `input`: 上传的 PDF 路径
    /// - `counts`: 题目数量
    ///
    /// # 返回
    /// 返回试题文件和答案文件的路径
    pub async fn run(&self, input: &Path, counts: QuestionCounts) -> AppResult<OutputPaths> {
        log_startup(&self.config, input);

        let source_text = self.load_source(input).await?;
        let generated = self
            .flow
            .run(&source_text, counts, |_| PdfSink::new(PageLayout::A4))
            .await?;

        let paths = self.write_outputs(&generated).await?;
        log_run_complete(
            generated.question_doc.page_count,
            generated.answer_doc.page_count,
            &paths.question_path,
            &paths.answer_path,
        );
        Ok(paths)
    }

    /// 生成试题但不写文件，返回排版后的页面记录
    pub async fn preview(
        &self,
        input: &Path,
        counts: QuestionCounts,
    ) -> AppResult<GeneratedAssessment<Vec<RecordedPage>>> {
        let source_text = self.load_source(input).await?;
        self.flow
            .run(&source_text, counts, |_| MemorySink::new())
            .await
    }

    /// 读取上传的文件并提取文字
    async fn load_source(&self, input: &Path) -> AppResult<String> {
        let bytes = tokio::fs::read(input)
            .await
            .map_err(|source| InputError::ReadFailed {
                path: input.display().to_string(),
                source,
            })?;

        PdfExtractor::ensure_pdf(input, &bytes)?;

        // pdf-extract 是同步解析，放到阻塞线程池里执行
        let text = tokio::task::spawn_blocking(move || PdfExtractor::extract_text(&bytes))
            .await
            .map_err(|e| InputError::ExtractionFailed {
                reason: e.to_string(),
            })??;

        info!("📄 提取原文 {} 字符", text.chars().count());
        Ok(text)
    }

    /// 写出两份 PDF，目录不存在时创建
    async fn write_outputs(
        &self,
        generated: &GeneratedAssessment<Vec<u8>>,
    ) -> AppResult<OutputPaths> {
        let output_dir = Path::new(&self.config.output_dir);
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| FileError::CreateDirFailed {
                path: output_dir.display().to_string(),
                source,
            })?;

        let paths = self.output_paths(output_dir);
        if !self.config.unique_output_names && paths.question_path.exists() {
            warn!(
                "⚠️ 覆盖已有文件: {}",
                paths.question_path.display()
            );
        }

        // 先写临时文件，两份都写成功后再改名
        let question_staging = staging_path(&paths.question_path);
        let answer_staging = staging_path(&paths.answer_path);
        let staged = async {
            write_file(&question_staging, &generated.question_doc.content).await?;
            write_file(&answer_staging, &generated.answer_doc.content).await
        }
        .await;
        if let Err(e) = staged {
            discard(&question_staging).await;
            discard(&answer_staging).await;
            return Err(e.into());
        }

        promote(&question_staging, &paths.question_path).await?;
        promote(&answer_staging, &paths.answer_path).await?;
        Ok(paths)
    }

    fn output_paths(&self, output_dir: &Path) -> OutputPaths {
        let prefix = if self.config.unique_output_names {
            format!("{}_", chrono::Local::now().format("%Y%m%d_%H%M%S_%3f"))
        } else {
            String::new()
        };

        let path_for = |kind: DocumentKind| output_dir.join(format!("{}{}", prefix, kind.file_name()));
        OutputPaths {
            question_path: path_for(DocumentKind::Questions),
            answer_path: path_for(DocumentKind::Answers),
        }
    }
}

/// 同目录下的临时文件名：`.question.pdf.part`
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.part", name))
}

async fn promote(staging: &Path, target: &Path) -> Result<(), FileError> {
    tokio::fs::rename(staging, target)
        .await
        .map_err(|source| FileError::WriteFailed {
            path: target.display().to_string(),
            source,
        })
}

async fn discard(staging: &Path) {
    if let Err(e) = tokio::fs::remove_file(staging).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("⚠️ 清理临时文件失败 ({}): {}", staging.display(), e);
        }
    }
}

async fn write_file(path: &Path, content: &[u8]) -> Result<(), FileError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|source| FileError::WriteFailed {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ConfigError, UpstreamError};
    use crate::models::RenderedDocument;

    struct CannedModel;

    impl AssessmentModel for CannedModel {
        async fn generate_assessment(&self, _source_text: &str) -> Result<String, UpstreamError> {
            Ok("MULTIPLE CHOICE QUESTIONS\n1. q\nANSWER KEY\n1. B".to_string())
        }
    }

    fn config_in(dir: &Path, unique: bool) -> Config {
        Config {
            llm_api_key: "test-key".to_string(),
            output_dir: dir.join("out").display().to_string(),
            unique_output_names: unique,
            ..Config::default()
        }
    }

    #[test]
    fn test_initialize_requires_api_key() {
        let result = App::initialize(Config::default());
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::MissingApiKey))
        ));
    }

    #[test]
    fn test_fixed_output_names() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::with_model(config_in(dir.path(), false), CannedModel);
        let paths = app.output_paths(dir.path());
        assert_eq!(paths.question_path, dir.path().join("question.pdf"));
        assert_eq!(paths.answer_path, dir.path().join("answer.pdf"));
    }

    #[test]
    fn test_unique_output_names_share_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::with_model(config_in(dir.path(), true), CannedModel);
        let paths = app.output_paths(dir.path());

        let question = paths.question_path.file_name().unwrap().to_string_lossy().to_string();
        let answer = paths.answer_path.file_name().unwrap().to_string_lossy().to_string();
        assert!(question.ends_with("_question.pdf"));
        assert_eq!(
            question.trim_end_matches("question.pdf"),
            answer.trim_end_matches("answer.pdf")
        );
    }

    #[test]
    fn test_staging_path_is_hidden_sibling() {
        let path = Path::new("generated/answer.pdf");
        assert_eq!(staging_path(path), Path::new("generated/.answer.pdf.part"));
    }

    #[tokio::test]
    async fn test_failed_answer_write_keeps_previous_pair() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), false);
        let output_dir = PathBuf::from(&config.output_dir);
        std::fs::create_dir_all(&output_dir).unwrap();
        std::fs::write(output_dir.join("question.pdf"), b"old question").unwrap();
        std::fs::write(output_dir.join("answer.pdf"), b"old answer").unwrap();
        // 答案的临时文件位置被目录占住，写入必然失败
        std::fs::create_dir(output_dir.join(".answer.pdf.part")).unwrap();

        let app = App::with_model(config, CannedModel);
        let generated = GeneratedAssessment {
            question_doc: RenderedDocument {
                title: "MULTIPLE CHOICE QUESTIONS".to_string(),
                page_count: 1,
                content: b"new question".to_vec(),
            },
            answer_doc: RenderedDocument {
                title: "ANSWER KEY".to_string(),
                page_count: 1,
                content: b"new answer".to_vec(),
            },
        };

        let result = app.write_outputs(&generated).await;
        assert!(matches!(
            result,
            Err(AppError::File(FileError::WriteFailed { .. }))
        ));
        assert_eq!(std::fs::read(output_dir.join("question.pdf")).unwrap(), b"old question");
        assert_eq!(std::fs::read(output_dir.join("answer.pdf")).unwrap(), b"old answer");
        assert!(!output_dir.join(".question.pdf.part").exists());
    }

    #[tokio::test]
    async fn test_write_outputs_replaces_pair() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), false);
        let output_dir = PathBuf::from(&config.output_dir);
        let app = App::with_model(config, CannedModel);
        let doc = |content: &[u8]| RenderedDocument {
            title: String::new(),
            page_count: 1,
            content: content.to_vec(),
        };
        let generated = GeneratedAssessment {
            question_doc: doc(b"q".as_slice()),
            answer_doc: doc(b"a".as_slice()),
        };

        let paths = app.write_outputs(&generated).await.unwrap();
        assert_eq!(std::fs::read(&paths.question_path).unwrap(), b"q");
        assert_eq!(std::fs::read(&paths.answer_path).unwrap(), b"a");
        assert!(!output_dir.join(".question.pdf.part").exists());
        assert!(!output_dir.join(".answer.pdf.part").exists());
    }

    #[tokio::test]
    async fn test_rejects_non_pdf_upload() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, "Cats are mammals.").unwrap();

        let app = App::with_model(config_in(dir.path(), false), CannedModel);
        let result = app.run(&input, app.default_counts()).await;
        assert!(matches!(result, Err(AppError::Input(InputError::NotPdf { .. }))));
    }

    #[test]
    fn test_missing_upload_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::with_model(config_in(dir.path(), false), CannedModel);
        let result = tokio_test::block_on(
            app.preview(&dir.path().join("missing.pdf"), app.default_counts()),
        );
        assert!(matches!(
            result,
            Err(AppError::Input(InputError::ReadFailed { .. }))
        ));
    }
}
