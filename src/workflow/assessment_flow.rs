//! 试题生成流程 - 流程层
//!
//! 核心职责：定义"一份原文"的完整处理流程
//!
//! 流程顺序：
//! 1. 原文末尾追加题目数量说明
//! 2. 调用模型生成试题
//! 3. 按标记拆分章节
//! 4. 渲染试题文档（选择题 + 判断题）和答案文档

use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::{
    AssessmentSections, DocumentKind, GeneratedAssessment, QuestionCounts, MCQ_HEADING,
    TRUE_FALSE_MARKER,
};
use crate::render::{PageLayout, PageSink, PaginatedRenderer};
use crate::services::AssessmentModel;
use crate::text::sectionize;
use crate::utils::truncate_text;

/// 答案文档标题
pub const ANSWER_DOC_TITLE: &str = "ANSWER KEY";

/// 试题生成流程
///
/// - 编排 模型调用 → 拆分 → 渲染
/// - 不写文件，文档内容交给调用方处理
/// - 只有模型调用失败时返回错误
pub struct AssessmentFlow<M: AssessmentModel> {
    model: M,
    layout: PageLayout,
    verbose_logging: bool,
}

impl<M: AssessmentModel> AssessmentFlow<M> {
    pub fn new(model: M, layout: PageLayout) -> Self {
        Self {
            model,
            layout,
            verbose_logging: false,
        }
    }

    /// 打开后在日志里输出模型返回内容的预览
    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }

    /// 运行一次完整的生成
    ///
    /// # 参数
    /// - `source_text`: 从 PDF 中提取的原文
    /// - `counts`: 选择题和判断题数量
    /// - `sink_factory`: 为每份文档创建一个新的绘制目标
    ///
    /// # 返回
    /// 返回试题文档和答案文档
    pub async fn run<S, F>(
        &self,
        source_text: &str,
        counts: QuestionCounts,
        sink_factory: F,
    ) -> AppResult<GeneratedAssessment<S::Output>>
    where
        S: PageSink,
        F: FnMut(DocumentKind) -> S,
    {
        let prompt_text = format!("{}{}", source_text, counts.directive());

        info!(
            "🤖 请求模型生成试题: 选择题 {} 道, 判断题 {} 道",
            counts.mcq, counts.true_false
        );
        let raw = self.model.generate_assessment(&prompt_text).await?;
        info!("✓ 模型返回 {} 字符", raw.chars().count());

        if self.verbose_logging {
            debug!("模型返回预览: {}", truncate_text(&raw, 200));
        }

        let sections = sectionize(&raw);
        render_assessment(&sections, sink_factory, self.layout)
    }
}

/// 把拆分好的章节渲染成两份文档
///
/// 试题文档先是选择题分组，再是判断题分组，各自从新的一页开始；
/// 章节为空时只绘制标题
pub fn render_assessment<S, F>(
    sections: &AssessmentSections,
    mut sink_factory: F,
    layout: PageLayout,
) -> AppResult<GeneratedAssessment<S::Output>>
where
    S: PageSink,
    F: FnMut(DocumentKind) -> S,
{
    let mut questions = PaginatedRenderer::new(sink_factory(DocumentKind::Questions), layout);
    questions.render_section(MCQ_HEADING, sections.mcq_lines());
    questions.render_section(TRUE_FALSE_MARKER, sections.true_false_lines());
    let question_doc = questions.finish()?;

    let mut answers = PaginatedRenderer::new(sink_factory(DocumentKind::Answers), layout);
    answers.render_section(ANSWER_DOC_TITLE, sections.answer_key_lines());
    let answer_doc = answers.finish()?;

    debug!(
        "渲染完成: {} {} 页, {} {} 页",
        DocumentKind::Questions,
        question_doc.page_count,
        DocumentKind::Answers,
        answer_doc.page_count
    );

    Ok(GeneratedAssessment {
        question_doc,
        answer_doc,
    })
}
