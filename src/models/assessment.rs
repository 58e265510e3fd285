use std::fmt;

use crate::error::InputError;

/// 选择题章节标题
pub const MCQ_HEADING: &str = "MULTIPLE CHOICE QUESTIONS";
/// 判断题章节标题，同时也是分隔标记
pub const TRUE_FALSE_MARKER: &str = "TRUE/FALSE QUESTIONS";
/// 答案章节标记
pub const ANSWER_KEY_MARKER: &str = "ANSWER KEY";

/// 模型返回内容按章节拆分后的结果
///
/// 每个字段是该章节的原始文本（未折行、未清理记号），标题行已去掉
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentSections {
    pub mcq_text: String,
    pub true_false_text: String,
    pub answer_key_text: String,
}

impl AssessmentSections {
    /// 选择题正文行
    pub fn mcq_lines(&self) -> Vec<&str> {
        section_lines(&self.mcq_text)
    }

    /// 判断题正文行
    pub fn true_false_lines(&self) -> Vec<&str> {
        section_lines(&self.true_false_text)
    }

    /// 答案正文行
    pub fn answer_key_lines(&self) -> Vec<&str> {
        section_lines(&self.answer_key_text)
    }
}

/// 去掉首尾空白后按行拆分；空章节没有任何行
fn section_lines(text: &str) -> Vec<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().collect()
}

/// 用户要求的题目数量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCounts {
    pub mcq: u32,
    pub true_false: u32,
}

impl QuestionCounts {
    pub fn new(mcq: u32, true_false: u32) -> Self {
        Self { mcq, true_false }
    }

    /// 解析表单或命令行里的数量字段
    pub fn parse_count(raw: &str) -> Result<u32, InputError> {
        raw.trim().parse().map_err(|_| InputError::InvalidCount {
            value: raw.to_string(),
        })
    }

    /// 追加到原文后面的数量说明
    pub fn directive(&self) -> String {
        format!(
            "\nNumber of MCQ = {}\nNumber of True/False = {}",
            self.mcq, self.true_false
        )
    }
}

/// 一次生成产出的两份文档
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Questions,
    Answers,
}

impl DocumentKind {
    /// 默认输出文件名
    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentKind::Questions => "question.pdf",
            DocumentKind::Answers => "answer.pdf",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Questions => write!(f, "试题"),
            DocumentKind::Answers => write!(f, "答案"),
        }
    }
}

/// 渲染完成的文档，生成后不再修改
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument<T> {
    /// 第一页的标题
    pub title: String,
    pub page_count: usize,
    pub content: T,
}

/// 一次生成的结果
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAssessment<T> {
    pub question_doc: RenderedDocument<T>,
    pub answer_doc: RenderedDocument<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(QuestionCounts::parse_count(" 12 ").unwrap(), 12);
        assert!(matches!(
            QuestionCounts::parse_count("ten"),
            Err(InputError::InvalidCount { .. })
        ));
        assert!(QuestionCounts::parse_count("-3").is_err());
    }

    #[test]
    fn test_directive_format() {
        assert_eq!(
            QuestionCounts::new(1, 2).directive(),
            "\nNumber of MCQ = 1\nNumber of True/False = 2"
        );
    }

    #[test]
    fn test_section_lines_trim_outer_blank_lines() {
        let sections = AssessmentSections {
            mcq_text: "\n1. q\n\n2. q\r\n\n".to_string(),
            ..Default::default()
        };
        assert_eq!(sections.mcq_lines(), vec!["1. q", "", "2. q"]);
        assert!(sections.answer_key_lines().is_empty());
    }
}
