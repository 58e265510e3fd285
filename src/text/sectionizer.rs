//! 模型返回内容的章节拆分
//!
//! 模型被要求按 "选择题 / 判断题 / 答案" 三段输出，但格式不受我们控制。
//! 这里只按字面标记切分，标记缺失时对应章节为空，永远不会失败。

use tracing::{debug, warn};

use crate::models::{AssessmentSections, ANSWER_KEY_MARKER, MCQ_HEADING, TRUE_FALSE_MARKER};

/// 把模型原始输出拆成三个章节
///
/// 1. 第一次出现 `ANSWER KEY` 之前是题目，之后（含标记）是答案
/// 2. 题目中第一次出现 `TRUE/FALSE QUESTIONS` 之前是选择题，之后是判断题
/// 3. 选择题、判断题的第一行等于各自标题时去掉
/// 4. 找到答案标记时，答案的第一行无条件去掉
pub fn sectionize(raw: &str) -> AssessmentSections {
    let (questions, answers) = match raw.find(ANSWER_KEY_MARKER) {
        Some(index) => raw.split_at(index),
        None => {
            warn!("⚠️ 模型输出中没有找到 '{}'，答案文档将为空", ANSWER_KEY_MARKER);
            (raw, "")
        }
    };

    let (mcq, true_false) = match questions.find(TRUE_FALSE_MARKER) {
        Some(index) => questions.split_at(index),
        None => {
            warn!("⚠️ 模型输出中没有找到 '{}'，判断题部分将为空", TRUE_FALSE_MARKER);
            (questions, "")
        }
    };

    let sections = AssessmentSections {
        mcq_text: strip_heading(mcq, MCQ_HEADING),
        true_false_text: strip_heading(true_false, TRUE_FALSE_MARKER),
        answer_key_text: drop_first_line(answers).to_string(),
    };

    debug!(
        "章节拆分完成: 选择题 {} 字节, 判断题 {} 字节, 答案 {} 字节",
        sections.mcq_text.len(),
        sections.true_false_text.len(),
        sections.answer_key_text.len()
    );

    sections
}

/// 第一行（跳过开头的空行）去掉首尾空白后等于 `heading` 时只去掉这一行，开头的空行保留
fn strip_heading(content: &str, heading: &str) -> String {
    let mut rest = content;
    while let Some((first, tail)) = rest.split_once('\n') {
        if !first.trim().is_empty() {
            break;
        }
        rest = tail;
    }

    let (first, tail) = rest.split_once('\n').unwrap_or((rest, ""));
    if first.trim() == heading {
        let blank_prefix = &content[..content.len() - rest.len()];
        format!("{}{}", blank_prefix, tail)
    } else {
        content.to_string()
    }
}

fn drop_first_line(content: &str) -> &str {
    content.split_once('\n').map_or("", |(_, tail)| tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_A: &str = "MULTIPLE CHOICE QUESTIONS
1. What are cats? A) Birds B) Mammals C) Fish D) Reptiles
TRUE/FALSE QUESTIONS
1. Cats are mammals.
ANSWER KEY
Multiple Choice Answers:
1. B
True/False Answers:
1. True";

    #[test]
    fn test_three_sections() {
        let sections = sectionize(SCENARIO_A);
        assert_eq!(
            sections.mcq_text,
            "1. What are cats? A) Birds B) Mammals C) Fish D) Reptiles\n"
        );
        assert_eq!(sections.true_false_text, "1. Cats are mammals.\n");
        assert_eq!(
            sections.answer_key_text,
            "Multiple Choice Answers:\n1. B\nTrue/False Answers:\n1. True"
        );
    }

    #[test]
    fn test_concatenation_reconstructs_input() {
        let sections = sectionize(SCENARIO_A);
        let rebuilt = format!(
            "{}\n{}{}\n{}{}\n{}",
            MCQ_HEADING,
            sections.mcq_text,
            TRUE_FALSE_MARKER,
            sections.true_false_text,
            ANSWER_KEY_MARKER,
            sections.answer_key_text
        );
        assert_eq!(rebuilt, SCENARIO_A);
    }

    #[test]
    fn test_missing_answer_marker() {
        let raw = "MULTIPLE CHOICE QUESTIONS\n1. q\nTRUE/FALSE QUESTIONS\n1. s";
        let sections = sectionize(raw);
        assert_eq!(sections.answer_key_text, "");
        assert_eq!(sections.mcq_text, "1. q\n");
        assert_eq!(sections.true_false_text, "1. s");
    }

    #[test]
    fn test_missing_true_false_marker() {
        let raw = "MULTIPLE CHOICE QUESTIONS\n1. q\nANSWER KEY\n1. B";
        let sections = sectionize(raw);
        assert_eq!(sections.mcq_text, "1. q\n");
        assert_eq!(sections.true_false_text, "");
        assert_eq!(sections.answer_key_text, "1. B");
    }

    #[test]
    fn test_no_markers_everything_is_mcq() {
        let raw = "Sorry, I could not read that document.";
        let sections = sectionize(raw);
        assert_eq!(sections.mcq_text, raw);
        assert!(sections.true_false_text.is_empty());
        assert!(sections.answer_key_text.is_empty());
    }

    #[test]
    fn test_answer_heading_dropped_unconditionally() {
        // 标记后同一行的内容也随第一行一起去掉
        let raw = "1. q\nANSWER KEY (see below)\n1. A";
        assert_eq!(sectionize(raw).answer_key_text, "1. A");

        let raw = "1. q\nANSWER KEY";
        assert_eq!(sectionize(raw).answer_key_text, "");
    }

    #[test]
    fn test_question_heading_kept_when_not_exact() {
        let raw = "**MULTIPLE CHOICE QUESTIONS**\n1. q";
        assert_eq!(sectionize(raw).mcq_text, raw);

        let raw = "TRUE/FALSE QUESTIONS (answer T or F)\n1. s";
        assert_eq!(sectionize(raw).true_false_text, raw);
    }

    #[test]
    fn test_heading_after_blank_lines_and_crlf() {
        let raw = "\r\n\nMULTIPLE CHOICE QUESTIONS\r\n1. q\r\n";
        let sections = sectionize(raw);
        // 只去掉标题这一行，前面的空行原样保留
        assert_eq!(sections.mcq_text, "\r\n\n1. q\r\n");
        assert_eq!(sections.mcq_lines(), vec!["1. q"]);
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        let raw = "Answer Key\n1. B";
        let sections = sectionize(raw);
        assert_eq!(sections.mcq_text, raw);
        assert!(sections.answer_key_text.is_empty());
    }

    #[test]
    fn test_true_false_marker_after_answer_key_is_ignored() {
        let raw = "1. q\nANSWER KEY\nTRUE/FALSE QUESTIONS\n1. True";
        let sections = sectionize(raw);
        assert_eq!(sections.mcq_text, "1. q\n");
        assert!(sections.true_false_text.is_empty());
        assert_eq!(sections.answer_key_text, "TRUE/FALSE QUESTIONS\n1. True");
    }
}
