//! 流程层（Workflow Layer）
//!
//! 定义"一份原文 → 两份文档"的完整处理流程，不持有文件或网络资源

pub mod assessment_flow;

pub use assessment_flow::{render_assessment, AssessmentFlow, ANSWER_DOC_TITLE};
