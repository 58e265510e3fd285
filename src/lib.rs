//! # Quiz Generator
//!
//! 根据上传的 PDF 讲义，调用大模型生成选择题、判断题和答案，并排版成两份 PDF
//!
//! ## 架构设计
//!
//! ### ① 文本与渲染（Text / Render）
//! - `text/` - 章节拆分、数学记号清理、折行，全部是纯函数
//! - `render/` - 字体度量、`PageSink` 绘制抽象、分页渲染器
//! - `PdfSink` - 基于 lopdf 的 PDF 写入
//! - `MemorySink` - 内存记录，用于测试和预览
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `PdfExtractor` - 从 PDF 中提取文字
//! - `LlmService` - 调用大模型生成试题
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份原文"的完整处理流程
//! - `AssessmentFlow` - 流程编排（数量说明 → LLM → 拆分 → 渲染）
//!
//! ### ④ 编排层（Orchestration）
//! - `app` - 读取上传文件、写出结果文件
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod render;
pub mod services;
pub mod text;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, OutputPaths};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AssessmentSections, GeneratedAssessment, QuestionCounts, RenderedDocument};
pub use render::{MemorySink, PageLayout, PageSink, PdfSink};
pub use services::{AssessmentModel, LlmService, PdfExtractor};
pub use workflow::AssessmentFlow;
