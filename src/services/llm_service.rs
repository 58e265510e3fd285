//! LLM 服务 - 业务能力层
//!
//! 只负责"根据原文生成试题"能力，不关心返回内容的格式
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Perplexity 等）

use std::future::Future;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use super::prompt::{ASSISTANT_ACKNOWLEDGEMENT, INSTRUCTION_PROMPT};
use crate::config::Config;
use crate::error::UpstreamError;

/// 试题生成能力
///
/// 返回模型的原始文本，格式只是"期望"而非保证
pub trait AssessmentModel {
    fn generate_assessment(
        &self,
        source_text: &str,
    ) -> impl Future<Output = Result<String, UpstreamError>> + Send;
}

/// LLM 服务
///
/// 职责：
/// - 组装试题生成的对话并调用 LLM API
/// - 调用失败时原样返回错误，不做重试
/// - 不解析返回内容
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 构建试题生成对话
    ///
    /// # 参数
    /// - `source_text`: 原文（已附带题目数量说明）
    ///
    /// # 返回
    /// 返回 [说明, 确认, 原文] 三条消息
    fn build_messages(
        &self,
        source_text: &str,
    ) -> Result<Vec<ChatCompletionRequestMessage>, UpstreamError> {
        let instruction = ChatCompletionRequestUserMessageArgs::default()
            .content(INSTRUCTION_PROMPT)
            .build()
            .map_err(UpstreamError::request_build)?;

        let acknowledgement = ChatCompletionRequestAssistantMessageArgs::default()
            .content(ASSISTANT_ACKNOWLEDGEMENT)
            .build()
            .map_err(UpstreamError::request_build)?;

        let content = ChatCompletionRequestUserMessageArgs::default()
            .content(source_text)
            .build()
            .map_err(UpstreamError::request_build)?;

        Ok(vec![
            ChatCompletionRequestMessage::User(instruction),
            ChatCompletionRequestMessage::Assistant(acknowledgement),
            ChatCompletionRequestMessage::User(content),
        ])
    }

    /// 发送对话并返回模型文本
    async fn send_to_llm(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, UpstreamError> {
        debug!("调用 LLM API，模型: {}", self.model_name);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(UpstreamError::request_build)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            UpstreamError::api_call_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| UpstreamError::EmptyContent {
                model: self.model_name.clone(),
            })
    }
}

impl AssessmentModel for LlmService {
    async fn generate_assessment(&self, source_text: &str) -> Result<String, UpstreamError> {
        debug!("原文长度: {} 字符", source_text.chars().count());
        let messages = self.build_messages(source_text)?;
        self.send_to_llm(messages).await
    }
}
