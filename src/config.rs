use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    /// 生成的 PDF 存放目录
    pub output_dir: String,
    /// 输出文件名是否带时间戳前缀（并发运行时避免互相覆盖）
    pub unique_output_names: bool,
    /// 未指定时的选择题数量
    pub default_mcq_count: u32,
    /// 未指定时的判断题数量
    pub default_tf_count: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.perplexity.ai".to_string(),
            llm_model_name: "sonar-pro".to_string(),
            llm_temperature: 1.7,
            llm_max_tokens: 4000,
            output_dir: "generated".to_string(),
            unique_output_names: false,
            default_mcq_count: 10,
            default_tf_count: 10,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置（会先加载当前目录下的 `.env`）
    ///
    /// 无法解析的值回退到默认值
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let default = Self::default();
        Self {
            llm_api_key: std::env::var("LLM_API_KEY")
                .or_else(|_| std::env::var("api"))
                .unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_temperature),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_max_tokens),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            unique_output_names: std::env::var("UNIQUE_OUTPUT_NAMES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.unique_output_names),
            default_mcq_count: std::env::var("DEFAULT_MCQ_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.default_mcq_count),
            default_tf_count: std::env::var("DEFAULT_TF_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.default_tf_count),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 调用大模型之前检查必填项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_overrides_only_given_fields() {
        let config = Config::from_toml_str(
            r#"
llm_api_key = "pplx-test"
default_mcq_count = 5
unique_output_names = true
"#,
        )
        .unwrap();

        assert_eq!(config.llm_api_key, "pplx-test");
        assert_eq!(config.default_mcq_count, 5);
        assert!(config.unique_output_names);
        assert_eq!(config.default_tf_count, 10);
        assert_eq!(config.llm_model_name, "sonar-pro");
    }

    #[test]
    fn test_validate_rejects_blank_key() {
        let config = Config {
            llm_api_key: "   ".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_from_toml_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(&path, "llm_max_tokens = \"lots\"").unwrap();

        let err = Config::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
        assert!(err.to_string().contains("quiz.toml"));
    }
}
