use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
///
/// 只有 `Input` 和 `Upstream` 会在正常流程中中断一次生成；
/// 字形问题和缺失章节在渲染层内部降级处理，不会出现在这里。
#[derive(Debug, Error)]
pub enum AppError {
    /// 上传内容或参数错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 大模型服务调用错误
    #[error("上游服务错误: {0}")]
    Upstream(#[from] UpstreamError),
    /// PDF 序列化错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 输入错误：上传的文件不是可提取文字的 PDF，或题目数量不是数字
#[derive(Debug, Error)]
pub enum InputError {
    /// 文件不是 PDF
    #[error("请上传有效的 PDF 文件: {path}")]
    NotPdf { path: String },
    /// 读取上传文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// PDF 文本提取失败
    #[error("PDF 文本提取失败: {reason}")]
    ExtractionFailed { reason: String },
    /// PDF 中没有任何文字（可能是扫描件）
    #[error("PDF 中没有可提取的文字")]
    NoExtractableText,
    /// 题目数量无法解析
    #[error("题目数量必须是非负整数: '{value}'")]
    InvalidCount { value: String },
}

/// 大模型服务错误，原样上报，不做重试
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// 构建请求失败
    #[error("构建 LLM 请求失败: {source}")]
    RequestBuild {
        #[source]
        source: BoxedSource,
    },
    /// API 调用失败（网络、鉴权、额度）
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: BoxedSource,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 字体无法编码某个字符
///
/// 渲染器在绘制时捕获该错误，把该字符替换为 `?` 后重试，不会向外传播。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlyphError {
    #[error("字体 {font} 无法编码字符 {ch:?}")]
    Unencodable { ch: char, font: &'static str },
}

/// PDF 序列化错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 页面内容流编码失败
    #[error("页面内容编码失败: {reason}")]
    Encode { reason: String },
    /// 文档保存失败
    #[error("PDF 保存失败: {reason}")]
    Save { reason: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 缺少 API 密钥
    #[error("未配置 LLM API 密钥 (环境变量 LLM_API_KEY 或 api)")]
    MissingApiKey,
}

// ========== 便捷构造函数 ==========

impl UpstreamError {
    /// 创建请求构建错误
    pub fn request_build(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        UpstreamError::RequestBuild {
            source: Box::new(source),
        }
    }

    /// 创建LLM API调用错误
    pub fn api_call_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        UpstreamError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        }
    }
}

impl AppError {
    /// 是否属于会中断流程、需要展示给用户的错误
    pub fn is_user_facing(&self) -> bool {
        matches!(self, AppError::Input(_) | AppError::Upstream(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
