//! PDF 文本提取服务 - 业务能力层
//!
//! 只负责"从上传的 PDF 中取出文字"能力

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::debug;

use crate::error::InputError;

/// 页与页之间的分隔符（换页符）
pub const PAGE_SEPARATOR: char = '\u{000C}';

const PDF_MAGIC: &[u8] = b"%PDF";

/// PDF 文本提取
pub struct PdfExtractor;

impl PdfExtractor {
    /// 检查上传文件是否是 PDF：扩展名为 `.pdf`（不区分大小写）且以 `%PDF` 开头
    pub fn ensure_pdf(path: &Path, bytes: &[u8]) -> Result<(), InputError> {
        let has_pdf_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        // 部分生成器会在文件头前面放几个字节，只在前 1024 字节里找
        let head = &bytes[..bytes.len().min(1024)];
        let has_magic = head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC);

        if has_pdf_extension && has_magic {
            Ok(())
        } else {
            Err(InputError::NotPdf {
                path: path.display().to_string(),
            })
        }
    }

    /// 提取全部页面文字，页序不变，页与页之间用换页符连接
    ///
    /// `pdf-extract` 遇到损坏的文件可能直接 panic，这里统一转换成 [`InputError`]
    pub fn extract_text(bytes: &[u8]) -> Result<String, InputError> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        let pages = match result {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                return Err(InputError::ExtractionFailed {
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(InputError::ExtractionFailed {
                    reason: "文件已损坏，解析时崩溃".to_string(),
                })
            }
        };

        debug!("PDF 共 {} 页", pages.len());

        let content = pages.join(&PAGE_SEPARATOR.to_string());
        if content.trim_matches(|c: char| c.is_whitespace() || c == PAGE_SEPARATOR).is_empty() {
            return Err(InputError::NoExtractableText);
        }

        Ok(content)
    }
}
