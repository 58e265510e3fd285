//! 基于 `lopdf` 的 PDF 写入
//!
//! 只使用 Helvetica / Helvetica-Bold 两种标准字体（WinAnsiEncoding），
//! 不嵌入字体文件。

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use super::font::Font;
use super::sink::{PageLayout, PageSink};
use crate::error::{GlyphError, RenderError};

#[derive(Debug)]
struct TextRegion {
    x: f32,
    y: f32,
    font: Font,
    size: f32,
    lines: Vec<Vec<u8>>,
}

/// 写出 PDF 字节的 [`PageSink`]
pub struct PdfSink {
    layout: PageLayout,
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    operations: Option<Vec<Operation>>,
    region: Option<TextRegion>,
    encode_error: Option<String>,
}

impl PdfSink {
    pub fn new(layout: PageLayout) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            layout,
            doc,
            pages_id,
            page_ids: Vec::new(),
            operations: None,
            region: None,
            encode_error: None,
        }
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        self.operations.get_or_insert_with(Vec::new)
    }

    /// 把当前页的内容流写入文档
    fn finish_page(&mut self) {
        let Some(operations) = self.operations.take() else {
            return;
        };
        self.region = None;

        let content = Content { operations };
        let encoded = match content.encode() {
            Ok(bytes) => bytes,
            Err(e) => {
                self.encode_error.get_or_insert(e.to_string());
                Vec::new()
            }
        };

        let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
        });
        self.page_ids.push(page_id);
    }

    fn font_dictionary(font: Font) -> lopdf::Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        }
    }
}

impl PageSink for PdfSink {
    type Output = Vec<u8>;

    fn begin_page(&mut self) {
        self.finish_page();
        self.operations = Some(Vec::new());
    }

    fn draw_centered_text(&mut self, text: &str, font: Font, size: f32, y: f32) {
        // 标题是固定文字，无法编码的字符直接替换
        let bytes = font
            .encode(text)
            .or_else(|_| font.encode(&font.replace_unencodable(text)))
            .unwrap_or_default();
        let width = font.text_width(text, size);
        let x = (self.layout.page_width - width) / 2.0;

        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![font.resource_name().into(), size.into()],
        ));
        ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(bytes, StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn open_text_region(&mut self, x: f32, y: f32) {
        self.region = Some(TextRegion {
            x,
            y,
            font: self.layout.body_font,
            size: self.layout.body_font_size,
            lines: Vec::new(),
        });
    }

    fn set_font(&mut self, font: Font, size: f32) {
        if let Some(region) = self.region.as_mut() {
            region.font = font;
            region.size = size;
        }
    }

    fn append_line(&mut self, line: &str) -> Result<(), GlyphError> {
        let font = self
            .region
            .as_ref()
            .map_or(self.layout.body_font, |r| r.font);
        let bytes = font.encode(line)?;
        if let Some(region) = self.region.as_mut() {
            region.lines.push(bytes);
        }
        Ok(())
    }

    fn flush_region(&mut self) {
        let leading = self.layout.line_height;
        let Some(region) = self.region.as_mut() else {
            return;
        };
        if region.lines.is_empty() {
            return;
        }

        let lines = std::mem::take(&mut region.lines);
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![region.font.resource_name().into(), region.size.into()],
            ),
            Operation::new("TL", vec![leading.into()]),
            Operation::new("Td", vec![region.x.into(), region.y.into()]),
        ];
        region.y -= lines.len() as f32 * leading;

        for bytes in lines {
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(bytes, StringFormat::Literal)],
            ));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        self.ops().extend(operations);
    }

    fn measure_text_width(&self, text: &str, font: Font, size: f32) -> f32 {
        font.text_width(text, size)
    }

    fn finalize(mut self) -> Result<Self::Output, RenderError> {
        if self.operations.is_none() && self.page_ids.is_empty() {
            self.operations = Some(Vec::new());
        }
        self.finish_page();

        if let Some(reason) = self.encode_error.take() {
            return Err(RenderError::Encode { reason });
        }

        let regular_id = self.doc.add_object(Self::font_dictionary(Font::Helvetica));
        let bold_id = self.doc.add_object(Self::font_dictionary(Font::HelveticaBold));
        let resources_id = self.doc.add_object(dictionary! {
            "Font" => dictionary! {
                Font::Helvetica.resource_name() => regular_id,
                Font::HelveticaBold.resource_name() => bold_id,
            },
        });

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let page_count = kids.len() as i64;
        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            self.layout.page_width.into(),
            self.layout.page_height.into(),
        ];
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        };
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| RenderError::Save {
                reason: e.to_string(),
            })?;

        debug!("PDF 写入完成: {} 页, {} 字节", page_count, buffer.len());
        Ok(buffer)
    }
}
