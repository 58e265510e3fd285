//! 分页渲染器
//!
//! 每份文档一个渲染器实例，光标状态只属于这份文档。

use std::borrow::Cow;

use tracing::{debug, warn};

use super::sink::{PageLayout, PageSink};
use crate::error::{GlyphError, RenderError};
use crate::models::RenderedDocument;
use crate::text::{normalize, wrap, WrapContext};

/// 当前页的书写位置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    /// 下一行基线的 y 坐标
    pub y_position: f32,
    /// 打开的文本区里是否有尚未写入页面的行
    pub page_is_dirty: bool,
}

impl PageCursor {
    /// 新页的初始光标
    pub fn top_of_body(layout: &PageLayout) -> Self {
        Self {
            y_position: layout.body_top(),
            page_is_dirty: false,
        }
    }

    /// 光标是否已经越过底边距
    pub fn needs_break(&self, layout: &PageLayout) -> bool {
        self.y_position <= layout.bottom_margin
    }

    fn advance(&mut self, line_height: f32) {
        self.y_position -= line_height;
        self.page_is_dirty = true;
    }
}

/// 分页渲染器
///
/// 一个文档可以包含多个带标题的分组（试题文档里的选择题和判断题），
/// 每个分组从新的一页开始，只有分组的第一页绘制标题。
pub struct PaginatedRenderer<S: PageSink> {
    sink: S,
    layout: PageLayout,
    wrap_ctx: WrapContext,
    cursor: PageCursor,
    title: Option<String>,
    page_count: usize,
    glyph_fallbacks: usize,
}

impl<S: PageSink> PaginatedRenderer<S> {
    pub fn new(sink: S, layout: PageLayout) -> Self {
        let wrap_ctx = WrapContext::new(
            layout.body_font,
            layout.body_font_size,
            layout.max_text_width(),
        );
        Self {
            sink,
            layout,
            wrap_ctx,
            cursor: PageCursor::top_of_body(&layout),
            title: None,
            page_count: 0,
            glyph_fallbacks: 0,
        }
    }

    /// 当前光标（只读）
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// 渲染一个带标题的分组
    ///
    /// # 参数
    /// - `title`: 分组标题，居中加粗绘制在分组第一页顶部
    /// - `body_lines`: 正文行，逐行清理记号、折行后排版
    pub fn render_section<I, L>(&mut self, title: &str, body_lines: I)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        self.start_titled_page(title);
        for line in body_lines {
            self.emit_line(line.as_ref());
        }
    }

    /// 结束文档
    pub fn finish(mut self) -> Result<RenderedDocument<S::Output>, RenderError> {
        if self.page_count == 0 {
            self.sink.begin_page();
            self.page_count = 1;
        }
        self.flush();

        if self.glyph_fallbacks > 0 {
            debug!(
                "文档 {:?} 有 {} 行替换了无法绘制的字符",
                self.title, self.glyph_fallbacks
            );
        }

        let content = self.sink.finalize()?;
        Ok(RenderedDocument {
            title: self.title.unwrap_or_default(),
            page_count: self.page_count,
            content,
        })
    }

    fn start_titled_page(&mut self, title: &str) {
        self.flush();
        self.sink.begin_page();
        self.page_count += 1;
        self.title.get_or_insert_with(|| title.to_string());

        self.sink.draw_centered_text(
            title,
            self.layout.title_font,
            self.layout.title_font_size,
            self.layout.title_y(),
        );
        self.open_region();
    }

    fn open_region(&mut self) {
        self.sink
            .open_text_region(self.layout.left_margin, self.layout.body_top());
        self.sink
            .set_font(self.layout.body_font, self.layout.body_font_size);
        self.cursor = PageCursor::top_of_body(&self.layout);
    }

    fn break_page(&mut self) {
        self.flush();
        self.sink.begin_page();
        self.page_count += 1;
        self.open_region();
    }

    fn flush(&mut self) {
        if self.cursor.page_is_dirty {
            self.sink.flush_region();
            self.cursor.page_is_dirty = false;
        }
    }

    fn emit_line(&mut self, line: &str) {
        let display_line = normalize(line);
        let sink = &self.sink;
        let sub_lines = wrap(&display_line, &self.wrap_ctx, |text, font, size| {
            sink.measure_text_width(text, font, size)
        });

        for sub_line in sub_lines {
            if self.cursor.needs_break(&self.layout) {
                self.break_page();
            }
            self.place(&sub_line);
            self.cursor.advance(self.layout.line_height);
        }
    }

    /// 写入一行；绘制目标报告无法编码的字符时只把该字符换成 `?` 再重试
    fn place(&mut self, sub_line: &str) {
        let mut line = Cow::Borrowed(sub_line);
        let mut fell_back = false;
        loop {
            match self.sink.append_line(&line) {
                Ok(()) => break,
                Err(GlyphError::Unencodable { ch, font }) if ch != '?' => {
                    warn!("⚠️ 字体 {} 无法绘制字符 {:?}，替换为 '?'", font, ch);
                    fell_back = true;
                    line = Cow::Owned(line.replace(ch, "?"));
                }
                Err(e) => {
                    warn!("⚠️ 替换后仍无法绘制，跳过该行: {}", e);
                    break;
                }
            }
        }
        if fell_back {
            self.glyph_fallbacks += 1;
        }
    }
}

/// 渲染单个带标题的文档
pub fn render<S, I, L>(
    title: &str,
    body_lines: I,
    sink: S,
    layout: PageLayout,
) -> Result<RenderedDocument<S::Output>, RenderError>
where
    S: PageSink,
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    let mut renderer = PaginatedRenderer::new(sink, layout);
    renderer.render_section(title, body_lines);
    renderer.finish()
}
