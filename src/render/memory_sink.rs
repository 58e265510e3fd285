//! 内存中的绘制记录
//!
//! 与 PDF 写入使用相同的字体度量和编码检查，排版结果一致。
//! 用于测试和命令行的 `--dry-run` 预览。

use std::fmt;

use super::font::Font;
use super::sink::{PageLayout, PageSink};
use crate::error::{GlyphError, RenderError};

/// 一次绘制调用
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    CenteredText {
        text: String,
        font: Font,
        size: f32,
        y: f32,
    },
    OpenRegion {
        x: f32,
        y: f32,
    },
    SetFont {
        font: Font,
        size: f32,
    },
    Line(String),
    Flush,
}

/// 已写入页面的一行
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// 一页的记录
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedPage {
    /// 页面上居中绘制的标题
    pub title: Option<String>,
    pub events: Vec<SinkEvent>,
    pub placed: Vec<PlacedLine>,
}

impl RecordedPage {
    /// 本页已写入的正文行
    pub fn lines(&self) -> Vec<&str> {
        self.placed.iter().map(|p| p.text.as_str()).collect()
    }
}

impl fmt::Display for RecordedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{:^72}", title)?;
            writeln!(f)?;
        }
        for line in &self.placed {
            writeln!(f, "{}", line.text)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Region {
    x: f32,
    y: f32,
    font: Font,
    pending: Vec<String>,
    flushed: usize,
}

/// 把绘制调用记录在内存里的 [`PageSink`]
#[derive(Debug)]
pub struct MemorySink {
    layout: PageLayout,
    pages: Vec<RecordedPage>,
    region: Option<Region>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::with_layout(PageLayout::A4)
    }

    pub fn with_layout(layout: PageLayout) -> Self {
        Self {
            layout,
            pages: Vec::new(),
            region: None,
        }
    }

    fn current_page(&mut self) -> &mut RecordedPage {
        if self.pages.is_empty() {
            self.pages.push(RecordedPage::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSink for MemorySink {
    type Output = Vec<RecordedPage>;

    fn begin_page(&mut self) {
        self.region = None;
        self.pages.push(RecordedPage::default());
    }

    fn draw_centered_text(&mut self, text: &str, font: Font, size: f32, y: f32) {
        let page = self.current_page();
        page.title = Some(text.to_string());
        page.events.push(SinkEvent::CenteredText {
            text: text.to_string(),
            font,
            size,
            y,
        });
    }

    fn open_text_region(&mut self, x: f32, y: f32) {
        self.region = Some(Region {
            x,
            y,
            font: self.layout.body_font,
            pending: Vec::new(),
            flushed: 0,
        });
        self.current_page().events.push(SinkEvent::OpenRegion { x, y });
    }

    fn set_font(&mut self, font: Font, size: f32) {
        if let Some(region) = self.region.as_mut() {
            region.font = font;
        }
        self.current_page().events.push(SinkEvent::SetFont { font, size });
    }

    fn append_line(&mut self, line: &str) -> Result<(), GlyphError> {
        let font = self.region.as_ref().map_or(self.layout.body_font, |r| r.font);
        font.encode(line)?;
        if let Some(region) = self.region.as_mut() {
            region.pending.push(line.to_string());
        }
        self.current_page().events.push(SinkEvent::Line(line.to_string()));
        Ok(())
    }

    fn flush_region(&mut self) {
        let leading = self.layout.line_height;
        let Some(region) = self.region.as_mut() else {
            return;
        };
        let last = self.pages.len().saturating_sub(1);
        let Some(page) = self.pages.get_mut(last) else {
            return;
        };

        for text in std::mem::take(&mut region.pending) {
            page.placed.push(PlacedLine {
                text,
                x: region.x,
                y: region.y - region.flushed as f32 * leading,
            });
            region.flushed += 1;
        }
        page.events.push(SinkEvent::Flush);
    }

    fn measure_text_width(&self, text: &str, font: Font, size: f32) -> f32 {
        font.text_width(text, size)
    }

    fn finalize(self) -> Result<Self::Output, RenderError> {
        Ok(self.pages)
    }
}
