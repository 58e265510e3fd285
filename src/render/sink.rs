//! 绘制能力抽象
//!
//! 渲染器只依赖 [`PageSink`]，真实的 PDF 写入和测试用的内存记录都实现它。

use super::font::Font;
use crate::error::{GlyphError, RenderError};

/// 页面版式（pt），两份文档共用
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    /// 标题基线距页面顶部的距离
    pub title_offset: f32,
    /// 正文第一行基线距页面顶部的距离
    pub body_offset: f32,
    /// 光标低于或等于该值时换页
    pub bottom_margin: f32,
    pub line_height: f32,
    pub body_font: Font,
    pub body_font_size: f32,
    pub title_font: Font,
    pub title_font_size: f32,
}

impl PageLayout {
    /// A4 纵向
    pub const A4: PageLayout = PageLayout {
        page_width: 595.2756,
        page_height: 841.8898,
        left_margin: 40.0,
        right_margin: 40.0,
        title_offset: 40.0,
        body_offset: 80.0,
        bottom_margin: 80.0,
        line_height: 14.0,
        body_font: Font::Helvetica,
        body_font_size: 12.0,
        title_font: Font::HelveticaBold,
        title_font_size: 14.0,
    };

    /// 正文可用宽度
    pub fn max_text_width(&self) -> f32 {
        self.page_width - self.left_margin - self.right_margin
    }

    /// 标题基线的 y 坐标（PDF 坐标系，原点在左下角）
    pub fn title_y(&self) -> f32 {
        self.page_height - self.title_offset
    }

    /// 正文顶部的 y 坐标
    pub fn body_top(&self) -> f32 {
        self.page_height - self.body_offset
    }

    /// 每页最多能放下的正文行数
    pub fn lines_per_page(&self) -> usize {
        let usable = self.body_top() - self.bottom_margin;
        if usable <= 0.0 {
            return 1;
        }
        (usable / self.line_height).ceil() as usize
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::A4
    }
}

/// 分页绘制能力
///
/// 调用顺序由渲染器保证：`begin_page` 之后才会绘制标题或打开文本区，
/// `append_line` 之前一定有 `open_text_region`。
pub trait PageSink {
    /// `finalize` 产出的文档
    type Output;

    /// 开始新的一页（上一页随之结束）
    fn begin_page(&mut self);

    /// 以页面中线居中绘制一行文字
    fn draw_centered_text(&mut self, text: &str, font: Font, size: f32, y: f32);

    /// 在 (x, y) 处打开一个文本区，后续行依次向下排列
    fn open_text_region(&mut self, x: f32, y: f32);

    /// 设置文本区字体
    fn set_font(&mut self, font: Font, size: f32);

    /// 向文本区追加一行
    ///
    /// 当前字体无法编码其中某个字符时返回 [`GlyphError`]，本行不会被写入
    fn append_line(&mut self, line: &str) -> Result<(), GlyphError>;

    /// 把打开的文本区写入当前页
    fn flush_region(&mut self);

    /// 测量文本宽度
    fn measure_text_width(&self, text: &str, font: Font, size: f32) -> f32;

    /// 结束文档，产出最终结果
    fn finalize(self) -> Result<Self::Output, RenderError>;
}
