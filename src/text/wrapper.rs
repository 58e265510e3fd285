//! 按宽度折行

use crate::render::Font;

/// 一次渲染过程中统一使用的排版参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapContext {
    pub font: Font,
    pub font_size: f32,
    /// 单行允许的最大宽度（pt）
    pub max_width: f32,
}

impl WrapContext {
    pub fn new(font: Font, font_size: f32, max_width: f32) -> Self {
        Self {
            font,
            font_size,
            max_width,
        }
    }
}

/// 把一行文本折成若干不超过 `max_width` 的子行
///
/// 贪心地按空白切分的词累积；加入下一个词会超宽时先输出已有内容，
/// 再以这个词开始新的一行。单个词本身超宽时独占一行，不拆分。
/// 空白行原样返回，保证段落间距不丢失。返回值永远非空。
///
/// # 参数
/// - `line`: 原始文本行
/// - `ctx`: 字体、字号和最大宽度
/// - `measure`: 测量函数，返回字符串在给定字体字号下的宽度
pub fn wrap<M>(line: &str, ctx: &WrapContext, measure: M) -> Vec<String>
where
    M: Fn(&str, Font, f32) -> f32,
{
    if line.trim().is_empty() {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if measure(&candidate, ctx.font, ctx.font_size) <= ctx.max_width {
            current = candidate;
        } else if current.is_empty() {
            // 单个词超宽
            lines.push(word.to_string());
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
