//! 分页渲染：字体度量、绘制能力抽象和渲染器

pub mod font;
pub mod memory_sink;
pub mod pdf_sink;
pub mod renderer;
pub mod sink;

pub use font::Font;
pub use memory_sink::{MemorySink, RecordedPage};
pub use pdf_sink::PdfSink;
pub use renderer::{render, PageCursor, PaginatedRenderer};
pub use sink::{PageLayout, PageSink};
