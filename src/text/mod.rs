//! 文本处理：章节拆分、数学记号清理和折行

pub mod normalizer;
pub mod sectionizer;
pub mod wrapper;

pub use normalizer::normalize;
pub use sectionizer::sectionize;
pub use wrapper::{wrap, WrapContext};
