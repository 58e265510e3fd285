pub mod assessment;

pub use assessment::{
    AssessmentSections, DocumentKind, GeneratedAssessment, QuestionCounts, RenderedDocument,
    ANSWER_KEY_MARKER, MCQ_HEADING, TRUE_FALSE_MARKER,
};
