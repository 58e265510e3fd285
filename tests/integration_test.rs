use quiz_generator::error::UpstreamError;
use quiz_generator::models::{QuestionCounts, TRUE_FALSE_MARKER};
use quiz_generator::render::render;
use quiz_generator::text::normalize;
use quiz_generator::{
    logger, AssessmentFlow, AssessmentModel, App, Config, MemorySink, PageLayout, PdfSink,
};

const SCENARIO_A: &str = "MULTIPLE CHOICE QUESTIONS
1. What are cats? A) Birds B) Mammals C) Fish D) Reptiles
TRUE/FALSE QUESTIONS
1. Cats are mammals.
ANSWER KEY
Multiple Choice Answers:
1. B
True/False Answers:
1. True";

/// 固定返回内容的模型
struct StubModel(String);

impl AssessmentModel for StubModel {
    async fn generate_assessment(&self, _source_text: &str) -> Result<String, UpstreamError> {
        Ok(self.0.clone())
    }
}

fn page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
}

#[tokio::test]
async fn test_scenario_a_three_sections() {
    logger::init();

    let flow = AssessmentFlow::new(StubModel(SCENARIO_A.to_string()), PageLayout::A4);
    let generated = flow
        .run("Cats are mammals.", QuestionCounts::new(1, 1), |_| MemorySink::new())
        .await
        .unwrap();

    let questions = &generated.question_doc.content;
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].title.as_deref(), Some("MULTIPLE CHOICE QUESTIONS"));
    assert_eq!(
        questions[0].lines(),
        vec!["1. What are cats? A) Birds B) Mammals C) Fish D) Reptiles"]
    );
    assert_eq!(questions[1].title.as_deref(), Some("TRUE/FALSE QUESTIONS"));
    assert_eq!(questions[1].lines(), vec!["1. Cats are mammals."]);

    let answers = &generated.answer_doc.content;
    assert_eq!(generated.answer_doc.title, "ANSWER KEY");
    assert_eq!(answers.len(), 1);
    assert_eq!(
        answers[0].lines(),
        vec!["Multiple Choice Answers:", "1. B", "True/False Answers:", "1. True"]
    );
}

#[tokio::test]
async fn test_scenario_b_missing_true_false_marker() {
    let raw = SCENARIO_A.replace(TRUE_FALSE_MARKER, "Statements");
    let flow = AssessmentFlow::new(StubModel(raw), PageLayout::A4);
    let generated = flow
        .run("Cats are mammals.", QuestionCounts::new(1, 1), |_| MemorySink::new())
        .await
        .unwrap();

    let questions = &generated.question_doc.content;
    assert_eq!(questions.len(), 2);
    assert_eq!(
        questions[0].lines(),
        vec![
            "1. What are cats? A) Birds B) Mammals C) Fish D) Reptiles",
            "Statements",
            "1. Cats are mammals.",
        ]
    );
    // 判断题只有标题
    assert_eq!(questions[1].title.as_deref(), Some("TRUE/FALSE QUESTIONS"));
    assert!(questions[1].lines().is_empty());
}

#[test]
fn test_scenario_c_square_root() {
    assert_eq!(normalize(r"\sqrt{4Rnλ}"), "√(4Rnλ)");
}

#[tokio::test]
async fn test_missing_answer_marker_gives_title_only_answer_doc() {
    let raw = "MULTIPLE CHOICE QUESTIONS\n1. q\nTRUE/FALSE QUESTIONS\n1. s";
    let flow = AssessmentFlow::new(StubModel(raw.to_string()), PageLayout::A4);
    let generated = flow
        .run("text", QuestionCounts::new(1, 1), |_| MemorySink::new())
        .await
        .unwrap();

    assert_eq!(generated.answer_doc.page_count, 1);
    assert!(generated.answer_doc.content[0].lines().is_empty());
}

#[tokio::test]
async fn test_long_answer_key_spans_pages() {
    let mut raw = String::from("MULTIPLE CHOICE QUESTIONS\n1. q\nANSWER KEY\n");
    for i in 1..=150 {
        raw.push_str(&format!("{}. B\n", i));
    }

    let layout = PageLayout::A4;
    let flow = AssessmentFlow::new(StubModel(raw), layout);
    let generated = flow
        .run("text", QuestionCounts::new(150, 0), |_| MemorySink::new())
        .await
        .unwrap();

    assert_eq!(generated.answer_doc.page_count, 4);
    for page in &generated.answer_doc.content {
        for placed in &page.placed {
            assert!(placed.y > layout.bottom_margin);
        }
    }
    assert!(generated.answer_doc.content[1].title.is_none());
}

#[tokio::test]
async fn test_pdf_upload_to_files() {
    let dir = tempfile::tempdir().unwrap();

    let upload = dir.path().join("notes.pdf");
    let source = render(
        "NOTES",
        ["Cats are mammals.", "They are warm-blooded."],
        PdfSink::new(PageLayout::A4),
        PageLayout::A4,
    )
    .unwrap();
    std::fs::write(&upload, &source.content).unwrap();

    let config = Config {
        llm_api_key: "test-key".to_string(),
        output_dir: dir.path().join("generated").display().to_string(),
        ..Config::default()
    };
    let app = App::with_model(config, StubModel(SCENARIO_A.to_string()));
    let paths = app.run(&upload, app.default_counts()).await.unwrap();

    let question_bytes = std::fs::read(&paths.question_path).unwrap();
    let answer_bytes = std::fs::read(&paths.answer_path).unwrap();
    assert_eq!(page_count(&question_bytes), 2);
    assert_eq!(page_count(&answer_bytes), 1);
    assert!(paths.question_path.ends_with("generated/question.pdf"));
}

#[tokio::test]
async fn test_preview_does_not_write_files() {
    let dir = tempfile::tempdir().unwrap();
    let upload = dir.path().join("notes.pdf");
    let source = render(
        "NOTES",
        ["Cats are mammals."],
        PdfSink::new(PageLayout::A4),
        PageLayout::A4,
    )
    .unwrap();
    std::fs::write(&upload, &source.content).unwrap();

    let output_dir = dir.path().join("generated");
    let config = Config {
        llm_api_key: "test-key".to_string(),
        output_dir: output_dir.display().to_string(),
        ..Config::default()
    };
    let app = App::with_model(config, StubModel(SCENARIO_A.to_string()));
    let generated = app.preview(&upload, QuestionCounts::new(1, 1)).await.unwrap();

    assert_eq!(generated.question_doc.page_count, 2);
    assert!(!output_dir.exists());
}
