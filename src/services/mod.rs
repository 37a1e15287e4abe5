pub mod classifier;
pub mod report_writer;
pub mod segmenter;
pub mod selection;

pub use classifier::{classify, TopicClassifier};
pub use report_writer::{render_results, ReportFormat, ReportWriter};
pub use segmenter::QuestionSegmenter;
pub use selection::{cap_from_count, parse_topic_selection, select, TopicSelection};
