pub mod loaders;
pub mod question;
pub mod topic;

pub use loaders::load_catalog_from_toml;
pub use question::QuestionRecord;
pub use topic::{Course, TopicCatalog, TopicEntry};
