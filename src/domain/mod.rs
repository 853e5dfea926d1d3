pub mod collection;
pub mod entry;
pub mod review;
pub mod word;

pub use collection::{default_categories, Collection, PracticeStats, WordView, COLLECTION_VERSION, DEFAULT_CATEGORIES};
pub use entry::{DirectionStats, LearningEntry};
pub use review::{AnswerEvent, Direction, MasteryStatus, PracticeMode};
pub use word::{OneOrMany, Word};
