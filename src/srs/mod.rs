pub mod due;
pub mod mastery;
pub mod practice;
pub mod priority;
pub mod quality;
pub mod sm2;

pub use due::{format_next_review, is_due, review_stats, select_due, ReviewStats};
pub use mastery::{should_master, MasteryConfig};
pub use practice::{build_session, choose_direction, record_answer, AnswerOutcome, PracticeSession, PracticeSummary, Question};
pub use priority::word_priority;
pub use quality::estimate_quality;
pub use sm2::{apply_review, calculate_sm2, Sm2Config, Sm2Result};
