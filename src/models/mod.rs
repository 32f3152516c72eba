pub mod quiz_answer;
pub mod quiz_question;
pub mod quiz_result;
pub mod word;
pub mod word_stats;
