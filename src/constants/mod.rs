pub mod quiz_prompt;
pub mod sample_quiz;
