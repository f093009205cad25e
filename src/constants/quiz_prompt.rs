/// Builds the system instruction for a generation request.
///
/// The count and difficulty fragment are interpolated; the 1-correct +
/// 3-incorrect shape is stated in prose as well as enforced by the
/// response schema, since models follow prose more reliably.
pub fn build_instruction(question_count: u8, difficulty_description: &str) -> String {
    format!(
        "You are an expert in multiple choice quiz writing. \
         Write a multiple choice quiz based on the input. \
         The quiz should have {} questions, each with 1 correct answer and 3 incorrect answers. \
         The questions should reflect {}. \
         Return the quiz as JSON matching the requested schema.",
        question_count, difficulty_description
    )
}
