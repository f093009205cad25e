pub mod request;
pub mod response;

pub use request::GenerateQuizRequest;
pub use response::{QuestionDto, QuizResponseDto};
