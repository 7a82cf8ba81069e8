pub mod abstractive;
pub mod extractive;
pub mod openai;
pub mod summarizer;
