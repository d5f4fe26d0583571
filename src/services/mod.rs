pub mod input;
pub mod llm;
pub mod transport;
