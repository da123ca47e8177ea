pub mod chatbot;
pub mod extractor;
pub mod llm_client;
