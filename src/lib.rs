pub mod comparison;
pub mod entities;
pub mod environment;
pub mod logging;
pub mod openai_handler;
