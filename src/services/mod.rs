pub mod budget;
pub mod gemini;
pub mod parser;
pub mod planner;
pub mod prompts;
pub mod rule_based;
pub mod scoring;
