pub mod analyzers;
pub mod catalog;
pub mod dashboard;
pub mod gamification;
pub mod infra;
pub mod output;
pub mod parser;
pub mod progress;
pub mod scanner;
pub mod services;
