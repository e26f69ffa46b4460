pub mod prompts;
pub mod report;
pub mod review;
pub mod review_ui;
