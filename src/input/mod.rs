//! Input processing module
//! Handles file detection and text extraction for plain text and Markdown resumes

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
