pub mod context_assembler;
pub mod context_file_manager;
pub mod file_selector;
pub mod prompt_context;
pub mod sanitizer;
pub mod templates;
