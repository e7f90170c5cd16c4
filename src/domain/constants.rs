/// Default output directory, relative to the project root.
pub const OUTPUT_DIR: &str = ".promptpilot";
/// Source fragment directory, relative to the project root. Not configurable.
pub const SOURCE_CONTEXT_DIR: &str = ".promptpilot/source-context";
pub const REPO_CONTEXT_FILENAME: &str = "repo-context.md";
pub const PREFERENCES_FILENAME: &str = "preferences.json";
pub const PROMPT_CONTEXT_FILENAME: &str = "prompt-context.json";

pub const SAMPLE_CONTEXT_TEMPLATE: &str = "sample-context.md";
pub const DEFAULT_NEW_FILE: &str = "new-context-file.md";
pub const DEFAULT_FILE_EXTENSION: &str = ".md";

pub const PATCH_FORMAT_INSTRUCTION: &str = "- output: use the patch format";

/// Single source of truth for the patch-mode default.
pub const DEFAULT_PATCH_MODE: bool = true;
pub const DEFAULT_DEBUG_LAYOUT: bool = false;

pub mod keys {
    pub const CUSTOM_OUTPUT_DIR: &str = "custom-output-dir";
    pub const CUSTOM_OUTPUT_FILENAME: &str = "custom-output-filename";
    pub const PATCH_MODE_ENABLED: &str = "patch-mode-enabled";
    pub const DEBUG_LAYOUT_ENABLED: &str = "debug-layout-enabled";
}
