use crate::domain::constants::PATCH_FORMAT_INSTRUCTION;
use crate::domain::models::ContextContents;
use log::{debug, info};

/// Body written when nothing is selected.
pub fn empty_selection_message(source_dir: &str, output_filename: &str) -> String {
    format!(
        "// No files were selected from '{}'.\n// Select one or more files and regenerate '{}'.",
        source_dir, output_filename
    )
}

/// Joins the selected contents in mapping order, one newline between each,
/// with trailing whitespace trimmed.
pub fn merge_contents(contents: &ContextContents) -> String {
    debug!("Merging {} context files", contents.len());
    contents
        .values()
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

/// Removes every copy of the patch instruction, with or without its blank-line prefix.
pub fn strip_patch_instruction(body: &str) -> String {
    body.replace(&format!("\n\n{}", PATCH_FORMAT_INSTRUCTION), "")
        .replace(PATCH_FORMAT_INSTRUCTION, "")
}

/// Appends the patch instruction after a blank line.
pub fn append_patch_instruction(body: &str) -> String {
    let mut content = body.to_string();
    if !content.trim().is_empty() && !content.ends_with("\n\n") {
        content.push_str(if content.ends_with('\n') { "\n" } else { "\n\n" });
    }
    content.push_str(PATCH_FORMAT_INSTRUCTION);
    content
}

/// Builds the full repo context text.
///
/// An empty selection produces `placeholder` verbatim; the instruction is
/// never added to it. Otherwise the merged body has any earlier instruction
/// stripped before it is re-appended when `patch_mode_enabled` is set, so
/// repeated generation never duplicates it.
pub fn assemble_repo_context(
    contents: &ContextContents,
    patch_mode_enabled: bool,
    placeholder: &str,
) -> String {
    if contents.is_empty() {
        info!("No context files selected, writing placeholder");
        return placeholder.to_string();
    }

    let body = strip_patch_instruction(&merge_contents(contents));

    if patch_mode_enabled {
        debug!("Appending patch format instruction");
        append_patch_instruction(&body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(pairs: &[(&str, &str)]) -> ContextContents {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_merges_selected_files_with_instruction() {
        let output = assemble_repo_context(
            &contents(&[("x.md", "Hello"), ("y.md", "World")]),
            true,
            "unused",
        );
        assert_eq!(output, "Hello\nWorld\n\n- output: use the patch format");
    }

    #[test]
    fn test_merge_trims_trailing_whitespace() {
        let output = assemble_repo_context(
            &contents(&[("x.md", "Hello\n"), ("y.md", "World\n\n  \n")]),
            false,
            "unused",
        );
        assert_eq!(output, "Hello\n\nWorld");
    }

    #[test]
    fn test_instruction_is_never_duplicated() {
        let already_tagged = format!("Body\n\n{}", PATCH_FORMAT_INSTRUCTION);
        let bodies = ["Body", "Body\n", already_tagged.as_str(), PATCH_FORMAT_INSTRUCTION];

        for body in bodies {
            let first = assemble_repo_context(&contents(&[("a.md", body)]), true, "");
            let second = assemble_repo_context(&contents(&[("a.md", first.as_str())]), true, "");
            assert_eq!(second.matches(PATCH_FORMAT_INSTRUCTION).count(), 1);
            assert_eq!(first, second);
            assert!(second.ends_with(PATCH_FORMAT_INSTRUCTION));
        }
    }

    #[test]
    fn test_toggle_off_on_off_matches_off() {
        let selected = contents(&[("a.md", "Alpha"), ("b.md", "Beta\n")]);
        let off = assemble_repo_context(&selected, false, "");
        let on = assemble_repo_context(&selected, true, "");
        let off_again = assemble_repo_context(&selected, false, "");

        assert_eq!(off, "Alpha\nBeta");
        assert_ne!(on, off);
        assert_eq!(off_again, off);
    }

    #[test]
    fn test_patch_off_strips_existing_instruction() {
        let tagged = format!("Alpha\n\n{}", PATCH_FORMAT_INSTRUCTION);
        let output = assemble_repo_context(&contents(&[("a.md", tagged.as_str())]), false, "");
        assert_eq!(output, "Alpha");
    }

    #[test]
    fn test_empty_selection_writes_placeholder_only() {
        let placeholder = empty_selection_message(".promptpilot/source-context", "repo-context.md");
        let with_patch = assemble_repo_context(&ContextContents::new(), true, &placeholder);
        let without_patch = assemble_repo_context(&ContextContents::new(), false, &placeholder);

        assert_eq!(with_patch, placeholder);
        assert_eq!(without_patch, placeholder);
        assert!(placeholder.contains(".promptpilot/source-context"));
        assert!(placeholder.contains("repo-context.md"));
    }

    #[test]
    fn test_append_to_blank_body_has_no_padding() {
        assert_eq!(append_patch_instruction(""), PATCH_FORMAT_INSTRUCTION);
        assert_eq!(
            append_patch_instruction("text\n"),
            format!("text\n\n{}", PATCH_FORMAT_INSTRUCTION)
        );
        assert_eq!(
            append_patch_instruction("text\n\n"),
            format!("text\n\n{}", PATCH_FORMAT_INSTRUCTION)
        );
    }
}
