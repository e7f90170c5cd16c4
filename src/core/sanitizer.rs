use std::path::MAIN_SEPARATOR;

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Normalizes a user-supplied name into a safe file name.
///
/// Path separators become `_`, every `..` becomes `_`, and any remaining
/// character outside `[a-zA-Z0-9._-]` becomes `_`. Blank input stays blank;
/// callers reject it.
pub fn sanitize_file_name(name: &str) -> String {
    let separated: String = name
        .chars()
        .map(|c| if c == '/' || c == MAIN_SEPARATOR { '_' } else { c })
        .collect();

    separated
        .replace("..", "_")
        .chars()
        .map(|c| if is_allowed(c) { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_safe_names() {
        assert_eq!(sanitize_file_name("my-feature_v2.md"), "my-feature_v2.md");
        assert_eq!(sanitize_file_name(""), "");
    }

    #[test]
    fn test_replaces_separators_and_traversal() {
        assert_eq!(sanitize_file_name("../etc/passwd"), "__etc_passwd");
        assert_eq!(sanitize_file_name("a/b.md"), "a_b.md");
        assert_eq!(sanitize_file_name("..."), "_.");
        assert_eq!(sanitize_file_name("...."), "__");
    }

    #[test]
    fn test_replaces_disallowed_characters() {
        assert_eq!(sanitize_file_name("hello world!.md"), "hello_world_.md");
        assert_eq!(sanitize_file_name("naïve"), "na_ve");
        assert_eq!(sanitize_file_name("a\\b"), "a_b");
    }

    #[test]
    fn test_output_is_always_safe() {
        let inputs = [
            "../../secret",
            ". . / . .",
            "a..b...c....d",
            "./.hidden/..",
            "🚀 launch/..\\..",
            "..\u{0}..",
            "mixed/.\\./..name",
        ];
        for input in inputs {
            let sanitized = sanitize_file_name(input);
            assert!(
                sanitized.chars().all(is_allowed),
                "{:?} -> {:?}",
                input,
                sanitized
            );
            assert!(!sanitized.contains(".."), "{:?} -> {:?}", input, sanitized);
        }
    }
}
