use crate::domain::constants::SAMPLE_CONTEXT_TEMPLATE;

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[(
    SAMPLE_CONTEXT_TEMPLATE,
    include_str!("../../templates/sample-context.md"),
)];

/// Looks up a bundled template by id.
pub fn load_template(id: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, content)| *content)
}

pub fn template_ids() -> impl Iterator<Item = &'static str> {
    BUILTIN_TEMPLATES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_template_is_bundled() {
        let content = load_template(SAMPLE_CONTEXT_TEMPLATE).unwrap();
        assert!(content.starts_with("# Context"));
        assert!(template_ids().any(|id| id == SAMPLE_CONTEXT_TEMPLATE));
    }

    #[test]
    fn test_unknown_template() {
        assert!(load_template("missing.md").is_none());
    }
}
