use std::collections::HashMap;

/// Template processor for substituting `{{VAR}}` placeholders.
pub struct TemplateProcessor;

impl TemplateProcessor {
    /// Process template variables in content.
    ///
    /// The template is scanned once from left to right. Substituted values are
    /// copied verbatim and never rescanned, so a value that itself contains
    /// `{{VAR}}` comes out literally. Unknown placeholders are preserved.
    pub fn process(content: &str, vars: &HashMap<&str, String>) -> String {
        let mut out = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let substitution = after
                .find("}}")
                .and_then(|end| vars.get(&after[..end]).map(|value| (end, value)));

            match substitution {
                Some((end, value)) => {
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}
