use rust_embed::RustEmbed;
use std::collections::HashMap;

use crate::error::{ModgenError, Result};

#[derive(RustEmbed)]
#[folder = "../data/templates/"]
pub struct TemplateStorage;

/// field name -> rendered text
pub type Substitutions = HashMap<&'static str, String>;

/// A text fragment with `{name}` placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    text: String,
}

enum Piece<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

impl Template {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Template {
        Template {
            name: name.into(),
            text: text.into(),
        }
    }

    /// loads one of the templates compiled into the binary, `name` without extension
    pub fn load(name: &str) -> Result<Template> {
        let file = TemplateStorage::get(&format!("{}.txt", name))
            .ok_or_else(|| ModgenError::MissingTemplate(name.to_string()))?;
        let text = String::from_utf8_lossy(&file.data).into_owned();

        Ok(Template::new(name, text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// placeholder names in order of appearance, repeats included
    pub fn placeholders(&self) -> Result<Vec<&str>> {
        Ok(self
            .pieces()?
            .into_iter()
            .filter_map(|piece| match piece {
                Piece::Placeholder(key) => Some(key),
                Piece::Literal(_) => None,
            })
            .collect())
    }

    /// replaces every placeholder with its value. Fails on the first name that
    /// has no value, nothing is returned in that case.
    pub fn substitute(&self, values: &Substitutions) -> Result<String> {
        let mut out = String::with_capacity(self.text.len());

        for piece in self.pieces()? {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Placeholder(key) => {
                    let value = values.get(key).ok_or_else(|| ModgenError::UnknownField {
                        template: self.name.clone(),
                        field: key.to_string(),
                    })?;
                    out.push_str(value);
                }
            }
        }

        Ok(out)
    }

    fn pieces(&self) -> Result<Vec<Piece<'_>>> {
        let mut pieces = Vec::new();
        let mut rest = self.text.as_str();

        while let Some(open) = rest.find('{') {
            if open > 0 {
                pieces.push(Piece::Literal(&rest[..open]));
            }

            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| self.malformed("unclosed placeholder"))?;
            let key = &after[..close];

            if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(self.malformed("invalid placeholder name"));
            }

            pieces.push(Piece::Placeholder(key));
            rest = &after[close + 1..];
        }

        if !rest.is_empty() {
            pieces.push(Piece::Literal(rest));
        }

        Ok(pieces)
    }

    fn malformed(&self, reason: &'static str) -> ModgenError {
        ModgenError::MalformedTemplate {
            template: self.name.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&'static str, &str)]) -> Substitutions {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn substitutes_by_name() {
        let template = Template::new("t", "speed {rocket_speed} x{rocket_speed}, hp {health_mult}");
        let out = template
            .substitute(&values(&[("rocket_speed", "1500"), ("health_mult", "180")]))
            .unwrap();
        assert_eq!(out, "speed 1500 x1500, hp 180");
    }

    #[test]
    fn unknown_field_fails() {
        let template = Template::new("block", "#<{label}> {helth_mult}");
        let err = template.substitute(&values(&[("label", "Stock")])).unwrap_err();
        match err {
            ModgenError::UnknownField { template, field } => {
                assert_eq!(template, "block");
                assert_eq!(field, "helth_mult");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn malformed_placeholders_fail() {
        for text in ["open {label", "empty {}", "spaced {health mult}"] {
            let err = Template::new("bad", text).substitute(&values(&[])).unwrap_err();
            assert!(matches!(err, ModgenError::MalformedTemplate { .. }), "{}", text);
        }
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let text = "\n    #<ECLIPSE><MUT>\n\n    ";
        let out = Template::new("plain", text).substitute(&values(&[])).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn lists_placeholders_in_order() {
        let template = Template::new("t", "{a} {b} {a}");
        assert_eq!(template.placeholders().unwrap(), ["a", "b", "a"]);
    }

    #[test]
    fn embedded_templates_exist() {
        for name in ["prologue", "preset", "epilogue"] {
            assert!(Template::load(name).is_ok(), "{} missing", name);
        }
        assert!(matches!(
            Template::load("nope"),
            Err(ModgenError::MissingTemplate(_))
        ));
    }
}
