//! Section markers of the mod text format
//!
//! A section is opened by `#<Name>` and closed by `#</Name>`. The opening
//! marker may carry flags, e.g. `#<ECLIPSE><MUT>` marks a category whose
//! children are mutually exclusive. Every other line starting with `#` is a
//! comment.

use crate::error::{ModgenError, Result};

#[derive(Debug, PartialEq)]
pub enum Marker<'a> {
    Open { name: &'a str, mutually_exclusive: bool },
    Close { name: &'a str },
}

impl<'a> Marker<'a> {
    /// returns None for data, comment and blank lines
    pub fn parse(line: &'a str) -> Option<Marker<'a>> {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("#</") {
            let name = rest.strip_suffix('>')?;
            return Some(Marker::Close { name });
        }

        let rest = line.strip_prefix("#<")?;
        let end = rest.find('>')?;
        let flags = &rest[end + 1..];

        Some(Marker::Open {
            name: &rest[..end],
            mutually_exclusive: flags.contains("<MUT>"),
        })
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct SectionSummary {
    /// number of opened (and closed) sections
    pub sections: usize,
    pub max_depth: usize,
}

/// walks all markers with a stack and fails on the first one that doesn't
/// nest, or if sections are left open at the end
pub fn check_sections(text: &str) -> Result<SectionSummary> {
    let mut stack: Vec<(&str, usize)> = Vec::new();
    let mut summary = SectionSummary::default();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        match Marker::parse(line) {
            Some(Marker::Open { name, .. }) => {
                stack.push((name, line_no));
                summary.sections += 1;
                summary.max_depth = summary.max_depth.max(stack.len());
            }
            Some(Marker::Close { name }) => match stack.pop() {
                Some((open, _)) if open == name => {}
                Some((open, opened_at)) => {
                    return Err(ModgenError::UnbalancedSection {
                        line: line_no,
                        detail: format!(
                            "'{}' closed while '{}' (line {}) is still open",
                            name, open, opened_at
                        ),
                    });
                }
                None => {
                    return Err(ModgenError::UnbalancedSection {
                        line: line_no,
                        detail: format!("'{}' closed but no section is open", name),
                    });
                }
            },
            None => {}
        }
    }

    if let Some((name, opened_at)) = stack.pop() {
        return Err(ModgenError::UnbalancedSection {
            line: opened_at,
            detail: format!("'{}' is never closed", name),
        });
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_markers() {
        assert_eq!(
            Marker::parse("    #<ECLIPSE><MUT>"),
            Some(Marker::Open {
                name: "ECLIPSE",
                mutually_exclusive: true
            })
        );
        assert_eq!(
            Marker::parse("#<\"Non-Weapon\" Damage Multiplier>"),
            Some(Marker::Open {
                name: "\"Non-Weapon\" Damage Multiplier",
                mutually_exclusive: false
            })
        );
        assert_eq!(
            Marker::parse("        #</Rockets>"),
            Some(Marker::Close { name: "Rockets" })
        );
        assert_eq!(Marker::parse("    # by Apocalyptech"), None);
        assert_eq!(Marker::parse("    #"), None);
        assert_eq!(Marker::parse("level Ma_FinalBoss_P set A B 1"), None);
    }

    #[test]
    fn balanced_document() {
        let text = "TPS\n#<Mod>\n    # note\n    #<Cat><MUT>\n        #<A>\n        #</A>\n    #</Cat>\n#</Mod>";
        let summary = check_sections(text).unwrap();
        assert_eq!(
            summary,
            SectionSummary {
                sections: 3,
                max_depth: 3
            }
        );
    }

    #[test]
    fn close_without_open() {
        let err = check_sections("#</A>").unwrap_err();
        assert!(matches!(err, ModgenError::UnbalancedSection { line: 1, .. }));
    }

    #[test]
    fn crossed_sections() {
        let err = check_sections("#<A>\n#<B>\n#</A>\n#</B>").unwrap_err();
        assert!(matches!(err, ModgenError::UnbalancedSection { line: 3, .. }));
    }

    #[test]
    fn unclosed_section() {
        let err = check_sections("#<A>\n#<B>\n#</B>").unwrap_err();
        assert!(matches!(err, ModgenError::UnbalancedSection { line: 1, .. }));
    }
}
