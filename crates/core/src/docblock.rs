//! Best-effort extraction of return-type tags from documentation comments.
//!
//! Only `@return` and its static-analyzer spellings (`@phpstan-return`,
//! `@psalm-return`) are recognised. Anything that does not parse is simply
//! ignored; this module never returns an error.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{RelationKind, TypeRef};

lazy_static! {
    static ref RETURN_TAG: Regex =
        Regex::new(r"(?m)@(?:phpstan-|psalm-)?return[ \t]+([^\r\n]+)").expect("valid regex");
}

/// All return types annotated in `doc`, in the order they appear.
pub fn return_types(doc: &str) -> Vec<TypeRef> {
    RETURN_TAG
        .captures_iter(doc)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| {
            let token = type_token(m.as_str());
            let parsed = TypeRef::parse(token);
            tracing::trace!(tag = m.as_str(), token, parsed = ?parsed, "doc return tag");
            parsed
        })
        .collect()
}

/// Relation kind named by any return tag in `doc`.
pub fn relation_return_kind(doc: &str) -> Option<RelationKind> {
    return_types(doc).iter().find_map(TypeRef::relation_kind)
}

/// Cut the type expression off the rest of a tag line.
///
/// The type ends at the first whitespace outside brackets, except around `|`
/// and `&` so that `A | null` stays one token. A trailing `*/` is dropped.
fn type_token(line: &str) -> &str {
    let line = line.trim();
    let mut depth: i32 = 0;
    let mut end = line.len();
    let mut prev = '\0';
    for (idx, ch) in line.char_indices() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            c if c.is_whitespace() && depth <= 0 => {
                let next = line[idx..].trim_start().chars().next();
                let joins = matches!(prev, '|' | '&') || matches!(next, Some('|') | Some('&'));
                if !joins {
                    end = idx;
                    break;
                }
                continue;
            }
            _ => {}
        }
        prev = ch;
    }
    let token = line[..end].trim_end();
    token.strip_suffix("*/").unwrap_or(token).trim_end()
}
