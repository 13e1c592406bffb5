use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of relation types a model method can return.
///
/// `Relation` is the common base type; every other variant is one of the
/// framework's concrete relation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    Relation,
    BelongsTo,
    BelongsToMany,
    HasMany,
    HasManyThrough,
    HasOne,
    HasOneOrMany,
    HasOneThrough,
    MorphMany,
    MorphOne,
    MorphOneOrMany,
    MorphTo,
    MorphToMany,
}

impl RelationKind {
    pub const ALL: [RelationKind; 13] = [
        RelationKind::Relation,
        RelationKind::BelongsTo,
        RelationKind::BelongsToMany,
        RelationKind::HasMany,
        RelationKind::HasManyThrough,
        RelationKind::HasOne,
        RelationKind::HasOneOrMany,
        RelationKind::HasOneThrough,
        RelationKind::MorphMany,
        RelationKind::MorphOne,
        RelationKind::MorphOneOrMany,
        RelationKind::MorphTo,
        RelationKind::MorphToMany,
    ];

    /// Unqualified class name of this relation type.
    pub fn class_basename(self) -> &'static str {
        match self {
            RelationKind::Relation => "Relation",
            RelationKind::BelongsTo => "BelongsTo",
            RelationKind::BelongsToMany => "BelongsToMany",
            RelationKind::HasMany => "HasMany",
            RelationKind::HasManyThrough => "HasManyThrough",
            RelationKind::HasOne => "HasOne",
            RelationKind::HasOneOrMany => "HasOneOrMany",
            RelationKind::HasOneThrough => "HasOneThrough",
            RelationKind::MorphMany => "MorphMany",
            RelationKind::MorphOne => "MorphOne",
            RelationKind::MorphOneOrMany => "MorphOneOrMany",
            RelationKind::MorphTo => "MorphTo",
            RelationKind::MorphToMany => "MorphToMany",
        }
    }

    /// Resolve a (possibly namespaced) class name to a relation kind.
    ///
    /// Only the basename is compared, case-insensitively, so
    /// `\Illuminate\Database\Eloquent\Relations\HasMany`, `Relations\HasMany`
    /// and `hasmany` all resolve to [`RelationKind::HasMany`].
    pub fn from_class_name(name: &str) -> Option<Self> {
        let basename = class_basename(name);
        if basename.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|kind| kind.class_basename().eq_ignore_ascii_case(basename))
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_basename())
    }
}

/// Strip the namespace from a class reference.
pub fn class_basename(name: &str) -> &str {
    let name = name.trim().trim_start_matches('\\');
    name.rsplit('\\').next().unwrap_or(name)
}

/// A reference to a type, as written in a signature or a doc tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// A single class or builtin name, generic arguments already removed.
    Named(String),
    /// `?T` or `T|null`.
    Nullable(Box<TypeRef>),
    /// `A|B|...`.
    Union(Vec<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    /// Parse a textual type reference.
    ///
    /// Accepts `Name`, `\Ns\Name`, `?Name`, `A|B`, `A|null`, `(A&B)|null` and
    /// generic forms like `HasMany<Post, $this>`. Returns `None` for empty
    /// input or unbalanced brackets.
    pub fn parse(text: &str) -> Option<TypeRef> {
        let text = strip_outer_parens(text.trim());
        if text.is_empty() {
            return None;
        }

        if let Some(rest) = text.strip_prefix('?') {
            return TypeRef::parse(rest).map(TypeRef::nullable);
        }

        let parts = split_top_level(text, '|')?;
        if parts.len() > 1 {
            let members: Vec<TypeRef> = parts.into_iter().filter_map(TypeRef::parse).collect();
            let (nulls, rest): (Vec<TypeRef>, Vec<TypeRef>) =
                members.into_iter().partition(TypeRef::is_null);
            return match (nulls.is_empty(), rest.len()) {
                (_, 0) => nulls.into_iter().next(),
                (true, 1) => rest.into_iter().next(),
                (false, 1) => rest.into_iter().next().map(TypeRef::nullable),
                (true, _) => Some(TypeRef::Union(rest)),
                (false, _) => Some(TypeRef::nullable(TypeRef::Union(rest))),
            };
        }

        // Intersections only match through their members, so keep them as a
        // union of the parts for matching purposes.
        let parts = split_top_level(text, '&')?;
        if parts.len() > 1 {
            let members: Vec<TypeRef> = parts.into_iter().filter_map(TypeRef::parse).collect();
            return Some(TypeRef::Union(members));
        }

        let name = match text.find(&['<', '{', '('][..]) {
            Some(idx) => text[..idx].trim(),
            None => text,
        };
        if name.is_empty() {
            None
        } else {
            Some(TypeRef::Named(name.to_string()))
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, TypeRef::Named(name) if name.eq_ignore_ascii_case("null"))
    }

    /// The relation kind this type names, if any.
    ///
    /// Nullable types resolve through their inner type; unions resolve to the
    /// first member that names a relation.
    pub fn relation_kind(&self) -> Option<RelationKind> {
        match self {
            TypeRef::Named(name) => RelationKind::from_class_name(name),
            TypeRef::Nullable(inner) => inner.relation_kind(),
            TypeRef::Union(members) => members.iter().find_map(TypeRef::relation_kind),
        }
    }

    pub fn is_relation(&self) -> bool {
        self.relation_kind().is_some()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Nullable(inner) => match inner.as_ref() {
                TypeRef::Union(_) => write!(f, "{inner}|null"),
                _ => write!(f, "?{inner}"),
            },
            TypeRef::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}

/// Split on `sep` where it is not nested inside brackets.
///
/// Returns `None` if the brackets do not balance.
fn split_top_level(text: &str, sep: char) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            c if c == sep && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&text[start..]);
    Some(parts)
}

/// Remove one or more pairs of parentheses wrapping the whole text.
fn strip_outer_parens(mut text: &str) -> &str {
    while text.starts_with('(') && text.ends_with(')') {
        let inner = &text[1..text.len() - 1];
        // `(A)|(B)` starts and ends with parens but is not wrapped.
        if split_top_level(inner, '|').is_none() {
            break;
        }
        text = inner.trim();
    }
    text
}
