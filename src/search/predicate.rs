//! Compiled predicate tree
//!
//! The compiler's output. A downstream query executor translates it into its
//! own filter language; `Display` gives a readable form for logs and tests.

use std::fmt;

use serde::Serialize;

use super::path::TypedValue;
use crate::schema::FieldType;

/// A boolean filter over entity fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// No filter: every row matches
    Always,

    /// Pattern match against the field's textual form.
    ///
    /// Numeric fields are matched this way too.
    Like {
        path: String,
        field_type: FieldType,
        pattern: String,
    },

    /// Typed equality
    Eq { path: String, value: TypedValue },

    /// Logical OR of two or more predicates
    Any { predicates: Vec<Predicate> },
}

impl Predicate {
    pub fn like(path: impl Into<String>, field_type: FieldType, pattern: impl Into<String>) -> Self {
        Predicate::Like {
            path: path.into(),
            field_type,
            pattern: pattern.into(),
        }
    }

    pub fn eq(path: impl Into<String>, value: TypedValue) -> Self {
        Predicate::Eq {
            path: path.into(),
            value,
        }
    }

    /// OR-combines predicates.
    ///
    /// `Always` operands are dropped and nested `Any` nodes are flattened.
    /// Nothing left yields `Always`; a single operand is returned as is.
    pub fn any(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        let mut flat = Vec::new();
        for predicate in predicates {
            match predicate {
                Predicate::Always => {}
                Predicate::Any { predicates } => flat.extend(predicates),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Predicate::Always,
            1 => flat.remove(0),
            _ => Predicate::Any { predicates: flat },
        }
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Predicate::Always)
    }

    /// Field paths referenced, in order of appearance
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Predicate::Always => Vec::new(),
            Predicate::Like { path, .. } | Predicate::Eq { path, .. } => vec![path.as_str()],
            Predicate::Any { predicates } => predicates.iter().flat_map(|p| p.paths()).collect(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Always => write!(f, "true"),
            Predicate::Like { path, pattern, .. } => write!(f, "{} like '{}'", path, pattern),
            Predicate::Eq { path, value } => write!(f, "{} = '{}'", path, value),
            Predicate::Any { predicates } => {
                for (i, predicate) in predicates.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{}", predicate)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_like() -> Predicate {
        Predicate::like("pot.title", FieldType::String, "bread%")
    }

    #[test]
    fn test_any_empty_is_always() {
        assert_eq!(Predicate::any(Vec::new()), Predicate::Always);
        assert_eq!(
            Predicate::any(vec![Predicate::Always, Predicate::Always]),
            Predicate::Always
        );
    }

    #[test]
    fn test_any_single_unwraps() {
        assert_eq!(Predicate::any(vec![title_like()]), title_like());
    }

    #[test]
    fn test_any_flattens() {
        let inner = Predicate::any(vec![
            title_like(),
            Predicate::eq("pot.id", TypedValue::Long(3)),
        ]);
        let outer = Predicate::any(vec![
            inner,
            Predicate::like("pot.address", FieldType::String, "%market"),
        ]);

        match &outer {
            Predicate::Any { predicates } => assert_eq!(predicates.len(), 3),
            other => panic!("expected Any, got {:?}", other),
        }
        assert_eq!(outer.paths(), vec!["pot.title", "pot.id", "pot.address"]);
    }

    #[test]
    fn test_display() {
        let predicate = Predicate::any(vec![
            title_like(),
            Predicate::eq("pot.id", TypedValue::Long(3)),
        ]);
        assert_eq!(predicate.to_string(), "pot.title like 'bread%' or pot.id = '3'");
        assert_eq!(Predicate::Always.to_string(), "true");
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(title_like()).unwrap();
        assert_eq!(json["op"], "like");
        assert_eq!(json["path"], "pot.title");
        assert_eq!(json["field_type"], "string");
        assert_eq!(json["pattern"], "bread%");
    }
}
