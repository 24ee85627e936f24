//! Named custom types declared at the schema root.
//!
//! [`CustomTypes`] owns every compiled custom type. Reference nodes inside the
//! schema hold only a name and look the node up here at validation time, which
//! is what lets a type refer to itself or to a type declared after it.

use indexmap::IndexMap;

use crate::schema::ValidatorNode;

/// The built-in type names; custom types may not reuse them.
pub const BUILTIN_TYPES: [&str; 5] = ["any", "string", "float", "array", "object"];

/// Returns true if `name` is a built-in type name.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// An immutable table of compiled custom types, in declaration order.
#[derive(Debug, Default)]
pub struct CustomTypes {
    types: IndexMap<String, ValidatorNode>,
}

impl CustomTypes {
    pub(crate) fn new(types: IndexMap<String, ValidatorNode>) -> Self {
        Self { types }
    }

    /// Returns the custom type with the given name.
    pub fn get(&self, name: &str) -> Option<&ValidatorNode> {
        self.types.get(name)
    }

    /// Returns true if a custom type with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the declared names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Returns the number of custom types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no custom types are declared.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an iterator over `(name, node)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidatorNode)> {
        self.types.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Finds a custom type whose definition is a chain of references that
    /// leads back to itself.
    pub(crate) fn find_alias_cycle(&self) -> Option<&str> {
        self.types.keys().map(String::as_str).find(|start| {
            let mut seen = vec![*start];
            let mut current = *start;
            while let Some(ValidatorNode::CustomRef(reference)) = self.types.get(current) {
                current = reference.name();
                if seen.contains(&current) {
                    return current == *start;
                }
                seen.push(current);
            }
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AnyNode, CustomRef};

    fn table(entries: Vec<(&str, ValidatorNode)>) -> CustomTypes {
        CustomTypes::new(
            entries
                .into_iter()
                .map(|(name, node)| (name.to_string(), node))
                .collect(),
        )
    }

    #[test]
    fn test_builtin_names() {
        assert!(is_builtin("object"));
        assert!(is_builtin("any"));
        assert!(!is_builtin("node"));
    }

    #[test]
    fn test_lookup_and_order() {
        let types = table(vec![
            ("b", ValidatorNode::Any(AnyNode::default())),
            ("a", ValidatorNode::CustomRef(CustomRef::new("b"))),
        ]);

        assert_eq!(types.len(), 2);
        assert!(types.contains("a"));
        assert!(types.get("missing").is_none());
        assert_eq!(types.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(types.find_alias_cycle().is_none());
    }

    #[test]
    fn test_self_alias_is_a_cycle() {
        let types = table(vec![("a", ValidatorNode::CustomRef(CustomRef::new("a")))]);
        assert_eq!(types.find_alias_cycle(), Some("a"));
    }

    #[test]
    fn test_mutual_alias_is_a_cycle() {
        let types = table(vec![
            ("a", ValidatorNode::CustomRef(CustomRef::new("b"))),
            ("b", ValidatorNode::CustomRef(CustomRef::new("a"))),
        ]);
        assert_eq!(types.find_alias_cycle(), Some("a"));
    }

    #[test]
    fn test_chain_into_cycle_reports_cycle_member() {
        let types = table(vec![
            ("entry", ValidatorNode::CustomRef(CustomRef::new("x"))),
            ("x", ValidatorNode::CustomRef(CustomRef::new("x"))),
        ]);
        assert_eq!(types.find_alias_cycle(), Some("x"));
    }
}
