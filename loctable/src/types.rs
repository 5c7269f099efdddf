//! Core types for loctable: the tagged tree model and its flattened view.
//!
//! Parsers decode into these; encoders serialize these.

use std::fmt;
use std::io::BufRead;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{error::Error, traits::Parser};

/// A node in one locale's translation tree.
///
/// A node is either a `Leaf` holding a single translated string, or a
/// `Branch` holding named children in first-seen order. The variant is
/// fixed once, when the node is built (at document parse time or by
/// [`LocaleTree::insert`]); scalars other than strings are stringified at
/// that point (`5` becomes `"5"`, `true` becomes `"true"`, `null` becomes
/// `"null"`), and arrays become branches keyed by decimal index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleTree {
    /// A terminal translation value.
    Leaf(String),
    /// Named children, in insertion order.
    Branch(Vec<(String, LocaleTree)>),
}

impl LocaleTree {
    /// Creates an empty branch node.
    pub fn branch() -> Self {
        LocaleTree::Branch(Vec::new())
    }

    /// Returns the child at `key`, if this node is a branch that has one.
    pub fn child(&self, key: &str) -> Option<&LocaleTree> {
        match self {
            LocaleTree::Leaf(_) => None,
            LocaleTree::Branch(children) => children
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, child)| child),
        }
    }

    /// Inserts `value` as a leaf at the dotted `path`, creating
    /// intermediate branches as needed.
    ///
    /// Conflicting shapes resolve by last write wins: a leaf found where
    /// the descent needs a branch is replaced by an empty branch, and
    /// whatever sits at the final segment is overwritten by the new leaf.
    pub fn insert(&mut self, path: &str, value: impl Into<String>) {
        match path.split_once('.') {
            Some((head, rest)) => self.child_branch(head).insert(rest, value),
            None => self.set_leaf(path, value.into()),
        }
    }

    /// Produces the flat dotted-path view of this tree.
    ///
    /// Every leaf contributes one entry keyed by the `.`-joined segments
    /// leading to it, in the tree's stored order. Empty branches
    /// contribute nothing.
    pub fn flatten(&self) -> FlatMap {
        let mut map = FlatMap::new();
        self.flatten_into("", &mut map);
        map
    }

    fn flatten_into(&self, prefix: &str, map: &mut FlatMap) {
        match self {
            LocaleTree::Leaf(value) => map.insert(prefix.to_string(), value.clone()),
            LocaleTree::Branch(children) => {
                for (key, child) in children {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    child.flatten_into(&path, map);
                }
            }
        }
    }

    /// Returns the branch child at `key`, creating it if absent and
    /// replacing any leaf in the way.
    fn child_branch(&mut self, key: &str) -> &mut LocaleTree {
        let children = self.children_mut();
        if let Some(index) = children.iter().position(|(k, _)| k == key) {
            if matches!(children[index].1, LocaleTree::Leaf(_)) {
                children[index].1 = LocaleTree::branch();
            }
            &mut children[index].1
        } else {
            children.push((key.to_string(), LocaleTree::branch()));
            let last = children.len() - 1;
            &mut children[last].1
        }
    }

    fn set_leaf(&mut self, key: &str, value: String) {
        let children = self.children_mut();
        match children.iter_mut().find(|(k, _)| k == key) {
            Some((_, node)) => *node = LocaleTree::Leaf(value),
            None => children.push((key.to_string(), LocaleTree::Leaf(value))),
        }
    }

    /// Adds or replaces a direct child, keeping the first-seen position
    /// when a key repeats.
    fn set_child(&mut self, key: String, child: LocaleTree) {
        let children = self.children_mut();
        match children.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = child,
            None => children.push((key, child)),
        }
    }

    fn children_mut(&mut self) -> &mut Vec<(String, LocaleTree)> {
        if matches!(self, LocaleTree::Leaf(_)) {
            *self = LocaleTree::branch();
        }
        match self {
            LocaleTree::Branch(children) => children,
            LocaleTree::Leaf(_) => unreachable!("leaf was just replaced by a branch"),
        }
    }
}

impl Default for LocaleTree {
    fn default() -> Self {
        LocaleTree::branch()
    }
}

impl Serialize for LocaleTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LocaleTree::Leaf(value) => serializer.serialize_str(value),
            LocaleTree::Branch(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, child) in children {
                    map.serialize_entry(key, child)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for LocaleTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TreeVisitor;

        impl<'de> Visitor<'de> for TreeVisitor {
            type Value = LocaleTree;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a translation tree (object, array, or scalar)")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(LocaleTree::Leaf(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(LocaleTree::Leaf(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(LocaleTree::Leaf(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(LocaleTree::Leaf(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(LocaleTree::Leaf(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(LocaleTree::Leaf(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(LocaleTree::Leaf("null".to_string()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut children = Vec::new();
                while let Some(child) = access.next_element::<LocaleTree>()? {
                    children.push((children.len().to_string(), child));
                }
                Ok(LocaleTree::Branch(children))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut node = LocaleTree::branch();
                while let Some((key, child)) = access.next_entry::<String, LocaleTree>()? {
                    node.set_child(key, child);
                }
                Ok(node)
            }
        }

        deserializer.deserialize_any(TreeVisitor)
    }
}

/// Flattened view of one locale tree: dotted path to leaf value, in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatMap {
    entries: Vec<(String, String)>,
}

impl FlatMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, overwriting the value in place if the path already
    /// exists.
    pub fn insert(&mut self, path: String, value: String) {
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((path, value)),
        }
    }

    /// Looks up the value stored at `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuilds the nested tree these dotted paths describe.
    ///
    /// Inverse of [`LocaleTree::flatten`] whenever no path in the map is a
    /// strict prefix of another; otherwise the last written path wins.
    pub fn to_tree(&self) -> LocaleTree {
        let mut tree = LocaleTree::branch();
        for (path, value) in self.iter() {
            tree.insert(path, value);
        }
        tree
    }
}

impl FromIterator<(String, String)> for FlatMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = FlatMap::new();
        for (path, value) in iter {
            map.insert(path, value);
        }
        map
    }
}

/// A full localization document: one translation tree per locale tag, in
/// document order.
///
/// This is the parsed form of the JSON side of a conversion, e.g.
/// `{"en": {...}, "fi": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleDocument {
    locales: Vec<(String, LocaleTree)>,
}

impl LocaleDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tree for `locale`, if present.
    pub fn get(&self, locale: &str) -> Option<&LocaleTree> {
        self.locales
            .iter()
            .find(|(tag, _)| tag == locale)
            .map(|(_, tree)| tree)
    }

    /// Returns the tree for `locale` mutably, if present.
    pub fn get_mut(&mut self, locale: &str) -> Option<&mut LocaleTree> {
        self.locales
            .iter_mut()
            .find(|(tag, _)| tag == locale)
            .map(|(_, tree)| tree)
    }

    /// Adds or replaces the tree for a locale, keeping the first-seen
    /// position when a tag repeats.
    pub fn insert(&mut self, locale: impl Into<String>, tree: LocaleTree) {
        let locale = locale.into();
        match self.locales.iter_mut().find(|(tag, _)| *tag == locale) {
            Some((_, existing)) => *existing = tree,
            None => self.locales.push((locale, tree)),
        }
    }

    /// Iterates locales in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleTree)> {
        self.locales.iter().map(|(tag, tree)| (tag.as_str(), tree))
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl Serialize for LocaleDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.locales.len()))?;
        for (tag, tree) in &self.locales {
            map.serialize_entry(tag, tree)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LocaleDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = LocaleDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping locale tags to translation trees")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut document = LocaleDocument::new();
                while let Some((tag, tree)) = access.next_entry::<String, LocaleTree>()? {
                    document.insert(tag, tree);
                }
                Ok(document)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

impl Parser for LocaleDocument {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Write to any writer (file, memory, etc.), pretty-printed with
    /// two-space indentation.
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_single_segment() {
        let mut tree = LocaleTree::branch();
        tree.insert("greeting", "hello");
        assert_eq!(
            tree.child("greeting"),
            Some(&LocaleTree::Leaf("hello".to_string()))
        );
    }

    #[test]
    fn test_insert_nested_creates_branches() {
        let mut tree = LocaleTree::branch();
        tree.insert("a.b.c", "deep");
        let leaf = tree
            .child("a")
            .and_then(|n| n.child("b"))
            .and_then(|n| n.child("c"));
        assert_eq!(leaf, Some(&LocaleTree::Leaf("deep".to_string())));
    }

    #[test]
    fn test_insert_overwrites_existing_leaf() {
        let mut tree = LocaleTree::branch();
        tree.insert("a", "first");
        tree.insert("a", "second");
        assert_eq!(tree.child("a"), Some(&LocaleTree::Leaf("second".to_string())));
    }

    #[test]
    fn test_insert_last_write_wins_on_shape_conflict() {
        // "a" as a leaf, then "a.b" forces "a" into a branch
        let mut tree = LocaleTree::branch();
        tree.insert("a", "leaf");
        tree.insert("a.b", "nested");
        let nested = tree.child("a").and_then(|n| n.child("b"));
        assert_eq!(nested, Some(&LocaleTree::Leaf("nested".to_string())));

        // and the other way around: a branch is replaced by a leaf
        tree.insert("a", "leaf again");
        assert_eq!(
            tree.child("a"),
            Some(&LocaleTree::Leaf("leaf again".to_string()))
        );
    }

    #[test]
    fn test_flatten_preserves_insertion_order() {
        let mut tree = LocaleTree::branch();
        tree.insert("b.x", "1");
        tree.insert("a", "2");
        tree.insert("b.y", "3");
        let flat = tree.flatten();
        let paths: Vec<&str> = flat.iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["b.x", "b.y", "a"]);
    }

    #[test]
    fn test_flatten_skips_empty_branches() {
        let mut tree = LocaleTree::branch();
        tree.insert("kept", "v");
        if let LocaleTree::Branch(children) = &mut tree {
            children.push(("empty".to_string(), LocaleTree::branch()));
        }
        let flat = tree.flatten();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("kept"), Some("v"));
    }

    #[test]
    fn test_flat_map_to_tree_inverts_flatten() {
        let mut tree = LocaleTree::branch();
        tree.insert("a.b", "1");
        tree.insert("a.c", "2");
        tree.insert("d", "3");
        let flat = tree.flatten();
        assert_eq!(flat.to_tree(), tree);
    }

    #[test]
    fn test_deserialize_stringifies_scalars() {
        let tree: LocaleTree =
            serde_json::from_str(r#"{"n": 5, "f": 1.5, "b": true, "z": null, "s": "x"}"#).unwrap();
        let flat = tree.flatten();
        assert_eq!(flat.get("n"), Some("5"));
        assert_eq!(flat.get("f"), Some("1.5"));
        assert_eq!(flat.get("b"), Some("true"));
        assert_eq!(flat.get("z"), Some("null"));
        assert_eq!(flat.get("s"), Some("x"));
    }

    #[test]
    fn test_deserialize_preserves_key_order() {
        let tree: LocaleTree =
            serde_json::from_str(r#"{"z": "1", "a": {"m": "2", "b": "3"}, "k": "4"}"#).unwrap();
        let flat = tree.flatten();
        let paths: Vec<&str> = flat.iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["z", "a.m", "a.b", "k"]);
    }

    #[test]
    fn test_deserialize_arrays_as_indexed_branches() {
        let tree: LocaleTree = serde_json::from_str(r#"{"items": ["one", "two"]}"#).unwrap();
        let flat = tree.flatten();
        assert_eq!(flat.get("items.0"), Some("one"));
        assert_eq!(flat.get("items.1"), Some("two"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut tree = LocaleTree::branch();
        tree.insert("a.b", "hei");
        tree.insert("c", "moi");
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"a":{"b":"hei"},"c":"moi"}"#);
        let back: LocaleTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn test_document_parse_and_lookup() {
        let document =
            LocaleDocument::from_str(r#"{"en": {"a": "hello"}, "fi": {"a": "hei"}}"#).unwrap();
        assert_eq!(document.len(), 2);
        let tags: Vec<&str> = document.iter().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec!["en", "fi"]);
        assert_eq!(
            document.get("fi").unwrap().flatten().get("a"),
            Some("hei")
        );
        assert!(document.get("sv").is_none());
    }

    #[test]
    fn test_document_rejects_non_object() {
        let result = LocaleDocument::from_str(r#"["en", "fi"]"#);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_document_pretty_output() {
        let mut en = LocaleTree::branch();
        en.insert("a.b", "hi");
        let mut document = LocaleDocument::new();
        document.insert("en", en);
        let text = document.to_text().unwrap();
        assert_eq!(text, "{\n  \"en\": {\n    \"a\": {\n      \"b\": \"hi\"\n    }\n  }\n}");
    }
}
