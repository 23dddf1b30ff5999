//! Bare type-name lookup for configuration-driven field declarations.
//!
//! Resolves names like `"String"`, `"List"` or `"double"` against an ordered
//! list of namespaces. Not used by the synthesizers themselves.

use crate::error::{ModelError, ModelResult};
use crate::types::{ClassName, TypeReference, JAVA_LANG, JAVA_UTIL};
use std::collections::{BTreeMap, BTreeSet};

const JAVA_LANG_NAMES: &[&str] = &[
    "Boolean",
    "Byte",
    "Character",
    "CharSequence",
    "Double",
    "Enum",
    "Float",
    "Integer",
    "Long",
    "Number",
    "Object",
    "Short",
    "String",
    "StringBuilder",
    "Void",
];

const JAVA_UTIL_NAMES: &[&str] = &[
    "ArrayList",
    "Collection",
    "Date",
    "HashMap",
    "HashSet",
    "LinkedHashMap",
    "LinkedList",
    "List",
    "Map",
    "Objects",
    "Optional",
    "Set",
    "TreeMap",
    "UUID",
];

/// Primitive spellings whose boxed class is not the capitalized keyword
const PRIMITIVE_ALIASES: &[(&str, &str)] = &[("char", "Character"), ("int", "Integer")];

/// Pluggable table of well-known classes grouped by namespace
#[derive(Debug, Clone)]
pub struct KnownTypes {
    /// Searched in order; `""` is the default (unnamed) namespace
    namespaces: Vec<String>,
    classes: BTreeMap<String, BTreeSet<String>>,
}

impl KnownTypes {
    /// A table with no namespaces registered
    pub fn empty() -> Self {
        Self {
            namespaces: Vec::new(),
            classes: BTreeMap::new(),
        }
    }

    pub fn new() -> Self {
        let mut known = Self::empty();
        known.add_namespace("");
        for name in JAVA_LANG_NAMES {
            known.register(JAVA_LANG, *name);
        }
        for name in JAVA_UTIL_NAMES {
            known.register(JAVA_UTIL, *name);
        }
        known
    }

    /// Append a namespace to the search order (no-op if already present)
    pub fn add_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        if !self.namespaces.contains(&namespace) {
            self.namespaces.push(namespace.clone());
        }
        self.classes.entry(namespace).or_default();
    }

    /// Register a class, adding its namespace to the search order if needed
    pub fn register(&mut self, namespace: impl Into<String>, simple_name: impl Into<String>) {
        let namespace = namespace.into();
        self.add_namespace(namespace.clone());
        self.classes
            .entry(namespace)
            .or_default()
            .insert(simple_name.into());
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    fn lookup(&self, namespace: &str, name: &str) -> Option<ClassName> {
        let registered = self.classes.get(namespace)?;
        if !registered.contains(name) {
            return None;
        }
        let qualified = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", namespace, name)
        };
        Some(ClassName::from_qualified(&qualified))
    }

    fn lookup_qualified(&self, name: &str) -> Option<ClassName> {
        let (namespace, simple) = name.rsplit_once('.')?;
        self.lookup(namespace, simple)
    }

    fn lookup_direct(&self, name: &str) -> Option<ClassName> {
        if let Some(found) = self.lookup_qualified(name) {
            return Some(found);
        }
        self.namespaces
            .iter()
            .find_map(|namespace| self.lookup(namespace, name))
    }

    /// Resolve a bare or qualified type name to a class reference.
    ///
    /// Lower-case names without a namespace are treated as primitive
    /// spellings and resolved to their boxed class (`char` -> `Character`,
    /// `double` -> `Double`).
    pub fn resolve(&self, name: &str) -> Option<TypeReference> {
        if name.is_empty() {
            return None;
        }
        if let Some(found) = self.lookup_direct(name) {
            return Some(TypeReference::Class(found));
        }

        let starts_lower = name.chars().next().is_some_and(char::is_lowercase);
        if name.contains('.') || !starts_lower {
            return None;
        }

        let boxed = PRIMITIVE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, boxed)| boxed.to_string())
            .unwrap_or_else(|| capitalize(name));

        self.lookup_direct(&boxed).map(TypeReference::Class)
    }

    /// Like [`KnownTypes::resolve`], but a miss is an error
    pub fn resolve_required(&self, name: &str) -> ModelResult<TypeReference> {
        self.resolve(name)
            .ok_or_else(|| ModelError::unknown_type(name))
    }
}

impl Default for KnownTypes {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
