use serde::{Deserialize, Serialize};
use std::fmt;

pub const JAVA_LANG: &str = "java.lang";
pub const JAVA_UTIL: &str = "java.util";

/// Primitive (unboxed) value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Char,
        PrimitiveType::Float,
        PrimitiveType::Double,
        PrimitiveType::Void,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    /// Wrapper class used when the value has to live on the heap
    pub fn boxed(self) -> ClassName {
        let simple = match self {
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Byte => "Byte",
            PrimitiveType::Short => "Short",
            PrimitiveType::Int => "Integer",
            PrimitiveType::Long => "Long",
            PrimitiveType::Char => "Character",
            PrimitiveType::Float => "Float",
            PrimitiveType::Double => "Double",
            PrimitiveType::Void => "Void",
        };
        ClassName::new(JAVA_LANG, simple)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Fully qualified name of a declared type, including enclosing types
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassName {
    pub package: String,
    /// Outermost first; never empty
    pub simple_names: Vec<String>,
}

impl ClassName {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    /// Split a dotted name: lower-case leading segments form the package,
    /// the first capitalized segment starts the type path.
    pub fn from_qualified(qualified: &str) -> Self {
        let segments: Vec<&str> = qualified.split('.').collect();
        let split = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(segments.len().saturating_sub(1));

        Self {
            package: segments[..split].join("."),
            simple_names: segments[split..].iter().map(|s| s.to_string()).collect(),
        }
    }

    /// A type nested inside this one
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    pub fn enclosing(&self) -> Option<Self> {
        if self.simple_names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or_default()
    }

    pub fn canonical_name(&self) -> String {
        let path = self.simple_names.join(".");
        if self.package.is_empty() {
            path
        } else {
            format!("{}.{}", self.package, path)
        }
    }

    pub fn object() -> Self {
        Self::new(JAVA_LANG, "Object")
    }

    pub fn string() -> Self {
        Self::new(JAVA_LANG, "String")
    }

    pub fn objects() -> Self {
        Self::new("java.util", "Objects")
    }

    pub fn override_marker() -> Self {
        Self::new(JAVA_LANG, "Override")
    }

    pub fn serialization_ignore() -> Self {
        Self::new("com.fasterxml.jackson.annotation", "JsonIgnore")
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

/// Identifies a type by structure, so two independently built references
/// to the same type compare (and hash) equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeReference {
    Primitive(PrimitiveType),
    Class(ClassName),
    Array(Box<TypeReference>),
}

impl TypeReference {
    pub fn class(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        TypeReference::Class(ClassName::new(package, simple_name))
    }

    pub fn array_of(element: TypeReference) -> Self {
        TypeReference::Array(Box::new(element))
    }

    pub fn void() -> Self {
        TypeReference::Primitive(PrimitiveType::Void)
    }

    pub fn object() -> Self {
        TypeReference::Class(ClassName::object())
    }

    pub fn string() -> Self {
        TypeReference::Class(ClassName::string())
    }

    pub fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            TypeReference::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn class_name(&self) -> Option<&ClassName> {
        match self {
            TypeReference::Class(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeReference::Primitive(p) if *p != PrimitiveType::Void)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeReference::Primitive(PrimitiveType::Void))
    }

    /// `java.lang.Object`, the implicit root of every class hierarchy
    pub fn is_object(&self) -> bool {
        matches!(self, TypeReference::Class(name) if *name == ClassName::object())
    }

    /// Primitives become their wrapper class, everything else is unchanged
    pub fn boxed(&self) -> TypeReference {
        match self {
            TypeReference::Primitive(p) => TypeReference::Class(p.boxed()),
            other => other.clone(),
        }
    }

    /// Unqualified name, used when deriving member names from a type
    pub fn simple_name(&self) -> String {
        match self {
            TypeReference::Primitive(p) => p.keyword().to_string(),
            TypeReference::Class(name) => name.simple_name().to_string(),
            TypeReference::Array(element) => format!("{}[]", element.simple_name()),
        }
    }
}

impl From<PrimitiveType> for TypeReference {
    fn from(p: PrimitiveType) -> Self {
        TypeReference::Primitive(p)
    }
}

impl From<ClassName> for TypeReference {
    fn from(name: ClassName) -> Self {
        TypeReference::Class(name)
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeReference::Primitive(p) => write!(f, "{}", p),
            TypeReference::Class(name) => write!(f, "{}", name),
            TypeReference::Array(element) => write!(f, "{}[]", element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_structural_equality_as_key() {
        let a = TypeReference::class("geo", "Node");
        let b = TypeReference::Class(ClassName::from_qualified("geo.Node"));

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_from_qualified_nested() {
        let name = ClassName::from_qualified("com.acme.Shape.Builder");
        assert_eq!(name.package, "com.acme");
        assert_eq!(name.simple_names, vec!["Shape", "Builder"]);
        assert_eq!(name.simple_name(), "Builder");
        assert_eq!(name.enclosing(), Some(ClassName::new("com.acme", "Shape")));
    }

    #[test]
    fn test_boxing() {
        let int: TypeReference = PrimitiveType::Int.into();
        assert_eq!(int.boxed(), TypeReference::class(JAVA_LANG, "Integer"));
        assert_eq!(TypeReference::string().boxed(), TypeReference::string());
        assert!(!TypeReference::void().is_primitive());
    }

    #[test]
    fn test_display() {
        let array = TypeReference::array_of(PrimitiveType::Double.into());
        assert_eq!(array.to_string(), "double[]");
        assert_eq!(TypeReference::object().to_string(), "java.lang.Object");
        assert_eq!(ClassName::new("", "Local").to_string(), "Local");
    }
}
