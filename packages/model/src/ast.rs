use crate::body::{Expr, Statement};
use crate::types::{ClassName, TypeReference};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Name given to constructors in the method list
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Visibility, storage and immutability qualifiers.
///
/// Variants are declared in canonical source order, so a `BTreeSet`
/// iterates them the way they are conventionally written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Default => "default",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

pub type Modifiers = BTreeSet<Modifier>;

/// Marker annotation attached to a type or member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub ty: ClassName,
}

impl Annotation {
    pub fn new(ty: ClassName) -> Self {
        Self { ty }
    }

    /// The "overrides" marker
    pub fn override_marker() -> Self {
        Self::new(ClassName::override_marker())
    }

    /// Excludes an accessor from generic serialization
    pub fn serialization_ignore() -> Self {
        Self::new(ClassName::serialization_ignore())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Record,
    Interface,
    Enumeration,
    AnnotationLike,
}

/// A formal parameter of a method or constructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub ty: TypeReference,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeReference>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: Modifiers::new(),
        }
    }
}

/// Field of a type. Owned by exactly one descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeReference,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub documentation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expr>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeReference>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            documentation: String::new(),
            initializer: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_initializer(mut self, initializer: Expr) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_static(&self) -> bool {
        self.has_modifier(Modifier::Static)
    }

    /// Immutable once the constructor has run
    pub fn is_final(&self) -> bool {
        self.has_modifier(Modifier::Final)
    }
}

/// Method or constructor. Never mutated after construction; synthesizers
/// build fresh instances (see the consuming `with_*` helpers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: TypeReference,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub varargs: bool,
    #[serde(default)]
    pub body: Vec<Statement>,
    #[serde(default)]
    pub documentation: String,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: TypeReference::void(),
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            varargs: false,
            body: Vec::new(),
            documentation: String::new(),
        }
    }

    pub fn constructor() -> Self {
        Self::new(CONSTRUCTOR_NAME)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    pub fn returns(mut self, ty: impl Into<TypeReference>) -> Self {
        self.return_type = ty.into();
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: impl Into<TypeReference>) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, ty));
        self
    }

    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = ParameterDescriptor>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_varargs(mut self, varargs: bool) -> Self {
        self.varargs = varargs;
        self
    }

    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.body.push(statement);
        self
    }

    pub fn with_body(mut self, body: impl IntoIterator<Item = Statement>) -> Self {
        self.body.extend(body);
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn has_annotation(&self, ty: &ClassName) -> bool {
        self.annotations.iter().any(|a| a.ty == *ty)
    }

    pub fn is_public(&self) -> bool {
        self.has_modifier(Modifier::Public)
    }
}

/// A constant of an enumeration kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Expr>,
    #[serde(default)]
    pub documentation: String,
}

impl EnumConstant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            documentation: String::new(),
        }
    }
}

/// Snapshot of a class-like type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub type_variables: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_type: Option<TypeReference>,
    #[serde(default)]
    pub super_interfaces: Vec<TypeReference>,
    #[serde(default)]
    pub enum_constants: Vec<EnumConstant>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    #[serde(default)]
    pub nested_types: Vec<TypeDescriptor>,
    #[serde(default)]
    pub initializer_block: Vec<Statement>,
    #[serde(default)]
    pub static_block: Vec<Statement>,
    /// Provenance markers naming the source elements this type came from
    #[serde(default)]
    pub originating_elements: Vec<String>,
    #[serde(default)]
    pub always_qualified_names: Vec<String>,
}

impl TypeDescriptor {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            documentation: String::new(),
            type_variables: Vec::new(),
            super_type: None,
            super_interfaces: Vec::new(),
            enum_constants: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            nested_types: Vec::new(),
            initializer_block: Vec::new(),
            static_block: Vec::new(),
            originating_elements: Vec::new(),
            always_qualified_names: Vec::new(),
        }
    }

    pub fn record(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Record, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn with_super_type(mut self, super_type: impl Into<TypeReference>) -> Self {
        self.super_type = Some(super_type.into());
        self
    }

    pub fn with_super_interface(mut self, super_interface: impl Into<TypeReference>) -> Self {
        self.super_interfaces.push(super_interface.into());
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_methods(mut self, methods: impl IntoIterator<Item = MethodDescriptor>) -> Self {
        self.methods.extend(methods);
        self
    }

    pub fn with_nested_type(mut self, nested: TypeDescriptor) -> Self {
        self.nested_types.push(nested);
        self
    }

    pub fn with_enum_constant(mut self, constant: EnumConstant) -> Self {
        self.enum_constants.push(constant);
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All methods (constructors excluded) with the given name
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodDescriptor> + 'a {
        self.methods
            .iter()
            .filter(move |m| m.name == name && !m.is_constructor())
    }

    pub fn constructors(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter().filter(|m| m.is_constructor())
    }

    pub fn nested_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.nested_types.iter().find(|t| t.name == name)
    }

    /// A super type other than the implicit root
    pub fn has_non_trivial_super_type(&self) -> bool {
        self.super_type.as_ref().is_some_and(|t| !t.is_object())
    }
}
