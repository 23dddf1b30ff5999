//! # Typecraft Model
//!
//! In-memory description of class-like types: fields, methods, modifiers,
//! super types and structured method bodies. Descriptors are plain values;
//! every synthesizer reads one snapshot and returns a new descriptor.
//!
//! ```rust
//! use typecraft_model::{FieldDescriptor, Modifier, PrimitiveType, TypeDescriptor};
//!
//! let point = TypeDescriptor::record("Point")
//!     .with_modifiers([Modifier::Public])
//!     .with_field(FieldDescriptor::new("x", PrimitiveType::Double).with_modifiers([Modifier::Private]))
//!     .with_field(FieldDescriptor::new("y", PrimitiveType::Double).with_modifiers([Modifier::Private]));
//!
//! assert_eq!(point.fields.len(), 2);
//! ```

pub mod ast;
pub mod body;
pub mod error;
pub mod known_types;
pub mod types;

pub use ast::{
    Annotation, EnumConstant, FieldDescriptor, MethodDescriptor, Modifier, Modifiers,
    ParameterDescriptor, TypeDescriptor, TypeKind, CONSTRUCTOR_NAME,
};
pub use body::{render_body, BinaryOp, Expr, Literal, Statement, UnaryOp};
pub use error::{ModelError, ModelResult};
pub use known_types::KnownTypes;
pub use types::{ClassName, PrimitiveType, TypeReference, JAVA_LANG, JAVA_UTIL};
