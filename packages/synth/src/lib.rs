//! # Typecraft Synth
//!
//! Synthesizers that derive new members and types from a
//! [`TypeDescriptor`](typecraft_model::TypeDescriptor): accessors, nested
//! builders, structural equality, interface/implementation splits and
//! visitor scaffolding. Each one validates its input, then returns a new
//! descriptor and leaves the input untouched, so they compose in any order.
//!
//! ```rust
//! use typecraft_model::{FieldDescriptor, PrimitiveType, TypeDescriptor};
//! use typecraft_synth::{synthesize_builder, synthesize_getters, BuilderOptions, GetterOptions};
//!
//! let point = TypeDescriptor::record("Point")
//!     .with_field(FieldDescriptor::new("x", PrimitiveType::Int))
//!     .with_field(FieldDescriptor::new("y", PrimitiveType::Int));
//!
//! let point = synthesize_getters(&point, &GetterOptions::default()).unwrap();
//! let point = synthesize_builder(&point, &BuilderOptions::new("geo")).unwrap();
//!
//! assert!(point.nested_type("Builder").is_some());
//! assert_eq!(point.methods.len(), 4);
//! ```

mod accessors;
mod builder;
mod config;
mod copy;
mod equality;
mod interface;
mod value_class;
mod visitor;

pub use accessors::{
    getter_for_field, setter_for_field, synthesize_getters, synthesize_setters, GetterOptions,
    ReturnObject, SetterOptions,
};
pub use builder::{synthesize_builder, BuilderOptions, BUILD_METHOD, DEFAULT_BUILDER_NAME, FACTORY_METHOD};
pub use config::{FieldConfig, GenerationConfig, ValueClassConfig, DEFAULT_CONFIG_NAME};
pub use copy::TypeCopier;
pub use equality::{
    hash_constants, is_prime, make_equals, make_hash_code, random_prime, synthesize_equality,
    EqualityOptions, HashSeed, EQUALS_METHOD, HASH_CODE_METHOD, MAX_HASH_PRIME,
};
pub use interface::{extract_interface, InterfaceAndImplementation, InterfaceOptions};
pub use value_class::{value_class, value_class_from_bare_names, ValueClassOptions};
pub use visitor::{VisitorOutput, VisitorSynthesizer, VISITED_PARAMETER, VISITOR_PARAMETER, VISIT_METHOD};

// Re-export the naming convention for option structs
pub use typecraft_common::NamingConvention;
