use std::convert::identity;
use typecraft_model::*;

type Filter<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;
type Mapper<'a, T> = Box<dyn Fn(T) -> T + 'a>;

fn keep_all<T>(_: &T) -> bool {
    true
}

/// Structural copy of a type descriptor with per-member filters and mappers.
///
/// Fields, methods and super-interfaces pass through their filter first and
/// then their mapper. Everything else (annotations, documentation, nested
/// types, initializer blocks, provenance) is carried over as is.
pub struct TypeCopier<'a> {
    source: &'a TypeDescriptor,
    name: Option<String>,
    keep_super_type: bool,
    field_filter: Filter<'a, FieldDescriptor>,
    field_mapper: Mapper<'a, FieldDescriptor>,
    method_filter: Filter<'a, MethodDescriptor>,
    method_mapper: Mapper<'a, MethodDescriptor>,
    interface_filter: Filter<'a, TypeReference>,
    interface_mapper: Mapper<'a, TypeReference>,
}

impl<'a> TypeCopier<'a> {
    pub fn new(source: &'a TypeDescriptor) -> Self {
        Self {
            source,
            name: None,
            keep_super_type: true,
            field_filter: Box::new(keep_all),
            field_mapper: Box::new(identity),
            method_filter: Box::new(keep_all),
            method_mapper: Box::new(identity),
            interface_filter: Box::new(keep_all),
            interface_mapper: Box::new(identity),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn without_super_type(mut self) -> Self {
        self.keep_super_type = false;
        self
    }

    pub fn filter_fields(mut self, filter: impl Fn(&FieldDescriptor) -> bool + 'a) -> Self {
        self.field_filter = Box::new(filter);
        self
    }

    pub fn map_fields(mut self, mapper: impl Fn(FieldDescriptor) -> FieldDescriptor + 'a) -> Self {
        self.field_mapper = Box::new(mapper);
        self
    }

    pub fn filter_methods(mut self, filter: impl Fn(&MethodDescriptor) -> bool + 'a) -> Self {
        self.method_filter = Box::new(filter);
        self
    }

    pub fn map_methods(mut self, mapper: impl Fn(MethodDescriptor) -> MethodDescriptor + 'a) -> Self {
        self.method_mapper = Box::new(mapper);
        self
    }

    pub fn filter_super_interfaces(mut self, filter: impl Fn(&TypeReference) -> bool + 'a) -> Self {
        self.interface_filter = Box::new(filter);
        self
    }

    pub fn map_super_interfaces(mut self, mapper: impl Fn(TypeReference) -> TypeReference + 'a) -> Self {
        self.interface_mapper = Box::new(mapper);
        self
    }

    pub fn copy(self) -> TypeDescriptor {
        let source = self.source;

        let fields = source
            .fields
            .iter()
            .filter(|f| (self.field_filter)(*f))
            .cloned()
            .map(&self.field_mapper)
            .collect();
        let methods = source
            .methods
            .iter()
            .filter(|m| (self.method_filter)(*m))
            .cloned()
            .map(&self.method_mapper)
            .collect();
        let super_interfaces = source
            .super_interfaces
            .iter()
            .filter(|i| (self.interface_filter)(*i))
            .cloned()
            .map(&self.interface_mapper)
            .collect();

        TypeDescriptor {
            name: self.name.unwrap_or_else(|| source.name.clone()),
            super_type: if self.keep_super_type {
                source.super_type.clone()
            } else {
                None
            },
            fields,
            methods,
            super_interfaces,
            ..source.clone()
        }
    }
}
