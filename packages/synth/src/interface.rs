use crate::copy::TypeCopier;
use tracing::{debug, info};
use typecraft_common::{validate_type, CommonResult, NamingConvention};
use typecraft_model::*;

/// Options for interface extraction
#[derive(Debug, Clone, Default)]
pub struct InterfaceOptions {
    /// Package both generated types live in
    pub package: String,
    /// Applied to the source name to name the interface
    pub interface_naming: NamingConvention,
    /// Applied to the source name to name the implementation
    pub implementation_naming: NamingConvention,
}

impl InterfaceOptions {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn with_interface_naming(mut self, naming: impl Into<NamingConvention>) -> Self {
        self.interface_naming = naming.into();
        self
    }

    pub fn with_implementation_naming(mut self, naming: impl Into<NamingConvention>) -> Self {
        self.implementation_naming = naming.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceAndImplementation {
    pub interface: TypeDescriptor,
    pub implementation: TypeDescriptor,
}

/// Only instance methods that are public cross into the interface
fn is_capability(method: &MethodDescriptor) -> bool {
    method.is_public() && !method.is_constructor() && !method.has_modifier(Modifier::Static)
}

fn abstract_signature(method: &MethodDescriptor) -> MethodDescriptor {
    MethodDescriptor::new(&method.name)
        .returns(method.return_type.clone())
        .with_parameters(method.parameters.iter().cloned())
        .with_varargs(method.varargs)
        .with_documentation(&method.documentation)
        .with_modifiers([Modifier::Public, Modifier::Abstract])
}

fn mark_override(method: MethodDescriptor) -> MethodDescriptor {
    if is_capability(&method) && !method.has_annotation(&ClassName::override_marker()) {
        method.with_annotation(Annotation::override_marker())
    } else {
        method
    }
}

/// Split `ty` into a pure interface and a renamed implementation of it.
///
/// A type without public methods yields an empty interface.
pub fn extract_interface(ty: &TypeDescriptor, options: &InterfaceOptions) -> CommonResult<InterfaceAndImplementation> {
    validate_type(ty)?;

    let interface_name = options.interface_naming.resolve(&ty.name)?;
    let implementation_name = options.implementation_naming.resolve(&ty.name)?;

    let mut interface = TypeDescriptor::interface(&interface_name)
        .with_modifiers(ty.modifiers.iter().copied())
        .with_documentation(&ty.documentation);
    interface.super_interfaces = ty.super_interfaces.clone();

    for method in ty.methods.iter().filter(|m| is_capability(m)) {
        debug!(type_name = %ty.name, method = %method.name, "Extracted interface method");
        interface = interface.with_method(abstract_signature(method));
    }

    let implementation = TypeCopier::new(ty)
        .with_name(&implementation_name)
        .without_super_type()
        .filter_super_interfaces(|_| false)
        .map_methods(mark_override)
        .copy()
        .with_super_interface(ClassName::new(options.package.clone(), interface_name));

    info!(
        type_name = %ty.name,
        interface = %interface.name,
        implementation = %implementation.name,
        methods = interface.methods.len(),
        "Interface extraction complete"
    );

    Ok(InterfaceAndImplementation {
        interface,
        implementation,
    })
}
