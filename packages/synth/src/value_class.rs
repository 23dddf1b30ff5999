use crate::accessors::{synthesize_getters, synthesize_setters, GetterOptions, SetterOptions};
use crate::builder::{synthesize_builder, BuilderOptions};
use tracing::info;
use typecraft_common::{validate_type, CommonResult};
use typecraft_model::*;

/// A plain data class: private fields plus the requested accessors and builder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueClassOptions {
    pub package: String,
    pub name: String,
    /// Field names and types, in declaration order
    pub fields: Vec<(String, TypeReference)>,
    pub builder: bool,
    pub getters: bool,
    pub setters: bool,
}

impl ValueClassOptions {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Resolve textual type names through `known` before anything is built
    pub fn from_bare_names<'n>(
        package: impl Into<String>,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (&'n str, &'n str)>,
        known: &KnownTypes,
    ) -> CommonResult<Self> {
        let mut options = Self::new(package, name);
        for (field, ty) in fields {
            options.fields.push((field.to_string(), known.resolve_required(ty)?));
        }
        Ok(options)
    }

    pub fn with_field(mut self, name: impl Into<String>, ty: impl Into<TypeReference>) -> Self {
        self.fields.push((name.into(), ty.into()));
        self
    }

    pub fn with_builder(mut self) -> Self {
        self.builder = true;
        self
    }

    pub fn with_getters(mut self) -> Self {
        self.getters = true;
        self
    }

    pub fn with_setters(mut self) -> Self {
        self.setters = true;
        self
    }
}

/// Build the value class, then compose getters, setters and builder in that order
pub fn value_class(options: &ValueClassOptions) -> CommonResult<TypeDescriptor> {
    let mut ty = TypeDescriptor::record(&options.name).with_modifiers([Modifier::Public]);
    for (name, field_type) in &options.fields {
        ty = ty.with_field(FieldDescriptor::new(name, field_type.clone()).with_modifiers([Modifier::Private]));
    }
    validate_type(&ty)?;

    if options.getters {
        ty = synthesize_getters(&ty, &GetterOptions::default())?;
    }
    if options.setters {
        ty = synthesize_setters(&ty, &SetterOptions::default())?;
    }
    if options.builder {
        ty = synthesize_builder(&ty, &BuilderOptions::new(options.package.clone()))?;
    }

    info!(
        type_name = %ty.name,
        fields = ty.fields.len(),
        methods = ty.methods.len(),
        "Value class complete"
    );
    Ok(ty)
}

/// [`ValueClassOptions::from_bare_names`] followed by [`value_class`], with every accessor and the builder
pub fn value_class_from_bare_names<'n>(
    package: &str,
    name: &str,
    fields: impl IntoIterator<Item = (&'n str, &'n str)>,
    known: &KnownTypes,
) -> CommonResult<TypeDescriptor> {
    let options = ValueClassOptions::from_bare_names(package, name, fields, known)?
        .with_getters()
        .with_setters()
        .with_builder();
    value_class(&options)
}
