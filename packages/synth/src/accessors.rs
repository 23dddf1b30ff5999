use tracing::{debug, info};
use typecraft_common::{validate_type, CommonResult, NamingConvention};
use typecraft_model::*;

/// Options for getter synthesis
#[derive(Debug, Clone)]
pub struct GetterOptions {
    /// Defaults to `get$N`
    pub naming: NamingConvention,
}

impl Default for GetterOptions {
    fn default() -> Self {
        Self {
            naming: NamingConvention::getter(),
        }
    }
}

/// What a fluent setter hands back after assigning
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnObject {
    pub ty: TypeReference,
    pub value: Expr,
}

impl ReturnObject {
    pub fn new(ty: impl Into<TypeReference>, value: Expr) -> Self {
        Self {
            ty: ty.into(),
            value,
        }
    }

    /// `return this;` typed as `ty`
    pub fn this(ty: impl Into<TypeReference>) -> Self {
        Self::new(ty, Expr::This)
    }
}

/// Options for setter synthesis
#[derive(Debug, Clone)]
pub struct SetterOptions {
    /// Defaults to `set$N`
    pub naming: NamingConvention,
    /// Fluent mode when present; setters return void otherwise
    pub return_object: Option<ReturnObject>,
}

impl Default for SetterOptions {
    fn default() -> Self {
        Self {
            naming: NamingConvention::setter(),
            return_object: None,
        }
    }
}

impl SetterOptions {
    pub fn fluent(return_object: ReturnObject) -> Self {
        Self {
            return_object: Some(return_object),
            ..Default::default()
        }
    }
}

/// Getter for a single field: `public final T getX() { return this.x; }`
pub fn getter_for_field(field: &FieldDescriptor, naming: &NamingConvention) -> CommonResult<MethodDescriptor> {
    let name = naming.resolve(&field.name)?;

    Ok(MethodDescriptor::new(name)
        .with_documentation(format!(
            "Get {}\n@return {}\n",
            field.documentation, field.documentation
        ))
        .with_annotation(Annotation::serialization_ignore())
        .with_modifiers([Modifier::Public, Modifier::Final])
        .returns(field.ty.clone())
        .with_statement(Statement::ret(Expr::this_field(&field.name))))
}

/// Setter for a single field. The parameter is the field name with a
/// trailing underscore; static fields get static setters.
pub fn setter_for_field(
    field: &FieldDescriptor,
    naming: &NamingConvention,
    return_object: Option<&ReturnObject>,
) -> CommonResult<MethodDescriptor> {
    let name = naming.resolve(&field.name)?;
    let parameter = format!("{}_", field.name);

    let mut method = MethodDescriptor::new(name)
        .with_documentation(format!(
            "Set {}\n@param {} {}\n",
            field.documentation, parameter, field.documentation
        ))
        .with_parameter(&parameter, field.ty.clone())
        .with_modifiers([Modifier::Public, Modifier::Final])
        .with_statement(Statement::assign(Expr::name(&field.name), Expr::name(&parameter)));

    if let Some(ret) = return_object {
        method = method
            .returns(ret.ty.clone())
            .with_statement(Statement::ret(ret.value.clone()));
    }
    if field.is_static() {
        method = method.with_modifiers([Modifier::Static]);
    }

    Ok(method)
}

/// Append one getter per field, in declaration order
pub fn synthesize_getters(ty: &TypeDescriptor, options: &GetterOptions) -> CommonResult<TypeDescriptor> {
    validate_type(ty)?;

    let getters = ty
        .fields
        .iter()
        .map(|field| getter_for_field(field, &options.naming))
        .collect::<CommonResult<Vec<_>>>()?;

    for (field, getter) in ty.fields.iter().zip(&getters) {
        debug!(type_name = %ty.name, field = %field.name, method = %getter.name, "Synthesized getter");
    }
    info!(type_name = %ty.name, getters = getters.len(), "Getter synthesis complete");

    Ok(ty.clone().with_methods(getters))
}

/// Append one setter per non-final field, in declaration order
pub fn synthesize_setters(ty: &TypeDescriptor, options: &SetterOptions) -> CommonResult<TypeDescriptor> {
    validate_type(ty)?;

    let setters = ty
        .fields
        .iter()
        .filter(|field| !field.is_final())
        .map(|field| setter_for_field(field, &options.naming, options.return_object.as_ref()))
        .collect::<CommonResult<Vec<_>>>()?;

    for setter in &setters {
        debug!(type_name = %ty.name, method = %setter.name, fluent = options.return_object.is_some(), "Synthesized setter");
    }
    info!(type_name = %ty.name, setters = setters.len(), "Setter synthesis complete");

    Ok(ty.clone().with_methods(setters))
}
