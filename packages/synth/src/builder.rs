use tracing::{debug, info};
use typecraft_common::{validate_identifier, validate_type, CommonError, CommonResult};
use typecraft_model::*;

pub const DEFAULT_BUILDER_NAME: &str = "Builder";
pub const BUILD_METHOD: &str = "build";
pub const FACTORY_METHOD: &str = "builder";

/// Local holding the fresh builder inside the factory
const FACTORY_LOCAL: &str = "builder";

/// Options for builder synthesis
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Package of the outer type
    pub package: String,
    /// Name of the nested builder type
    pub builder_name: String,
    /// Modifiers of `build()`
    pub build_modifiers: Vec<Modifier>,
    /// Extra methods appended to the builder type
    pub additional_methods: Vec<MethodDescriptor>,
    /// Extra builder state, seeded through parameters of `builder()`
    pub additional_fields: Vec<FieldDescriptor>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            package: String::new(),
            builder_name: DEFAULT_BUILDER_NAME.to_string(),
            build_modifiers: vec![Modifier::Public, Modifier::Final],
            additional_methods: Vec::new(),
            additional_fields: Vec::new(),
        }
    }
}

impl BuilderOptions {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn with_builder_name(mut self, name: impl Into<String>) -> Self {
        self.builder_name = name.into();
        self
    }

    pub fn with_build_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.build_modifiers = modifiers.into_iter().collect();
        self
    }

    pub fn with_additional_method(mut self, method: MethodDescriptor) -> Self {
        self.additional_methods.push(method);
        self
    }

    pub fn with_additional_field(mut self, field: FieldDescriptor) -> Self {
        self.additional_fields.push(field);
        self
    }

    pub fn target_class_name(&self, ty: &TypeDescriptor) -> ClassName {
        ClassName::new(self.package.clone(), ty.name.clone())
    }

    pub fn builder_class_name(&self, ty: &TypeDescriptor) -> ClassName {
        self.target_class_name(ty).nested(self.builder_name.clone())
    }
}

/// Builder accessor: `public final T x() { return this.x; }`
fn builder_getter(field: &FieldDescriptor) -> MethodDescriptor {
    MethodDescriptor::new(&field.name)
        .with_modifiers([Modifier::Public, Modifier::Final])
        .with_documentation(format!(
            "Get {}\n@return {}\n",
            field.documentation, field.documentation
        ))
        .with_annotation(Annotation::serialization_ignore())
        .returns(field.ty.clone())
        .with_statement(Statement::ret(Expr::this_field(&field.name)))
}

/// Builder mutator: `public final Builder x(T value) { this.x = value; return this; }`
fn builder_setter(builder: &ClassName, field: &FieldDescriptor) -> MethodDescriptor {
    MethodDescriptor::new(&field.name)
        .with_modifiers([Modifier::Public, Modifier::Final])
        .returns(builder.clone())
        .with_documentation(format!(
            "Set {}\n@param value {}\n@return the Builder object.\n",
            field.documentation, field.documentation
        ))
        .with_parameter("value", field.ty.clone())
        .with_statement(Statement::assign(Expr::this_field(&field.name), Expr::name("value")))
        .with_statement(Statement::ret(Expr::This))
}

fn check_options(ty: &TypeDescriptor, mirrored: &[&FieldDescriptor], options: &BuilderOptions) -> CommonResult<()> {
    let mut problems = Vec::new();

    if let Err(reason) = validate_identifier(&options.builder_name) {
        problems.push(format!("builder name {reason}"));
    }
    if ty.nested_type(&options.builder_name).is_some() {
        problems.push(format!("nested type '{}' already exists", options.builder_name));
    }
    if mirrored.iter().any(|f| f.name == BUILD_METHOD) {
        problems.push(format!("field '{BUILD_METHOD}' clashes with the builder's build method"));
    }
    for extra in &options.additional_fields {
        if let Err(reason) = validate_identifier(&extra.name) {
            problems.push(format!("additional field {reason}"));
        }
        if extra.name == FACTORY_LOCAL {
            problems.push(format!("additional field '{FACTORY_LOCAL}' clashes with the factory's local"));
        }
        if mirrored.iter().any(|f| f.name == extra.name) {
            problems.push(format!("additional field '{}' shadows a mirrored field", extra.name));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CommonError::InvalidDescriptor {
            name: ty.name.clone(),
            problems,
        })
    }
}

/// Derive a nested builder for `ty`.
///
/// Adds to the outer type, in this order: the nested builder type, a static
/// `builder()` factory and a private all-field constructor. Constructor
/// parameters, builder fields and the arguments passed by `build()` all come
/// from the same snapshot of the instance fields, so they line up by position.
pub fn synthesize_builder(ty: &TypeDescriptor, options: &BuilderOptions) -> CommonResult<TypeDescriptor> {
    validate_type(ty)?;

    // Static fields are not instance state and never reach the constructor
    let fields: Vec<&FieldDescriptor> = ty.fields.iter().filter(|f| !f.is_static()).collect();
    check_options(ty, &fields, options)?;

    let target = options.target_class_name(ty);
    let builder_name = options.builder_class_name(ty);

    let mut builder = TypeDescriptor::record(&options.builder_name)
        .with_modifiers([Modifier::Public, Modifier::Static, Modifier::Final])
        .with_method(MethodDescriptor::constructor());
    let mut constructor = MethodDescriptor::constructor().with_modifiers([Modifier::Private]);
    let mut build_args = Vec::with_capacity(fields.len());

    for field in &fields {
        let mirrored = FieldDescriptor::new(&field.name, field.ty.clone())
            .with_modifiers([Modifier::Private])
            .with_documentation(&field.documentation);

        builder.methods.push(builder_getter(&mirrored));
        builder.methods.push(builder_setter(&builder_name, &mirrored));
        builder.fields.push(mirrored);

        constructor = constructor
            .with_parameter(&field.name, field.ty.clone())
            .with_statement(Statement::assign(Expr::this_field(&field.name), Expr::name(&field.name)));
        build_args.push(Expr::this_field(&field.name));

        debug!(type_name = %ty.name, field = %field.name, "Mirrored field into builder");
    }

    builder.methods.push(
        MethodDescriptor::new(BUILD_METHOD)
            .with_modifiers(options.build_modifiers.iter().copied())
            .returns(target.clone())
            .with_statement(Statement::ret(Expr::new_instance(target, build_args))),
    );
    builder.methods.extend(options.additional_methods.iter().cloned());

    let mut factory = MethodDescriptor::new(FACTORY_METHOD)
        .with_modifiers([Modifier::Public, Modifier::Static, Modifier::Final])
        .with_annotation(Annotation::serialization_ignore())
        .returns(builder_name.clone())
        .with_statement(Statement::local(
            builder_name.clone(),
            FACTORY_LOCAL,
            Expr::new_instance(builder_name, vec![]),
        ));
    for extra in &options.additional_fields {
        factory = factory
            .with_parameter(&extra.name, extra.ty.clone())
            .with_statement(Statement::assign(
                Expr::name(FACTORY_LOCAL).field(&extra.name),
                Expr::name(&extra.name),
            ));
        builder.fields.push(extra.clone());
    }
    factory = factory.with_statement(Statement::ret(Expr::name(FACTORY_LOCAL)));

    info!(
        type_name = %ty.name,
        builder = %options.builder_name,
        fields = fields.len(),
        additional_fields = options.additional_fields.len(),
        "Builder synthesis complete"
    );

    Ok(ty
        .clone()
        .with_nested_type(builder)
        .with_method(factory)
        .with_method(constructor))
}
