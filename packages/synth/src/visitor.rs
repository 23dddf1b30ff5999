//! Double-dispatch visitor scaffolding over a set of related types.
//!
//! Every registered type gets an `enterX`/`exitX` pair on `<Root>Visitor`
//! and a no-op override on `<Root>VisitorBase`. Concrete registered types
//! and their implementors receive a `visit(visitor)` method that walks
//! their visitable edges depth first.

use std::collections::HashSet;
use tracing::{debug, info};
use typecraft_common::{validate_type, CommonError, CommonResult};
use typecraft_model::*;

pub const VISIT_METHOD: &str = "visit";
pub const VISITOR_PARAMETER: &str = "visitor";
pub const VISITED_PARAMETER: &str = "visited";

struct Registration {
    reference: TypeReference,
    ty: TypeDescriptor,
}

struct Implementors {
    of: TypeReference,
    types: Vec<TypeDescriptor>,
}

/// Result of visitor synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorOutput {
    /// `<Root>Visitor` capability
    pub visitor: TypeDescriptor,
    /// `<Root>VisitorBase` with no-op overrides
    pub base: TypeDescriptor,
    /// Registered types in registration order, with `visit` injected where concrete
    pub visited: Vec<TypeDescriptor>,
    /// Implementors in registration order, with `visit` injected
    pub implementors: Vec<TypeDescriptor>,
}

impl VisitorOutput {
    pub fn visited_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.visited.iter().find(|t| t.name == name)
    }

    pub fn implementor(&self, name: &str) -> Option<&TypeDescriptor> {
        self.implementors.iter().find(|t| t.name == name)
    }
}

/// Collects the visited set, then builds the visitor in one pass.
///
/// Registration is keyed by [`TypeReference`]: registering the same
/// reference twice replaces the earlier descriptor in place.
pub struct VisitorSynthesizer {
    package: String,
    root_name: String,
    registrations: Vec<Registration>,
    implementors: Vec<Implementors>,
}

impl VisitorSynthesizer {
    pub fn new(package: impl Into<String>, root_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            root_name: root_name.into(),
            registrations: Vec::new(),
            implementors: Vec::new(),
        }
    }

    /// Register a type living in the synthesizer's own package
    pub fn with_visited_type(self, ty: TypeDescriptor) -> Self {
        let package = self.package.clone();
        self.with_visited_type_in(package, ty, Vec::new())
    }

    pub fn with_visited_type_in(
        mut self,
        package: impl Into<String>,
        ty: TypeDescriptor,
        implementors: Vec<TypeDescriptor>,
    ) -> Self {
        let reference = TypeReference::class(package, ty.name.clone());
        match self.registrations.iter_mut().find(|r| r.reference == reference) {
            Some(existing) => existing.ty = ty,
            None => self.registrations.push(Registration {
                reference: reference.clone(),
                ty,
            }),
        }
        self.add_implementors(reference, implementors);
        self
    }

    /// Add implementors of `of`, appending to any registered before
    pub fn with_implementors(mut self, of: impl Into<TypeReference>, implementors: Vec<TypeDescriptor>) -> Self {
        self.add_implementors(of.into(), implementors);
        self
    }

    fn add_implementors(&mut self, of: TypeReference, types: Vec<TypeDescriptor>) {
        if types.is_empty() {
            return;
        }
        match self.implementors.iter_mut().find(|i| i.of == of) {
            Some(existing) => existing.types.extend(types),
            None => self.implementors.push(Implementors { of, types }),
        }
    }

    pub fn visitor_name(&self) -> ClassName {
        ClassName::new(self.package.clone(), format!("{}Visitor", self.root_name))
    }

    pub fn base_name(&self) -> ClassName {
        ClassName::new(self.package.clone(), format!("{}VisitorBase", self.root_name))
    }

    fn is_visited(&self, ty: &TypeReference) -> bool {
        self.registrations.iter().any(|r| &r.reference == ty)
    }

    /// Fields of `ty` whose declared type is exactly a registered reference
    pub fn visitable_edges<'t>(&self, ty: &'t TypeDescriptor) -> Vec<&'t FieldDescriptor> {
        let registered: HashSet<&TypeReference> = self.registrations.iter().map(|r| &r.reference).collect();
        ty.fields
            .iter()
            .filter(|f| !f.is_static() && registered.contains(&f.ty))
            .collect()
    }

    fn visit_method(&self, ty: &TypeDescriptor, visited_as: &TypeReference) -> MethodDescriptor {
        let visitor = Expr::name(VISITOR_PARAMETER);
        let callback = |prefix: &str, of: &TypeReference, arg: Expr| {
            Statement::expr(visitor.clone().call(format!("{prefix}{}", of.simple_name()), vec![arg]))
        };

        let mut method = MethodDescriptor::new(VISIT_METHOD)
            .with_modifiers([Modifier::Public, Modifier::Final])
            .with_parameter(VISITOR_PARAMETER, self.visitor_name())
            .with_statement(callback("enter", visited_as, Expr::This));

        for edge in self.visitable_edges(ty) {
            method = method.with_statement(Statement::if_else(
                Expr::this_field(&edge.name).is_null(),
                vec![
                    callback("enter", &edge.ty, Expr::Null),
                    callback("exit", &edge.ty, Expr::Null),
                ],
                vec![Statement::expr(
                    Expr::this_field(&edge.name).call(VISIT_METHOD, vec![visitor.clone()]),
                )],
            ));
        }

        method.with_statement(callback("exit", visited_as, Expr::This))
    }

    fn check(&self) -> CommonResult<()> {
        let mut problems = Vec::new();
        for registration in &self.registrations {
            if let Err(CommonError::InvalidDescriptor { problems: found, .. }) = validate_type(&registration.ty) {
                problems.extend(found);
            }
        }
        for group in &self.implementors {
            if !self.is_visited(&group.of) {
                problems.push(format!("implementors registered for unvisited type '{}'", group.of));
            }
            for implementor in &group.types {
                if let Err(CommonError::InvalidDescriptor { problems: found, .. }) = validate_type(implementor) {
                    problems.extend(found);
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CommonError::InvalidDescriptor {
                name: self.visitor_name().simple_name().to_string(),
                problems,
            })
        }
    }

    pub fn build(&self) -> CommonResult<VisitorOutput> {
        self.check()?;

        let visitor_name = self.visitor_name();
        let mut visitor = TypeDescriptor::interface(visitor_name.simple_name()).with_modifiers([Modifier::Public]);
        let mut base = TypeDescriptor::record(self.base_name().simple_name())
            .with_modifiers([Modifier::Public, Modifier::Abstract])
            .with_super_interface(visitor_name);

        let mut visited = Vec::with_capacity(self.registrations.len());
        for registration in &self.registrations {
            let reference = &registration.reference;
            for prefix in ["enter", "exit"] {
                let callback = MethodDescriptor::new(format!("{prefix}{}", reference.simple_name()))
                    .with_parameter(VISITED_PARAMETER, reference.clone());
                visitor = visitor.with_method(callback.clone().with_modifiers([Modifier::Public, Modifier::Abstract]));
                base = base.with_method(
                    callback
                        .with_modifiers([Modifier::Public])
                        .with_annotation(Annotation::override_marker()),
                );
            }

            if registration.ty.is_interface() {
                visited.push(registration.ty.clone());
            } else {
                let edges = self.visitable_edges(&registration.ty).len();
                debug!(type_name = %registration.ty.name, edges, "Injected visit method");
                visited.push(registration.ty.clone().with_method(self.visit_method(&registration.ty, reference)));
            }
        }

        let mut implementors = Vec::new();
        for group in &self.implementors {
            for implementor in &group.types {
                debug!(type_name = %implementor.name, visited_as = %group.of, "Injected implementor visit method");
                implementors.push(implementor.clone().with_method(self.visit_method(implementor, &group.of)));
            }
        }

        info!(
            visitor = %visitor.name,
            visited = visited.len(),
            implementors = implementors.len(),
            "Visitor synthesis complete"
        );

        Ok(VisitorOutput {
            visitor,
            base,
            visited,
            implementors,
        })
    }
}
