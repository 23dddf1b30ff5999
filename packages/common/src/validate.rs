//! Structural checks run on a descriptor before any synthesizer derives from it.

use crate::error::{CommonError, CommonResult};
use crate::visitor::{walk_method, walk_statement, walk_type, Visitor};
use std::collections::HashSet;
use tracing::debug;
use typecraft_model::*;

/// Words that can never be used as identifiers in the target language
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Ensure an identifier is non-empty, well-formed and not reserved.
pub fn validate_identifier(ident: &str) -> Result<(), String> {
    let mut chars = ident.chars();
    let Some(first) = chars.next() else {
        return Err("identifier is empty".to_string());
    };

    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return Err(format!("identifier '{ident}' must start with a letter, '_' or '$'"));
    }
    if let Some(bad) = chars.find(|c| !(c.is_alphanumeric() || *c == '_' || *c == '$')) {
        return Err(format!("identifier '{ident}' contains invalid character '{bad}'"));
    }
    if RESERVED.contains(&ident) {
        return Err(format!("the word '{ident}' is reserved"));
    }

    Ok(())
}

/// Validate a type descriptor and everything nested in it.
///
/// All problems are collected; the error lists each one prefixed with the
/// path of the type it was found in.
pub fn validate_type(ty: &TypeDescriptor) -> CommonResult<()> {
    let mut visitor = ValidateVisitor::default();
    visitor.visit_type(ty);

    if visitor.problems.is_empty() {
        Ok(())
    } else {
        debug!(type_name = %ty.name, problems = visitor.problems.len(), "Rejected type descriptor");
        Err(CommonError::InvalidDescriptor {
            name: ty.name.clone(),
            problems: visitor.problems,
        })
    }
}

#[derive(Default)]
struct ValidateVisitor {
    route: Vec<String>,
    problems: Vec<String>,
}

impl ValidateVisitor {
    fn check(&mut self, what: &str, ident: &str) {
        if let Err(reason) = validate_identifier(ident) {
            let route = self.route.join(".");
            self.problems.push(format!("{route}: {what} {reason}"));
        }
    }
}

impl Visitor for ValidateVisitor {
    fn visit_type(&mut self, ty: &TypeDescriptor) {
        self.route.push(ty.name.clone());
        self.check("type name", &ty.name);

        let mut seen = HashSet::new();
        for field in &ty.fields {
            if !seen.insert(field.name.as_str()) {
                let route = self.route.join(".");
                self.problems
                    .push(format!("{route}: duplicate field '{}'", field.name));
            }
        }

        walk_type(self, ty);
        self.route.pop();
    }

    fn visit_field(&mut self, field: &FieldDescriptor) {
        self.check("field", &field.name);
    }

    fn visit_method(&mut self, method: &MethodDescriptor) {
        if !method.is_constructor() {
            self.check("method", &method.name);
        }
        walk_method(self, method);
    }

    fn visit_parameter(&mut self, parameter: &ParameterDescriptor) {
        self.check("parameter", &parameter.name);
    }

    fn visit_statement(&mut self, statement: &Statement) {
        if let Statement::Local { name, .. } = statement {
            self.check("local variable", name);
        }
        walk_statement(self, statement);
    }
}
