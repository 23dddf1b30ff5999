use typecraft_model::*;

/// Visitor pattern for traversing type descriptors immutably
///
/// This trait provides default implementations that walk the entire tree,
/// nested types included. Override specific visit_* methods to perform
/// custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_type(&mut self, ty: &TypeDescriptor) {
        walk_type(self, ty);
    }

    fn visit_field(&mut self, field: &FieldDescriptor) {
        walk_field(self, field);
    }

    fn visit_method(&mut self, method: &MethodDescriptor) {
        walk_method(self, method);
    }

    fn visit_parameter(&mut self, _parameter: &ParameterDescriptor) {
        // Leaf node, no children to walk
    }

    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    fn visit_expression(&mut self, expr: &Expr) {
        walk_expression(self, expr);
    }
}

// Default walk implementations

pub fn walk_type<V: Visitor>(visitor: &mut V, ty: &TypeDescriptor) {
    for field in &ty.fields {
        visitor.visit_field(field);
    }
    for method in &ty.methods {
        visitor.visit_method(method);
    }
    for statement in ty.initializer_block.iter().chain(&ty.static_block) {
        visitor.visit_statement(statement);
    }
    for nested in &ty.nested_types {
        visitor.visit_type(nested);
    }
}

pub fn walk_field<V: Visitor>(visitor: &mut V, field: &FieldDescriptor) {
    if let Some(initializer) = &field.initializer {
        visitor.visit_expression(initializer);
    }
}

pub fn walk_method<V: Visitor>(visitor: &mut V, method: &MethodDescriptor) {
    for parameter in &method.parameters {
        visitor.visit_parameter(parameter);
    }
    for statement in &method.body {
        visitor.visit_statement(statement);
    }
}

pub fn walk_statement<V: Visitor>(visitor: &mut V, statement: &Statement) {
    match statement {
        Statement::Expr { expr } => visitor.visit_expression(expr),
        Statement::Return { value } => {
            if let Some(value) = value {
                visitor.visit_expression(value);
            }
        }
        Statement::Assign { target, value } => {
            visitor.visit_expression(target);
            visitor.visit_expression(value);
        }
        Statement::Local { value, .. } => visitor.visit_expression(value),
        Statement::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expression(condition);
            for statement in then_branch.iter().chain(else_branch) {
                visitor.visit_statement(statement);
            }
        }
    }
}

pub fn walk_expression<V: Visitor>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::This | Expr::Super | Expr::Null | Expr::Literal { .. } | Expr::Name { .. } => {
            // Leaf nodes
        }
        Expr::Field { target, .. } => visitor.visit_expression(target),
        Expr::Call { target, args, .. } => {
            if let Some(target) = target {
                visitor.visit_expression(target);
            }
            for arg in args {
                visitor.visit_expression(arg);
            }
        }
        Expr::StaticCall { args, .. } | Expr::New { args, .. } => {
            for arg in args {
                visitor.visit_expression(arg);
            }
        }
        Expr::Binary { left, right, .. } => {
            visitor.visit_expression(left);
            visitor.visit_expression(right);
        }
        Expr::Unary { operand, .. } => visitor.visit_expression(operand),
        Expr::Cast { expr, .. } | Expr::InstanceOf { expr, .. } => visitor.visit_expression(expr),
        Expr::Conditional {
            condition,
            then_value,
            else_value,
        } => {
            visitor.visit_expression(condition);
            visitor.visit_expression(then_value);
            visitor.visit_expression(else_value);
        }
    }
}
