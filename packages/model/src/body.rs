use crate::types::TypeReference;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal constant appearing in a generated body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i32),
    Bool(bool),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Mul,
    BitXor,
    /// Logical (zero-filling) right shift
    UnsignedShr,
    Eq,
    Ne,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Mul => "*",
            BinaryOp::BitXor => "^",
            BinaryOp::UnsignedShr => ">>>",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
}

/// Expression tree for generated bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    This,
    Super,
    Null,
    Literal {
        value: Literal,
    },
    /// Local variable, parameter or unqualified field
    Name {
        name: String,
    },
    Field {
        target: Box<Expr>,
        name: String,
    },
    Call {
        target: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
    StaticCall {
        owner: TypeReference,
        method: String,
        args: Vec<Expr>,
    },
    New {
        ty: TypeReference,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Cast {
        ty: TypeReference,
        expr: Box<Expr>,
    },
    InstanceOf {
        expr: Box<Expr>,
        ty: TypeReference,
    },
    Conditional {
        condition: Box<Expr>,
        then_value: Box<Expr>,
        else_value: Box<Expr>,
    },
}

impl Expr {
    pub fn int(value: i32) -> Self {
        Expr::Literal {
            value: Literal::Int(value),
        }
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal {
            value: Literal::Bool(value),
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name { name: name.into() }
    }

    /// `this.<name>`
    pub fn this_field(name: impl Into<String>) -> Self {
        Expr::This.field(name)
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        Expr::Field {
            target: Box::new(self),
            name: name.into(),
        }
    }

    /// `<self>.<method>(<args>)`
    pub fn call(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: Some(Box::new(self)),
            method: method.into(),
            args,
        }
    }

    pub fn static_call(owner: impl Into<TypeReference>, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::StaticCall {
            owner: owner.into(),
            method: method.into(),
            args,
        }
    }

    pub fn new_instance(ty: impl Into<TypeReference>, args: Vec<Expr>) -> Self {
        Expr::New {
            ty: ty.into(),
            args,
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        }
    }

    pub fn cast(ty: impl Into<TypeReference>, expr: Expr) -> Self {
        Expr::Cast {
            ty: ty.into(),
            expr: Box::new(expr),
        }
    }

    pub fn instance_of(expr: Expr, ty: impl Into<TypeReference>) -> Self {
        Expr::InstanceOf {
            expr: Box::new(expr),
            ty: ty.into(),
        }
    }

    pub fn conditional(condition: Expr, then_value: Expr, else_value: Expr) -> Self {
        Expr::Conditional {
            condition: Box::new(condition),
            then_value: Box::new(then_value),
            else_value: Box::new(else_value),
        }
    }

    pub fn is_null(self) -> Self {
        Expr::binary(BinaryOp::Eq, self, Expr::Null)
    }
}

/// One statement of a generated body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    Expr {
        expr: Expr,
    },
    Return {
        value: Option<Expr>,
    },
    Assign {
        target: Expr,
        value: Expr,
    },
    /// Local variable declaration with initializer
    Local {
        ty: TypeReference,
        name: String,
        value: Expr,
        is_final: bool,
    },
    If {
        condition: Expr,
        then_branch: Vec<Statement>,
        else_branch: Vec<Statement>,
    },
}

impl Statement {
    pub fn expr(expr: Expr) -> Self {
        Statement::Expr { expr }
    }

    pub fn ret(value: Expr) -> Self {
        Statement::Return { value: Some(value) }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Statement::Assign { target, value }
    }

    pub fn local(ty: impl Into<TypeReference>, name: impl Into<String>, value: Expr) -> Self {
        Statement::Local {
            ty: ty.into(),
            name: name.into(),
            value,
            is_final: false,
        }
    }

    pub fn final_local(ty: impl Into<TypeReference>, name: impl Into<String>, value: Expr) -> Self {
        Statement::Local {
            ty: ty.into(),
            name: name.into(),
            value,
            is_final: true,
        }
    }

    pub fn if_then(condition: Expr, then_branch: Vec<Statement>) -> Self {
        Statement::If {
            condition,
            then_branch,
            else_branch: Vec::new(),
        }
    }

    pub fn if_else(condition: Expr, then_branch: Vec<Statement>, else_branch: Vec<Statement>) -> Self {
        Statement::If {
            condition,
            then_branch,
            else_branch,
        }
    }
}

// Debug rendering: one line, Java-like. Not meant as the emitted source.

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Expr]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, statements: &[Statement]) -> fmt::Result {
    f.write_str("{")?;
    for statement in statements {
        write!(f, " {}", statement)?;
    }
    f.write_str(" }")
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Bool(v) => write!(f, "{}", v),
            Literal::Str(v) => write!(f, "{:?}", v),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::This => f.write_str("this"),
            Expr::Super => f.write_str("super"),
            Expr::Null => f.write_str("null"),
            Expr::Literal { value } => write!(f, "{}", value),
            Expr::Name { name } => f.write_str(name),
            Expr::Field { target, name } => write!(f, "{}.{}", target, name),
            Expr::Call {
                target,
                method,
                args,
            } => {
                if let Some(target) = target {
                    write!(f, "{}.", target)?;
                }
                write!(f, "{}(", method)?;
                write_args(f, args)?;
                f.write_str(")")
            }
            Expr::StaticCall {
                owner,
                method,
                args,
            } => {
                write!(f, "{}.{}(", owner.simple_name(), method)?;
                write_args(f, args)?;
                f.write_str(")")
            }
            Expr::New { ty, args } => {
                write!(f, "new {}(", ty.simple_name())?;
                write_args(f, args)?;
                f.write_str(")")
            }
            Expr::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Unary {
                op: UnaryOp::Not,
                operand,
            } => write!(f, "!{}", operand),
            Expr::Cast { ty, expr } => write!(f, "(({}) {})", ty.simple_name(), expr),
            Expr::InstanceOf { expr, ty } => {
                write!(f, "({} instanceof {})", expr, ty.simple_name())
            }
            Expr::Conditional {
                condition,
                then_value,
                else_value,
            } => write!(f, "({} ? {} : {})", condition, then_value, else_value),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Expr { expr } => write!(f, "{};", expr),
            Statement::Return { value: Some(value) } => write!(f, "return {};", value),
            Statement::Return { value: None } => f.write_str("return;"),
            Statement::Assign { target, value } => write!(f, "{} = {};", target, value),
            Statement::Local {
                ty,
                name,
                value,
                is_final,
            } => {
                if *is_final {
                    f.write_str("final ")?;
                }
                write!(f, "{} {} = {};", ty.simple_name(), name, value)
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "if ({}) ", condition)?;
                write_block(f, then_branch)?;
                if !else_branch.is_empty() {
                    f.write_str(" else ")?;
                    write_block(f, else_branch)?;
                }
                Ok(())
            }
        }
    }
}

/// Render a whole body, one statement per line
pub fn render_body(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
