//! Small evaluator for generated method bodies.
//!
//! Enough of the target language's semantics to run builders, accessors,
//! `equals`/`hashCode` and visitor traversals: 32-bit wrapping ints, 64-bit
//! longs, IEEE bit conversions, reference identity and a handful of static
//! helpers. Objects of class [`RECORDER`] accept any call and log it.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use typecraft_model::*;

pub const RECORDER: &str = "Recorder";

pub type Eval<T> = Result<T, String>;

#[derive(Debug)]
pub struct Instance {
    pub class: String,
    pub fields: HashMap<String, Value>,
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Object(Rc<RefCell<Instance>>),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(s.to_string())
    }

    pub fn class_name(&self) -> Option<String> {
        match self {
            Value::Object(o) => Some(o.borrow().class.clone()),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Eval<Value> {
        match self {
            Value::Object(o) => o
                .borrow()
                .fields
                .get(name)
                .cloned()
                .ok_or_else(|| format!("no field '{name}'")),
            other => Err(format!("cannot read '{name}' from {other:?}")),
        }
    }

    pub fn set_field(&self, name: &str, value: Value) -> Eval<()> {
        match self {
            Value::Object(o) => {
                let mut instance = o.borrow_mut();
                if !instance.fields.contains_key(name) {
                    return Err(format!("no field '{name}' on {}", instance.class));
                }
                instance.fields.insert(name.to_string(), value);
                Ok(())
            }
            other => Err(format!("cannot write '{name}' on {other:?}")),
        }
    }

    /// Test shorthand for [`Value::field`]
    pub fn get(&self, name: &str) -> Value {
        self.field(name).unwrap()
    }

    /// Test shorthand for [`Value::set_field`]
    pub fn set(&self, name: &str, value: Value) {
        self.set_field(name, value).unwrap()
    }

    pub fn truthy(&self) -> Eval<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(format!("expected boolean, got {other:?}")),
        }
    }

    pub fn as_int(&self) -> i32 {
        match self {
            Value::Int(i) => *i,
            other => panic!("expected int, got {other:?}"),
        }
    }

    pub fn as_bool(&self) -> bool {
        self.truthy().unwrap()
    }

    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => java_eq(self, other),
        }
    }

    fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Object(o) => o.borrow().class.clone(),
            Value::Str(s) => format!("{s:?}"),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Long(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Double(v) => v.to_string(),
        }
    }
}

/// Field values compare like boxed values: floating point by bit pattern
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) => float_bits(*a) == float_bits(*b),
            (Value::Double(a), Value::Double(b)) => double_bits(*a) == double_bits(*b),
            _ => self.same(other),
        }
    }
}

/// `==` on primitives and references
fn java_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Long(a), Value::Long(b)) => a == b,
        (Value::Int(a), Value::Long(b)) | (Value::Long(b), Value::Int(a)) => i64::from(*a) == *b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Double(a), Value::Double(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        _ => false,
    }
}

pub fn double_bits(value: f64) -> i64 {
    if value.is_nan() {
        0x7ff8_0000_0000_0000
    } else {
        value.to_bits() as i64
    }
}

pub fn float_bits(value: f32) -> i32 {
    if value.is_nan() {
        0x7fc0_0000
    } else {
        value.to_bits() as i32
    }
}

pub fn string_hash(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

fn fold_long(value: i64) -> i32 {
    (value ^ ((value as u64) >> 32) as i64) as i32
}

fn default_value(ty: &TypeReference) -> Value {
    match ty.primitive() {
        Some(PrimitiveType::Boolean) => Value::Bool(false),
        Some(PrimitiveType::Long) => Value::Long(0),
        Some(PrimitiveType::Float) => Value::Float(0.0),
        Some(PrimitiveType::Double) => Value::Double(0.0),
        Some(PrimitiveType::Void) | None => Value::Null,
        Some(_) => Value::Int(0),
    }
}

fn binary(op: BinaryOp, left: Value, right: Value) -> Eval<Value> {
    use Value::*;
    Ok(match (op, left, right) {
        (BinaryOp::Eq, l, r) => Bool(java_eq(&l, &r)),
        (BinaryOp::Ne, l, r) => Bool(!java_eq(&l, &r)),
        (BinaryOp::Add, Int(a), Int(b)) => Int(a.wrapping_add(b)),
        (BinaryOp::Mul, Int(a), Int(b)) => Int(a.wrapping_mul(b)),
        (BinaryOp::BitXor, Int(a), Int(b)) => Int(a ^ b),
        (BinaryOp::BitXor, Long(a), Long(b)) => Long(a ^ b),
        (BinaryOp::UnsignedShr, Int(a), Int(n)) => Int(((a as u32) >> (n & 31)) as i32),
        (BinaryOp::UnsignedShr, Long(a), Int(n)) => Long(((a as u64) >> (n & 63)) as i64),
        (op, l, r) => return Err(format!("unsupported operands for {}: {l:?}, {r:?}", op.symbol())),
    })
}

fn cast(ty: &TypeReference, value: Value) -> Eval<Value> {
    match (ty.primitive(), value) {
        (Some(PrimitiveType::Int), Value::Int(v)) => Ok(Value::Int(v)),
        (Some(PrimitiveType::Int), Value::Long(v)) => Ok(Value::Int(v as i32)),
        (Some(p), v) => Err(format!("unsupported cast of {v:?} to {p}")),
        (None, v) => Ok(v),
    }
}

enum Flow {
    Next,
    Return(Value),
}

struct Frame {
    this: Value,
    locals: HashMap<String, Value>,
}

/// Evaluates generated bodies against a table of types keyed by simple name
pub struct Interpreter {
    classes: HashMap<String, TypeDescriptor>,
    trace: RefCell<Vec<String>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
            trace: RefCell::new(Vec::new()),
        }
    }

    /// Register `ty` and its nested types
    pub fn with_type(mut self, ty: &TypeDescriptor) -> Self {
        self.load(ty);
        self
    }

    fn load(&mut self, ty: &TypeDescriptor) {
        for nested in &ty.nested_types {
            self.load(nested);
        }
        self.classes.insert(ty.name.clone(), ty.clone());
    }

    pub fn recorder(&self) -> Value {
        Value::Object(Rc::new(RefCell::new(Instance {
            class: RECORDER.to_string(),
            fields: HashMap::new(),
        })))
    }

    pub fn trace(&self) -> Vec<String> {
        self.trace.borrow().clone()
    }

    fn class(&self, name: &str) -> Eval<&TypeDescriptor> {
        self.classes.get(name).ok_or_else(|| format!("unknown class '{name}'"))
    }

    pub fn instantiate(&self, class: &str, args: Vec<Value>) -> Eval<Value> {
        let ty = self.class(class)?;
        let fields = ty
            .fields
            .iter()
            .map(|f| (f.name.clone(), default_value(&f.ty)))
            .collect();
        let object = Value::Object(Rc::new(RefCell::new(Instance {
            class: class.to_string(),
            fields,
        })));

        for field in &ty.fields {
            if let Some(initializer) = &field.initializer {
                let value = self.eval(&mut Frame::new(object.clone()), initializer)?;
                object.set_field(&field.name, value)?;
            }
        }

        match ty.constructors().find(|c| c.parameters.len() == args.len()) {
            Some(constructor) => {
                self.call_body(object.clone(), constructor, args)?;
            }
            None if args.is_empty() => {}
            None => return Err(format!("no {}-argument constructor on {class}", args.len())),
        }
        Ok(object)
    }

    pub fn invoke(&self, receiver: &Value, method: &str, args: Vec<Value>) -> Eval<Value> {
        let class = match receiver {
            Value::Object(o) => o.borrow().class.clone(),
            Value::Null => return Err(format!("NullPointerException calling {method}")),
            other => return Err(format!("cannot call {method} on {other:?}")),
        };

        if class == RECORDER {
            let rendered: Vec<_> = args.iter().map(Value::describe).collect();
            self.trace
                .borrow_mut()
                .push(format!("{method}({})", rendered.join(", ")));
            return Ok(Value::Null);
        }

        let ty = self.class(&class)?;
        let target = find_method(ty, method, args.len())
            .ok_or_else(|| format!("no method {method}/{} on {class}", args.len()))?;
        self.call_body(receiver.clone(), target, args)
    }

    pub fn invoke_static(&self, owner: &str, method: &str, args: Vec<Value>) -> Eval<Value> {
        match (owner, method, args.as_slice()) {
            ("Double", "doubleToLongBits", [Value::Double(d)]) => Ok(Value::Long(double_bits(*d))),
            ("Float", "floatToIntBits", [Value::Float(f)]) => Ok(Value::Int(float_bits(*f))),
            ("Objects", "hashCode", [value]) => self.hash_of(value).map(Value::Int),
            ("Objects", "equals", [a, b]) => self.equals_of(a, b).map(Value::Bool),
            _ => {
                let ty = self.class(owner)?;
                let target = find_method(ty, method, args.len())
                    .ok_or_else(|| format!("no static method {method}/{} on {owner}", args.len()))?;
                self.call_body(Value::Null, target, args.clone())
            }
        }
    }

    fn hash_of(&self, value: &Value) -> Eval<i32> {
        Ok(match value {
            Value::Null => 0,
            Value::Bool(true) => 1231,
            Value::Bool(false) => 1237,
            Value::Int(v) => *v,
            Value::Long(v) => fold_long(*v),
            Value::Float(v) => float_bits(*v),
            Value::Double(v) => fold_long(double_bits(*v)),
            Value::Str(s) => string_hash(s),
            object @ Value::Object(_) => match self.invoke(object, "hashCode", vec![])? {
                Value::Int(hash) => hash,
                other => return Err(format!("hashCode returned {other:?}")),
            },
        })
    }

    fn equals_of(&self, left: &Value, right: &Value) -> Eval<bool> {
        match (left, right) {
            (Value::Null, Value::Null) => Ok(true),
            (Value::Null, _) | (_, Value::Null) => Ok(false),
            (Value::Object(_), _) => self.invoke(left, "equals", vec![right.clone()])?.truthy(),
            _ => Ok(left == right),
        }
    }

    fn call_body(&self, this: Value, method: &MethodDescriptor, args: Vec<Value>) -> Eval<Value> {
        let mut frame = Frame::new(this);
        for (parameter, arg) in method.parameters.iter().zip(args) {
            frame.locals.insert(parameter.name.clone(), arg);
        }
        match self.exec_block(&mut frame, &method.body)? {
            Flow::Return(value) => Ok(value),
            Flow::Next => Ok(Value::Null),
        }
    }

    fn exec_block(&self, frame: &mut Frame, statements: &[Statement]) -> Eval<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.exec(frame, statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn exec(&self, frame: &mut Frame, statement: &Statement) -> Eval<Flow> {
        match statement {
            Statement::Expr { expr } => {
                self.eval(frame, expr)?;
                Ok(Flow::Next)
            }
            Statement::Return { value } => {
                let value = match value {
                    Some(expr) => self.eval(frame, expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }
            Statement::Assign { target, value } => {
                let value = self.eval(frame, value)?;
                self.assign(frame, target, value)?;
                Ok(Flow::Next)
            }
            Statement::Local { name, value, .. } => {
                let value = self.eval(frame, value)?;
                frame.locals.insert(name.clone(), value);
                Ok(Flow::Next)
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval(frame, condition)?.truthy()? {
                    self.exec_block(frame, then_branch)
                } else {
                    self.exec_block(frame, else_branch)
                }
            }
        }
    }

    fn assign(&self, frame: &mut Frame, target: &Expr, value: Value) -> Eval<()> {
        match target {
            Expr::Name { name } if frame.locals.contains_key(name) => {
                frame.locals.insert(name.clone(), value);
                Ok(())
            }
            Expr::Name { name } => frame.this.set_field(name, value),
            Expr::Field { target, name } => self.eval(frame, target)?.set_field(name, value),
            other => Err(format!("cannot assign to {other}")),
        }
    }

    fn eval_all(&self, frame: &mut Frame, args: &[Expr]) -> Eval<Vec<Value>> {
        args.iter().map(|arg| self.eval(frame, arg)).collect()
    }

    fn eval(&self, frame: &mut Frame, expr: &Expr) -> Eval<Value> {
        Ok(match expr {
            Expr::This => frame.this.clone(),
            Expr::Super => return Err("super is not supported".to_string()),
            Expr::Null => Value::Null,
            Expr::Literal { value } => match value {
                Literal::Int(v) => Value::Int(*v),
                Literal::Bool(v) => Value::Bool(*v),
                Literal::Str(v) => Value::Str(v.clone()),
            },
            Expr::Name { name } => match frame.locals.get(name) {
                Some(value) => value.clone(),
                None => frame.this.field(name)?,
            },
            Expr::Field { target, name } => self.eval(frame, target)?.field(name)?,
            Expr::Call { target, method, args } => {
                let receiver = match target {
                    Some(target) => self.eval(frame, target)?,
                    None => frame.this.clone(),
                };
                let args = self.eval_all(frame, args)?;
                self.invoke(&receiver, method, args)?
            }
            Expr::StaticCall { owner, method, args } => {
                let args = self.eval_all(frame, args)?;
                self.invoke_static(&owner.simple_name(), method, args)?
            }
            Expr::New { ty, args } => {
                let args = self.eval_all(frame, args)?;
                self.instantiate(&ty.simple_name(), args)?
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval(frame, left)?;
                let right = self.eval(frame, right)?;
                binary(*op, left, right)?
            }
            Expr::Unary {
                op: UnaryOp::Not,
                operand,
            } => Value::Bool(!self.eval(frame, operand)?.truthy()?),
            Expr::Cast { ty, expr } => cast(ty, self.eval(frame, expr)?)?,
            Expr::InstanceOf { expr, ty } => {
                let value = self.eval(frame, expr)?;
                Value::Bool(value.class_name() == Some(ty.simple_name()))
            }
            Expr::Conditional {
                condition,
                then_value,
                else_value,
            } => {
                if self.eval(frame, condition)?.truthy()? {
                    self.eval(frame, then_value)?
                } else {
                    self.eval(frame, else_value)?
                }
            }
        })
    }
}

impl Frame {
    fn new(this: Value) -> Self {
        Self {
            this,
            locals: HashMap::new(),
        }
    }
}

fn find_method<'a>(ty: &'a TypeDescriptor, name: &str, arity: usize) -> Option<&'a MethodDescriptor> {
    ty.methods
        .iter()
        .find(|m| !m.is_constructor() && m.name == name && m.parameters.len() == arity)
}
