use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, warn};
use typecraft_common::{validate_type, CommonError, CommonResult};
use typecraft_model::*;

pub const HASH_CODE_METHOD: &str = "hashCode";
pub const EQUALS_METHOD: &str = "equals";

/// Upper bound (inclusive) for the hash seed and multiplier primes
pub const MAX_HASH_PRIME: i32 = 23;

/// Where the hash seed and multiplier come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashSeed {
    /// Fresh primes from the process-local generator on every call
    #[default]
    Random,
    /// Primes drawn from a generator seeded by the type's name and fields,
    /// so identical input always yields identical output
    Derived,
    /// Caller-chosen primes
    Fixed { seed: i32, multiplier: i32 },
}

/// Options for equality synthesis
#[derive(Debug, Clone, Default)]
pub struct EqualityOptions {
    /// Package of the type, used for the `instanceof` check
    pub package: String,
    pub seed: HashSeed,
}

impl EqualityOptions {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            seed: HashSeed::default(),
        }
    }

    pub fn with_seed(mut self, seed: HashSeed) -> Self {
        self.seed = seed;
        self
    }
}

pub fn is_prime(n: i32) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Uniform draw over the primes in `[1, MAX_HASH_PRIME]`
pub fn random_prime<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    loop {
        let candidate = rng.random_range(1..=MAX_HASH_PRIME);
        if is_prime(candidate) {
            return candidate;
        }
    }
}

fn derived_rng(ty: &TypeDescriptor) -> ChaCha20Rng {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(ty.name.as_bytes());
    for field in ty.fields.iter().filter(|f| !f.is_static()) {
        hasher.update(b"\0");
        hasher.update(field.name.as_bytes());
        hasher.update(b":");
        hasher.update(field.ty.to_string().as_bytes());
    }
    ChaCha20Rng::seed_from_u64(u64::from(hasher.finalize()))
}

/// Resolve `(seed, multiplier)` for `ty`
pub fn hash_constants(ty: &TypeDescriptor, seed: HashSeed) -> CommonResult<(i32, i32)> {
    match seed {
        HashSeed::Random => {
            let mut rng = rand::rng();
            Ok((random_prime(&mut rng), random_prime(&mut rng)))
        }
        HashSeed::Derived => {
            let mut rng = derived_rng(ty);
            Ok((random_prime(&mut rng), random_prime(&mut rng)))
        }
        HashSeed::Fixed { seed, multiplier } => {
            for value in [seed, multiplier] {
                if value > MAX_HASH_PRIME || !is_prime(value) {
                    return Err(CommonError::InvalidSeed { value });
                }
            }
            Ok((seed, multiplier))
        }
    }
}

fn double_bits(value: Expr) -> Expr {
    Expr::static_call(PrimitiveType::Double.boxed(), "doubleToLongBits", vec![value])
}

fn float_bits(value: Expr) -> Expr {
    Expr::static_call(PrimitiveType::Float.boxed(), "floatToIntBits", vec![value])
}

/// `(int) (v ^ (v >>> 32))`
fn fold_long(value: Expr) -> Expr {
    Expr::cast(
        PrimitiveType::Int,
        Expr::binary(
            BinaryOp::BitXor,
            value.clone(),
            Expr::binary(BinaryOp::UnsignedShr, value, Expr::int(32)),
        ),
    )
}

/// Contribution of a single field to the structural hash
fn hash_contribution(field: &FieldDescriptor) -> Expr {
    let value = Expr::this_field(&field.name);
    match field.ty.primitive() {
        Some(PrimitiveType::Boolean) => Expr::conditional(value, Expr::int(1), Expr::int(0)),
        Some(PrimitiveType::Double) => fold_long(double_bits(value)),
        Some(PrimitiveType::Long) => fold_long(value),
        Some(PrimitiveType::Float) => float_bits(value),
        Some(_) => value,
        None => Expr::static_call(ClassName::objects(), "hashCode", vec![value]),
    }
}

/// Condition under which a field of `this` and `other` differs
fn field_differs(field: &FieldDescriptor) -> Expr {
    let mine = Expr::this_field(&field.name);
    let theirs = Expr::name("other").field(&field.name);
    match field.ty.primitive() {
        Some(PrimitiveType::Double) => Expr::binary(BinaryOp::Ne, double_bits(mine), double_bits(theirs)),
        Some(PrimitiveType::Float) => Expr::binary(BinaryOp::Ne, float_bits(mine), float_bits(theirs)),
        Some(_) => Expr::binary(BinaryOp::Ne, mine, theirs),
        None => Expr::not(Expr::static_call(ClassName::objects(), "equals", vec![mine, theirs])),
    }
}

fn fold(multiplier: i32, contribution: Expr) -> Statement {
    Statement::assign(
        Expr::name("hash"),
        Expr::binary(
            BinaryOp::Add,
            Expr::binary(BinaryOp::Mul, Expr::int(multiplier), Expr::name("hash")),
            contribution,
        ),
    )
}

/// `public int hashCode()` folding every instance field
pub fn make_hash_code(ty: &TypeDescriptor, seed: i32, multiplier: i32) -> MethodDescriptor {
    let mut method = MethodDescriptor::new(HASH_CODE_METHOD)
        .returns(PrimitiveType::Int)
        .with_modifiers([Modifier::Public])
        .with_annotation(Annotation::override_marker())
        .with_statement(Statement::local(PrimitiveType::Int, "hash", Expr::int(seed)));

    for field in ty.fields.iter().filter(|f| !f.is_static()) {
        method = method.with_statement(fold(multiplier, hash_contribution(field)));
    }
    if ty.has_non_trivial_super_type() {
        method = method.with_statement(fold(multiplier, Expr::Super.call(HASH_CODE_METHOD, vec![])));
    }

    method.with_statement(Statement::ret(Expr::name("hash")))
}

/// `public boolean equals(Object obj)` comparing every instance field
pub fn make_equals(ty: &TypeDescriptor, self_type: &ClassName) -> MethodDescriptor {
    let mut checks = vec![Statement::final_local(
        self_type.clone(),
        "other",
        Expr::cast(self_type.clone(), Expr::name("obj")),
    )];
    for field in ty.fields.iter().filter(|f| !f.is_static()) {
        checks.push(Statement::if_then(
            field_differs(field),
            vec![Statement::ret(Expr::bool(false))],
        ));
    }
    checks.push(if ty.has_non_trivial_super_type() {
        Statement::ret(Expr::Super.call(EQUALS_METHOD, vec![Expr::name("obj")]))
    } else {
        Statement::ret(Expr::bool(true))
    });

    MethodDescriptor::new(EQUALS_METHOD)
        .returns(PrimitiveType::Boolean)
        .with_parameter("obj", TypeReference::object())
        .with_modifiers([Modifier::Public])
        .with_annotation(Annotation::override_marker())
        .with_statement(Statement::if_then(
            Expr::binary(BinaryOp::Eq, Expr::This, Expr::name("obj")),
            vec![Statement::ret(Expr::bool(true))],
        ))
        .with_statement(Statement::if_then(
            Expr::name("obj").is_null(),
            vec![Statement::ret(Expr::bool(false))],
        ))
        .with_statement(Statement::if_then(
            Expr::instance_of(Expr::name("obj"), self_type.clone()),
            checks,
        ))
        .with_statement(Statement::ret(Expr::bool(false)))
}

/// Append structural `hashCode`/`equals` to a record type.
///
/// Any other kind is returned unchanged: callers compose synthesizers
/// generically and equality only makes sense on records.
pub fn synthesize_equality(ty: &TypeDescriptor, options: &EqualityOptions) -> CommonResult<TypeDescriptor> {
    if ty.kind != TypeKind::Record {
        warn!(type_name = %ty.name, kind = ?ty.kind, "Skipping equality synthesis for non-record type");
        return Ok(ty.clone());
    }
    validate_type(ty)?;

    let (seed, multiplier) = hash_constants(ty, options.seed)?;
    debug!(type_name = %ty.name, seed, multiplier, "Chose hash constants");

    let self_type = ClassName::new(options.package.clone(), ty.name.clone());
    let hash_code = make_hash_code(ty, seed, multiplier);
    let equals = make_equals(ty, &self_type);

    info!(
        type_name = %ty.name,
        fields = ty.fields.iter().filter(|f| !f.is_static()).count(),
        chained = ty.has_non_trivial_super_type(),
        "Equality synthesis complete"
    );

    Ok(ty.clone().with_method(hash_code).with_method(equals))
}
