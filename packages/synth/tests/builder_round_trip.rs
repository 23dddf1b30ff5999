/// Builder round-trip tests
///
/// Runs the generated `builder()`, mutators and `build()` through the test
/// evaluator and checks that every value set on the builder arrives in the
/// matching field of the built object, whatever the field order.
mod support;

use support::{Interpreter, Value};
use typecraft_model::*;
use typecraft_synth::{synthesize_builder, synthesize_getters, BuilderOptions, GetterOptions};

fn fields() -> Vec<(&'static str, TypeReference, Value)> {
    vec![
        ("name", TypeReference::string(), Value::str("hexagon")),
        ("sides", PrimitiveType::Int.into(), Value::Int(6)),
        ("area", PrimitiveType::Double.into(), Value::Double(2.598)),
        ("id", PrimitiveType::Long.into(), Value::Long(-9_000_000_000)),
        ("filled", PrimitiveType::Boolean.into(), Value::Bool(true)),
        ("ratio", PrimitiveType::Float.into(), Value::Float(0.5)),
    ]
}

fn shape(order: &[usize]) -> TypeDescriptor {
    let all = fields();
    order.iter().fold(TypeDescriptor::record("Shape"), |ty, &i| {
        let (name, field_type, _) = &all[i];
        ty.with_field(FieldDescriptor::new(*name, field_type.clone()).with_modifiers([Modifier::Private]))
    })
}

fn round_trip(order: &[usize]) {
    let ty = synthesize_builder(&shape(order), &BuilderOptions::new("geo")).expect("Failed to synthesize");
    let interpreter = Interpreter::new().with_type(&ty);

    let builder = interpreter
        .invoke_static("Shape", "builder", vec![])
        .expect("builder() failed");
    assert_eq!(builder.class_name().as_deref(), Some("Builder"));

    let all = fields();
    for &i in order {
        let (name, _, value) = &all[i];
        let returned = interpreter
            .invoke(&builder, name, vec![value.clone()])
            .expect("mutator failed");
        assert!(returned.same(&builder), "mutator {} must return the builder", name);
        assert_eq!(interpreter.invoke(&builder, name, vec![]).unwrap(), *value);
    }

    let built = interpreter.invoke(&builder, "build", vec![]).expect("build() failed");
    assert_eq!(built.class_name().as_deref(), Some("Shape"));
    for &i in order {
        let (name, _, value) = &all[i];
        assert_eq!(built.get(name), *value, "field {} lost in order {:?}", name, order);
    }
}

#[test]
fn test_round_trip_declaration_order() {
    round_trip(&[0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_round_trip_survives_reordering() {
    round_trip(&[5, 4, 3, 2, 1, 0]);
    round_trip(&[2, 0, 5, 1, 3, 4]);
    round_trip(&[3, 1]);
}

#[test]
fn test_round_trip_of_partially_set_builder() {
    let ty = synthesize_builder(&shape(&[0, 1, 4]), &BuilderOptions::new("geo")).unwrap();
    let interpreter = Interpreter::new().with_type(&ty);

    let builder = interpreter.invoke_static("Shape", "builder", vec![]).unwrap();
    interpreter.invoke(&builder, "sides", vec![Value::Int(3)]).unwrap();
    let built = interpreter.invoke(&builder, "build", vec![]).unwrap();

    assert_eq!(built.get("name"), Value::Null);
    assert_eq!(built.get("sides"), Value::Int(3));
    assert_eq!(built.get("filled"), Value::Bool(false));
}

#[test]
fn test_each_build_yields_a_new_object() {
    let ty = synthesize_builder(&shape(&[1]), &BuilderOptions::new("geo")).unwrap();
    let interpreter = Interpreter::new().with_type(&ty);

    let builder = interpreter.invoke_static("Shape", "builder", vec![]).unwrap();
    interpreter.invoke(&builder, "sides", vec![Value::Int(4)]).unwrap();
    let first = interpreter.invoke(&builder, "build", vec![]).unwrap();
    interpreter.invoke(&builder, "sides", vec![Value::Int(5)]).unwrap();
    let second = interpreter.invoke(&builder, "build", vec![]).unwrap();

    assert!(!first.same(&second));
    assert_eq!(first.get("sides"), Value::Int(4));
    assert_eq!(second.get("sides"), Value::Int(5));
}

#[test]
fn test_factory_seeds_additional_fields() {
    let options = BuilderOptions::new("geo")
        .with_additional_field(FieldDescriptor::new("origin", TypeReference::string()).with_modifiers([Modifier::Private]));
    let ty = synthesize_builder(&shape(&[0, 1]), &options).unwrap();
    let interpreter = Interpreter::new().with_type(&ty);

    let builder = interpreter
        .invoke_static("Shape", "builder", vec![Value::str("import")])
        .unwrap();
    assert_eq!(builder.get("origin"), Value::str("import"));

    // additional state stays on the builder
    let built = interpreter.invoke(&builder, "build", vec![]).unwrap();
    assert!(built.field("origin").is_err());
}

#[test]
fn test_outer_getters_read_built_values() {
    let ty = synthesize_getters(&shape(&[0, 1]), &GetterOptions::default()).unwrap();
    let ty = synthesize_builder(&ty, &BuilderOptions::new("geo")).unwrap();
    let interpreter = Interpreter::new().with_type(&ty);

    let built = interpreter
        .instantiate("Shape", vec![Value::str("square"), Value::Int(4)])
        .expect("private constructor");
    assert_eq!(interpreter.invoke(&built, "getName", vec![]).unwrap(), Value::str("square"));
    assert_eq!(interpreter.invoke(&built, "getSides", vec![]).unwrap(), Value::Int(4));
}
