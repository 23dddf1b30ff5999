use typecraft_synth::GenerationConfig;
use typecraft_model::render_body;

fn main() {
    let config = r#"{
        "knownTypes": { "com.acme": ["Money"] },
        "valueClasses": [
            {
                "package": "com.acme.orders",
                "name": "Order",
                "fields": [
                    { "name": "id", "type": "long" },
                    { "name": "total", "type": "Money" },
                    { "name": "note", "type": "String" }
                ],
                "builder": true,
                "getters": true,
                "setters": true
            }
        ]
    }"#;

    println!("Synthesizing value classes...\n");

    let types = match GenerationConfig::from_json(config).map_err(|e| e.to_string()).and_then(|c| {
        c.synthesize_all().map_err(|e| e.to_string())
    }) {
        Ok(types) => types,
        Err(e) => {
            eprintln!("❌ Synthesis failed: {}", e);
            std::process::exit(1);
        }
    };

    for ty in &types {
        println!("{}", "=".repeat(80));
        println!("class {} ({} fields)", ty.name, ty.fields.len());
        for method in &ty.methods {
            println!("\n  {}({} params):", method.name, method.parameters.len());
            for line in render_body(&method.body).lines() {
                println!("    {}", line);
            }
        }
        for nested in &ty.nested_types {
            println!("\n  nested {} with {} methods", nested.name, nested.methods.len());
        }
    }
    println!("{}", "=".repeat(80));
}
