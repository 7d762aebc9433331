use snowforge::{FixedIdentity, Generator, GeneratorConfig, IdGenError};

fn main() -> Result<(), IdGenError> {
    tracing_subscriber::fmt::init();

    // Explicit machine id, default 38/16/10 layout
    let generator = Generator::with_identity(
        Some(GeneratorConfig::builder().machine_id(1).build()),
        &FixedIdentity(0),
    )?;

    for _ in 0..5 {
        let id = generator.next_id()?;
        let (interval, machine, sequence) = generator.extract.decompose(id.value());
        println!(
            "ID: {} (interval={}, machine={}, seq={}, at={}ns)",
            id,
            interval,
            machine,
            sequence,
            id.timestamp()
        );
    }

    // Default identity from the outbound network interface
    match Generator::new() {
        Ok(g) => println!("Default machine identity: {}", g.machine_id()),
        Err(e) => println!("No default identity: {e}"),
    }
    Ok(())
}
