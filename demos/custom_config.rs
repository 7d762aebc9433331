use std::time::Duration;

use snowforge::{FixedIdentity, Generator, GeneratorConfig, IdGenError};

fn main() -> Result<(), IdGenError> {
    tracing_subscriber::fmt::init();

    // 64 machines, 2^16 ids per 10ms interval
    let config = GeneratorConfig::builder()
        .time_bits(38)
        .machine_bits(6)
        .sequence_bits(16)
        .machine_id(42)
        .generation_interval(Duration::from_millis(10))
        .build();
    let generator = Generator::with_identity(Some(config), &FixedIdentity(0))?;
    let layout = generator.layout();
    println!(
        "Layout {}/{}/{}: {} intervals, {} ids per interval",
        layout.time_bits(),
        layout.machine_bits(),
        layout.sequence_bits(),
        layout.max_intervals(),
        layout.max_sequence() + 1
    );

    let id = generator.next_id()?;
    println!("ID: {id} -> {:?}", generator.extract.decompose(id.value()));

    // Zero widths are repaired with a warning, oversized layouts are rejected
    let repaired = Generator::with_identity(
        Some(GeneratorConfig::builder().time_bits(0).sequence_bits(0).build()),
        &FixedIdentity(0),
    )?;
    println!("Repaired layout: {:?}", repaired.layout());

    let rejected = Generator::with_identity(
        Some(GeneratorConfig::builder().time_bits(40).build()),
        &FixedIdentity(0),
    );
    println!("Oversized layout: {:?}", rejected.err());
    Ok(())
}
