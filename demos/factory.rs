use std::sync::Arc;

use snowforge::{FactoryConfig, FixedIdentity, GeneratorConfig, IdFactory, LogSink, SystemClock};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = FactoryConfig::builder()
        .workers(5)
        .ids_per_worker(1 << 10)
        .generator(
            GeneratorConfig::builder()
                .time_bits(38)
                .machine_bits(6)
                .sequence_bits(16)
                .build(),
        )
        .build();
    let factory = IdFactory::with_parts(config, Arc::new(FixedIdentity(0)), SystemClock)?;

    let report = factory.run(LogSink)?;
    println!(
        "Delivered {}/{} ids from {} workers",
        report.delivered,
        report.expected,
        report.workers.len()
    );
    for failure in report.failures() {
        println!("worker {} stopped early: {:?}", failure.worker, failure.error);
    }
    Ok(())
}
