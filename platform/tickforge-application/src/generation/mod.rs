use crate::config::GenerateSettings;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tickforge_domain::repositories::tick_sink::TickSink;
use tickforge_domain::services::generator::TickGenerator;
use tickforge_domain::services::schedule::start_instant;
use tickforge_domain::services::symbols::generate_symbols_with_prefix;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSummary {
    pub rows: u64,
    pub expected_rows: u64,
    pub symbols: usize,
    /// Shared start instant of every series, ms since the Unix epoch.
    pub start_ms: i64,
    pub elapsed_ms: u64,
    pub seed: Option<u64>,
}

pub fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Builds the generator for `settings`. `now` is captured once by the caller;
/// the series start `settings.schedule.days` before it.
///
/// Every configuration error surfaces here, so callers run this before
/// opening the destination.
pub fn prepare_generator(
    settings: &GenerateSettings,
    now: DateTime<Utc>,
) -> Result<TickGenerator, String> {
    settings.validate()?;
    let start = start_instant(now, settings.schedule.days)?;
    let symbols = generate_symbols_with_prefix(&settings.symbol_prefix, settings.symbols);
    TickGenerator::new(symbols, settings.schedule, settings.price_path, start)
}

/// Generates every tick of a prepared `generator` into `sink`, then finishes
/// the sink.
pub fn run_generate<R, S>(
    settings: &GenerateSettings,
    generator: &TickGenerator,
    rng: &mut R,
    sink: &mut S,
) -> Result<GenerateSummary, String>
where
    R: Rng + ?Sized,
    S: TickSink + ?Sized,
{
    let schedule = generator.schedule();
    let start = generator.start();

    if schedule.collides() {
        tracing::warn!(
            rate = schedule.rate,
            "rate above 60 floors the tick step to 0 minutes; timestamps repeat within each symbol"
        );
    }

    tracing::info!(
        out = %settings.out.display(),
        symbols = settings.symbols,
        days = schedule.days,
        rate = schedule.rate,
        step_minutes = schedule.step_minutes(),
        seeded = settings.seed.is_some(),
        start_ms = start.timestamp_millis(),
        "generating ticks"
    );

    let started = Instant::now();
    let result = generator
        .generate(rng, sink)
        .and_then(|rows| sink.finish().map(|()| rows));
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!("tickforge.generate.runs_total", "result" => result_label).increment(1);
    metrics::histogram!("tickforge.generate.elapsed_ms", "result" => result_label)
        .record(elapsed_ms as f64);

    let rows = result?;
    metrics::counter!("tickforge.generate.rows_total").increment(rows);
    metrics::gauge!("tickforge.generate.symbols").set(settings.symbols as f64);

    let summary = GenerateSummary {
        rows,
        expected_rows: generator.expected_rows(),
        symbols: settings.symbols,
        start_ms: start.timestamp_millis(),
        elapsed_ms,
        seed: settings.seed,
    };
    tracing::info!(
        rows = summary.rows,
        elapsed_ms = summary.elapsed_ms,
        "tick generation complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::{build_rng, prepare_generator, run_generate};
    use crate::config::GenerateSettings;
    use chrono::{TimeZone, Utc};
    use rand::Rng;
    use tickforge_domain::services::schedule::TickSchedule;
    use tickforge_domain::value_objects::tick::Tick;

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut first = build_rng(Some(5));
        let mut second = build_rng(Some(5));
        let a: Vec<u32> = (0..8).map(|_| first.gen()).collect();
        let b: Vec<u32> = (0..8).map(|_| second.gen()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn summary_reports_rows_and_shared_start() {
        let settings = GenerateSettings {
            symbols: 3,
            schedule: TickSchedule::new(2, 4),
            seed: Some(1),
            ..GenerateSettings::default()
        };
        let now = Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap();
        let mut ticks: Vec<Tick> = Vec::new();
        let mut rng = build_rng(settings.seed);
        let generator = prepare_generator(&settings, now).expect("prepare");
        let summary = run_generate(&settings, &generator, &mut rng, &mut ticks).expect("generate");

        assert_eq!(summary.rows, 24);
        assert_eq!(summary.expected_rows, 24);
        assert_eq!(summary.symbols, 3);
        assert_eq!(summary.seed, Some(1));
        let start = Utc.with_ymd_and_hms(2026, 2, 8, 0, 0, 0).unwrap();
        assert_eq!(summary.start_ms, start.timestamp_millis());
        assert_eq!(ticks[0].ts, summary.start_ms);
        assert_eq!(ticks[8].ts, summary.start_ms);
    }

    #[test]
    fn out_of_range_days_fail_while_preparing() {
        let settings = GenerateSettings {
            schedule: TickSchedule::new(u32::MAX, 1),
            ..GenerateSettings::default()
        };
        let err = prepare_generator(&settings, Utc::now()).expect_err("out of range");
        assert!(err.contains("out of range"), "{err}");
    }
}
