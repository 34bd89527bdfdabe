use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use tickforge_domain::services::generator::TickGenerator;
use tickforge_domain::services::price_path::PricePathConfig;
use tickforge_domain::services::quality::tick_quality_from_ticks;
use tickforge_domain::services::schedule::TickSchedule;
use tickforge_domain::services::symbols::generate_symbols;
use tickforge_domain::value_objects::tick::Tick;

fn run(symbols: usize, days: u32, rate: u32, seed: u64) -> (TickGenerator, Vec<Tick>) {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let generator = TickGenerator::new(
        generate_symbols(symbols),
        TickSchedule::new(days, rate),
        PricePathConfig::default(),
        start,
    )
    .expect("generator");
    let mut ticks = Vec::new();
    let rows = generator
        .generate(&mut StdRng::seed_from_u64(seed), &mut ticks)
        .expect("generate");
    assert_eq!(rows as usize, ticks.len());
    (generator, ticks)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn row_count_is_symbols_times_days_times_rate(
        symbols in 0usize..6,
        days in 0u32..4,
        rate in 0u32..90,
        seed in any::<u64>(),
    ) {
        let (_, ticks) = run(symbols, days, rate, seed);
        prop_assert_eq!(ticks.len() as u64, symbols as u64 * u64::from(days) * u64::from(rate));
    }

    #[test]
    fn prices_positive_and_volumes_in_range(
        symbols in 1usize..4,
        days in 1u32..4,
        rate in 1u32..48,
        seed in any::<u64>(),
    ) {
        let (_, ticks) = run(symbols, days, rate, seed);
        for tick in &ticks {
            prop_assert!(tick.price > 0.0);
            prop_assert!((1..=1000).contains(&tick.volume));
        }
    }

    #[test]
    fn timestamps_never_decrease_within_a_symbol(
        symbols in 1usize..4,
        days in 1u32..3,
        rate in 1u32..120,
        seed in any::<u64>(),
    ) {
        let (generator, ticks) = run(symbols, days, rate, seed);
        let mut last: HashMap<&str, i64> = HashMap::new();
        for tick in &ticks {
            if let Some(prev) = last.insert(tick.symbol.as_str(), tick.ts) {
                if generator.schedule().step_minutes() > 0 {
                    prop_assert!(tick.ts > prev);
                } else {
                    prop_assert_eq!(tick.ts, prev);
                }
            }
        }

        let report = tick_quality_from_ticks(&ticks, (1, 1000));
        prop_assert!(report.is_clean());
        prop_assert_eq!(report.symbols.len(), symbols);
    }

    #[test]
    fn symbol_set_is_stable_across_seeds(
        symbols in 0usize..5,
        seed_a in any::<u64>(),
        seed_b in any::<u64>(),
    ) {
        let (_, first) = run(symbols, 1, 3, seed_a);
        let (_, second) = run(symbols, 1, 3, seed_b);
        let first_symbols: Vec<_> = first.iter().map(|t| t.symbol.clone()).collect();
        let second_symbols: Vec<_> = second.iter().map(|t| t.symbol.clone()).collect();
        prop_assert_eq!(first_symbols, second_symbols);
    }
}
