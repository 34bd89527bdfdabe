use crate::repositories::tick_sink::TickSink;
use crate::services::price_path::{draw_volume, round_price, PricePath, PricePathConfig};
use crate::services::schedule::TickSchedule;
use crate::value_objects::symbol::Symbol;
use crate::value_objects::tick::Tick;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Emits `days * rate` ticks per symbol, one symbol after another.
///
/// Every symbol gets a fresh price path and a time cursor reset to the shared
/// `start` instant, so all series cover the same wall-clock window.
#[derive(Debug, Clone)]
pub struct TickGenerator {
    symbols: Vec<Symbol>,
    schedule: TickSchedule,
    config: PricePathConfig,
    start: DateTime<Utc>,
}

impl TickGenerator {
    pub fn new(
        symbols: Vec<Symbol>,
        schedule: TickSchedule,
        config: PricePathConfig,
        start: DateTime<Utc>,
    ) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            symbols,
            schedule,
            config,
            start,
        })
    }

    pub fn schedule(&self) -> TickSchedule {
        self.schedule
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn expected_rows(&self) -> u64 {
        self.schedule.expected_rows(self.symbols.len())
    }

    /// Runs the whole simulation into `sink` and returns the number of rows
    /// written. The sink is not finished here; the caller owns that.
    pub fn generate<R, S>(&self, rng: &mut R, sink: &mut S) -> Result<u64, String>
    where
        R: Rng + ?Sized,
        S: TickSink + ?Sized,
    {
        let mut rows = 0u64;
        for symbol in &self.symbols {
            rows += self.generate_symbol(symbol, rng, sink)?;
        }
        Ok(rows)
    }

    fn generate_symbol<R, S>(&self, symbol: &Symbol, rng: &mut R, sink: &mut S) -> Result<u64, String>
    where
        R: Rng + ?Sized,
        S: TickSink + ?Sized,
    {
        let step = self.schedule.step();
        let mut path = PricePath::start(self.config, rng);
        let mut cursor = self.start;
        let mut rows = 0u64;

        for _ in 0..self.schedule.ticks_per_symbol() {
            let price = round_price(path.step(rng));
            if !price.is_finite() {
                return Err(format!("price path for {symbol} overflowed after {rows} ticks"));
            }
            let volume = draw_volume(&self.config, rng);
            let ts = cursor.timestamp_millis();
            cursor = cursor
                .checked_add_signed(step)
                .ok_or_else(|| format!("time cursor overflow for {symbol} at ts={ts}"))?;

            sink.write_tick(&Tick {
                symbol: symbol.clone(),
                ts,
                price,
                volume,
            })?;
            rows += 1;
        }

        Ok(rows)
    }
}
