use crate::value_objects::symbol::Symbol;
use crate::value_objects::tick::Tick;
use std::collections::HashMap;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickQualityReport {
    pub rows: u64,
    /// Distinct symbols in first-seen order.
    pub symbols: Vec<Symbol>,
    pub non_positive_price: usize,
    pub volume_out_of_range: usize,
    pub out_of_order: usize,
    pub duplicate_timestamps: usize,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
    pub first_out_of_order: Option<i64>,
    pub first_duplicate: Option<i64>,
}

impl TickQualityReport {
    /// True when no row breaks the price, volume or ordering checks.
    /// Duplicate timestamps are reported separately via
    /// [`TickQualityReport::has_duplicates`].
    pub fn is_clean(&self) -> bool {
        self.non_positive_price == 0 && self.volume_out_of_range == 0 && self.out_of_order == 0
    }

    pub fn has_duplicates(&self) -> bool {
        self.duplicate_timestamps > 0
    }
}

/// Streaming builder for a [`TickQualityReport`].
#[derive(Debug, Clone)]
pub struct TickQualityTracker {
    volume_range: (u32, u32),
    last_ts: HashMap<Symbol, i64>,
    report: TickQualityReport,
}

impl TickQualityTracker {
    pub fn new(volume_range: (u32, u32)) -> Self {
        Self {
            volume_range,
            last_ts: HashMap::new(),
            report: TickQualityReport::default(),
        }
    }

    pub fn observe(&mut self, tick: &Tick) {
        let report = &mut self.report;
        report.rows += 1;

        if !(tick.price.is_finite() && tick.price > 0.0) {
            report.non_positive_price += 1;
        }
        let (volume_min, volume_max) = self.volume_range;
        if tick.volume < volume_min || tick.volume > volume_max {
            report.volume_out_of_range += 1;
        }

        report.first_timestamp = Some(report.first_timestamp.map_or(tick.ts, |ts| ts.min(tick.ts)));
        report.last_timestamp = Some(report.last_timestamp.map_or(tick.ts, |ts| ts.max(tick.ts)));

        match self.last_ts.get_mut(&tick.symbol) {
            Some(prev) => {
                if tick.ts == *prev {
                    report.duplicate_timestamps += 1;
                    if report.first_duplicate.is_none() {
                        report.first_duplicate = Some(tick.ts);
                    }
                } else if tick.ts < *prev {
                    report.out_of_order += 1;
                    if report.first_out_of_order.is_none() {
                        report.first_out_of_order = Some(tick.ts);
                    }
                }
                *prev = tick.ts;
            }
            None => {
                report.symbols.push(tick.symbol.clone());
                self.last_ts.insert(tick.symbol.clone(), tick.ts);
            }
        }
    }

    pub fn finish(self) -> TickQualityReport {
        self.report
    }
}

pub fn tick_quality_from_ticks(ticks: &[Tick], volume_range: (u32, u32)) -> TickQualityReport {
    let mut tracker = TickQualityTracker::new(volume_range);
    for tick in ticks {
        tracker.observe(tick);
    }
    tracker.finish()
}
