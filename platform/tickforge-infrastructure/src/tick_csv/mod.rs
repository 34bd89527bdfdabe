use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tickforge_domain::repositories::tick_reader::TickReader;
use tickforge_domain::repositories::tick_sink::TickSink;
use tickforge_domain::services::quality::{TickQualityReport, TickQualityTracker};
use tickforge_domain::value_objects::tick::{Tick, TICK_CSV_HEADER};

/// Streams ticks as CSV rows. The header row goes out on construction, so a
/// run that generates nothing still leaves a well-formed file.
pub struct CsvTickWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}

impl CsvTickWriter<File> {
    pub fn create(path: &Path) -> Result<Self, String> {
        let file = File::create(path)
            .map_err(|err| format!("failed to create tick CSV {}: {}", path.display(), err))?;
        tracing::debug!(path = %path.display(), "opened tick CSV for writing");
        Self::new(file)
    }
}

impl<W: Write> CsvTickWriter<W> {
    pub fn new(inner: W) -> Result<Self, String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        writer
            .write_record(TICK_CSV_HEADER)
            .map_err(|err| format!("failed to write tick CSV header: {err}"))?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn into_inner(self) -> Result<W, String> {
        self.writer
            .into_inner()
            .map_err(|err| format!("failed to flush tick CSV: {}", err.error()))
    }
}

impl<W: Write> TickSink for CsvTickWriter<W> {
    fn write_tick(&mut self, tick: &Tick) -> Result<(), String> {
        if !tick.price.is_finite() {
            return Err(format!(
                "failed to write tick row {}: price {} of {} is not finite",
                self.rows + 1,
                tick.price,
                tick.symbol
            ));
        }
        self.writer
            .serialize(tick)
            .map_err(|err| format!("failed to write tick row {}: {}", self.rows + 1, err))?;
        self.rows += 1;
        metrics::counter!("tickforge.infra.tick_csv.rows_written_total").increment(1);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), String> {
        let start = Instant::now();
        let result = self
            .writer
            .flush()
            .map_err(|err| format!("failed to flush tick CSV: {err}"));
        record_io_metrics("flush", start, &result);
        result
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvTickReader;

impl CsvTickReader {
    pub fn new() -> Self {
        Self
    }
}

impl TickReader for CsvTickReader {
    fn load_ticks(
        &self,
        path: &Path,
        volume_range: (u32, u32),
    ) -> Result<(Vec<Tick>, TickQualityReport), String> {
        let start = Instant::now();
        let result = load_ticks_csv(path, volume_range);
        record_io_metrics("load", start, &result);
        result
    }
}

pub fn load_ticks_csv(
    path: &Path,
    volume_range: (u32, u32),
) -> Result<(Vec<Tick>, TickQualityReport), String> {
    let file = File::open(path)
        .map_err(|err| format!("failed to open tick CSV {}: {}", path.display(), err))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|err| format!("failed to read tick CSV header {}: {}", path.display(), err))?;
    if !headers.iter().eq(TICK_CSV_HEADER.iter().copied()) {
        return Err(format!(
            "unexpected tick CSV header in {}: {:?} (expected {})",
            path.display(),
            headers.iter().collect::<Vec<_>>(),
            TICK_CSV_HEADER.join(",")
        ));
    }

    let mut tracker = TickQualityTracker::new(volume_range);
    let mut ticks = Vec::new();
    for (idx, result) in reader.deserialize::<Tick>().enumerate() {
        let tick = result.map_err(|err| format!("failed to parse tick row {}: {}", idx + 1, err))?;
        tracker.observe(&tick);
        ticks.push(tick);
    }

    let report = tracker.finish();
    tracing::debug!(
        path = %path.display(),
        rows = report.rows,
        symbols = report.symbols.len(),
        "loaded tick CSV"
    );
    Ok((ticks, report))
}

fn record_io_metrics<T>(kind: &'static str, start: Instant, result: &Result<T, String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "tickforge.infra.tick_csv.calls_total",
        "kind" => kind,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("tickforge.infra.tick_csv.io_ms", "kind" => kind, "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}
