use crate::config::GenerateSettings;
use tickforge_domain::repositories::tick_reader::TickReader;
use tickforge_domain::services::quality::TickQualityReport;
use tickforge_domain::services::symbols::generate_symbols_with_prefix;

/// Re-reads the file a run wrote and checks it against what the settings
/// promise: row count, symbol order, positive prices, volume bounds and
/// per-symbol timestamp ordering.
pub fn verify_ticks<R>(reader: &R, settings: &GenerateSettings) -> Result<TickQualityReport, String>
where
    R: TickReader + ?Sized,
{
    let (_ticks, report) = reader.load_ticks(&settings.out, settings.price_path.volume_range())?;

    let expected_rows = settings.expected_rows();
    if report.rows != expected_rows {
        return Err(format!(
            "verify failed: {} has {} rows, expected {}",
            settings.out.display(),
            report.rows,
            expected_rows
        ));
    }

    let expected_symbols = if settings.schedule.ticks_per_symbol() == 0 {
        Vec::new()
    } else {
        generate_symbols_with_prefix(&settings.symbol_prefix, settings.symbols)
    };
    if report.symbols != expected_symbols {
        return Err(format!(
            "verify failed: {} has {} symbols, expected {} in index order",
            settings.out.display(),
            report.symbols.len(),
            expected_symbols.len()
        ));
    }

    if !report.is_clean() {
        return Err(format!(
            "verify failed: non_positive_price={} volume_out_of_range={} out_of_order={} (first_out_of_order={:?})",
            report.non_positive_price,
            report.volume_out_of_range,
            report.out_of_order,
            report.first_out_of_order
        ));
    }

    if report.has_duplicates() && !settings.schedule.collides() {
        return Err(format!(
            "verify failed: duplicate_timestamps={} (first_duplicate={:?})",
            report.duplicate_timestamps, report.first_duplicate
        ));
    }

    metrics::counter!("tickforge.verify.rows_total").increment(report.rows);
    tracing::info!(
        out = %settings.out.display(),
        rows = report.rows,
        symbols = report.symbols.len(),
        duplicate_timestamps = report.duplicate_timestamps,
        "verified tick file"
    );
    Ok(report)
}
