pub mod obs;

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tickforge_application::config::{self, GenerateOverrides, GenerateSettings};
use tickforge_application::generation::{
    build_rng, prepare_generator, run_generate, GenerateSummary,
};
use tickforge_application::verification::verify_ticks;
use tickforge_domain::services::quality::TickQualityReport;
use tickforge_infrastructure::tick_csv::{CsvTickReader, CsvTickWriter};

#[derive(Debug, Clone, Default)]
pub struct GenOpts {
    pub config_path: Option<PathBuf>,
    pub overrides: GenerateOverrides,
    pub verify: bool,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub settings: GenerateSettings,
    pub summary: GenerateSummary,
    pub quality: Option<TickQualityReport>,
}

impl RunReport {
    pub fn summary_line(&self) -> String {
        format!(
            "Wrote {} rows to {}",
            self.summary.rows,
            self.settings.out.display()
        )
    }
}

pub fn run(opts: GenOpts) -> Result<RunReport, String> {
    run_at(opts, Utc::now())
}

/// Same as [`run`] with an explicit "now" for the start instant.
pub fn run_at(opts: GenOpts, now: DateTime<Utc>) -> Result<RunReport, String> {
    let file_config = match opts.config_path.as_deref() {
        Some(path) => Some(config::load_config(path)?),
        None => None,
    };
    let settings = GenerateSettings::resolve(file_config.as_ref(), &opts.overrides)?;

    // Configuration errors must not touch an existing destination, so the
    // generator is prepared before the file is truncated. A failure mid-run
    // leaves the partial file in place.
    let generator = prepare_generator(&settings, now)?;
    let mut sink = CsvTickWriter::create(&settings.out)?;
    let mut rng = build_rng(settings.seed);
    let summary = run_generate(&settings, &generator, &mut rng, &mut sink)?;
    drop(sink);

    let quality = if opts.verify {
        Some(verify_ticks(&CsvTickReader::new(), &settings)?)
    } else {
        None
    };

    Ok(RunReport {
        settings,
        summary,
        quality,
    })
}
