use crate::services::quality::TickQualityReport;
use crate::value_objects::tick::Tick;
use std::path::Path;

pub trait TickReader {
    fn load_ticks(
        &self,
        path: &Path,
        volume_range: (u32, u32),
    ) -> Result<(Vec<Tick>, TickQualityReport), String>;
}
