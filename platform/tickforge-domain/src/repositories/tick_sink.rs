use crate::value_objects::tick::Tick;

/// Destination for generated ticks, written in emission order.
pub trait TickSink {
    fn write_tick(&mut self, tick: &Tick) -> Result<(), String>;

    fn finish(&mut self) -> Result<(), String> {
        Ok(())
    }
}

impl TickSink for Vec<Tick> {
    fn write_tick(&mut self, tick: &Tick) -> Result<(), String> {
        self.push(tick.clone());
        Ok(())
    }
}
