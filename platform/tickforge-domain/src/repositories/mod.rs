pub mod tick_reader;
pub mod tick_sink;
