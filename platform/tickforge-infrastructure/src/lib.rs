pub mod tick_csv;
