pub mod symbol;
pub mod tick;
