use crate::value_objects::symbol::Symbol;

pub const DEFAULT_SYMBOL_PREFIX: &str = "SYM";
pub const SYMBOL_INDEX_WIDTH: usize = 4;

pub fn format_symbol(prefix: &str, index: usize) -> Symbol {
    Symbol::new(format!("{prefix}{index:0width$}", width = SYMBOL_INDEX_WIDTH))
}

pub fn generate_symbols(count: usize) -> Vec<Symbol> {
    generate_symbols_with_prefix(DEFAULT_SYMBOL_PREFIX, count)
}

pub fn generate_symbols_with_prefix(prefix: &str, count: usize) -> Vec<Symbol> {
    (0..count).map(|index| format_symbol(prefix, index)).collect()
}
