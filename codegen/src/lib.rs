mod name_generator;
mod record;

use proc_macro::TokenStream;

/// Implements `structsql::Field` and `structsql::Record` for a struct with
/// named fields.
///
/// Container attributes: `#[record(table = "...")]`,
/// `#[record(rename_all = "...")]`. Field attributes:
/// `#[record(rename = "...")]`, `#[record(key)]`.
#[proc_macro_derive(Record, attributes(record))]
pub fn record(input: TokenStream) -> TokenStream {
    record::expand(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
