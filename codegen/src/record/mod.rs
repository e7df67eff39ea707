mod generator;
mod model;
mod parser;

use proc_macro2::TokenStream;
use quote::quote;

use crate::record::generator::Generator;
use crate::record::parser::Parser;

pub fn expand(input: TokenStream) -> syn::Result<TokenStream> {
    let model = Parser::parse_record(input)?;
    let generator = Generator { model };

    let field_impl = generator.gen_field_impl();
    let record_impl = generator.gen_record_impl();

    Ok(quote! {
        #field_impl
        #record_impl
    })
}
