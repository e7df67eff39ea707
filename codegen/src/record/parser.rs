use proc_macro2::TokenStream;
use syn::ext::IdentExt as _;
use syn::spanned::Spanned as _;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr};

use crate::name_generator::RenameRule;
use crate::record::model::{ContainerOptions, FieldModel, FieldOptions, RecordModel};

pub struct Parser;

impl Parser {
    pub fn parse_record(input: TokenStream) -> syn::Result<RecordModel> {
        let input: DeriveInput = syn::parse2(input)?;
        let options = Self::parse_container_options(&input.attrs)?;

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
                _ => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "#[derive(Record)] only supports structs with named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "#[derive(Record)] only supports structs",
                ));
            }
        };

        let fields = fields
            .into_iter()
            .map(|field| {
                let ident = field
                    .ident
                    .clone()
                    .ok_or_else(|| syn::Error::new(field.span(), "Expected named field."))?;
                let field_options = Self::parse_field_options(&field.attrs)?;
                let name = ident.unraw().to_string();
                let column = match (field_options.rename, options.rename_all) {
                    (Some(rename), _) => rename,
                    (None, Some(rule)) => rule.apply(&name),
                    (None, None) => name,
                };

                Ok(FieldModel {
                    ident,
                    ty: field.ty.clone(),
                    column,
                    is_key: field_options.key,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        let table_name = options
            .table
            .unwrap_or_else(|| input.ident.unraw().to_string());

        let model = RecordModel {
            ident: input.ident,
            generics: input.generics,
            table_name,
            fields,
        };
        model.validate()?;

        Ok(model)
    }

    fn parse_container_options(attrs: &[Attribute]) -> syn::Result<ContainerOptions> {
        let mut options = ContainerOptions::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("table") {
                    let value: LitStr = meta.value()?.parse()?;
                    options.table = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("rename_all") {
                    let value: LitStr = meta.value()?.parse()?;
                    options.rename_all = Some(RenameRule::parse(&value.value(), value.span())?);
                    Ok(())
                } else {
                    Err(meta.error("Expected `table` or `rename_all`"))
                }
            })?;
        }

        Ok(options)
    }

    fn parse_field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
        let mut options = FieldOptions::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    options.rename = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("key") {
                    options.key = true;
                    Ok(())
                } else {
                    Err(meta.error("Expected `rename` or `key`"))
                }
            })?;
        }

        Ok(options)
    }
}
