use std::collections::HashSet;

use proc_macro2::Ident;
use syn::{Generics, Type};

use crate::name_generator::RenameRule;

#[derive(Debug)]
pub struct RecordModel {
    pub ident: Ident,
    pub generics: Generics,
    pub table_name: String,
    pub fields: Vec<FieldModel>,
}

#[derive(Debug)]
pub struct FieldModel {
    pub ident: Ident,
    pub ty: Type,
    pub column: String,
    pub is_key: bool,
}

/// Options collected from `#[record(...)]` on the struct itself.
#[derive(Debug, Default)]
pub struct ContainerOptions {
    pub table: Option<String>,
    pub rename_all: Option<RenameRule>,
}

/// Options collected from `#[record(...)]` on a field.
#[derive(Debug, Default)]
pub struct FieldOptions {
    pub rename: Option<String>,
    pub key: bool,
}

impl RecordModel {
    pub fn key(&self) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.is_key)
    }

    pub fn validate(&self) -> syn::Result<()> {
        let mut keys = self.fields.iter().filter(|f| f.is_key);
        keys.next();
        if let Some(extra) = keys.next() {
            return Err(syn::Error::new(
                extra.ident.span(),
                "Only one key field allowed",
            ));
        }

        let mut columns = HashSet::new();
        for field in &self.fields {
            if !columns.insert(field.column.as_str()) {
                return Err(syn::Error::new(
                    field.ident.span(),
                    format!("Column `{}` is declared more than once", field.column),
                ));
            }
        }

        Ok(())
    }
}
