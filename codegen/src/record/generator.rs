use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::record::model::RecordModel;

pub struct Generator {
    pub model: RecordModel,
}

impl Generator {
    /// Generates `Field` implementation. Paths are resolved by matching the
    /// first segment against column names and delegating the rest.
    pub fn gen_field_impl(&self) -> TokenStream {
        let ident = &self.model.ident;
        let (impl_generics, type_generics, where_clause) = self.model.generics.split_for_impl();
        let record_name = Literal::string(ident.to_string().as_str());

        let read_arms: Vec<_> = self
            .model
            .fields
            .iter()
            .map(|f| {
                let field = &f.ident;
                let column = Literal::string(f.column.as_str());
                quote! {
                    Some((&#column, rest)) => structsql::Field::read(&self.#field, rest),
                }
            })
            .collect();
        let write_arms: Vec<_> = self
            .model
            .fields
            .iter()
            .map(|f| {
                let field = &f.ident;
                let column = Literal::string(f.column.as_str());
                quote! {
                    Some((&#column, rest)) => structsql::Field::write(&mut self.#field, rest, value),
                }
            })
            .collect();

        quote! {
            impl #impl_generics structsql::Field for #ident #type_generics #where_clause {
                fn type_descriptor() -> structsql::TypeDescriptor {
                    structsql::TypeDescriptor::Record(
                        <Self as structsql::Record>::descriptor()
                    )
                }

                fn read(&self, path: &[&str]) -> ::core::result::Result<structsql::Value, structsql::AccessError> {
                    match path.split_first() {
                        #(#read_arms)*
                        Some((field, _)) => ::core::result::Result::Err(
                            structsql::AccessError::NoSuchField {
                                record: #record_name,
                                field: ::std::string::ToString::to_string(field),
                            }
                        ),
                        None => ::core::result::Result::Err(
                            structsql::AccessError::NotScalar { record: #record_name }
                        ),
                    }
                }

                fn write(
                    &mut self,
                    path: &[&str],
                    value: structsql::Value,
                ) -> ::core::result::Result<(), structsql::AccessError> {
                    match path.split_first() {
                        #(#write_arms)*
                        Some((field, _)) => ::core::result::Result::Err(
                            structsql::AccessError::NoSuchField {
                                record: #record_name,
                                field: ::std::string::ToString::to_string(field),
                            }
                        ),
                        None => ::core::result::Result::Err(
                            structsql::AccessError::NotScalar { record: #record_name }
                        ),
                    }
                }
            }
        }
    }

    /// Generates `Record` implementation with the record's descriptor.
    pub fn gen_record_impl(&self) -> TokenStream {
        let ident = &self.model.ident;
        let (impl_generics, type_generics, where_clause) = self.model.generics.split_for_impl();
        let table_name = Literal::string(self.model.table_name.as_str());

        let key = match self.model.key() {
            Some(key) => {
                let column = Literal::string(key.column.as_str());
                quote! { ::core::option::Option::Some(#column) }
            }
            None => quote! { ::core::option::Option::None },
        };

        let fields: Vec<_> = self
            .model
            .fields
            .iter()
            .map(|f| {
                let ty = &f.ty;
                let column = Literal::string(f.column.as_str());
                quote! {
                    structsql::FieldDescriptor {
                        name: #column,
                        ty: <#ty as structsql::Field>::type_descriptor(),
                    },
                }
            })
            .collect();

        quote! {
            impl #impl_generics structsql::Record for #ident #type_generics #where_clause {
                fn descriptor() -> structsql::RecordDescriptor {
                    structsql::RecordDescriptor {
                        name: #table_name,
                        type_name: ::core::any::type_name::<Self>(),
                        key: #key,
                        fields: || ::std::vec![#(#fields)*],
                    }
                }
            }
        }
    }
}
