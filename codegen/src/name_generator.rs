use convert_case::{Case, Casing};
use proc_macro2::Span;

/// Case conversion applied to column segments by `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameRule(Case);

impl RenameRule {
    pub fn parse(value: &str, span: Span) -> syn::Result<Self> {
        let case = match value {
            "snake_case" => Case::Snake,
            "SCREAMING_SNAKE_CASE" => Case::UpperSnake,
            "PascalCase" => Case::Pascal,
            "camelCase" => Case::Camel,
            "lowercase" => Case::Flat,
            "UPPERCASE" => Case::UpperFlat,
            _ => {
                return Err(syn::Error::new(
                    span,
                    format!("Unknown `rename_all` rule `{}`", value),
                ));
            }
        };
        Ok(Self(case))
    }

    pub fn apply(&self, field_name: &str) -> String {
        field_name.from_case(Case::Snake).to_case(self.0)
    }
}
