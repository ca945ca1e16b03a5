use super::{Column, ErrorSet};

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Position among the record's mapped fields; what `field_mut` matches on.
    pub(crate) index: usize,

    /// Options from `#[column(...)]`
    pub(crate) column: Column,
}

impl Field {
    /// Returns `None` for fields marked `#[column(skip)]`.
    pub(super) fn from_ast(field: &syn::Field, index: usize) -> syn::Result<Option<Field>> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut column = None;

        for attr in &field.attrs {
            if attr.path().is_ident("column") {
                if column.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[column] attribute",
                    ));
                } else if let Some(parsed) = errs.check(Column::from_ast(attr)) {
                    column = Some(parsed);
                }
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        let column = column.unwrap_or_default();
        if column.skip {
            return Ok(None);
        }

        Ok(Some(Field {
            ident: ident.clone(),
            ty: field.ty.clone(),
            index,
            column,
        }))
    }
}
