use super::{ErrorSet, Field, RecordAttr};

#[derive(Debug)]
pub(crate) struct Record {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Mapped fields, skipped ones excluded
    pub(crate) fields: Vec<Field>,

    /// Struct-level options
    pub(crate) attr: RecordAttr,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Record> {
        let mut errs = ErrorSet::new();

        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "record fields must be named",
            ));
        };

        // Generics are not supported yet
        if !ast.generics.params.is_empty() {
            errs.push(syn::Error::new_spanned(
                &ast.generics,
                "record types must not have generic parameters",
            ));
        }

        let mut attr = RecordAttr::default();
        errs.check(attr.populate_from_ast(&ast.attrs));

        let mut fields = vec![];
        for field in &node.named {
            if let Some(Some(field)) = errs.check(Field::from_ast(field, fields.len())) {
                fields.push(field);
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Record {
            ident: ast.ident.clone(),
            fields,
            attr,
        })
    }
}
