use super::{util, Expand};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_record_mut_impl(&self) -> TokenStream {
        let rowscan = &self.rowscan;
        let record_ident = &self.record.ident;
        let type_name = record_ident.to_string();
        let as_scan = self.expand_as_scan();

        let arms = self.record.fields.iter().map(|field| {
            let index = util::int(field.index);
            let ident = &field.ident;
            quote! {
                #index => #rowscan::Option::Some(&mut self.#ident as &mut dyn #rowscan::Reflect),
            }
        });

        quote! {
            impl #rowscan::RecordMut for #record_ident {
                fn type_name(&self) -> &'static str {
                    #type_name
                }

                fn field_mut(&mut self, index: usize) -> #rowscan::Option<&mut dyn #rowscan::Reflect> {
                    match index {
                        #( #arms )*
                        _ => #rowscan::Option::None,
                    }
                }

                #as_scan
            }
        }
    }

    fn expand_as_scan(&self) -> TokenStream {
        // A record declaring any capability is written from a single column.
        if self.record.attr.capabilities.is_empty() {
            return quote!();
        }

        let rowscan = &self.rowscan;

        quote! {
            fn as_scan(&mut self) -> #rowscan::Option<&mut dyn #rowscan::Scan> {
                #rowscan::Option::Some(self as &mut dyn #rowscan::Scan)
            }
        }
    }
}
