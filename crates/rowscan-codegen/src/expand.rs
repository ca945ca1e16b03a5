mod record_mut;
mod shape;
mod util;

use crate::schema::Record;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The record being expanded
    record: &'a Record,

    /// Path prefix for rowscan types
    rowscan: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let reflect_impl = self.expand_reflect_impl();
        let record_mut_impl = self.expand_record_mut_impl();

        wrap_in_const(quote! {
            #reflect_impl
            #record_mut_impl
        })
    }
}

pub(super) fn record(record: &Record) -> TokenStream {
    Expand {
        record,
        rowscan: quote!(_rowscan::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use rowscan as _rowscan;
            #code
        };
    }
}
