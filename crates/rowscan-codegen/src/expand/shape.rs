use super::{util, Expand};
use crate::schema::Field;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_reflect_impl(&self) -> TokenStream {
        let rowscan = &self.rowscan;
        let record_ident = &self.record.ident;
        let shape = self.expand_shape();
        let self_mapping = self.expand_self_mapping();

        quote! {
            impl #rowscan::Reflect for #record_ident {
                #shape

                fn reflect_mut(&mut self) -> #rowscan::ReflectMut<'_> {
                    #rowscan::ReflectMut::Record(self)
                }

                #self_mapping
            }
        }
    }

    fn expand_shape(&self) -> TokenStream {
        let rowscan = &self.rowscan;
        let fields = self.record.fields.iter().map(|field| self.expand_field_shape(field));
        let capabilities = &self.record.attr.capabilities;

        quote! {
            fn shape() -> #rowscan::Shape {
                #[allow(unused_imports)]
                use #rowscan::{FieldShape, Reflect, Shape};

                Shape::record::<Self>(
                    vec![ #( #fields, )* ],
                    &[ #( #capabilities ),* ],
                )
            }
        }
    }

    fn expand_field_shape(&self, field: &Field) -> TokenStream {
        let index = util::int(field.index);
        let ident = field.ident.to_string();
        let ty = &field.ty;
        let embedded = field.column.flatten;
        let tags = field.column.tags.iter().map(|(key, value)| {
            let key = key.to_string();
            quote!((#key, #value))
        });

        quote! {
            FieldShape {
                index: #index,
                ident: #ident,
                tags: &[ #( #tags ),* ],
                embedded: #embedded,
                shape: <#ty as Reflect>::shape,
            }
        }
    }

    fn expand_self_mapping(&self) -> TokenStream {
        if !self.record.attr.self_mapping {
            return quote!();
        }

        let rowscan = &self.rowscan;

        quote! {
            fn self_mapping(
                cx: &#rowscan::Context,
                columns: &[#rowscan::String],
            ) -> #rowscan::Option<#rowscan::Phases<Self>> {
                #rowscan::Option::Some(<Self as #rowscan::SelfMapping>::map_values(cx, columns))
            }
        }
    }
}
