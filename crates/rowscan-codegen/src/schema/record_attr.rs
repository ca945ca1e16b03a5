use syn::spanned::Spanned;

use super::ErrorSet;

/// Parsed `#[record(...)]` attributes on the struct.
#[derive(Debug, Default)]
pub(crate) struct RecordAttr {
    /// The record scans itself from one column.
    pub(crate) scan: bool,

    /// The record supplies its own phases through `SelfMapping`.
    pub(crate) self_mapping: bool,

    /// Capability markers, in declaration order. Non-empty means the record
    /// implements `Scan`.
    pub(crate) capabilities: Vec<syn::LitStr>,
}

impl RecordAttr {
    pub(super) fn populate_from_ast(&mut self, attrs: &[syn::Attribute]) -> syn::Result<()> {
        let mut errs = ErrorSet::new();

        for attr in attrs {
            if !attr.path().is_ident("record") {
                continue;
            }

            let res = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("scan") {
                    if self.scan {
                        return Err(meta.error("duplicate `scan` option"));
                    }
                    self.scan = true;
                    // Scanned records are recognized by the default marker.
                    self.push_capability(syn::LitStr::new("scanner", meta.path.span()));
                } else if meta.path.is_ident("self_mapping") {
                    if self.self_mapping {
                        return Err(meta.error("duplicate `self_mapping` option"));
                    }
                    self.self_mapping = true;
                } else if meta.path.is_ident("capability") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "capability must not be empty"));
                    }
                    self.push_capability(lit);
                } else {
                    return Err(meta.error("expected `scan`, `self_mapping` or `capability = \"...\"`"));
                }
                Ok(())
            });

            if let Err(err) = res {
                errs.push(err);
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(())
    }

    fn push_capability(&mut self, lit: syn::LitStr) {
        if !self.capabilities.iter().any(|c| c.value() == lit.value()) {
            self.capabilities.push(lit);
        }
    }
}
