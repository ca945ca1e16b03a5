/// Parsed `#[column(...)]` attribute.
#[derive(Debug, Default)]
pub(crate) struct Column {
    /// `key = "value"` pairs in declaration order. A bare string literal is
    /// shorthand for the `db` key.
    pub(crate) tags: Vec<(syn::Ident, syn::LitStr)>,

    /// `#[column(flatten)]`
    pub(crate) flatten: bool,

    /// `#[column(skip)]`
    pub(crate) skip: bool,
}

impl Column {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Column> {
        attr.parse_args()
    }

    fn push_tag(&mut self, key: syn::Ident, value: syn::LitStr) -> syn::Result<()> {
        if self.tags.iter().any(|(existing, _)| *existing == key) {
            return Err(syn::Error::new(key.span(), format!("duplicate `{key}` tag")));
        }

        self.tags.push((key, value));
        Ok(())
    }
}

impl syn::parse::Parse for Column {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut result = Column::default();

        // Allowed syntax:
        //
        // #[column("name")]
        // #[column(db = "name", json = "name")]
        // #[column(flatten)]
        // #[column(skip)]
        loop {
            let lookahead = input.lookahead1();

            if lookahead.peek(syn::LitStr) {
                let lit: syn::LitStr = input.parse()?;
                result.push_tag(syn::Ident::new("db", lit.span()), lit)?;
            } else if lookahead.peek(syn::Ident) {
                let ident: syn::Ident = input.parse()?;

                if input.peek(syn::Token![=]) {
                    let _eq_token: syn::Token![=] = input.parse()?;
                    let lit: syn::LitStr = input.parse()?;
                    result.push_tag(ident, lit)?;
                } else if ident == "flatten" {
                    result.flatten = true;
                } else if ident == "skip" {
                    result.skip = true;
                } else {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown column option `{ident}`"),
                    ));
                }
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            let _comma_token: syn::Token![,] = input.parse()?;
        }

        if result.skip && (result.flatten || !result.tags.is_empty()) {
            return Err(syn::Error::new(
                input.span(),
                "`skip` cannot be combined with other column options",
            ));
        }

        if let Some((_, lit)) = result.tags.iter().find(|(_, lit)| lit.value().is_empty()) {
            return Err(syn::Error::new(lit.span(), "column tag must not be empty"));
        }

        Ok(result)
    }
}
