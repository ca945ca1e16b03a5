/// Per-call settings read while building a mapper's phases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    allow_unknown_columns: bool,
    tag_prefix: Option<String>,
}

impl Context {
    pub fn new() -> Context {
        Context::default()
    }

    /// Columns without a destination are discarded instead of failing the row.
    pub fn with_allow_unknown_columns(mut self, allow: bool) -> Context {
        self.allow_unknown_columns = allow;
        self
    }

    /// Only columns starting with `prefix` are mapped, with the prefix removed.
    /// A prefix set on the mapper itself takes precedence.
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Context {
        self.tag_prefix = Some(prefix.into());
        self
    }

    pub fn allow_unknown_columns(&self) -> bool {
        self.allow_unknown_columns
    }

    pub fn tag_prefix(&self) -> Option<&str> {
        self.tag_prefix.as_deref()
    }
}
