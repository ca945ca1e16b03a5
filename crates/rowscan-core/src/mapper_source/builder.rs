use super::{MapperSource, NameMapper};
use crate::{bail, Result};

use heck::ToSnakeCase;
use std::sync::{Arc, RwLock};

pub struct Builder {
    tag_key: String,
    separator: String,
    name_mapper: NameMapper,
    scannable: Vec<String>,
    max_depth: usize,
}

impl Builder {
    /// Tag key whose values name columns. Defaults to `"db"`.
    pub fn tag_key(&mut self, key: &str) -> &mut Self {
        self.tag_key = key.to_string();
        self
    }

    /// Separator placed between nested record names. Defaults to `"."`.
    pub fn separator(&mut self, separator: &str) -> &mut Self {
        self.separator = separator.to_string();
        self
    }

    /// Maps untagged field identifiers to column names. Defaults to snake case.
    pub fn name_mapper(&mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> &mut Self {
        self.name_mapper = Arc::new(f);
        self
    }

    /// Replaces the capability markers of records that are scanned whole.
    pub fn scannable<I, S>(&mut self, markers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scannable = markers.into_iter().map(Into::into).collect();
        self
    }

    /// How many times one record type may be entered along a single branch
    /// before the branch is cut. Defaults to 3.
    pub fn max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(&self) -> Result<MapperSource> {
        if self.tag_key.is_empty() {
            bail!("tag key must not be empty");
        }

        if let Some(index) = self.scannable.iter().position(String::is_empty) {
            bail!("scannable capability marker at position {index} is empty");
        }

        Ok(self.finish())
    }

    pub(super) fn finish(&self) -> MapperSource {
        MapperSource {
            tag_key: self.tag_key.clone(),
            separator: self.separator.clone(),
            name_mapper: self.name_mapper.clone(),
            scannable: self.scannable.clone(),
            max_depth: self.max_depth,
            cache: RwLock::default(),
        }
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder {
            tag_key: "db".to_string(),
            separator: ".".to_string(),
            name_mapper: Arc::new(|ident: &str| ident.to_snake_case()),
            scannable: vec!["scanner".to_string()],
            max_depth: 3,
        }
    }
}
