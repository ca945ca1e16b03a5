use crate::reflect::{LeafType, Shape, ShapeKind};
use crate::MapperSource;

use std::any::TypeId;
use std::collections::HashMap;

/// One column-bindable location inside a destination type.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Column name the leaf binds to, before any tag prefix is applied.
    pub name: String,

    /// Field indices leading from the destination root to the leaf.
    pub path: Vec<usize>,

    /// Access paths of every optional record along `path` that must be
    /// allocated before the leaf can be written through. Outermost first.
    pub init: Vec<Vec<usize>>,

    pub ty: LeafType,
}

impl Leaf {
    pub fn is_optional(&self) -> bool {
        self.ty.optional
    }
}

/// The ordered leaves of a destination type.
///
/// Computed once per type by [`MapperSource::descriptor`] and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub type_name: &'static str,
    pub leaves: Vec<Leaf>,
}

impl Descriptor {
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.leaves.iter().map(|leaf| leaf.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

/// Per-branch count of how often each record type was entered.
type Visited = HashMap<TypeId, usize>;

pub(crate) struct Walk<'a> {
    source: &'a MapperSource,
    leaves: Vec<Leaf>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(source: &'a MapperSource) -> Walk<'a> {
        Walk {
            source,
            leaves: vec![],
        }
    }

    pub(crate) fn run(mut self, shape: &Shape) -> Descriptor {
        self.visit(shape, "", &[], &[], Visited::new());
        Descriptor {
            type_name: shape.type_name,
            leaves: self.leaves,
        }
    }

    fn visit(
        &mut self,
        shape: &Shape,
        prefix: &str,
        path: &[usize],
        init: &[Vec<usize>],
        mut visited: Visited,
    ) {
        let (inner, optional) = shape.strip_optional();

        let ShapeKind::Record(record) = &inner.kind else {
            self.push_leaf(shape, prefix, path, init);
            return;
        };

        let count = visited.get(&record.type_id).copied().unwrap_or(0);
        if count > self.source.max_depth() {
            return;
        }
        visited.insert(record.type_id, count + 1);

        let scannable = record
            .capabilities
            .iter()
            .any(|capability| self.source.is_scannable(capability));

        if scannable {
            self.push_leaf(shape, prefix, path, init);
            return;
        }

        // The root is allocated by the binder itself.
        let child_init = if optional && !path.is_empty() {
            let mut child_init = init.to_vec();
            child_init.push(path.to_vec());
            child_init
        } else {
            init.to_vec()
        };

        let mut eligible = false;

        for field in &record.fields {
            let tag = field.tag(self.source.tag_key());
            if tag == Some("-") {
                continue;
            }

            eligible = true;

            let name = if field.embedded {
                prefix.to_string()
            } else {
                let segment = match tag {
                    Some(tag) if !tag.is_empty() => tag.to_string(),
                    _ => self.source.map_name(field.ident),
                };
                self.source.join(prefix, &segment)
            };

            let mut child_path = path.to_vec();
            child_path.push(field.index);

            let field_shape = (field.shape)();
            self.visit(&field_shape, &name, &child_path, &child_init, visited.clone());
        }

        // Records without eligible fields are scanned whole, if they can be.
        if !eligible && record.scans_itself() {
            self.push_leaf(shape, prefix, path, init);
        }
    }

    fn push_leaf(&mut self, shape: &Shape, prefix: &str, path: &[usize], init: &[Vec<usize>]) {
        self.leaves.push(Leaf {
            name: prefix.to_string(),
            path: path.to_vec(),
            init: init.to_vec(),
            ty: LeafType::of(shape),
        });
    }
}
