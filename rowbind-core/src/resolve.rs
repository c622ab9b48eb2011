use crate::{EntityDescriptor, FieldDef};
use std::collections::BTreeMap;

/// Field indexes leading from the entity root to one leaf field, its length is
/// the nesting depth of the leaf.
pub type FieldPath = Box<[usize]>;

/// Column name (case sensitive) to field path.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct PathMap(BTreeMap<String, FieldPath>);

impl PathMap {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The map of every scalar shaped entity.
    pub fn empty() -> &'static PathMap {
        static EMPTY: PathMap = PathMap::new();
        &EMPTY
    }

    pub fn get(&self, column: &str) -> Option<&[usize]> {
        self.0.get(column).map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Returns the path previously stored under the same column.
    pub fn insert(&mut self, column: String, path: FieldPath) -> Option<FieldPath> {
        self.0.insert(column, path)
    }
}

/// Column name of a field: the first comma separated segment of its tag, or the
/// declared name when the tag is absent or that segment is empty.
pub fn column_name(field: &FieldDef) -> &'static str {
    field
        .tag
        .and_then(|tag| tag.split(',').next())
        .filter(|name| !name.is_empty())
        .unwrap_or(field.name)
}

/// Derive the column to field path map of an entity.
///
/// Fields are visited depth first in declaration order. Embedded composite
/// fields are not columns themselves, their own fields are promoted with the
/// embedding field index prepended to the path. Embedded scalar shaped types
/// (timestamps for instance) are plain columns. When two fields resolve to the
/// same column the last one visited wins.
pub fn resolve(descriptor: &EntityDescriptor) -> PathMap {
    fn visit(descriptor: &EntityDescriptor, prefix: &mut Vec<usize>, result: &mut PathMap) {
        for (i, field) in descriptor.fields().iter().enumerate() {
            prefix.push(i);
            match field.embedded.map(|v| v()) {
                Some(embedded) if embedded.is_composite() => {
                    visit(embedded, prefix, result);
                }
                _ => {
                    let column = column_name(field);
                    if let Some(previous) = result.insert(column.into(), prefix.as_slice().into()) {
                        log::warn!(
                            "Column `{column}` of {} is declared more than once, field path {:?} replaces {:?}",
                            descriptor.name,
                            prefix,
                            previous,
                        );
                    }
                }
            }
            prefix.pop();
        }
    }
    let mut result = PathMap::new();
    visit(descriptor, &mut Vec::new(), &mut result);
    result
}
