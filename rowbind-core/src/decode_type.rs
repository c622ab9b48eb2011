use crate::matches_path;
use syn::{GenericArgument, PathArguments, Type, TypePath};

/// How an embedded field holds the embedded entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indirection {
    /// `X`
    Direct,
    /// `Box<X>`
    Boxed,
    /// `Option<X>`
    Optional,
    /// `Option<Box<X>>`
    OptionalBoxed,
}

impl Indirection {
    /// True when the storage must be allocated before a descendant is addressed.
    pub fn is_optional(&self) -> bool {
        matches!(self, Indirection::Optional | Indirection::OptionalBoxed)
    }
}

#[derive(Clone)]
pub struct EmbeddedType {
    /// The embedded entity type, all wrappers removed.
    pub inner: Type,
    pub indirection: Indirection,
}

fn single_generic<'a>(ty: &'a Type, expect: &[&str]) -> Option<&'a Type> {
    let Type::Path(TypePath { path, qself: None }) = ty else {
        return None;
    };
    if !matches_path(path, expect) {
        return None;
    }
    let PathArguments::AngleBracketed(bracketed) = &path.segments.last()?.arguments else {
        return None;
    };
    if bracketed.args.len() != 1 {
        return None;
    }
    match bracketed.args.first()? {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

/// Peel the `Option` and `Box` wrappers allowed around an embedded entity.
pub fn decode_embedded(ty: &Type) -> EmbeddedType {
    let (ty, optional) = match single_generic(ty, &["std", "option", "Option"]) {
        Some(inner) => (inner, true),
        None => (ty, false),
    };
    let (ty, boxed) = match single_generic(ty, &["std", "boxed", "Box"]) {
        Some(inner) => (inner, true),
        None => (ty, false),
    };
    let indirection = match (optional, boxed) {
        (false, false) => Indirection::Direct,
        (false, true) => Indirection::Boxed,
        (true, false) => Indirection::Optional,
        (true, true) => Indirection::OptionalBoxed,
    };
    EmbeddedType {
        inner: ty.clone(),
        indirection,
    }
}
