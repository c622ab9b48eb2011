use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use std::cmp::min;
use syn::Path;

pub fn quote_option<T: ToTokens>(value: &Option<T>) -> TokenStream {
    match value {
        None => quote! { None },
        Some(v) => quote! { Some(#v) },
    }
}

/// True if the last segments of `path` are `expect`, so that `Option`,
/// `std::option::Option` and `::std::option::Option` all match `["std", "option", "Option"]`.
pub fn matches_path(path: &Path, expect: &[&str]) -> bool {
    let len = min(path.segments.len(), expect.len());
    path.segments
        .iter()
        .rev()
        .take(len)
        .map(|v| &v.ident)
        .eq(expect.iter().rev().take(len))
}

/// The longest prefix of `value` not exceeding `len` bytes that ends on a char boundary.
pub fn truncate_str(value: &str, len: usize) -> &str {
    let mut end = min(value.len(), len);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $crate::truncate_str($query, 497).trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}
