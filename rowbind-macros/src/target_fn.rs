use crate::decode_field::FieldMetadata;
use proc_macro2::TokenStream;
use quote::quote;
use rowbind_core::Indirection;

/// Body of `Entity::target`: one match arm per field, keyed by the field index.
///
/// Leaf fields are probed for a native scan, embedded fields forward the rest
/// of the path to the embedded entity after making sure it is allocated.
pub(crate) fn target_fn(fields: &[FieldMetadata]) -> TokenStream {
    let arms = fields.iter().enumerate().map(|(i, field)| {
        let ident = &field.ident;
        let Some(embedded) = &field.embedded else {
            return quote! {
                [#i] => Ok(::rowbind::Probe(&mut self.#ident).target()),
            };
        };
        let inner = &embedded.inner;
        let storage = match embedded.indirection {
            Indirection::Direct => quote!(&mut self.#ident),
            Indirection::Boxed => quote!(&mut *self.#ident),
            Indirection::Optional => quote! {
                self.#ident
                    .get_or_insert_with(<#inner as ::rowbind::Entity>::create)
            },
            Indirection::OptionalBoxed => quote! {
                &mut **self.#ident.get_or_insert_with(|| {
                    ::std::boxed::Box::new(<#inner as ::rowbind::Entity>::create())
                })
            },
        };
        quote! {
            [#i, rest @ ..] => <#inner as ::rowbind::Entity>::target(#storage, rest),
        }
    });
    quote! {
        fn target(
            &mut self,
            path: &[usize],
        ) -> ::rowbind::Result<::rowbind::Target<'_>> {
            #[allow(unused_imports)]
            use ::rowbind::ProbeFallback as _;
            match path {
                #(#arms)*
                _ => Err(::rowbind::path_error(
                    <Self as ::rowbind::Entity>::descriptor(),
                    path,
                )),
            }
        }
    }
}
