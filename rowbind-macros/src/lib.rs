mod decode_field;
mod target_fn;

use decode_field::decode_field;
use proc_macro::TokenStream;
use quote::quote;
use rowbind_core::quote_option;
use syn::{Fields, ItemStruct, parse_macro_input};
use target_fn::target_fn;

/// Derive `Entity`, `Destination` and `Element` (for the struct and its `Box`).
///
/// Field attributes:
/// - `#[rowbind(name = "column,options")]`: column name, only the part before the first comma is used
/// - `#[rowbind(embed)]`: the fields of the embedded entity are promoted, its type can be `X`,
///   `Box<X>`, `Option<X>` or `Option<Box<X>>`
///
/// The struct must implement `Default`, the row instances are created from it.
#[proc_macro_derive(Entity, attributes(rowbind))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let name = &item.ident;
    if !item.generics.params.is_empty() {
        panic!("Entity `{name}` cannot be generic");
    }
    let Fields::Named(..) = &item.fields else {
        panic!("Entity `{name}` must have named fields, like: `struct {name} {{ id: i64 }}`");
    };
    let fields: Vec<_> = item.fields.iter().map(decode_field).collect();
    let field_defs = fields.iter().map(|f| {
        let field_name = &f.name;
        let tag = quote_option(&f.tag);
        let embedded = quote_option(&f.embedded.as_ref().map(|v| {
            let inner = &v.inner;
            quote!(<#inner as ::rowbind::Entity>::descriptor as fn() -> &'static ::rowbind::EntityDescriptor)
        }));
        quote! {
            ::rowbind::FieldDef {
                name: #field_name,
                tag: #tag,
                embedded: #embedded,
            }
        }
    });
    let entity_name = name.to_string();
    let target = target_fn(&fields);
    quote! {
        impl ::rowbind::Entity for #name {
            fn descriptor() -> &'static ::rowbind::EntityDescriptor {
                static DESCRIPTOR: ::rowbind::EntityDescriptor =
                    ::rowbind::EntityDescriptor::composite(#entity_name, &[#(#field_defs),*]);
                &DESCRIPTOR
            }

            fn paths() -> &'static ::rowbind::PathMap {
                static PATHS: ::std::sync::LazyLock<::rowbind::PathMap> =
                    ::std::sync::LazyLock::new(|| {
                        ::rowbind::resolve(<#name as ::rowbind::Entity>::descriptor())
                    });
                &PATHS
            }

            fn create() -> Self {
                ::std::default::Default::default()
            }

            #target
        }

        impl ::rowbind::Destination for #name {
            type Entity = Self;
            const SHAPE: ::rowbind::Shape = ::rowbind::Shape::Struct;
            fn assign(&mut self, entity: Self) -> ::rowbind::Result<()> {
                *self = entity;
                Ok(())
            }
        }

        impl ::rowbind::Element for #name {
            type Entity = Self;
            const POINTER: bool = false;
            fn from_entity(entity: Self) -> Self {
                entity
            }
        }

        impl ::rowbind::Element for ::std::boxed::Box<#name> {
            type Entity = #name;
            const POINTER: bool = true;
            fn from_entity(entity: #name) -> Self {
                ::std::boxed::Box::new(entity)
            }
        }
    }
    .into()
}
