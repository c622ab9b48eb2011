use quote::ToTokens;
use rowbind_core::{EmbeddedType, decode_embedded};
use syn::{Field, Ident, LitStr, ext::IdentExt, parse::ParseBuffer};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    /// Declared name, raw identifier prefix removed.
    pub(crate) name: String,
    /// Value of `#[rowbind(name = "...")]`.
    pub(crate) tag: Option<String>,
    pub(crate) embedded: Option<EmbeddedType>,
}

pub(crate) fn decode_field(field: &Field) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Field is expected to have a name");
    let mut metadata = FieldMetadata {
        name: ident.unraw().to_string(),
        ident,
        tag: None,
        embedded: None,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("rowbind") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!(
                "Error while parsing `rowbind`, use it like: `#[rowbind(attribute = value, ...)]`"
            );
        };
        let result = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!(
                        "Error while parsing `name`, use it like: `#[rowbind(name = \"my_column\")]`"
                    );
                };
                metadata.tag = Some(v.value());
            } else if arg.path.is_ident("embed") {
                let Err(..) = arg.value() else {
                    // value() is Err for Meta::Path
                    panic!("Error while parsing `embed`, use it like: `#[rowbind(embed)]`");
                };
                metadata.embedded = Some(decode_embedded(&field.ty));
            } else {
                panic!(
                    "Unknown attribute `{}` inside rowbind macro",
                    arg.path.to_token_stream()
                );
            }
            Ok(())
        });
        if let Err(e) = result {
            panic!("Error while parsing `rowbind`: {e}");
        }
    }
    metadata
}
