use crate::{AsValue, Destination, Element, Error, PathMap, Result, Shape, Target, Value};
use rust_decimal::Decimal;
use std::fmt::{self, Debug, Formatter};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Structural description of an entity type.
///
/// `fields` is `None` for scalar shaped types (numbers, text, timestamps...),
/// those are bound as a single value and never decomposed into columns.
pub struct EntityDescriptor {
    pub name: &'static str,
    pub fields: Option<&'static [FieldDef]>,
}

impl EntityDescriptor {
    pub const fn scalar(name: &'static str) -> Self {
        Self { name, fields: None }
    }

    pub const fn composite(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self {
            name,
            fields: Some(fields),
        }
    }

    pub fn is_composite(&self) -> bool {
        self.fields.is_some()
    }

    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields.unwrap_or_default()
    }
}

impl Debug for EntityDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// One declared field, in declaration order.
pub struct FieldDef {
    /// Declared name of the field.
    pub name: &'static str,
    /// Raw external name tag, `column[,options]`.
    pub tag: Option<&'static str>,
    /// Descriptor of the embedded type, when the field is embedded.
    pub embedded: Option<fn() -> &'static EntityDescriptor>,
}

impl Debug for FieldDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("embedded", &self.embedded.map(|v| v().name))
            .finish()
    }
}

/// A type that a result row can be decoded into.
///
/// Derived for structs with `#[derive(Entity)]`, implemented here for the
/// scalar types.
pub trait Entity: Send + Sized + 'static {
    fn descriptor() -> &'static EntityDescriptor;

    /// Column name to field path map, computed once per process.
    fn paths() -> &'static PathMap;

    /// A zero valued instance, the row instance receiving the scanned columns.
    fn create() -> Self;

    /// Walk `path` from this instance down to a leaf field and bind it.
    ///
    /// Optional embedded fields met along the way are allocated before their
    /// descendants get addressed. Scalars accept only the empty path.
    fn target(&mut self, path: &[usize]) -> Result<Target<'_>>;
}

/// Resolve the column paths of `E` now instead of on first use.
pub fn register<E: Entity>() -> &'static PathMap {
    let paths = E::paths();
    log::debug!(
        "Registered entity {} with {} columns",
        E::descriptor().name,
        paths.len()
    );
    paths
}

pub fn path_error(descriptor: &EntityDescriptor, path: &[usize]) -> Error {
    Error::msg(format!(
        "Field path {path:?} does not address a column of {}",
        descriptor.name
    ))
}

macro_rules! impl_scalar_entity {
    ($($source:ty => $zero:expr),+ $(,)?) => {
        $(
            impl Entity for $source {
                fn descriptor() -> &'static EntityDescriptor {
                    static DESCRIPTOR: EntityDescriptor =
                        EntityDescriptor::scalar(stringify!($source));
                    &DESCRIPTOR
                }
                fn paths() -> &'static PathMap {
                    PathMap::empty()
                }
                fn create() -> Self {
                    $zero
                }
                fn target(&mut self, path: &[usize]) -> Result<Target<'_>> {
                    if !path.is_empty() {
                        return Err(path_error(Self::descriptor(), path));
                    }
                    Ok(Target::null_safe(self))
                }
            }
            impl Destination for $source {
                type Entity = Self;
                const SHAPE: Shape = Shape::Scalar;
                fn assign(&mut self, entity: Self) -> Result<()> {
                    *self = entity;
                    Ok(())
                }
            }
            impl Element for $source {
                type Entity = Self;
                const POINTER: bool = false;
                fn from_entity(entity: Self) -> Self {
                    entity
                }
            }
        )+
    };
}
impl_scalar_entity!(
    bool => false,
    i8 => 0,
    i16 => 0,
    i32 => 0,
    i64 => 0,
    i128 => 0,
    isize => 0,
    u8 => 0,
    u16 => 0,
    u32 => 0,
    u64 => 0,
    u128 => 0,
    usize => 0,
    f32 => 0.0,
    f64 => 0.0,
    String => String::new(),
    Box<[u8]> => Box::default(),
    Decimal => Decimal::ZERO,
    Uuid => Uuid::nil(),
    Date => OffsetDateTime::UNIX_EPOCH.date(),
    Time => Time::MIDNIGHT,
    PrimitiveDateTime => PrimitiveDateTime::new(OffsetDateTime::UNIX_EPOCH.date(), Time::MIDNIGHT),
    OffsetDateTime => OffsetDateTime::UNIX_EPOCH,
);

impl<T: AsValue + Send + 'static> Entity for Option<T> {
    fn descriptor() -> &'static EntityDescriptor {
        static DESCRIPTOR: EntityDescriptor = EntityDescriptor::scalar("Option");
        &DESCRIPTOR
    }
    fn paths() -> &'static PathMap {
        PathMap::empty()
    }
    fn create() -> Self {
        None
    }
    fn target(&mut self, path: &[usize]) -> Result<Target<'_>> {
        if !path.is_empty() {
            return Err(path_error(Self::descriptor(), path));
        }
        Ok(Target::native(self))
    }
}

impl<T: AsValue + Send + 'static> Destination for Option<T> {
    type Entity = Self;
    const SHAPE: Shape = Shape::Scalar;
    fn assign(&mut self, entity: Self) -> Result<()> {
        *self = entity;
        Ok(())
    }
}

impl<T: AsValue + Send + 'static> Element for Option<T> {
    type Entity = Self;
    const POINTER: bool = false;
    fn from_entity(entity: Self) -> Self {
        entity
    }
}

impl Entity for Value {
    fn descriptor() -> &'static EntityDescriptor {
        static DESCRIPTOR: EntityDescriptor = EntityDescriptor::scalar("Value");
        &DESCRIPTOR
    }
    fn paths() -> &'static PathMap {
        PathMap::empty()
    }
    fn create() -> Self {
        Value::Null
    }
    fn target(&mut self, path: &[usize]) -> Result<Target<'_>> {
        if !path.is_empty() {
            return Err(path_error(Self::descriptor(), path));
        }
        Ok(Target::native(self))
    }
}

impl Destination for Value {
    type Entity = Self;
    const SHAPE: Shape = Shape::Scalar;
    fn assign(&mut self, entity: Self) -> Result<()> {
        *self = entity;
        Ok(())
    }
}

impl Element for Value {
    type Entity = Self;
    const POINTER: bool = false;
    fn from_entity(entity: Self) -> Self {
        entity
    }
}
