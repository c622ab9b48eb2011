use crate::{Entity, MapError, Result};

/// Shape of a destination, resolved at compile time from its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A single value bound from the first column.
    Scalar,
    /// A single entity, columns bound by name.
    Struct,
    /// A growable sequence of entities, `pointer` when the elements are boxed.
    Slice { pointer: bool },
}

impl Shape {
    pub fn is_slice(&self) -> bool {
        matches!(self, Shape::Slice { .. })
    }
}

/// Something a query result can be materialized into.
///
/// Single value destinations implement [`Destination::assign`], sequences
/// implement [`Destination::clear`], [`Destination::push`] and
/// [`Destination::replace`]. The defaults report a shape error.
pub trait Destination: Send {
    /// Entity decoded from each row.
    type Entity: Entity;

    const SHAPE: Shape;

    /// Number of `Box` layers crossed to reach the destination.
    const INDIRECTIONS: usize = 0;

    /// Overwrite a single value destination with the decoded row.
    fn assign(&mut self, entity: Self::Entity) -> Result<()> {
        let _ = entity;
        Err(shape_error::<Self>("a single value destination"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(shape_error::<Self>("a slice destination"))
    }

    fn push(&mut self, entity: Self::Entity) -> Result<()> {
        let _ = entity;
        Err(shape_error::<Self>("a slice destination"))
    }

    /// Swap the content of a sequence destination with all the decoded rows.
    fn replace(&mut self, entities: Vec<Self::Entity>) -> Result<()> {
        let _ = entities;
        Err(shape_error::<Self>("a slice destination"))
    }

    fn len(&self) -> usize {
        0
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn shape_error<D: Destination + ?Sized>(expected: &str) -> crate::Error {
    MapError::Shape(format!(
        "Expected {expected}, found {:?} of {}",
        D::SHAPE,
        <D::Entity as Entity>::descriptor().name,
    ))
    .into()
}

/// Element of a sequence destination: the entity itself or a boxed entity.
///
/// `#[derive(Entity)]` implements it for the struct and for its `Box`.
pub trait Element: Send + Sized {
    type Entity: Entity;

    /// True when the element is stored behind a pointer.
    const POINTER: bool;

    fn from_entity(entity: Self::Entity) -> Self;
}

impl<T: Element> Destination for Vec<T> {
    type Entity = T::Entity;
    const SHAPE: Shape = Shape::Slice {
        pointer: T::POINTER,
    };
    fn clear(&mut self) -> Result<()> {
        Vec::clear(self);
        Ok(())
    }
    fn push(&mut self, entity: Self::Entity) -> Result<()> {
        Vec::push(self, T::from_entity(entity));
        Ok(())
    }
    fn replace(&mut self, entities: Vec<Self::Entity>) -> Result<()> {
        *self = entities.into_iter().map(T::from_entity).collect();
        Ok(())
    }
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<D: Destination + ?Sized> Destination for Box<D> {
    type Entity = D::Entity;
    const SHAPE: Shape = D::SHAPE;
    const INDIRECTIONS: usize = D::INDIRECTIONS + 1;
    fn assign(&mut self, entity: Self::Entity) -> Result<()> {
        (**self).assign(entity)
    }
    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
    fn push(&mut self, entity: Self::Entity) -> Result<()> {
        (**self).push(entity)
    }
    fn replace(&mut self, entities: Vec<Self::Entity>) -> Result<()> {
        (**self).replace(entities)
    }
    fn len(&self) -> usize {
        (**self).len()
    }
}
