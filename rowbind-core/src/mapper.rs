use crate::{
    Binder, Context, Cursor, CursorGuard, Destination, Entity, Executor, MapError, Result, ScanTuple,
    Shape, Value, destination::shape_error, stream::Stream, truncate_long,
};
use async_stream::try_stream;
use std::future::Future;

/// Materializes query results into entities.
///
/// Implemented for every [`Executor`]: the cursor of each query is closed on
/// every exit path, errors included.
pub trait Mapper: Executor {
    /// Map the result into `destination`.
    ///
    /// A slice destination receives every row (none is an empty slice), a
    /// struct or scalar destination receives the first row and the query
    /// must return at least one, [`MapError::NoRows`] otherwise.
    fn map_one<D: Destination>(
        &mut self,
        sql: &str,
        args: &[Value],
        destination: &mut D,
    ) -> impl Future<Output = Result<()>> + Send {
        materialize(self, sql, args, destination)
    }

    /// Same as [`Mapper::map_one`], reads better with slice destinations.
    fn map_all<D: Destination>(
        &mut self,
        sql: &str,
        args: &[Value],
        destination: &mut D,
    ) -> impl Future<Output = Result<()>> + Send {
        materialize(self, sql, args, destination)
    }

    /// Scan the first columns of the first row into independent destinations.
    ///
    /// Columns are matched by position, extra columns and rows are ignored.
    fn map_one_variadic<T: ScanTuple>(
        &mut self,
        sql: &str,
        args: &[Value],
        mut destinations: T,
    ) -> impl Future<Output = Result<()>> + Send {
        async move {
            log::debug!("Mapping into {} destinations:\n{}", T::LEN, truncate_long!(sql));
            let mut cursor = open(self, sql, args).await?;
            let Some(row) = cursor.next().await? else {
                return Err(MapError::NoRows.into());
            };
            destinations.scan_row(row)?;
            cursor.close()
        }
    }

    /// Append each row to the slice `destination`, then call `callback` with
    /// the destination and the index of the row just appended.
    ///
    /// The destination is cleared when the first row arrives. A callback error
    /// stops the iteration and is returned as [`MapError::Callback`], the rows
    /// appended so far (the failing one included) stay in the destination.
    fn for_each_indexed<D, F>(
        &mut self,
        sql: &str,
        args: &[Value],
        destination: &mut D,
        mut callback: F,
    ) -> impl Future<Output = Result<()>> + Send
    where
        D: Destination,
        F: FnMut(&D, usize) -> Result<()> + Send,
    {
        async move {
            if !D::SHAPE.is_slice() {
                return Err(shape_error::<D>("a slice destination"));
            }
            log::debug!(
                "Iterating {}:\n{}",
                <D::Entity as Entity>::descriptor().name,
                truncate_long!(sql)
            );
            let mut cursor = open(self, sql, args).await?;
            let binder = Binder::<D::Entity>::new(&cursor.columns()?);
            let mut index = 0;
            while let Some(row) = cursor.next().await? {
                let entity = binder.decode(row)?;
                if index == 0 {
                    destination.clear()?;
                }
                destination.push(entity)?;
                callback(&*destination, index).map_err(MapError::Callback)?;
                index += 1;
            }
            cursor.close()
        }
    }

    /// Decode each row into a fresh `T::Entity` and pass it to `callback` by value.
    ///
    /// `T` must be the entity itself, slices and boxes are rejected before the
    /// query is issued.
    fn for_each_model<T, F>(
        &mut self,
        sql: &str,
        args: &[Value],
        mut callback: F,
    ) -> impl Future<Output = Result<()>> + Send
    where
        T: Destination,
        F: FnMut(T::Entity) -> Result<()> + Send,
    {
        async move {
            if T::SHAPE.is_slice() {
                return Err(shape_error::<T>("an entity type"));
            }
            if T::INDIRECTIONS > 0 {
                return Err(MapError::Shape(format!(
                    "Expected an entity type, found {} behind {} boxes",
                    <T::Entity as Entity>::descriptor().name,
                    T::INDIRECTIONS,
                ))
                .into());
            }
            log::debug!(
                "Iterating {}:\n{}",
                <T::Entity as Entity>::descriptor().name,
                truncate_long!(sql)
            );
            let mut cursor = open(self, sql, args).await?;
            let binder = Binder::<T::Entity>::new(&cursor.columns()?);
            while let Some(row) = cursor.next().await? {
                callback(binder.decode(row)?).map_err(MapError::Callback)?;
            }
            cursor.close()
        }
    }

    /// Lazily decode each row into `E`.
    ///
    /// The cursor is closed when the stream is exhausted, fails or gets dropped.
    fn map_stream<'s, E: Entity>(
        &'s mut self,
        sql: &'s str,
        args: &'s [Value],
    ) -> impl Stream<Item = Result<E>> + Send + 's {
        try_stream! {
            log::debug!("Streaming {}:\n{}", E::descriptor().name, truncate_long!(sql));
            let mut cursor = open(self, sql, args).await?;
            let binder = Binder::<E>::new(&cursor.columns()?);
            while let Some(row) = cursor.next().await? {
                yield binder.decode(row)?;
            }
            cursor.close()?;
        }
    }
}

impl<X: Executor> Mapper for X {}

async fn open<X: Executor>(
    executor: &mut X,
    sql: &str,
    args: &[Value],
) -> Result<CursorGuard<X::Cursor>> {
    let cursor = executor
        .query(sql, args)
        .await
        .with_context(|| format!("While running the query:\n{}", truncate_long!(sql)))?;
    Ok(CursorGuard::new(cursor))
}

async fn materialize<X: Executor, D: Destination>(
    executor: &mut X,
    sql: &str,
    args: &[Value],
    destination: &mut D,
) -> Result<()> {
    log::debug!(
        "Mapping into {:?} of {}:\n{}",
        D::SHAPE,
        <D::Entity as Entity>::descriptor().name,
        truncate_long!(sql)
    );
    let mut cursor = open(executor, sql, args).await?;
    let binder = Binder::<D::Entity>::new(&cursor.columns()?);
    match D::SHAPE {
        Shape::Slice { .. } => {
            let mut entities = Vec::new();
            while let Some(row) = cursor.next().await? {
                entities.push(binder.decode(row)?);
            }
            cursor.close()?;
            destination.replace(entities)
        }
        Shape::Struct | Shape::Scalar => {
            let Some(row) = cursor.next().await? else {
                return Err(MapError::NoRows.into());
            };
            let entity = binder.decode(row)?;
            cursor.close()?;
            destination.assign(entity)
        }
    }
}
