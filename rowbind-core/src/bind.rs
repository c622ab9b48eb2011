use crate::{Context, Entity, Result, Row, Scan, Target};
use std::{fmt::Write, marker::PhantomData};

/// Where the value of one result column goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The whole row instance, for scalar entities.
    Root,
    /// A leaf field reached through the path.
    Field(&'static [usize]),
    /// Dropped.
    Discard,
}

/// Binds the columns of one query result to the fields of `E`.
///
/// The bindings are computed once from the column names, then applied to every
/// row instance.
pub struct Binder<E: Entity> {
    columns: Box<[String]>,
    bindings: Box<[Binding]>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Binder<E> {
    pub fn new(columns: &[String]) -> Self {
        let descriptor = E::descriptor();
        let bindings: Box<[Binding]> = if descriptor.is_composite() {
            let paths = E::paths();
            columns
                .iter()
                .map(|column| match paths.get(column) {
                    Some(path) => Binding::Field(path),
                    None => Binding::Discard,
                })
                .collect()
        } else {
            (0..columns.len())
                .map(|i| if i == 0 { Binding::Root } else { Binding::Discard })
                .collect()
        };
        if log::log_enabled!(log::Level::Trace) {
            let mut out = String::new();
            for (column, binding) in columns.iter().zip(bindings.iter()) {
                let _ = write!(out, " {column}: {binding:?}");
            }
            log::trace!("Binding {} columns:{out}", descriptor.name);
        }
        Self {
            columns: columns.into(),
            bindings,
            _entity: PhantomData,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// The target of the column at `index`, allocating the optional embedded
    /// fields on its path.
    pub fn target<'a>(&self, instance: &'a mut E, index: usize) -> Result<Target<'a>> {
        match self.bindings.get(index).copied().unwrap_or(Binding::Discard) {
            Binding::Root => instance.target(&[]),
            Binding::Field(path) => instance.target(path),
            Binding::Discard => Ok(Target::Discard),
        }
    }

    /// Scan one row into the instance, column by column.
    pub fn scan(&self, instance: &mut E, row: Row) -> Result<()> {
        for (i, value) in row.into_iter().enumerate() {
            let mut target = self.target(instance, i)?;
            target.scan(value).with_context(|| {
                format!(
                    "Could not scan column `{}` into {}",
                    self.columns.get(i).map(String::as_str).unwrap_or("?"),
                    E::descriptor().name,
                )
            })?;
        }
        Ok(())
    }

    /// Decode a row into a fresh row instance.
    pub fn decode(&self, row: Row) -> Result<E> {
        let mut instance = E::create();
        self.scan(&mut instance, row)?;
        Ok(instance)
    }
}
