use crate::{AsValue, Result, Value};

/// Receives the value of one column, NULL included.
///
/// Types implementing it handle NULL on their own (`Option<T>` becomes `None`,
/// `Value` keeps it). Every other destination is reached through [`NullSafe`].
pub trait Scan {
    fn scan(&mut self, value: Value) -> Result<()>;
}

impl<T: AsValue> Scan for Option<T> {
    fn scan(&mut self, value: Value) -> Result<()> {
        *self = if value.is_null() {
            None
        } else {
            Some(T::try_from_value(value)?)
        };
        Ok(())
    }
}

impl Scan for Value {
    fn scan(&mut self, value: Value) -> Result<()> {
        *self = value;
        Ok(())
    }
}

/// Stores a concrete (non NULL) value into the destination.
pub trait Assign {
    fn assign(&mut self, value: Value) -> Result<()>;
}

impl<T: AsValue> Assign for T {
    fn assign(&mut self, value: Value) -> Result<()> {
        *self = T::try_from_value(value)?;
        Ok(())
    }
}

/// Scan adapter that tolerates NULL.
///
/// A NULL leaves the wrapped destination untouched (at its zero value for a
/// freshly created row instance) and succeeds, any other value goes through the
/// destination's [`Assign`] conversion.
pub struct NullSafe<'a, D: ?Sized>(&'a mut D);

impl<'a, D: Assign + ?Sized> NullSafe<'a, D> {
    pub fn new(destination: &'a mut D) -> Self {
        Self(destination)
    }
}

impl<D: Assign + ?Sized> Scan for NullSafe<'_, D> {
    fn scan(&mut self, value: Value) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }
        self.0.assign(value)
    }
}

/// Sink for columns that have no corresponding field.
#[derive(Default, Debug, Clone, Copy)]
pub struct Discard;

impl Assign for Discard {
    fn assign(&mut self, _value: Value) -> Result<()> {
        Ok(())
    }
}

/// The bound destination of one result column.
pub enum Target<'a> {
    /// The destination implements [`Scan`] itself.
    Native(&'a mut dyn Scan),
    /// The destination is wrapped in the NULL tolerant adapter.
    NullSafe(NullSafe<'a, dyn Assign + 'a>),
    /// The column is dropped.
    Discard,
}

impl<'a> Target<'a> {
    pub fn native<T: Scan>(destination: &'a mut T) -> Self {
        Target::Native(destination)
    }

    pub fn null_safe<T: Assign>(destination: &'a mut T) -> Self {
        let destination: &'a mut (dyn Assign + 'a) = destination;
        Target::NullSafe(NullSafe::new(destination))
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Target::Discard)
    }
}

impl Scan for Target<'_> {
    fn scan(&mut self, value: Value) -> Result<()> {
        match self {
            Target::Native(destination) => destination.scan(value),
            Target::NullSafe(destination) => destination.scan(value),
            Target::Discard => NullSafe::new(&mut Discard).scan(value),
        }
    }
}

/// Chooses how a field gets bound, used by the generated code of `#[derive(Entity)]`.
///
/// The inherent `target` applies when the field implements [`Scan`], otherwise
/// method resolution falls back to [`ProbeFallback::target`] which wraps the
/// field in [`NullSafe`].
pub struct Probe<'a, T>(pub &'a mut T);

impl<'a, T: Scan> Probe<'a, T> {
    pub fn target(self) -> Target<'a> {
        Target::native(self.0)
    }
}

pub trait ProbeFallback<'a> {
    fn target(self) -> Target<'a>;
}

impl<'a, T: AsValue> ProbeFallback<'a> for Probe<'a, T> {
    fn target(self) -> Target<'a> {
        Target::null_safe(self.0)
    }
}
