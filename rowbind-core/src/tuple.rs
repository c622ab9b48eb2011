use crate::{Context, Entity, Error, Result, Row, Scan};

/// Independent destinations receiving the first columns of a row, by position.
///
/// Implemented for tuples of 1 to 12 mutable references to scalar entities.
pub trait ScanTuple: Send {
    /// Number of destinations, the row must have at least as many columns.
    const LEN: usize;

    fn scan_row(&mut self, row: Row) -> Result<()>;
}

macro_rules! impl_scan_tuple {
    ($len:literal; $($name:ident $index:tt),+) => {
        impl<'a, $($name: Entity),+> ScanTuple for ($(&'a mut $name,)+) {
            const LEN: usize = $len;

            fn scan_row(&mut self, row: Row) -> Result<()> {
                if row.len() < Self::LEN {
                    return Err(Error::msg(format!(
                        "The row has {} columns, {} destinations to fill",
                        row.len(),
                        Self::LEN,
                    )));
                }
                let mut values = row.into_iter();
                $(
                    if let Some(value) = values.next() {
                        Entity::target(&mut *self.$index, &[])?
                            .scan(value)
                            .with_context(|| format!(
                                "Could not scan column {} into {}",
                                $index,
                                <$name as Entity>::descriptor().name,
                            ))?;
                    }
                )+
                Ok(())
            }
        }
    };
}

impl_scan_tuple!(1; A 0);
impl_scan_tuple!(2; A 0, B 1);
impl_scan_tuple!(3; A 0, B 1, C 2);
impl_scan_tuple!(4; A 0, B 1, C 2, D 3);
impl_scan_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_scan_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_scan_tuple!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_scan_tuple!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_scan_tuple!(9; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_scan_tuple!(10; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_scan_tuple!(11; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_scan_tuple!(12; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);
