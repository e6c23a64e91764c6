//! Closed, enum-keyed field maps

use crate::item::FrameItem;
use std::fmt;
use std::marker::PhantomData;

/// A closed set of named fields belonging to one layer
pub trait Field: Copy + Eq + fmt::Debug + 'static {
    /// Every field, in serialization and display order
    const ALL: &'static [Self];

    /// Name used in diagnostics and dumps
    fn label(self) -> &'static str;

    /// Position in `ALL`
    fn index(self) -> usize;
}

/// One [`FrameItem`] per field of `F`, fixed at construction
#[derive(Clone, PartialEq, Eq)]
pub struct FieldMap<F: Field> {
    items: Vec<FrameItem>,
    _fields: PhantomData<F>,
}

impl<F: Field> FieldMap<F> {
    /// Every field starts invalid and empty
    pub fn new() -> Self {
        Self {
            items: F::ALL.iter().map(|_| FrameItem::new()).collect(),
            _fields: PhantomData,
        }
    }

    pub fn get(&self, field: F) -> &FrameItem {
        &self.items[field.index()]
    }

    pub fn get_mut(&mut self, field: F) -> &mut FrameItem {
        &mut self.items[field.index()]
    }

    pub fn is_valid(&self, field: F) -> bool {
        self.get(field).is_valid()
    }

    pub fn bytes(&self, field: F) -> &[u8] {
        self.get(field).bytes()
    }

    /// Required fields that are not valid, in the order given
    pub fn missing(&self, required: &[F]) -> Vec<F> {
        required
            .iter()
            .copied()
            .filter(|field| !self.is_valid(*field))
            .collect()
    }

    /// Iterate over `(field, item)` in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (F, &FrameItem)> {
        F::ALL.iter().copied().zip(self.items.iter())
    }
}

impl<F: Field> Default for FieldMap<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> fmt::Debug for FieldMap<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(field, item)| (field.label(), item)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Sample {
        A,
        B,
    }

    impl Field for Sample {
        const ALL: &'static [Self] = &[Sample::A, Sample::B];

        fn label(self) -> &'static str {
            match self {
                Sample::A => "A",
                Sample::B => "B",
            }
        }

        fn index(self) -> usize {
            self as usize
        }
    }

    #[test]
    fn test_fields_start_invalid() {
        let map: FieldMap<Sample> = FieldMap::new();
        assert!(!map.is_valid(Sample::A));
        assert!(!map.is_valid(Sample::B));
        assert_eq!(map.missing(Sample::ALL), vec![Sample::A, Sample::B]);
    }

    #[test]
    fn test_missing_reports_only_invalid() {
        let mut map: FieldMap<Sample> = FieldMap::new();
        map.get_mut(Sample::B).append(&[0x01]);
        assert_eq!(map.missing(Sample::ALL), vec![Sample::A]);
        assert_eq!(map.bytes(Sample::B), &[0x01]);
    }
}
