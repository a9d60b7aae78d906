use fuel_core::{FuelError, Result};
use std::ops::Deref;

/// A sequence that never holds more than `N` items.
///
/// Construction either rejects oversized input ([`Samples::try_from_vec`],
/// [`Samples::try_push`]) or cuts it down ([`Samples::truncating`]); there is
/// no way to end up with more than `N` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> Samples<T, N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append one item, failing once the buffer is full.
    pub fn try_push(&mut self, item: T) -> Result<()> {
        if self.items.len() >= N {
            return Err(FuelError::Capacity { len: self.items.len() + 1, capacity: N });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn try_from_vec(items: Vec<T>) -> Result<Self> {
        if items.len() > N {
            return Err(FuelError::Capacity { len: items.len(), capacity: N });
        }
        Ok(Self { items })
    }

    /// Keep the first `N` items and drop the rest.
    pub fn truncating(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().take(N).collect(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T, const N: usize> Default for Samples<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for Samples<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_stops_at_capacity() {
        let mut s: Samples<u8, 3> = Samples::new();
        for i in 0..3 {
            s.try_push(i).unwrap();
        }
        let err = s.try_push(9).unwrap_err();
        assert!(matches!(err, FuelError::Capacity { len: 4, capacity: 3 }));
        assert_eq!(s.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn oversized_vec_is_rejected() {
        assert!(Samples::<u8, 2>::try_from_vec(vec![1, 2, 3]).is_err());
        assert_eq!(Samples::<u8, 2>::try_from_vec(vec![1, 2]).unwrap().len(), 2);
    }

    #[test]
    fn truncating_keeps_the_head() {
        let s: Samples<u32, 5> = Samples::truncating(0..100);
        assert_eq!(s.len(), 5);
        assert_eq!(s.last(), Some(&4));
    }
}
