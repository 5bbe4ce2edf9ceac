/// A queued piece. Its id is the only thing it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
}

/// Hands out item ids. Every id must be larger than the last one; `None`
/// means the source has run out.
pub trait IdSource {
    fn next_id(&mut self) -> Option<u64>;
}

impl<F> IdSource for F
where
    F: FnMut() -> Option<u64>,
{
    fn next_id(&mut self) -> Option<u64> {
        self()
    }
}

/// Counter based id source, starts at 1 unless told otherwise.
/// Hands out `u64::MAX` last, then nothing.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: Option<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: Some(first) }
    }

    /// The id the next call to `next_id` will return, without consuming it.
    pub fn peek(&self) -> Option<u64> {
        self.next
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> Option<u64> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

/// Create a fresh item, consuming one id from `ids`.
pub fn generate_item(ids: &mut impl IdSource) -> Option<Item> {
    ids.next_id().map(|id| Item { id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_start_at_one() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.peek(), Some(1));
        assert_eq!(generate_item(&mut ids), Some(Item { id: 1 }));
        assert_eq!(generate_item(&mut ids), Some(Item { id: 2 }));
        assert_eq!(ids.peek(), Some(3));
        assert_eq!(ids.peek(), Some(3));
        assert_eq!(ids.next_id(), Some(3));
    }

    #[test]
    fn test_starting_at() {
        let mut ids = SequentialIds::starting_at(40);
        let a = generate_item(&mut ids).unwrap();
        let b = generate_item(&mut ids).unwrap();
        assert_eq!(a.id, 40);
        assert!(b.id > a.id);
    }

    #[test]
    fn test_exhausted_at_max() {
        let mut ids = SequentialIds::starting_at(u64::MAX - 1);
        assert_eq!(ids.next_id(), Some(u64::MAX - 1));
        assert_eq!(ids.next_id(), Some(u64::MAX));
        assert_eq!(ids.peek(), None);
        assert_eq!(ids.next_id(), None);
        assert_eq!(generate_item(&mut ids), None);
    }

    #[test]
    fn test_closure_source() {
        let mut n: u64 = 0;
        let mut by_tens = || {
            n += 10;
            Some(n)
        };
        assert_eq!(generate_item(&mut by_tens).map(|item| item.id), Some(10));
        assert_eq!(generate_item(&mut by_tens).map(|item| item.id), Some(20));
    }
}
