//! First-match search over ordered collections.
//!
//! Resolution of references must be deterministic, so every lookup walks the
//! collection in order and stops at the first item the predicate accepts.

/// Returns the first item for which `predicate` holds.
pub fn find_first<'a, T, F>(items: &'a [T], mut predicate: F) -> Option<&'a T>
where
    F: FnMut(&T) -> bool,
{
    items.iter().find(|item| predicate(item))
}

/// Returns the index of the first item for which `predicate` holds.
pub fn find_first_index<T, F>(items: &[T], mut predicate: F) -> Option<usize>
where
    F: FnMut(&T) -> bool,
{
    items.iter().position(|item| predicate(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_returns_earliest_match() {
        let items = [("fig", 1), ("tab", 2), ("fig", 3)];
        let hit = find_first(&items, |(name, _)| *name == "fig");
        assert_eq!(hit, Some(&("fig", 1)));
        assert_eq!(find_first_index(&items, |(name, _)| *name == "fig"), Some(0));
    }

    #[test]
    fn test_find_first_no_match() {
        let items = ["a", "b"];
        assert!(find_first(&items, |s| *s == "z").is_none());
        assert!(find_first_index::<&str, _>(&[], |_| true).is_none());
    }
}
