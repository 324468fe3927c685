//! Tag Sets
//!
//! Sorted, deduplicated string sets used for coupon eligibility lists
//! (brand names and item names).

use std::cmp::Ordering;

use smallvec::SmallVec;

/// A sorted, deduplicated set of strings backed by a `SmallVec`.
///
/// Eligibility lists are small (a handful of brands or item names), so the
/// set stays inline and membership checks use binary search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: SmallVec<[String; 5]>,
}

impl TagSet {
    /// Create a tag set from a vector of strings, sorting and deduplicating.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut set = Self { tags };

        set.tags.sort();
        set.tags.dedup();

        set
    }

    /// Create a tag set from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::new(
            tags.iter()
                .map(ToString::to_string)
                .collect::<SmallVec<[String; 5]>>(),
        )
    }

    /// Create an empty tag set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tags: SmallVec::new(),
        }
    }

    /// Check whether the set contains the given tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.binary_search_by(|t| t.as_str().cmp(tag)).is_ok()
    }

    /// Check whether this set shares at least one tag with another set.
    pub fn intersects(&self, other: &Self) -> bool {
        // Two pointers over sorted vectors, O(n + m).
        let mut left = self.tags.iter();
        let mut right = other.tags.iter();
        let mut left_tag = left.next();
        let mut right_tag = right.next();

        while let (Some(left_ref), Some(right_ref)) = (left_tag, right_tag) {
            match left_ref.cmp(right_ref) {
                Ordering::Equal => return true,
                Ordering::Less => left_tag = left.next(),
                Ordering::Greater => right_tag = right.next(),
            }
        }

        false
    }

    /// Add a tag to the set, keeping it sorted.
    pub fn add(&mut self, tag: &str) {
        let tag_string = tag.to_string();

        if let Err(pos) = self.tags.binary_search(&tag_string) {
            self.tags.insert(pos, tag_string);
        }
    }

    /// Remove a tag from the set.
    pub fn remove(&mut self, tag: &str) {
        if let Ok(pos) = self.tags.binary_search_by(|t| t.as_str().cmp(tag)) {
            self.tags.remove(pos);
        }
    }

    /// Check whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of tags in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_set_sorts_and_deduplicates() {
        let tags = TagSet::from_strs(&["zebra", "apple", "zebra", "banana"]);

        assert_eq!(tags.len(), 3);
        assert_eq!(
            tags.iter().collect::<Vec<_>>(),
            vec!["apple", "banana", "zebra"]
        );
    }

    #[test]
    fn contains_finds_only_present_tags() {
        let tags = TagSet::from_strs(&["FarmCo", "SunHarvest"]);

        assert!(tags.contains("FarmCo"));
        assert!(tags.contains("SunHarvest"));
        assert!(!tags.contains("DairyPure"));
    }

    #[test]
    fn intersects_detects_shared_tags() {
        let left = TagSet::from_strs(&["FarmCo", "GreenLeaf"]);
        let right = TagSet::from_strs(&["BakeHouse", "GreenLeaf"]);
        let disjoint = TagSet::from_strs(&["DairyPure"]);

        assert!(left.intersects(&right));
        assert!(!left.intersects(&disjoint));
        assert!(!right.intersects(&disjoint));
    }

    #[test]
    fn add_and_remove_preserve_sorted_order() {
        let mut tags = TagSet::from_strs(&["b", "d"]);

        tags.add("c");
        tags.add("c");
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["b", "c", "d"]);

        tags.remove("b");
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["c", "d"]);

        tags.remove("missing");
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn empty_set_is_empty() {
        let tags = TagSet::empty();

        assert!(tags.is_empty());
        assert!(!tags.contains("anything"));
        assert!(!tags.intersects(&TagSet::from_strs(&["anything"])));
    }
}
