//! Overflow partitioning for navigation sections.
//!
//! A section shows its first `threshold` items and rolls the rest up behind a
//! toggle. The item matching the active path is always kept visible: when it
//! falls in the rolled-up tail it is moved to the end of the visible group.

use navkit_types::{NavItem, PathMatchMode};
use tracing::trace;

/// Anything that can be partitioned: exposes its own url and the urls of its
/// children.
pub trait RollupItem {
    fn url(&self) -> Option<&str>;

    fn sub_item_urls(&self) -> Vec<&str> {
        Vec::new()
    }
}

impl RollupItem for NavItem {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn sub_item_urls(&self) -> Vec<&str> {
        self.sub_items.iter().map(|sub| sub.url.as_str()).collect()
    }
}

impl<T: RollupItem + ?Sized> RollupItem for &T {
    fn url(&self) -> Option<&str> {
        (**self).url()
    }

    fn sub_item_urls(&self) -> Vec<&str> {
        (**self).sub_item_urls()
    }
}

/// The two groups produced by [`partition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    /// Always shown.
    pub visible: Vec<T>,
    /// Shown only while the section is expanded.
    pub collapsible: Vec<T>,
}

impl<T> Partition<T> {
    pub fn len(&self) -> usize {
        self.visible.len() + self.collapsible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_overflow(&self) -> bool {
        !self.collapsible.is_empty()
    }
}

/// Returns true when `active_path` starts with `prefix` under `mode`.
pub fn path_has_prefix(active_path: &str, prefix: &str, mode: PathMatchMode) -> bool {
    if !active_path.starts_with(prefix) {
        return false;
    }
    match mode {
        PathMatchMode::Prefix => true,
        PathMatchMode::SegmentBoundary => {
            if prefix.ends_with('/') {
                return true;
            }
            matches!(active_path[prefix.len()..].chars().next(), None | Some('/' | '?' | '#'))
        }
    }
}

/// Whether `item` is the target of `active_path`: exact url match, url prefix,
/// or a sub-item url prefix.
///
/// An empty item url only matches an empty path. Sub-item urls are not
/// guarded, so an empty sub-item url matches every path.
pub fn is_active<T: RollupItem + ?Sized>(item: &T, active_path: &str, mode: PathMatchMode) -> bool {
    if let Some(url) = item.url()
        && (url == active_path || (!url.is_empty() && path_has_prefix(active_path, url, mode)))
    {
        return true;
    }
    item.sub_item_urls()
        .into_iter()
        .any(|sub_url| path_has_prefix(active_path, sub_url, mode))
}

/// Index of the first item matching `active_path`.
pub fn find_active_index<T: RollupItem>(items: &[T], active_path: &str, mode: PathMatchMode) -> Option<usize> {
    items.iter().position(|item| is_active(item, active_path, mode))
}

/// Splits `items` into visible and collapsible groups.
///
/// With no threshold, or when everything fits, all items are visible. The
/// active item (first match) is relocated to the end of `visible` when it sits
/// past the threshold. Exactly one item is ever relocated.
pub fn partition<T: RollupItem>(
    items: Vec<T>,
    threshold: Option<usize>,
    active_path: Option<&str>,
    mode: PathMatchMode,
) -> Partition<T> {
    let Some(threshold) = threshold.filter(|threshold| items.len() > *threshold) else {
        return Partition {
            visible: items,
            collapsible: Vec::new(),
        };
    };

    let active_index = active_path.and_then(|path| find_active_index(&items, path, mode));

    let mut visible = items;
    let mut collapsible = visible.split_off(threshold);

    if let Some(index) = active_index.filter(|index| *index >= threshold) {
        trace!(index, threshold, "promoting active item out of the rollup");
        visible.push(collapsible.remove(index - threshold));
    }

    Partition { visible, collapsible }
}

/// Borrowing variant of [`partition`] that yields references into `items`.
pub fn partition_refs<'a, T: RollupItem>(
    items: &'a [T],
    threshold: Option<usize>,
    active_path: Option<&str>,
    mode: PathMatchMode,
) -> Partition<&'a T> {
    partition(items.iter().collect(), threshold, active_path, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use navkit_types::SubNavItem;

    fn items(urls: &[&str]) -> Vec<NavItem> {
        urls.iter()
            .enumerate()
            .map(|(i, url)| NavItem::new(format!("item-{i}")).with_url(*url))
            .collect()
    }

    fn labels(list: &[&NavItem]) -> Vec<String> {
        list.iter().map(|item| item.label.clone()).collect()
    }

    #[test]
    fn everything_visible_without_threshold() {
        let list = items(&["/a", "/b", "/c"]);
        let result = partition_refs(&list, None, Some("/c"), PathMatchMode::Prefix);
        assert_eq!(result.visible.len(), 3);
        assert!(result.collapsible.is_empty());
    }

    #[test]
    fn everything_visible_when_list_fits() {
        let list = items(&["/a", "/b"]);
        let result = partition_refs(&list, Some(2), None, PathMatchMode::Prefix);
        assert_eq!(result.visible.len(), 2);
        assert!(!result.has_overflow());
    }

    #[test]
    fn splits_at_threshold_without_active_match() {
        let list = items(&["/a", "/b", "/c", "/d"]);
        let result = partition_refs(&list, Some(2), Some("/zzz"), PathMatchMode::Prefix);
        assert_eq!(labels(&result.visible), vec!["item-0", "item-1"]);
        assert_eq!(labels(&result.collapsible), vec!["item-2", "item-3"]);
    }

    #[test]
    fn relocates_active_item_from_the_tail() {
        let list = items(&["/a", "/b", "/c", "/d", "/e"]);
        let result = partition_refs(&list, Some(2), Some("/d"), PathMatchMode::Prefix);
        assert_eq!(labels(&result.visible), vec!["item-0", "item-1", "item-3"]);
        assert_eq!(labels(&result.collapsible), vec!["item-2", "item-4"]);
    }

    #[test]
    fn active_item_inside_threshold_stays_put() {
        let list = items(&["/a", "/b", "/c"]);
        let result = partition_refs(&list, Some(2), Some("/a"), PathMatchMode::Prefix);
        assert_eq!(labels(&result.visible), vec!["item-0", "item-1"]);
        assert_eq!(labels(&result.collapsible), vec!["item-2"]);
    }

    #[test]
    fn zero_threshold_promotes_only_the_active_item() {
        let list = items(&["/a", "/b", "/c"]);
        let result = partition_refs(&list, Some(0), Some("/b/edit"), PathMatchMode::Prefix);
        assert_eq!(labels(&result.visible), vec!["item-1"]);
        assert_eq!(labels(&result.collapsible), vec!["item-0", "item-2"]);
    }

    #[test]
    fn first_match_wins() {
        let list = items(&["/a", "/orders", "/orders/drafts", "/x"]);
        let result = partition_refs(&list, Some(1), Some("/orders/drafts"), PathMatchMode::Prefix);
        assert_eq!(labels(&result.visible), vec!["item-0", "item-1"]);
    }

    #[test]
    fn sub_item_prefix_marks_parent_active() {
        let mut list = items(&["/a", "/b", "/products"]);
        list[2].url = None;
        list[2].sub_items = vec![SubNavItem::new("Inventory", "/inventory")];
        assert_eq!(find_active_index(&list, "/inventory/42", PathMatchMode::Prefix), Some(2));
    }

    #[test]
    fn plain_prefix_matches_across_segments() {
        let list = items(&["/cat"]);
        assert_eq!(find_active_index(&list, "/category", PathMatchMode::Prefix), Some(0));
    }

    #[test]
    fn segment_boundary_rejects_partial_segments() {
        let list = items(&["/cat"]);
        assert_eq!(find_active_index(&list, "/category", PathMatchMode::SegmentBoundary), None);
        assert_eq!(find_active_index(&list, "/cat/7", PathMatchMode::SegmentBoundary), Some(0));
        assert_eq!(find_active_index(&list, "/cat?tab=1", PathMatchMode::SegmentBoundary), Some(0));
        assert_eq!(find_active_index(&list, "/cat", PathMatchMode::SegmentBoundary), Some(0));
    }

    #[test]
    fn empty_item_urls_never_prefix_match() {
        let list = items(&["", "/b"]);
        assert_eq!(find_active_index(&list, "/anything", PathMatchMode::Prefix), None);
        assert_eq!(find_active_index(&list, "", PathMatchMode::Prefix), Some(0));
    }

    #[test]
    fn empty_sub_item_url_matches_every_path() {
        let mut list = items(&["/a", "/b"]);
        list[1].sub_items = vec![SubNavItem::new("Empty", "")];
        assert_eq!(find_active_index(&list, "/zzz", PathMatchMode::Prefix), Some(1));

        let split = partition_refs(&list, Some(0), Some("/zzz"), PathMatchMode::Prefix);
        assert_eq!(labels(&split.visible), vec!["item-1"]);
        assert_eq!(labels(&split.collapsible), vec!["item-0"]);
    }

    #[test]
    fn owned_partition_preserves_every_item() {
        let list = items(&["/a", "/b", "/c", "/d"]);
        let result = partition(list.clone(), Some(1), Some("/c"), PathMatchMode::Prefix);
        assert_eq!(result.len(), list.len());
        assert_eq!(result.visible[1].label, "item-2");
    }
}
