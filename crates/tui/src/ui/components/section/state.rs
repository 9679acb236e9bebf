use navkit_engine::rollup::{RollupItem, find_active_index, partition};
use navkit_types::{Effect, NavItem, PathMatchMode, Rollup, SectionAction, SectionId};
use navkit_util::{IdFactory, SectionConfig};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::debug;

use crate::ui::frames::{FrameHandle, FrameScheduler, FrameTask};

/// Id category for the collapsible region of a section.
pub const ADDITIONAL_ITEMS_ID_CATEGORY: &str = "AdditionalItems";

/// Expand/collapse state of a section's rollup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RollupState {
    #[default]
    Collapsed,
    Expanded,
}

impl RollupState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// A selectable row of a rendered section, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRow {
    /// The heading action button.
    Action,
    /// An item, by index into `SectionState::items`.
    Item(usize),
    /// The rollup view/hide toggle.
    Toggle,
}

/// Item indices split into the always-visible and rolled-up groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionLayout {
    pub visible: Vec<usize>,
    pub collapsible: Vec<usize>,
}

struct IndexedItem<'a> {
    index: usize,
    item: &'a NavItem,
}

impl RollupItem for IndexedItem<'_> {
    fn url(&self) -> Option<&str> {
        self.item.url()
    }

    fn sub_item_urls(&self) -> Vec<&str> {
        self.item.sub_item_urls()
    }
}

/// State for one navigation section.
///
/// Owns the items, rollup configuration, the expand/collapse state machine and
/// the handle of a pending deferred collapse. Reducers take the shared
/// [`FrameScheduler`] explicitly so the state stays testable without a
/// terminal.
#[derive(Debug)]
pub struct SectionState {
    pub id: SectionId,
    pub title: Option<String>,
    pub items: Vec<NavItem>,
    pub rollup: Option<Rollup>,
    pub action: Option<SectionAction>,
    pub separator: bool,
    pub fill: bool,
    pub match_mode: PathMatchMode,
    rollup_state: RollupState,
    pending_collapse: Option<FrameHandle>,
    additional_items_id: String,
    /// Index into `rows()` of the highlighted row.
    cursor: usize,
    pub container_focus: FocusFlag,
    /// Last rendered area; used for mouse focus and hit testing.
    pub last_area: Rect,
    /// Rendered rows with their areas, for hit testing.
    pub row_areas: Vec<(SectionRow, Rect)>,
}

impl SectionState {
    pub fn new(id: SectionId, config: SectionConfig, ids: &dyn IdFactory, match_mode: PathMatchMode) -> Self {
        let SectionConfig {
            title,
            items,
            rollup,
            action,
            separator,
            fill,
        } = config;
        Self {
            id,
            title,
            items,
            rollup,
            action,
            separator,
            fill,
            match_mode,
            rollup_state: RollupState::Collapsed,
            pending_collapse: None,
            additional_items_id: ids.next_id(ADDITIONAL_ITEMS_ID_CATEGORY),
            cursor: 0,
            container_focus: FocusFlag::named(&format!("section.{}", id.0)),
            last_area: Rect::default(),
            row_areas: Vec::new(),
        }
    }

    pub fn rollup_state(&self) -> RollupState {
        self.rollup_state
    }

    pub fn is_expanded(&self) -> bool {
        self.rollup_state == RollupState::Expanded
    }

    pub fn pending_collapse(&self) -> Option<FrameHandle> {
        self.pending_collapse
    }

    /// Generated id of the collapsible region.
    pub fn additional_items_id(&self) -> &str {
        &self.additional_items_id
    }

    pub fn is_focused(&self) -> bool {
        self.container_focus.get()
    }

    /// Active path used for matching; only meaningful with a rollup.
    pub fn active_path(&self) -> Option<&str> {
        self.rollup.as_ref().map(|rollup| rollup.active_path.as_str())
    }

    pub fn set_active_path(&mut self, path: &str) {
        let row = self.cursor_row();
        if let Some(rollup) = self.rollup.as_mut() {
            rollup.active_path = path.to_string();
        }
        self.restore_cursor(row);
    }

    /// Index of the item matching the active path.
    pub fn active_index(&self) -> Option<usize> {
        let path = self.active_path()?;
        find_active_index(&self.items, path, self.match_mode)
    }

    /// Splits the items into visible and rolled-up indices.
    pub fn layout(&self) -> SectionLayout {
        let indexed = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| IndexedItem { index, item })
            .collect();
        let split = partition(
            indexed,
            self.rollup.as_ref().map(|rollup| rollup.after),
            self.active_path(),
            self.match_mode,
        );
        SectionLayout {
            visible: split.visible.iter().map(|entry| entry.index).collect(),
            collapsible: split.collapsible.iter().map(|entry| entry.index).collect(),
        }
    }

    /// The toggle lives inside the rolled-up region, so it only shows when
    /// the list overflows and something is actually rolled up.
    pub fn shows_toggle(&self) -> bool {
        match &self.rollup {
            Some(rollup) => self.items.len() > rollup.after && !self.layout().collapsible.is_empty(),
            None => false,
        }
    }

    /// `hide` while expanded, `view` while collapsed.
    pub fn toggle_label(&self) -> Option<&str> {
        let rollup = self.rollup.as_ref()?;
        Some(if self.is_expanded() { &rollup.hide } else { &rollup.view })
    }

    /// Selectable rows in render order.
    pub fn rows(&self) -> Vec<SectionRow> {
        let layout = self.layout();
        let mut rows = Vec::with_capacity(self.items.len() + 2);
        if self.title.is_some() && self.action.is_some() {
            rows.push(SectionRow::Action);
        }
        rows.extend(layout.visible.iter().map(|index| SectionRow::Item(*index)));
        if !layout.collapsible.is_empty() {
            if self.is_expanded() {
                rows.extend(layout.collapsible.iter().map(|index| SectionRow::Item(*index)));
            }
            if self.shows_toggle() {
                rows.push(SectionRow::Toggle);
            }
        }
        rows
    }

    pub fn cursor_row(&self) -> Option<SectionRow> {
        self.rows().get(self.cursor).copied()
    }

    /// Moves the cursor, wrapping at either end.
    pub fn move_cursor(&mut self, forward: bool) {
        let count = self.rows().len();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % count
        } else {
            (self.cursor + count - 1) % count
        };
    }

    pub fn set_cursor_row(&mut self, row: SectionRow) {
        if let Some(position) = self.rows().iter().position(|candidate| *candidate == row) {
            self.cursor = position;
        }
    }

    /// Keeps the cursor on `row` after the row list changed, falling back to
    /// the nearest valid position.
    fn restore_cursor(&mut self, row: Option<SectionRow>) {
        let rows = self.rows();
        self.cursor = match row.and_then(|row| rows.iter().position(|candidate| *candidate == row)) {
            Some(position) => position,
            None if rows.is_empty() => 0,
            None => self.cursor.min(rows.len() - 1),
        };
    }

    /// Flips the rollup between collapsed and expanded.
    pub fn toggle(&mut self) {
        let row = self.cursor_row();
        self.rollup_state = self.rollup_state.toggled();
        debug!(section = self.id.0, state = ?self.rollup_state, "rollup toggled");
        self.restore_cursor(row);
    }

    /// Activates an item: reports the navigation and schedules the rollup to
    /// collapse after the next frame. Any collapse scheduled earlier is
    /// cancelled first.
    pub fn activate_item(&mut self, index: usize, frames: &mut FrameScheduler) -> Vec<Effect> {
        let Some(item) = self.items.get(index) else {
            return Vec::new();
        };
        if item.disabled {
            return Vec::new();
        }
        let effect = Effect::Navigate {
            section: self.id,
            label: item.label.clone(),
            url: item.url.clone(),
        };
        if let Some(handle) = self.pending_collapse.take() {
            frames.cancel(handle);
        }
        self.pending_collapse = Some(frames.request(FrameTask::CollapseSection(self.id)));
        vec![effect]
    }

    /// Activates whatever row the cursor is on.
    pub fn activate_row(&mut self, row: SectionRow, frames: &mut FrameScheduler) -> Vec<Effect> {
        self.set_cursor_row(row);
        match row {
            SectionRow::Action => vec![Effect::SectionAction(self.id)],
            SectionRow::Item(index) => self.activate_item(index, frames),
            SectionRow::Toggle => {
                self.toggle();
                Vec::new()
            }
        }
    }

    pub fn activate_cursor(&mut self, frames: &mut FrameScheduler) -> Vec<Effect> {
        match self.cursor_row() {
            Some(row) => self.activate_row(row, frames),
            None => Vec::new(),
        }
    }

    /// Applies a deferred collapse if `handle` is the one this section is
    /// waiting on. Stale handles are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, task: FrameTask) {
        let FrameTask::CollapseSection(section) = task;
        if section != self.id || self.pending_collapse != Some(handle) {
            return;
        }
        self.pending_collapse = None;
        if self.is_expanded() {
            let row = self.cursor_row();
            self.rollup_state = RollupState::Collapsed;
            debug!(section = self.id.0, "rollup collapsed after item activation");
            self.restore_cursor(row);
        }
    }

    /// Tears the section down, cancelling any pending collapse.
    pub fn unmount(&mut self, frames: &mut FrameScheduler) {
        if let Some(handle) = self.pending_collapse.take() {
            frames.cancel(handle);
        }
        self.row_areas.clear();
    }
}

impl HasFocus for SectionState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navkit_types::SubNavItem;
    use navkit_util::SequentialIdFactory;

    fn section(count: usize, after: Option<usize>, active_path: &str) -> SectionState {
        let items = (0..count)
            .map(|i| NavItem::new(format!("Item {i}")).with_url(format!("/item-{i}")))
            .collect();
        let config = SectionConfig {
            items,
            rollup: after.map(|after| Rollup::new(after, active_path)),
            ..SectionConfig::default()
        };
        SectionState::new(SectionId(1), config, &SequentialIdFactory::new(), PathMatchMode::SegmentBoundary)
    }

    fn run_frame(state: &mut SectionState, frames: &mut FrameScheduler) {
        for (handle, task) in frames.take_due() {
            state.on_frame(handle, task);
        }
    }

    #[test]
    fn starts_collapsed_with_view_label() {
        let state = section(5, Some(2), "");
        assert_eq!(state.rollup_state(), RollupState::Collapsed);
        assert_eq!(state.toggle_label(), Some("View all"));
        assert!(state.shows_toggle());
    }

    #[test]
    fn toggle_flips_label() {
        let mut state = section(5, Some(2), "");
        state.toggle();
        assert!(state.is_expanded());
        assert_eq!(state.toggle_label(), Some("Hide"));
        state.toggle();
        assert!(!state.is_expanded());
    }

    #[test]
    fn no_toggle_without_rollup_or_overflow() {
        assert!(!section(5, None, "").shows_toggle());
        assert!(!section(2, Some(2), "").shows_toggle());
        assert_eq!(section(2, None, "").toggle_label(), None);
    }

    #[test]
    fn no_toggle_when_the_only_overflow_item_is_active() {
        let state = section(3, Some(2), "/item-2");
        assert!(state.layout().collapsible.is_empty());
        assert!(!state.shows_toggle());
    }

    #[test]
    fn rows_hide_rollup_items_until_expanded() {
        let mut state = section(4, Some(2), "");
        assert_eq!(state.rows(), vec![SectionRow::Item(0), SectionRow::Item(1), SectionRow::Toggle]);
        state.toggle();
        assert_eq!(
            state.rows(),
            vec![
                SectionRow::Item(0),
                SectionRow::Item(1),
                SectionRow::Item(2),
                SectionRow::Item(3),
                SectionRow::Toggle
            ]
        );
    }

    #[test]
    fn active_item_is_promoted_into_visible_rows() {
        let state = section(5, Some(2), "/item-3/edit");
        assert_eq!(state.layout().visible, vec![0, 1, 3]);
        assert_eq!(state.layout().collapsible, vec![2, 4]);
        assert_eq!(state.active_index(), Some(3));
    }

    #[test]
    fn sub_item_match_marks_parent_active() {
        let mut state = section(4, Some(1), "/inventory/12");
        state.items[3].sub_items = vec![SubNavItem::new("Inventory", "/inventory")];
        assert_eq!(state.active_index(), Some(3));
        assert_eq!(state.layout().visible, vec![0, 3]);
    }

    #[test]
    fn activation_collapses_on_the_next_frame_only() {
        let mut frames = FrameScheduler::new();
        let mut state = section(5, Some(2), "");
        state.toggle();

        let effects = state.activate_item(3, &mut frames);
        assert_eq!(
            effects,
            vec![Effect::Navigate {
                section: SectionId(1),
                label: "Item 3".into(),
                url: Some("/item-3".into())
            }]
        );
        assert!(state.is_expanded(), "collapse must not happen synchronously");
        assert!(state.pending_collapse().is_some());

        run_frame(&mut state, &mut frames);
        assert!(!state.is_expanded());
        assert!(state.pending_collapse().is_none());
    }

    #[test]
    fn reactivation_replaces_the_pending_collapse() {
        let mut frames = FrameScheduler::new();
        let mut state = section(5, Some(2), "");
        state.activate_item(0, &mut frames);
        let first = state.pending_collapse().expect("first handle");
        state.activate_item(1, &mut frames);
        let second = state.pending_collapse().expect("second handle");
        assert_ne!(first, second);
        assert!(!frames.is_pending(first));
        assert!(frames.is_pending(second));
    }

    #[test]
    fn unmount_cancels_the_pending_collapse() {
        let mut frames = FrameScheduler::new();
        let mut state = section(5, Some(2), "");
        state.toggle();
        state.activate_item(4, &mut frames);
        state.unmount(&mut frames);
        assert!(!frames.has_pending());
        assert!(state.pending_collapse().is_none());
        assert!(state.is_expanded());
    }

    #[test]
    fn stale_handles_are_ignored() {
        let mut frames = FrameScheduler::new();
        let mut state = section(5, Some(2), "");
        let stale = frames.request(FrameTask::CollapseSection(SectionId(1)));
        state.toggle();
        state.on_frame(stale, FrameTask::CollapseSection(SectionId(1)));
        assert!(state.is_expanded());
    }

    #[test]
    fn disabled_items_do_nothing() {
        let mut frames = FrameScheduler::new();
        let mut state = section(3, None, "");
        state.items[1].disabled = true;
        assert!(state.activate_item(1, &mut frames).is_empty());
        assert!(!frames.has_pending());
    }

    #[test]
    fn cursor_walks_rows_and_toggles() {
        let mut frames = FrameScheduler::new();
        let mut state = section(4, Some(2), "");
        state.move_cursor(false);
        assert_eq!(state.cursor_row(), Some(SectionRow::Toggle));
        assert!(state.activate_cursor(&mut frames).is_empty());
        assert!(state.is_expanded());
        assert_eq!(state.cursor_row(), Some(SectionRow::Toggle));
        state.move_cursor(true);
        assert_eq!(state.cursor_row(), Some(SectionRow::Item(0)));
    }

    #[test]
    fn action_row_precedes_items_when_titled() {
        let config = SectionConfig {
            title: Some("Channels".into()),
            items: vec![NavItem::new("Store").with_url("/store")],
            action: Some(SectionAction {
                icon: "+".into(),
                accessibility_label: "Add".into(),
            }),
            ..SectionConfig::default()
        };
        let mut state = SectionState::new(SectionId(9), config, &SequentialIdFactory::new(), PathMatchMode::Prefix);
        let mut frames = FrameScheduler::new();
        assert_eq!(state.rows()[0], SectionRow::Action);
        assert_eq!(state.activate_cursor(&mut frames), vec![Effect::SectionAction(SectionId(9))]);
    }

    #[test]
    fn region_ids_come_from_the_factory() {
        let ids = SequentialIdFactory::new();
        let first = SectionState::new(SectionId(1), SectionConfig::default(), &ids, PathMatchMode::Prefix);
        let second = SectionState::new(SectionId(2), SectionConfig::default(), &ids, PathMatchMode::Prefix);
        assert_eq!(first.additional_items_id(), "AdditionalItems1");
        assert_eq!(second.additional_items_id(), "AdditionalItems2");
    }
}
