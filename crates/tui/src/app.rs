//! Application state for the navkit gallery.
//!
//! `App` owns the component states, the frame scheduler and the shared
//! context (theme, preferences, focus). Components mutate it through their
//! handlers and report side effects, which [`App::apply_effect`] carries out
//! on behalf of the host.

use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use navkit_types::{Effect, Msg, PathMatchMode, SectionId};
use navkit_util::{GalleryConfig, SequentialIdFactory, UserPreferences};
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::ui::components::section::SectionState;
use crate::ui::components::text_field::{TextFieldError, TextFieldState};
use crate::ui::frames::FrameScheduler;
use crate::ui::theme::{self, Theme};

/// Number of activity entries kept for display.
const ACTIVITY_CAPACITY: usize = 64;

/// Startup choices that override the gallery configuration.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub preferred_theme: Option<String>,
    pub match_mode: Option<PathMatchMode>,
    pub active_path: Option<String>,
}

pub struct App {
    pub theme: Box<dyn Theme>,
    pub theme_id: &'static str,
    pub sections: Vec<SectionState>,
    pub fields: Vec<TextFieldState>,
    pub frames: FrameScheduler,
    /// Navigation location shared by every section.
    pub active_path: String,
    pub match_mode: PathMatchMode,
    pub focus: Rc<Focus>,
    pub container_focus: FocusFlag,
    /// Most recent effects, newest last.
    pub activity: VecDeque<String>,
    preferences: Arc<UserPreferences>,
    should_quit: bool,
}

impl App {
    pub fn new(config: GalleryConfig, preferences: Arc<UserPreferences>, options: AppOptions) -> Result<Self, TextFieldError> {
        let ids = SequentialIdFactory::new();
        let preferred_theme = options.preferred_theme.or_else(|| preferences.preferred_theme());
        let loaded = theme::load(preferred_theme.as_deref());
        let match_mode = options.match_mode.unwrap_or_else(|| preferences.path_match_mode());

        let GalleryConfig {
            active_path,
            sections,
            fields,
        } = config;
        let mut sections: Vec<SectionState> = (1..)
            .zip(sections)
            .map(|(id, section)| SectionState::new(SectionId(id), section, &ids, match_mode))
            .collect();
        let fields = fields
            .into_iter()
            .map(|props| TextFieldState::new(props, &ids))
            .collect::<Result<Vec<_>, _>>()?;

        let active_path = match options.active_path.or(active_path) {
            Some(path) => {
                for section in &mut sections {
                    section.set_active_path(&path);
                }
                path
            }
            None => sections
                .iter()
                .find_map(|section| section.active_path().map(str::to_string))
                .unwrap_or_default(),
        };

        debug!(
            theme = loaded.definition.id,
            sections = sections.len(),
            fields = fields.len(),
            ?match_mode,
            "app initialized"
        );
        Ok(Self {
            theme: loaded.theme,
            theme_id: loaded.definition.id,
            sections,
            fields,
            frames: FrameScheduler::new(),
            active_path,
            match_mode,
            focus: Rc::new(Focus::default()),
            container_focus: FocusFlag::named("app"),
            activity: VecDeque::with_capacity(ACTIVITY_CAPACITY),
            preferences,
            should_quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies a host message to every interested state.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::ActivePathChanged(path) => {
                self.active_path = path.clone();
                for section in &mut self.sections {
                    section.set_active_path(path);
                }
            }
            Msg::Resize(width, height) => debug!(width, height, "terminal resized"),
            Msg::Tick => {}
        }
        Vec::new()
    }

    /// Carries out an effect reported by a component.
    pub fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Navigate { section, label, url } => {
                info!(section = section.0, %label, ?url, "navigate");
                match url {
                    Some(url) => {
                        self.record(format!("Navigated to {label} ({url})"));
                        self.update(&Msg::ActivePathChanged(url));
                    }
                    None => self.record(format!("Selected {label}")),
                }
            }
            Effect::SectionAction(id) => {
                let label = self
                    .sections
                    .iter()
                    .find(|section| section.id == id)
                    .and_then(|section| section.action.as_ref())
                    .map(|action| action.accessibility_label.clone())
                    .unwrap_or_else(|| format!("Section {} action", id.0));
                self.record(label);
            }
            Effect::FieldChanged { id, value } => self.record(format!("{id} = {value:?}")),
            Effect::FieldFocused { id } => debug!(field = %id, "field focused"),
            Effect::FieldBlurred { id } => debug!(field = %id, "field blurred"),
            Effect::Quit => self.should_quit = true,
        }
    }

    /// Runs the deferred tasks queued before the last draw. Returns true when
    /// anything ran so the caller can redraw.
    pub fn run_frame_tasks(&mut self) -> bool {
        let due = self.frames.take_due();
        if due.is_empty() {
            return false;
        }
        for (handle, task) in due {
            for section in &mut self.sections {
                section.on_frame(handle, task);
            }
        }
        true
    }

    /// Reports focus changes of every field since the last call.
    pub fn sync_field_focus(&mut self) -> Vec<Effect> {
        self.fields.iter_mut().flat_map(TextFieldState::sync_focus).collect()
    }

    /// Switches to the next theme in the catalog and persists the choice.
    pub fn cycle_theme(&mut self) {
        let catalog = theme::all();
        let current = catalog.iter().position(|definition| definition.id == self.theme_id).unwrap_or(0);
        let next = &catalog[(current + 1) % catalog.len()];
        self.theme = next.build();
        self.theme_id = next.id;
        if let Err(error) = self.preferences.set_preferred_theme(Some(next.id.to_string())) {
            warn!(%error, "failed to persist theme preference");
        }
        self.record(format!("Theme: {}", next.label));
    }

    /// Flips between prefix and segment-boundary matching and persists it.
    pub fn toggle_match_mode(&mut self) {
        self.match_mode = match self.match_mode {
            PathMatchMode::Prefix => PathMatchMode::SegmentBoundary,
            PathMatchMode::SegmentBoundary => PathMatchMode::Prefix,
        };
        for section in &mut self.sections {
            section.match_mode = self.match_mode;
        }
        if let Err(error) = self.preferences.set_path_match_mode(self.match_mode) {
            warn!(%error, "failed to persist path match mode");
        }
        self.record(format!("Path matching: {:?}", self.match_mode));
    }

    /// Tears every section down, dropping pending deferred work.
    pub fn unmount(&mut self) {
        for section in &mut self.sections {
            section.unmount(&mut self.frames);
        }
    }

    fn record(&mut self, entry: String) {
        if self.activity.len() == ACTIVITY_CAPACITY {
            self.activity.pop_front();
        }
        self.activity.push_back(entry);
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        for section in &self.sections {
            section.build(builder);
        }
        for field in &self.fields {
            if !field.props().disabled {
                field.build(builder);
            }
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::section::RollupState;

    fn app() -> App {
        App::new(
            GalleryConfig::demo(),
            Arc::new(UserPreferences::ephemeral()),
            AppOptions {
                preferred_theme: Some("nord".into()),
                ..AppOptions::default()
            },
        )
        .expect("demo app")
    }

    #[test]
    fn config_active_path_reaches_every_section() {
        let app = app();
        assert_eq!(app.active_path, "/apps");
        assert_eq!(app.sections[0].active_path(), Some("/apps"));
        assert_eq!(app.sections[0].active_index(), Some(6));
    }

    #[test]
    fn option_active_path_overrides_config() {
        let app = App::new(
            GalleryConfig::demo(),
            Arc::new(UserPreferences::ephemeral()),
            AppOptions {
                active_path: Some("/orders".into()),
                ..AppOptions::default()
            },
        )
        .expect("demo app");
        assert_eq!(app.sections[0].active_index(), Some(1));
    }

    #[test]
    fn navigation_moves_the_active_path_and_collapses_after_a_frame() {
        let mut app = app();
        app.sections[0].toggle();
        let effects = app.sections[0].activate_item(5, &mut app.frames);
        for effect in effects {
            app.apply_effect(effect);
        }
        assert_eq!(app.active_path, "/discounts");
        assert_eq!(app.sections[0].rollup_state(), RollupState::Expanded);

        assert!(app.run_frame_tasks());
        assert_eq!(app.sections[0].rollup_state(), RollupState::Collapsed);
        assert!(app.sections[0].layout().visible.contains(&5));
        assert!(!app.run_frame_tasks());
    }

    #[test]
    fn unmount_drops_pending_collapses() {
        let mut app = app();
        app.sections[0].toggle();
        app.sections[0].activate_item(0, &mut app.frames);
        app.unmount();
        assert!(!app.run_frame_tasks());
        assert!(app.sections[0].is_expanded());
    }

    #[test]
    fn section_actions_are_logged_by_label() {
        let mut app = app();
        let id = app.sections[1].id;
        app.apply_effect(Effect::SectionAction(id));
        assert_eq!(app.activity.back().map(String::as_str), Some("Add sales channel"));
    }

    #[test]
    fn theme_and_match_mode_choices_are_remembered() {
        let mut app = app();
        let before = app.theme_id;
        app.cycle_theme();
        assert_ne!(app.theme_id, before);
        assert_eq!(app.preferences.preferred_theme().as_deref(), Some(app.theme_id));

        app.toggle_match_mode();
        assert_eq!(app.sections[0].match_mode, PathMatchMode::SegmentBoundary);
        assert_eq!(app.preferences.path_match_mode(), PathMatchMode::SegmentBoundary);
    }

    #[test]
    fn quit_effect_stops_the_app() {
        let mut app = app();
        app.apply_effect(Effect::Quit);
        assert!(app.should_quit());
    }
}
