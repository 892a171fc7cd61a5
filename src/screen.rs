//! Form screen: widget arena, focus chain, layout, store glue.
//!
//! [`FormScreen`] owns the form store, the widgets built from its registry,
//! the tab-order focus chain, and the surface the frame is composed onto.
//! [`FocusChain`] maintains the tab-order of focusable widgets.
//!
//! The screen is where the two store transitions meet the widget layer:
//! [`FormScreen::apply_edit`] applies the value update and then revalidates
//! the same field, then mirrors the resulting error back into the field
//! widget. The submit button's enablement is recomputed from the store on
//! every [`FormScreen::render`] call.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use slotmap::SlotMap;

use crate::event::input::KeyEvent;
use crate::event::message::{Envelope, SubmitPressed};
use crate::form::field::FieldRegistry;
use crate::form::store::FormStore;
use crate::geometry::{Offset, Region};
use crate::render::surface::Surface;
use crate::render::theme::Theme;
use crate::widget::traits::{RenderCtx, Widget};
use crate::widget::WidgetId;
use crate::widgets::button::Button;
use crate::widgets::field::Field;
use crate::widgets::label::Label;

/// Horizontal margin around the form column.
const MARGIN_X: i32 = 2;
/// Blank rows between stacked widgets.
const GAP_Y: i32 = 1;

// ---------------------------------------------------------------------------
// FocusChain
// ---------------------------------------------------------------------------

/// Maintains an ordered list of focusable widgets for tab navigation.
///
/// The chain is rebuilt whenever focusability changes (e.g. the submit
/// button enabling). Focus cycles through the chain in forward (Tab) or
/// backward (BackTab) order, and a previously focused widget keeps focus
/// across rebuilds when it is still in the chain.
#[derive(Debug)]
pub struct FocusChain {
    /// Focusable widgets in tab order.
    nodes: Vec<WidgetId>,
    /// Index of the currently focused widget, or `None` if no focus.
    current: Option<usize>,
}

impl FocusChain {
    /// Create a new, empty focus chain.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            current: None,
        }
    }

    /// Rebuild the chain from the screen's widget order.
    ///
    /// Collects the widgets that can currently take focus. If the
    /// previously focused widget is still present, focus is preserved;
    /// otherwise focus is cleared.
    pub fn rebuild(&mut self, order: &[WidgetId], widgets: &SlotMap<WidgetId, Box<dyn Widget>>) {
        let old_focused = self.current_node();

        self.nodes.clear();
        self.current = None;

        for &id in order {
            if widgets.get(id).is_some_and(|w| w.can_focus()) {
                self.nodes.push(id);
            }
        }

        if let Some(old_id) = old_focused {
            if let Some(pos) = self.nodes.iter().position(|&n| n == old_id) {
                self.current = Some(pos);
            }
        }
    }

    /// The currently focused widget, if any.
    pub fn current_node(&self) -> Option<WidgetId> {
        self.current.and_then(|idx| self.nodes.get(idx).copied())
    }

    /// Move focus to the next widget in the chain. Wraps around.
    ///
    /// Returns the newly focused widget, or `None` if the chain is empty.
    pub fn focus_next(&mut self) -> Option<WidgetId> {
        if self.nodes.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(idx) => (idx + 1) % self.nodes.len(),
            None => 0,
        };
        self.current = Some(next);
        self.nodes.get(next).copied()
    }

    /// Move focus to the previous widget in the chain. Wraps around.
    ///
    /// Returns the newly focused widget, or `None` if the chain is empty.
    pub fn focus_previous(&mut self) -> Option<WidgetId> {
        if self.nodes.is_empty() {
            return None;
        }
        let prev = match self.current {
            Some(0) => self.nodes.len() - 1,
            Some(idx) => idx - 1,
            None => self.nodes.len() - 1,
        };
        self.current = Some(prev);
        self.nodes.get(prev).copied()
    }

    /// Focus a specific widget by id. Returns `true` if it was found.
    pub fn focus_node(&mut self, id: WidgetId) -> bool {
        if let Some(pos) = self.nodes.iter().position(|&n| n == id) {
            self.current = Some(pos);
            true
        } else {
            false
        }
    }

    /// Clear focus (no widget focused).
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Number of focusable widgets in the chain.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for FocusChain {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// FormScreen
// ---------------------------------------------------------------------------

/// A single form screen: store, widgets, focus, layout, surface.
pub struct FormScreen {
    store: FormStore,
    widgets: SlotMap<WidgetId, Box<dyn Widget>>,
    /// Widgets in render (and tab) order.
    order: Vec<WidgetId>,
    /// Layout regions computed by `layout`.
    regions: HashMap<WidgetId, Region>,
    /// Field id -> widget id for edit routing.
    by_field: HashMap<String, WidgetId>,
    /// The submit button.
    submit: WidgetId,
    /// Tab-order focus chain.
    pub focus: FocusChain,
    surface: Surface,
    theme: Theme,
    /// Set by store listeners and input handling; cleared on render.
    dirty: Rc<Cell<bool>>,
}

impl FormScreen {
    /// Build a screen for `registry` with a viewport of `width` x `height`.
    ///
    /// One field widget is created per registry entry, in definition order,
    /// followed by a submit button that starts disabled (a fresh form is
    /// never valid).
    pub fn new(registry: FieldRegistry, width: u16, height: u16) -> Self {
        let mut widgets: SlotMap<WidgetId, Box<dyn Widget>> = SlotMap::with_key();
        let mut order = Vec::new();
        let mut by_field = HashMap::new();

        for def in registry.iter() {
            let id = widgets.insert(Box::new(Field::from_definition(def)));
            order.push(id);
            by_field.insert(def.id().to_owned(), id);
        }
        let submit = widgets.insert(Box::new(Button::new("Submit").disabled(true)));
        order.push(submit);

        let mut store = FormStore::new(registry);
        let dirty = Rc::new(Cell::new(true));
        let dirty_flag = dirty.clone();
        store.subscribe(move |_| dirty_flag.set(true));

        let mut screen = Self {
            store,
            widgets,
            order,
            regions: HashMap::new(),
            by_field,
            submit,
            focus: FocusChain::new(),
            surface: Surface::new(width, height),
            theme: Theme::default(),
            dirty,
        };
        screen.layout();
        screen.rebuild_focus();
        screen
    }

    /// Add a title label above the form (builder pattern).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let id = self.widgets.insert(Box::new(Label::title(title)));
        self.order.insert(0, id);
        self.layout();
        self.rebuild_focus();
        self
    }

    /// Set the theme (builder pattern).
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self.dirty.set(true);
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The form store.
    pub fn store(&self) -> &FormStore {
        &self.store
    }

    /// The form store, mutably.
    pub fn store_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }

    /// The submit button's widget id.
    pub fn submit_id(&self) -> WidgetId {
        self.submit
    }

    /// The field widget editing `field`, if registered.
    pub fn field(&self, field: &str) -> Option<&Field> {
        let id = *self.by_field.get(field)?;
        self.widgets.get(id)?.as_any().downcast_ref::<Field>()
    }

    /// Whether the submit button is currently enabled.
    ///
    /// Derived from the store, not from the button widget, so it can never
    /// lag behind the state.
    pub fn submit_enabled(&self) -> bool {
        self.store.is_valid()
    }

    /// The layout region of a widget, if laid out.
    pub fn region_of(&self, id: WidgetId) -> Option<Region> {
        self.regions.get(&id).copied()
    }

    /// Whether a repaint is pending.
    pub fn needs_render(&self) -> bool {
        self.dirty.get()
    }

    // -----------------------------------------------------------------------
    // Store glue
    // -----------------------------------------------------------------------

    /// Apply one edit event: update the value, then revalidate that field.
    ///
    /// The two transitions run back to back, in that order, before this
    /// call returns. The resulting error (or its absence) is mirrored into
    /// the field widget's inline error row, and the editor value is synced
    /// for edits that did not originate in the widget itself.
    pub fn apply_edit(&mut self, field: &str, value: &str) {
        self.store.update_value(field, value);
        self.store.validate_field(field);

        let error = self.store.state().error(field).map(str::to_owned);
        let current = self
            .store
            .state()
            .value(field)
            .unwrap_or_default()
            .to_owned();
        if let Some(&wid) = self.by_field.get(field) {
            if let Some(widget) = self.widgets.get_mut(wid) {
                if let Some(f) = widget.as_any_mut().downcast_mut::<Field>() {
                    f.set_error(error);
                    if f.value() != current {
                        f.set_value(&current);
                    }
                }
            }
        }
        // Keep the submit button (and with it the focus chain) in step, so
        // tabbing onto a just-enabled button works before the next render.
        self.sync_submit();
    }

    // -----------------------------------------------------------------------
    // Input routing
    // -----------------------------------------------------------------------

    /// Route a key event to the focused widget.
    ///
    /// Returns the messages it produced, wrapped in envelopes.
    pub fn handle_key(&mut self, event: KeyEvent) -> Vec<Envelope> {
        let Some(id) = self.focus.current_node() else {
            return Vec::new();
        };
        let Some(widget) = self.widgets.get_mut(id) else {
            return Vec::new();
        };
        self.dirty.set(true);
        widget
            .on_key(event)
            .into_iter()
            .map(|message| Envelope::from_widget(message, id))
            .collect()
    }

    /// Route pasted text to the focused widget.
    pub fn handle_paste(&mut self, text: &str) -> Vec<Envelope> {
        let Some(id) = self.focus.current_node() else {
            return Vec::new();
        };
        let Some(widget) = self.widgets.get_mut(id) else {
            return Vec::new();
        };
        self.dirty.set(true);
        widget
            .on_paste(text)
            .into_iter()
            .map(|message| Envelope::from_widget(message, id))
            .collect()
    }

    /// Handle a mouse click at surface coordinates.
    ///
    /// Clicking a focusable widget focuses it. Clicking the enabled submit
    /// button additionally activates it.
    pub fn click(&mut self, x: u16, y: u16) -> Vec<Envelope> {
        let Some(id) = self.hit_test(Offset::new(x as i32, y as i32)) else {
            return Vec::new();
        };
        if self.focus.focus_node(id) {
            self.dirty.set(true);
        }

        let mut envelopes = Vec::new();
        if id == self.submit {
            let enabled = self
                .widgets
                .get(id)
                .and_then(|w| w.as_any().downcast_ref::<Button>())
                .is_some_and(|b| !b.is_disabled());
            if enabled {
                envelopes.push(Envelope::from_widget(Box::new(SubmitPressed), id));
            }
        }
        envelopes
    }

    /// The focusable widget whose region contains `at`, if any.
    pub fn hit_test(&self, at: Offset) -> Option<WidgetId> {
        self.order.iter().copied().find(|id| {
            self.regions.get(id).is_some_and(|r| r.contains(at.x, at.y))
                && self.widgets.get(*id).is_some_and(|w| w.can_focus())
        })
    }

    /// Move focus to the next widget.
    pub fn focus_next(&mut self) -> Option<WidgetId> {
        self.dirty.set(true);
        self.focus.focus_next()
    }

    /// Move focus to the previous widget.
    pub fn focus_previous(&mut self) -> Option<WidgetId> {
        self.dirty.set(true);
        self.focus.focus_previous()
    }

    // -----------------------------------------------------------------------
    // Layout / render
    // -----------------------------------------------------------------------

    /// Resize the viewport. The whole screen relayouts and repaints.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.surface.resize(width, height);
        self.layout();
        self.dirty.set(true);
    }

    /// Compose the current frame and return the surface.
    ///
    /// The submit button's disabled state is recomputed from the store
    /// first, so enablement always reflects the state as of this render.
    pub fn render(&mut self) -> &Surface {
        self.sync_submit();
        self.layout();

        self.surface.clear();
        let focused = self.focus.current_node();
        for id in self.order.clone() {
            let Some(region) = self.regions.get(&id).copied() else {
                continue;
            };
            let Some(widget) = self.widgets.get(id) else {
                continue;
            };
            let ctx = RenderCtx::new(&self.theme).focused(focused == Some(id));
            let strips = widget.render(region, &ctx);
            self.surface.blit(&strips, region);
        }
        self.dirty.set(false);
        &self.surface
    }

    /// Stack widgets vertically with a margin and one blank row between.
    fn layout(&mut self) {
        let width = (self.surface.width as i32 - MARGIN_X * 2).max(0);
        let mut y = GAP_Y;
        self.regions.clear();
        for &id in &self.order {
            let Some(widget) = self.widgets.get(id) else {
                continue;
            };
            let height = widget.desired_height();
            self.regions.insert(id, Region::new(MARGIN_X, y, width, height));
            y += height + GAP_Y;
        }
    }

    /// Mirror `store.is_valid()` into the submit button's disabled state.
    fn sync_submit(&mut self) {
        let want_disabled = !self.store.is_valid();
        let mut changed = false;
        if let Some(widget) = self.widgets.get_mut(self.submit) {
            if let Some(button) = widget.as_any_mut().downcast_mut::<Button>() {
                if button.is_disabled() != want_disabled {
                    button.set_disabled(want_disabled);
                    changed = true;
                }
            }
        }
        if changed {
            self.rebuild_focus();
        }
    }

    fn rebuild_focus(&mut self) {
        self.focus.rebuild(&self.order, &self.widgets);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::Key;
    use crate::event::message::ValueEdited;

    fn screen() -> FormScreen {
        FormScreen::new(FieldRegistry::user_form(), 80, 24)
    }

    fn fill_validly(screen: &mut FormScreen) {
        screen.apply_edit("firstName", "Jane");
        screen.apply_edit("lastName", "Doe");
        screen.apply_edit("email", "jane@doe.com");
        screen.apply_edit("message", "Hello there!");
    }

    // -----------------------------------------------------------------------
    // FocusChain
    // -----------------------------------------------------------------------

    #[test]
    fn focus_chain_skips_unfocusable_widgets() {
        let s = screen();
        // Four fields; the disabled submit button is out of the chain.
        assert_eq!(s.focus.len(), 4);
    }

    #[test]
    fn focus_next_cycles_forward() {
        let mut s = screen();
        let first = s.focus_next().unwrap();
        for _ in 0..4 {
            s.focus_next();
        }
        // Four focusables -> wrapped back to the first.
        assert_eq!(s.focus.current_node(), Some(first));
    }

    #[test]
    fn focus_previous_wraps_to_end() {
        let mut s = screen();
        let last = s.focus_previous().unwrap();
        // The message field is the last focusable while submit is disabled.
        assert_eq!(Some(&last), s.by_field.get("message"));
    }

    #[test]
    fn focus_preserved_across_rebuild() {
        let mut s = screen();
        let focused = s.focus_next().unwrap();
        fill_validly(&mut s);
        let _ = s.render(); // enables submit, rebuilding the chain
        assert_eq!(s.focus.current_node(), Some(focused));
        assert_eq!(s.focus.len(), 5);
    }

    #[test]
    fn empty_chain_has_no_focus() {
        let mut chain = FocusChain::new();
        assert!(chain.is_empty());
        assert!(chain.focus_next().is_none());
        assert!(chain.focus_previous().is_none());
        assert!(chain.current_node().is_none());
    }

    #[test]
    fn clear_drops_focus() {
        let mut s = screen();
        s.focus_next();
        assert!(s.focus.current_node().is_some());
        s.focus.clear();
        assert!(s.focus.current_node().is_none());
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn new_screen_has_field_per_registry_entry() {
        let s = screen();
        assert!(s.field("firstName").is_some());
        assert!(s.field("lastName").is_some());
        assert!(s.field("email").is_some());
        assert!(s.field("message").is_some());
        assert!(s.field("nickname").is_none());
    }

    #[test]
    fn new_screen_submit_disabled() {
        let s = screen();
        assert!(!s.submit_enabled());
    }

    #[test]
    fn new_screen_needs_first_render() {
        let s = screen();
        assert!(s.needs_render());
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    #[test]
    fn layout_stacks_in_order_with_gaps() {
        let s = screen();
        let ids: Vec<WidgetId> = s.order.clone();
        let mut last_bottom = 0;
        for id in ids {
            let region = s.region_of(id).unwrap();
            assert!(region.y > last_bottom, "regions must not touch");
            last_bottom = region.bottom();
            assert_eq!(region.x, MARGIN_X);
            assert_eq!(region.width, 80 - MARGIN_X * 2);
        }
    }

    #[test]
    fn resize_relayouts() {
        let mut s = screen();
        s.resize(40, 30);
        let first = s.order[0];
        assert_eq!(s.region_of(first).unwrap().width, 40 - MARGIN_X * 2);
    }

    // -----------------------------------------------------------------------
    // apply_edit
    // -----------------------------------------------------------------------

    #[test]
    fn apply_edit_updates_store_and_widget_error() {
        let mut s = screen();
        s.apply_edit("firstName", "");
        assert_eq!(
            s.store().state().error("firstName"),
            Some("First Name is a required field")
        );
        assert_eq!(
            s.field("firstName").unwrap().error(),
            Some("First Name is a required field")
        );

        s.apply_edit("firstName", "Jane");
        assert_eq!(s.store().state().error("firstName"), None);
        assert!(s.field("firstName").unwrap().error().is_none());
    }

    #[test]
    fn apply_edit_syncs_editor_value() {
        let mut s = screen();
        s.apply_edit("lastName", "Doe");
        assert_eq!(s.field("lastName").unwrap().value(), "Doe");
        assert_eq!(s.store().state().value("lastName"), Some("Doe"));
    }

    #[test]
    fn apply_edit_unknown_field_is_noop() {
        let mut s = screen();
        s.apply_edit("nickname", "JD");
        assert_eq!(s.store().state().value("nickname"), None);
    }

    // -----------------------------------------------------------------------
    // Key routing
    // -----------------------------------------------------------------------

    #[test]
    fn handle_key_without_focus_is_silent() {
        let mut s = screen();
        assert!(s.handle_key(KeyEvent::plain(Key::Char('a'))).is_empty());
    }

    #[test]
    fn handle_key_routes_to_focused_field() {
        let mut s = screen();
        s.focus_next(); // firstName
        let envelopes = s.handle_key(KeyEvent::plain(Key::Char('J')));
        assert_eq!(envelopes.len(), 1);
        let edited = envelopes[0].downcast_ref::<ValueEdited>().unwrap();
        assert_eq!(edited.field, "firstName");
        assert_eq!(edited.value, "J");
        assert!(envelopes[0].sender.is_some());
    }

    #[test]
    fn handle_paste_routes_to_focused_field() {
        let mut s = screen();
        s.focus_next();
        s.focus_next(); // lastName
        let envelopes = s.handle_paste("Doe");
        let edited = envelopes[0].downcast_ref::<ValueEdited>().unwrap();
        assert_eq!(edited.field, "lastName");
        assert_eq!(edited.value, "Doe");
    }

    // -----------------------------------------------------------------------
    // Submit gating
    // -----------------------------------------------------------------------

    #[test]
    fn submit_stays_disabled_until_form_valid() {
        let mut s = screen();
        s.apply_edit("firstName", "Jane");
        s.apply_edit("lastName", "Doe");
        s.apply_edit("email", "jane@doe.com");
        let _ = s.render();
        assert!(!s.submit_enabled());
        assert_eq!(s.focus.len(), 4);

        s.apply_edit("message", "Hello there!");
        let _ = s.render();
        assert!(s.submit_enabled());
        assert_eq!(s.focus.len(), 5);
    }

    #[test]
    fn submit_disables_again_when_form_breaks() {
        let mut s = screen();
        fill_validly(&mut s);
        let _ = s.render();
        assert!(s.submit_enabled());

        s.apply_edit("email", "broken");
        let _ = s.render();
        assert!(!s.submit_enabled());
        assert_eq!(s.focus.len(), 4);
    }

    // -----------------------------------------------------------------------
    // Mouse
    // -----------------------------------------------------------------------

    #[test]
    fn click_focuses_hit_field() {
        let mut s = screen();
        let email_id = *s.by_field.get("email").unwrap();
        let region = s.region_of(email_id).unwrap();
        let envelopes = s.click(region.x as u16, region.y as u16);
        assert!(envelopes.is_empty());
        assert_eq!(s.focus.current_node(), Some(email_id));
    }

    #[test]
    fn click_outside_any_widget_does_nothing() {
        let mut s = screen();
        let envelopes = s.click(0, 0);
        assert!(envelopes.is_empty());
        assert!(s.focus.current_node().is_none());
    }

    #[test]
    fn click_disabled_submit_does_not_activate() {
        let mut s = screen();
        let _ = s.render();
        let region = s.region_of(s.submit_id()).unwrap();
        let envelopes = s.click(region.x as u16, (region.y + 1) as u16);
        assert!(envelopes.is_empty());
    }

    #[test]
    fn click_enabled_submit_activates() {
        let mut s = screen();
        fill_validly(&mut s);
        let _ = s.render();
        let region = s.region_of(s.submit_id()).unwrap();
        let envelopes = s.click(region.x as u16, (region.y + 1) as u16);
        assert_eq!(envelopes.len(), 1);
        assert!(envelopes[0].downcast_ref::<SubmitPressed>().is_some());
        assert_eq!(s.focus.current_node(), Some(s.submit_id()));
    }

    // -----------------------------------------------------------------------
    // Render
    // -----------------------------------------------------------------------

    #[test]
    fn render_clears_dirty_flag() {
        let mut s = screen();
        assert!(s.needs_render());
        let _ = s.render();
        assert!(!s.needs_render());
        s.apply_edit("firstName", "J");
        assert!(s.needs_render());
    }

    #[test]
    fn render_paints_labels_and_placeholders() {
        let mut s = FormScreen::new(FieldRegistry::user_form(), 60, 30)
            .with_title("Contact us");
        let surface = s.render();
        let text = crate::testing::snapshot::surface_to_string(surface);
        assert!(text.contains("Contact us"));
        assert!(text.contains("First Name"));
        assert!(text.contains("Please enter a First Name"));
        assert!(text.contains("Please enter a Message"));
        assert!(text.contains("Submit"));
    }

    #[test]
    fn render_shows_inline_error() {
        let mut s = screen();
        s.apply_edit("email", "nope");
        let surface = s.render();
        let text = crate::testing::snapshot::surface_to_string(surface);
        assert!(text.contains("Invalid email format"));
    }
}
