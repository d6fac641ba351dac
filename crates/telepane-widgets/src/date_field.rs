#![forbid(unsafe_code)]

//! The composite date-entry control.
//!
//! A `DateField` owns its sub-controls (field labels, separators, the shared
//! spinner, and for drop-down widgets a toggle button plus calendar overlay)
//! and wires input events through the key router, the focus arbiter, and the
//! change notifier. The server positions the sub-controls individually via
//! [`DateField::set_slot_bounds`] over the closed [`SlotId`] enumeration.
//!
//! All collaborators arrive at construction: the remote peer channel, the
//! suspension guard, the localization inputs, and the document capability
//! (viewport, z-order, document-level events). Document subscriptions are
//! registered only for drop-down widgets and are cancelled on teardown,
//! before the debounce timer could ever outlive the widget.

use crate::WidgetStyle;
use crate::button::Button;
use crate::calendar::{CalendarOverlay, CellActivation};
use crate::date_model::DateModel;
use crate::focus::{FocusArbiter, RollDirection, roll_order, spinner_binding};
use crate::formatter::{FieldFormatter, FieldKind, Localization};
use crate::label::{Label, TextAlign};
use crate::notifier::ChangeNotifier;
use crate::router::{FieldAction, OverlayAction, Route, RouterState, route};
use crate::spinner::Spinner;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use telepane_core::control::{Control, ControlBase, StateFlags};
use telepane_core::document::{DocEvent, DocumentHandle, Subscription};
use telepane_core::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use telepane_core::geometry::Rect;
use telepane_remote::{RemotePeer, SuspensionGuard, WidgetId};

/// The sub-controls the server may position, as a closed enumeration.
///
/// The discriminants are the wire indices of the layout protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SlotId {
    /// The derived weekday label.
    WeekdayField = 0,
    /// The day-of-month label.
    DayField = 1,
    /// The month label.
    MonthField = 2,
    /// The year label.
    YearField = 3,
    /// Separator between weekday and month.
    WeekdaySeparator = 4,
    /// Separator between month and day.
    MonthSeparator = 5,
    /// Separator between day and year.
    YearSeparator = 6,
    /// The shared spinner.
    Spinner = 7,
    /// The drop-down toggle button.
    DropDownButton = 13,
}

impl SlotId {
    /// Decode a wire index.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::WeekdayField),
            1 => Some(Self::DayField),
            2 => Some(Self::MonthField),
            3 => Some(Self::YearField),
            4 => Some(Self::WeekdaySeparator),
            5 => Some(Self::MonthSeparator),
            6 => Some(Self::YearSeparator),
            7 => Some(Self::Spinner),
            13 => Some(Self::DropDownButton),
            _ => None,
        }
    }
}

/// Maximum digits buffered for year input; the fourth digit commits.
const YEAR_FIELD_DIGITS: usize = 4;

/// The composite date-entry widget.
pub struct DateField {
    id: WidgetId,
    style: WidgetStyle,
    formatter: FieldFormatter,
    model: DateModel,
    arbiter: FocusArbiter,
    notifier: ChangeNotifier,

    base: ControlBase,
    weekday_label: Label,
    separator0: Label,
    month_label: Label,
    separator1: Label,
    day_label: Label,
    separator2: Label,
    year_label: Label,
    spinner: Spinner,
    drop_down_button: Option<Button>,
    /// Created on first open; only drop-down widgets ever get one.
    overlay: Option<CalendarOverlay>,

    /// Uncommitted free-text year input, shown in the year label until it
    /// is committed or discarded.
    year_buffer: Option<String>,
    focused: bool,

    doc: Rc<dyn DocumentHandle>,
    doc_queue: Rc<RefCell<VecDeque<DocEvent>>>,
    subscriptions: Vec<Subscription>,
}

impl DateField {
    /// Construct the widget with its injected collaborators.
    #[must_use]
    pub fn new(
        id: WidgetId,
        style: WidgetStyle,
        localization: Localization,
        peer: Rc<dyn RemotePeer>,
        guard: Rc<dyn SuspensionGuard>,
        doc: Rc<dyn DocumentHandle>,
    ) -> Self {
        let model = DateModel::new();
        let numeric_month = style.contains(WidgetStyle::MEDIUM);
        let formatter = FieldFormatter::new(localization, numeric_month);

        let long = style.contains(WidgetStyle::LONG);
        let medium = style.contains(WidgetStyle::MEDIUM);
        let short = style.contains(WidgetStyle::SHORT);
        let drop_down = style.contains(WidgetStyle::DROP_DOWN);

        let mut weekday_label = Label::new(formatter.format(FieldKind::Weekday, &model));
        weekday_label.set_visible(long);
        let mut separator0 = Label::new(",");
        separator0.set_visible(long);

        let month_align = if medium { TextAlign::Right } else { TextAlign::Center };
        let month_label =
            Label::new(formatter.format(FieldKind::Month, &model)).with_align(month_align);

        let separator_glyph = formatter.localization().date_separator.clone();
        let mut separator1 = Label::new(separator_glyph.clone());
        separator1.set_visible(medium);

        let mut day_label =
            Label::new(formatter.format(FieldKind::Day, &model)).with_align(TextAlign::Right);
        day_label.set_visible(!short);

        let separator2 = Label::new(if medium { separator_glyph } else { ",".to_owned() });

        let year_label =
            Label::new(formatter.format(FieldKind::Year, &model)).with_align(TextAlign::Right);

        let mut spinner = Spinner::default();
        spinner.set_visible(!drop_down);

        let order = roll_order(formatter.localization().date_pattern, style);
        let initial = order
            .into_iter()
            .find(|k| *k != FieldKind::Day || !short)
            .unwrap_or(FieldKind::Month);
        let arbiter = FocusArbiter::new(initial);
        let (min, max, value) = spinner_binding(initial, &model);
        spinner.rebind(min, max, value);

        let doc_queue: Rc<RefCell<VecDeque<DocEvent>>> = Rc::new(RefCell::new(VecDeque::new()));
        let mut subscriptions = Vec::new();
        let drop_down_button = if drop_down {
            let queue = Rc::clone(&doc_queue);
            subscriptions.push(
                doc.events()
                    .subscribe(move |event| queue.borrow_mut().push_back(*event)),
            );
            Some(Button::new())
        } else {
            None
        };

        Self {
            id,
            style,
            formatter,
            model,
            arbiter,
            notifier: ChangeNotifier::new(id, peer, guard),
            base: ControlBase::new(),
            weekday_label,
            separator0,
            month_label,
            separator1,
            day_label,
            separator2,
            year_label,
            spinner,
            drop_down_button,
            overlay: None,
            year_buffer: None,
            focused: false,
            doc,
            doc_queue,
            subscriptions,
        }
    }

    // --- Accessors ---

    /// The widget's remote identity.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Style flags fixed at construction.
    #[must_use]
    pub fn style(&self) -> WidgetStyle {
        self.style
    }

    /// The logical date model.
    #[must_use]
    pub fn model(&self) -> &DateModel {
        &self.model
    }

    /// The currently active editable field.
    #[must_use]
    pub fn active_field(&self) -> FieldKind {
        self.arbiter.active()
    }

    /// The shared spinner.
    #[must_use]
    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    /// Display text of a field.
    #[must_use]
    pub fn display_text(&self, kind: FieldKind) -> &str {
        self.label(kind).text()
    }

    /// The calendar overlay, if it has been created.
    #[must_use]
    pub fn overlay(&self) -> Option<&CalendarOverlay> {
        self.overlay.as_ref()
    }

    /// Whether the drop-down overlay is currently shown.
    #[must_use]
    pub fn dropdown_open(&self) -> bool {
        self.overlay.as_ref().is_some_and(CalendarOverlay::is_open)
    }

    /// Whether the widget holds input focus.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }

    // --- Event handling ---

    /// Handle an input event routed to this widget.
    ///
    /// Returns `true` when the event was consumed; the caller must not
    /// propagate a consumed event further.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Focus(gained) => {
                if *gained {
                    self.on_focus_in();
                } else {
                    self.on_focus_out();
                }
                true
            }
        }
    }

    /// Advance time-driven state: queued document events first, then the
    /// completion debounce timer.
    ///
    /// The host loop calls this once per turn, after synchronous input
    /// dispatch, so a timer firing is always ordered behind the input that
    /// scheduled it.
    pub fn tick(&mut self, elapsed: Duration) {
        let events: Vec<DocEvent> = self.doc_queue.borrow_mut().drain(..).collect();
        for event in events {
            self.on_doc_event(event);
        }
        self.notifier.tick(elapsed);
    }

    /// Position a sub-control; called by the server-driven layout.
    pub fn set_slot_bounds(&mut self, slot: SlotId, bounds: Rect) {
        match slot {
            SlotId::WeekdayField => self.weekday_label.set_bounds(bounds),
            SlotId::DayField => self.day_label.set_bounds(bounds),
            SlotId::MonthField => self.month_label.set_bounds(bounds),
            SlotId::YearField => self.year_label.set_bounds(bounds),
            SlotId::WeekdaySeparator => self.separator0.set_bounds(bounds),
            SlotId::MonthSeparator => self.separator1.set_bounds(bounds),
            SlotId::YearSeparator => self.separator2.set_bounds(bounds),
            SlotId::Spinner => self.spinner.set_bounds(bounds),
            SlotId::DropDownButton => {
                if let Some(button) = &mut self.drop_down_button {
                    button.set_bounds(bounds);
                }
            }
        }
    }

    // --- Remote-initiated setters ---
    //
    // These bypass key routing and focus navigation, and never produce an
    // outgoing notification: the server already knows the value it set.

    /// Server-initiated year change.
    pub fn set_year(&mut self, year: i32) {
        self.model.set_year(year);
        self.after_remote_update();
    }

    /// Server-initiated month change (0-based).
    pub fn set_month(&mut self, month: u32) {
        self.model.set_month(month);
        self.after_remote_update();
    }

    /// Server-initiated day change.
    pub fn set_day(&mut self, day: u32) {
        self.model.set_day(day);
        self.after_remote_update();
    }

    /// Make `slot` the active field, as a pointer press on its label would.
    pub fn activate(&mut self, slot: FieldKind) {
        if !self.arbiter.is_active(slot) {
            self.commit_pending_year();
        }
        if let Some(previous) = self.arbiter.activate(slot) {
            self.apply_activation(previous);
        }
    }

    /// Toggle the drop-down overlay. No-op without the drop-down style.
    pub fn toggle_dropdown(&mut self) -> bool {
        if !self.style.contains(WidgetStyle::DROP_DOWN) {
            return false;
        }
        if self.dropdown_open() {
            if let Some(overlay) = &mut self.overlay {
                overlay.close();
            }
            if self.focused {
                let active = self.arbiter.active();
                self.label_mut(active).add_state(StateFlags::SELECTED);
            }
        } else {
            let seed = self.model.date();
            let host = self.base.bounds();
            let viewport = self.doc.viewport();
            let top_z = self.doc.top_z_index();
            let overlay = self
                .overlay
                .get_or_insert_with(|| CalendarOverlay::new(seed));
            overlay.open(host, viewport, top_z, seed);
            let active = self.arbiter.active();
            self.label_mut(active).remove_state(StateFlags::SELECTED);
        }
        true
    }

    /// Propagate a presentation flag to every sub-control.
    pub fn add_state_all(&mut self, flag: StateFlags) {
        self.base.add_state(flag);
        self.for_each_control(|c| c.add_state(flag));
    }

    /// Remove a presentation flag from every sub-control.
    pub fn remove_state_all(&mut self, flag: StateFlags) {
        self.base.remove_state(flag);
        self.for_each_control(|c| c.remove_state(flag));
    }

    /// Tear the widget down: cancel the pending completion timer and every
    /// document subscription. Nothing fires after this returns.
    pub fn dispose(&mut self) {
        self.notifier.cancel();
        for mut subscription in self.subscriptions.drain(..) {
            subscription.cancel();
        }
        if let Some(overlay) = &mut self.overlay {
            overlay.close();
        }
    }

    // --- Internals ---

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let state = if self.dropdown_open() {
            RouterState::Open
        } else {
            RouterState::Closed
        };
        match route(key, state) {
            Route::Field(action) => {
                self.apply_field_action(action);
                true
            }
            Route::Overlay(OverlayAction::Close) => self.toggle_dropdown(),
            Route::Overlay(OverlayAction::SyncHighlight) => {
                // The overlay's own keyboard handling runs first; the host
                // then adopts whatever it highlights.
                if let Some(overlay) = &mut self.overlay {
                    overlay.handle_key(key);
                }
                self.sync_from_overlay();
                true
            }
            Route::Ignored => false,
        }
    }

    fn apply_field_action(&mut self, action: FieldAction) {
        match action {
            FieldAction::RollPrevious => self.roll(RollDirection::Previous),
            FieldAction::RollNext => self.roll(RollDirection::Next),
            FieldAction::SpinUp => {
                self.commit_pending_year();
                if self.spinner.step_up() {
                    self.on_spinner_changed();
                }
            }
            FieldAction::SpinDown => {
                self.commit_pending_year();
                if self.spinner.step_down() {
                    self.on_spinner_changed();
                }
            }
            FieldAction::Digit(digit) => self.type_digit(digit),
            FieldAction::JumpToMin => {
                if self.spinner.jump_to_min() {
                    self.on_spinner_changed();
                }
                self.arbiter.mark_fresh();
            }
            FieldAction::JumpToMax => {
                if self.spinner.jump_to_max() {
                    self.on_spinner_changed();
                }
                self.arbiter.mark_fresh();
            }
        }
    }

    fn roll(&mut self, direction: RollDirection) {
        self.commit_pending_year();
        let order = roll_order(self.formatter.localization().date_pattern, self.style);
        let day_visible = self.day_label.visible();
        if let Some(previous) = self.arbiter.roll(direction, order, |kind| {
            kind != FieldKind::Day || day_visible
        }) {
            self.apply_activation(previous);
        }
    }

    fn apply_activation(&mut self, previous: FieldKind) {
        self.label_mut(previous).remove_state(StateFlags::SELECTED);
        let active = self.arbiter.active();
        let (min, max, value) = spinner_binding(active, &self.model);
        self.spinner.rebind(min, max, value);
        self.label_mut(active).add_state(StateFlags::SELECTED);
        #[cfg(feature = "tracing")]
        tracing::trace!(?active, "field activated");
    }

    /// Apply a spinner value change to the model and re-render.
    ///
    /// A month or year change can clamp the day; the clamp itself is silent,
    /// only the corrected value is sent.
    fn on_spinner_changed(&mut self) {
        let active = self.arbiter.active();
        let old_text = self.label(active).text().to_owned();
        match active {
            FieldKind::Day => {
                self.model.set_day(self.spinner.value().unsigned_abs());
            }
            FieldKind::Month => {
                self.model.set_month((self.spinner.value() - 1).unsigned_abs());
            }
            FieldKind::Year => {
                self.model.set_year(self.spinner.value());
                self.year_buffer = None;
            }
            FieldKind::Weekday => {}
        }
        self.refresh_texts();
        if self.label(active).text() != old_text {
            self.send_changes();
        }
    }

    fn type_digit(&mut self, digit: u32) {
        let active = self.arbiter.active();
        let fresh = self.arbiter.fresh_edit();
        match active {
            FieldKind::Day | FieldKind::Month => {
                // Buffer the numeric value, not the display text: the month
                // label may show a localized name.
                let current = match active {
                    FieldKind::Day => self.model.day(),
                    _ => self.model.month() + 1,
                };
                let mut value = digit as i32;
                if current < 10 && !fresh {
                    value = (current * 10 + digit) as i32;
                }
                // Out of range: restart the buffer from the typed digit.
                if !self.spinner.range().accepts(value) {
                    value = digit as i32;
                }
                if self.spinner.range().accepts(value) && self.spinner.set_value(value) {
                    self.on_spinner_changed();
                }
            }
            FieldKind::Year => {
                let current = self
                    .year_buffer
                    .clone()
                    .unwrap_or_else(|| self.year_label.text().to_owned());
                let text = if current.len() < YEAR_FIELD_DIGITS && !fresh {
                    format!("{current}{digit}")
                } else {
                    digit.to_string()
                };
                self.year_label.set_text(text.clone());
                let complete = text.len() == YEAR_FIELD_DIGITS;
                self.year_buffer = Some(text);
                if complete {
                    self.commit_pending_year();
                }
            }
            FieldKind::Weekday => {}
        }
        self.arbiter.consume_fresh();
    }

    /// Commit pending free-text year input.
    ///
    /// Rejected or unchanged input restores the last valid year's display;
    /// an accepted change flows through the model (clamping the day) and is
    /// sent like any other committed mutation.
    fn commit_pending_year(&mut self) {
        let Some(buffer) = self.year_buffer.take() else {
            return;
        };
        if self.model.commit_year_text(&buffer) {
            if self.arbiter.is_active(FieldKind::Year) {
                self.spinner.set_value(self.model.last_valid_year());
            }
            self.refresh_texts();
            self.send_changes();
        } else {
            self.year_label
                .set_text(self.model.last_valid_year().to_string());
        }
    }

    fn sync_from_overlay(&mut self) {
        let Some(highlight) = self.overlay.as_ref().map(CalendarOverlay::highlight) else {
            return;
        };
        self.model.set_date(highlight);
        self.rebind_spinner();
        self.refresh_texts();
        self.send_changes();
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_mouse_down(mouse.x, mouse.y),
            MouseEventKind::Click(MouseButton::Left) => self.on_click(mouse.x, mouse.y),
            MouseEventKind::Moved => {
                self.on_pointer_moved(mouse.x, mouse.y);
                false
            }
            MouseEventKind::ScrollUp if self.focused && !self.dropdown_open() => {
                self.apply_field_action(FieldAction::SpinUp);
                true
            }
            MouseEventKind::ScrollDown if self.focused && !self.dropdown_open() => {
                self.apply_field_action(FieldAction::SpinDown);
                true
            }
            _ => false,
        }
    }

    fn on_mouse_down(&mut self, x: i32, y: i32) -> bool {
        // Overlay children swallow their presses before the host's general
        // handling; the actual selection happens on click.
        if let Some(overlay) = &self.overlay
            && overlay.is_open()
            && overlay.cell_at(x, y).is_some()
        {
            return true;
        }
        let (local_x, local_y) = self.to_local(x, y);
        if self.dropdown_open() {
            let on_button = self
                .drop_down_button
                .as_ref()
                .is_some_and(|b| b.hit(local_x, local_y));
            if !on_button {
                self.toggle_dropdown();
                return true;
            }
            return false;
        }
        for slot in [FieldKind::Month, FieldKind::Day, FieldKind::Year] {
            if self.label(slot).hit(local_x, local_y) {
                self.activate(slot);
                return true;
            }
        }
        false
    }

    fn on_click(&mut self, x: i32, y: i32) -> bool {
        if let Some(overlay) = &mut self.overlay
            && overlay.is_open()
            && let Some(cell) = overlay.cell_at(x, y)
        {
            match overlay.activate_cell(cell) {
                CellActivation::Selected(date) => {
                    self.model.set_date(date);
                    self.rebind_spinner();
                    self.refresh_texts();
                    self.focused = true;
                    self.toggle_dropdown();
                    self.send_changes();
                }
                CellActivation::Navigated => {}
            }
            return true;
        }
        let (local_x, local_y) = self.to_local(x, y);
        if self
            .drop_down_button
            .as_ref()
            .is_some_and(|b| b.hit(local_x, local_y))
        {
            self.toggle_dropdown();
            return true;
        }
        false
    }

    fn on_pointer_moved(&mut self, x: i32, y: i32) {
        let (local_x, local_y) = self.to_local(x, y);
        if let Some(button) = &mut self.drop_down_button {
            let hover = button.hit(local_x, local_y);
            button.set_hover(hover);
        }
    }

    fn on_focus_in(&mut self) {
        self.focused = true;
        let active = self.arbiter.active();
        self.label_mut(active).add_state(StateFlags::SELECTED);
        self.arbiter.mark_fresh();
    }

    fn on_focus_out(&mut self) {
        self.focused = false;
        if self.arbiter.is_active(FieldKind::Year) {
            self.commit_pending_year();
        }
        let active = self.arbiter.active();
        self.label_mut(active).remove_state(StateFlags::SELECTED);
    }

    fn on_doc_event(&mut self, event: DocEvent) {
        match event {
            DocEvent::WindowBlur | DocEvent::VisibilityChanged(false) => {
                if self.dropdown_open() {
                    self.toggle_dropdown();
                }
            }
            DocEvent::VisibilityChanged(true) => {}
            DocEvent::PointerDown { x, y } => {
                if self.dropdown_open() {
                    let over_overlay = self
                        .overlay
                        .as_ref()
                        .is_some_and(|overlay| overlay.hit(x, y));
                    let (local_x, local_y) = self.to_local(x, y);
                    let over_button = self
                        .drop_down_button
                        .as_ref()
                        .is_some_and(|b| b.hit(local_x, local_y));
                    if !over_overlay && !over_button {
                        self.toggle_dropdown();
                    }
                }
            }
        }
    }

    fn after_remote_update(&mut self) {
        self.year_buffer = None;
        self.rebind_spinner();
        self.refresh_texts();
    }

    /// Rebind the spinner to the active field's fresh range and value.
    fn rebind_spinner(&mut self) {
        let (min, max, value) = spinner_binding(self.arbiter.active(), &self.model);
        self.spinner.rebind(min, max, value);
    }

    fn refresh_texts(&mut self) {
        let weekday = self.formatter.format(FieldKind::Weekday, &self.model);
        let day = self.formatter.format(FieldKind::Day, &self.model);
        let month = self.formatter.format(FieldKind::Month, &self.model);
        let year = self
            .year_buffer
            .clone()
            .unwrap_or_else(|| self.formatter.format(FieldKind::Year, &self.model));
        self.weekday_label.set_text(weekday);
        self.day_label.set_text(day);
        self.month_label.set_text(month);
        self.year_label.set_text(year);
    }

    fn send_changes(&mut self) {
        self.notifier.notify_changed(self.model.date());
    }

    fn label(&self, kind: FieldKind) -> &Label {
        match kind {
            FieldKind::Weekday => &self.weekday_label,
            FieldKind::Day => &self.day_label,
            FieldKind::Month => &self.month_label,
            FieldKind::Year => &self.year_label,
        }
    }

    fn label_mut(&mut self, kind: FieldKind) -> &mut Label {
        match kind {
            FieldKind::Weekday => &mut self.weekday_label,
            FieldKind::Day => &mut self.day_label,
            FieldKind::Month => &mut self.month_label,
            FieldKind::Year => &mut self.year_label,
        }
    }

    fn to_local(&self, x: i32, y: i32) -> (i32, i32) {
        let bounds = self.base.bounds();
        (x - bounds.x, y - bounds.y)
    }

    fn for_each_control(&mut self, mut apply: impl FnMut(&mut dyn Control)) {
        apply(&mut self.weekday_label);
        apply(&mut self.separator0);
        apply(&mut self.month_label);
        apply(&mut self.separator1);
        apply(&mut self.day_label);
        apply(&mut self.separator2);
        apply(&mut self.year_label);
        apply(&mut self.spinner);
        if let Some(button) = &mut self.drop_down_button {
            apply(button);
        }
        if let Some(overlay) = &mut self.overlay {
            apply(overlay);
        }
    }
}

impl Control for DateField {
    fn bounds(&self) -> Rect {
        self.base.bounds()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.base.set_bounds(bounds);
    }

    fn visible(&self) -> bool {
        self.base.visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.base.set_visible(visible);
    }

    fn state(&self) -> StateFlags {
        self.base.state()
    }

    fn add_state(&mut self, flag: StateFlags) {
        self.base.add_state(flag);
    }

    fn remove_state(&mut self, flag: StateFlags) {
        self.base.remove_state(flag);
    }
}

impl Drop for DateField {
    fn drop(&mut self) {
        // Cancel-before-dispose ordering: no timer or listener outlives us.
        self.dispose();
    }
}

impl std::fmt::Debug for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateField")
            .field("id", &self.id)
            .field("style", &self.style)
            .field("date", &self.model.date())
            .field("active", &self.arbiter.active())
            .field("dropdown_open", &self.dropdown_open())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarCell;
    use crate::date_model::CivilDate;
    use crate::formatter::DatePattern;
    use crate::notifier::{COMPLETION_DELAY, SELECTION_EVENT};
    use telepane_core::document::ClientDocument;
    use telepane_core::event::KeyCode;
    use telepane_remote::recording::RecordingPeer;
    use telepane_remote::{PropertyValue, UpdateGuard};

    struct Fixture {
        field: DateField,
        peer: Rc<RecordingPeer>,
        guard: UpdateGuard,
        doc: Rc<ClientDocument>,
    }

    fn fixture(style: WidgetStyle, localization: Localization) -> Fixture {
        let peer = Rc::new(RecordingPeer::new());
        let guard = UpdateGuard::new();
        let doc = Rc::new(ClientDocument::new(Rect::new(0, 0, 800, 600)));
        let field = DateField::new(
            WidgetId(7),
            style,
            localization,
            Rc::clone(&peer) as Rc<dyn RemotePeer>,
            Rc::new(guard.clone()) as Rc<dyn SuspensionGuard>,
            Rc::clone(&doc) as Rc<dyn DocumentHandle>,
        );
        Fixture {
            field,
            peer,
            guard,
            doc,
        }
    }

    fn press(field: &mut DateField, code: KeyCode) -> bool {
        field.handle_event(&Event::Key(KeyEvent::new(code)))
    }

    fn focus(field: &mut DateField) {
        field.handle_event(&Event::Focus(true));
    }

    #[test]
    fn test_initial_display() {
        let f = fixture(WidgetStyle::MEDIUM, Localization::english());
        assert_eq!(f.field.display_text(FieldKind::Day), "01");
        assert_eq!(f.field.display_text(FieldKind::Month), "01");
        assert_eq!(f.field.display_text(FieldKind::Year), "1970");
        assert_eq!(f.field.display_text(FieldKind::Weekday), "Thursday");
        assert!(f.peer.log().is_empty());
    }

    #[test]
    fn test_initial_active_field_follows_roll_order() {
        // Medium format orders year first; month-day-year starts on month.
        let medium = fixture(WidgetStyle::MEDIUM, Localization::english());
        assert_eq!(medium.field.active_field(), FieldKind::Year);

        let mdy = fixture(
            WidgetStyle::LONG,
            Localization::english_with_pattern(DatePattern::MonthDayYear),
        );
        assert_eq!(mdy.field.active_field(), FieldKind::Month);
        assert_eq!(mdy.field.spinner().range().min(), 1);
        assert_eq!(mdy.field.spinner().range().max(), 12);
    }

    #[test]
    fn test_roll_rebinds_spinner() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        focus(&mut f.field);
        assert_eq!(f.field.active_field(), FieldKind::Day);
        press(&mut f.field, KeyCode::Right);
        assert_eq!(f.field.active_field(), FieldKind::Month);
        assert_eq!(f.field.spinner().range().max(), 12);
        assert_eq!(f.field.spinner().value(), 1);
        press(&mut f.field, KeyCode::Left);
        assert_eq!(f.field.active_field(), FieldKind::Day);
        assert_eq!(f.field.spinner().range().max(), 31);
    }

    #[test]
    fn test_spin_up_on_month_pushes_properties() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        focus(&mut f.field);
        press(&mut f.field, KeyCode::Right);
        press(&mut f.field, KeyCode::Up);
        assert_eq!(f.field.model().month(), 1);
        assert_eq!(f.field.model().day(), 1);
        assert_eq!(f.field.display_text(FieldKind::Month), "02");
        assert_eq!(f.peer.sets_of("month"), vec![PropertyValue::Int(1)]);
        assert_eq!(f.peer.sets_of("day"), vec![PropertyValue::Int(1)]);
        assert_eq!(f.peer.sets_of("year"), vec![PropertyValue::Int(1970)]);
    }

    #[test]
    fn test_spin_wraps_at_range_edges() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        focus(&mut f.field);
        press(&mut f.field, KeyCode::Down);
        // Day 1 wraps backward to the month's last day.
        assert_eq!(f.field.model().day(), 31);
        press(&mut f.field, KeyCode::Up);
        assert_eq!(f.field.model().day(), 1);
    }

    #[test]
    fn test_home_and_end_jump() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        focus(&mut f.field);
        press(&mut f.field, KeyCode::End);
        assert_eq!(f.field.model().day(), 31);
        press(&mut f.field, KeyCode::Home);
        assert_eq!(f.field.model().day(), 1);
    }

    #[test]
    fn test_digit_entry_combines_two_digits() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        focus(&mut f.field);
        // First digit after focus replaces; the second appends.
        press(&mut f.field, KeyCode::Char('1'));
        assert_eq!(f.field.model().day(), 1);
        press(&mut f.field, KeyCode::Char('5'));
        assert_eq!(f.field.model().day(), 15);
        // "155" is out of range, so the buffer restarts from "5".
        press(&mut f.field, KeyCode::Char('5'));
        assert_eq!(f.field.model().day(), 5);
    }

    #[test]
    fn test_digit_entry_combines_on_named_month() {
        // The long format shows month names, so the buffer must track the
        // numeric month rather than the display text.
        let mut f = fixture(WidgetStyle::LONG, Localization::english());
        focus(&mut f.field);
        assert_eq!(f.field.active_field(), FieldKind::Month);
        press(&mut f.field, KeyCode::Char('1'));
        assert_eq!(f.field.display_text(FieldKind::Month), "January");
        press(&mut f.field, KeyCode::Char('2'));
        assert_eq!(f.field.model().month(), 11);
        assert_eq!(f.field.display_text(FieldKind::Month), "December");
    }

    #[test]
    fn test_month_change_clamps_day() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        f.field.set_day(31);
        f.peer.clear();
        focus(&mut f.field);
        press(&mut f.field, KeyCode::Right);
        press(&mut f.field, KeyCode::Up);
        // January 31 plus one month clamps to February 28 (1970).
        assert_eq!(f.field.model().month(), 1);
        assert_eq!(f.field.model().day(), 28);
        assert_eq!(f.field.display_text(FieldKind::Day), "28");
        let days = f.peer.sets_of("day");
        assert_eq!(days.last(), Some(&PropertyValue::Int(28)));
    }

    #[test]
    fn test_two_digit_year_disambiguation() {
        let mut f = fixture(WidgetStyle::MEDIUM, Localization::english());
        focus(&mut f.field);
        assert_eq!(f.field.active_field(), FieldKind::Year);
        press(&mut f.field, KeyCode::Char('0'));
        press(&mut f.field, KeyCode::Char('7'));
        assert_eq!(f.field.display_text(FieldKind::Year), "07");
        // Rolling away commits the buffered text.
        press(&mut f.field, KeyCode::Right);
        assert_eq!(f.field.model().year(), 2007);
        press(&mut f.field, KeyCode::Left);
        press(&mut f.field, KeyCode::Char('9'));
        press(&mut f.field, KeyCode::Char('5'));
        press(&mut f.field, KeyCode::Right);
        assert_eq!(f.field.model().year(), 1995);
    }

    #[test]
    fn test_four_digit_year_commits_immediately() {
        let mut f = fixture(WidgetStyle::MEDIUM, Localization::english());
        focus(&mut f.field);
        for digit in ['2', '0', '2', '4'] {
            press(&mut f.field, KeyCode::Char(digit));
        }
        assert_eq!(f.field.model().year(), 2024);
        assert_eq!(f.field.display_text(FieldKind::Year), "2024");
        assert_eq!(f.peer.sets_of("year"), vec![PropertyValue::Int(2024)]);
    }

    #[test]
    fn test_rejected_year_restores_last_valid() {
        let mut f = fixture(WidgetStyle::MEDIUM, Localization::english());
        focus(&mut f.field);
        for digit in ['1', '2', '3'] {
            press(&mut f.field, KeyCode::Char(digit));
        }
        assert_eq!(f.field.display_text(FieldKind::Year), "123");
        press(&mut f.field, KeyCode::Right);
        assert_eq!(f.field.model().year(), 1970);
        assert_eq!(f.field.display_text(FieldKind::Year), "1970");
        assert!(f.peer.sets_of("year").is_empty());
    }

    #[test]
    fn test_short_style_roll_skips_day() {
        let mut f = fixture(
            WidgetStyle::SHORT,
            Localization::english_with_pattern(DatePattern::MonthDayYear),
        );
        focus(&mut f.field);
        assert_eq!(f.field.active_field(), FieldKind::Month);
        press(&mut f.field, KeyCode::Right);
        assert_eq!(f.field.active_field(), FieldKind::Year);
        press(&mut f.field, KeyCode::Right);
        assert_eq!(f.field.active_field(), FieldKind::Month);
    }

    #[test]
    fn test_completion_debounced_to_single_event() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        f.peer.listen(SELECTION_EVENT);
        focus(&mut f.field);
        press(&mut f.field, KeyCode::Up);
        f.field.tick(Duration::from_millis(60));
        press(&mut f.field, KeyCode::Up);
        press(&mut f.field, KeyCode::Up);
        f.field.tick(Duration::from_millis(60));
        assert_eq!(f.peer.notify_count(SELECTION_EVENT), 0);
        f.field.tick(COMPLETION_DELAY);
        assert_eq!(f.peer.notify_count(SELECTION_EVENT), 1);
        // Quiet afterwards.
        f.field.tick(COMPLETION_DELAY);
        assert_eq!(f.peer.notify_count(SELECTION_EVENT), 1);
    }

    #[test]
    fn test_no_completion_timer_without_listener() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        focus(&mut f.field);
        press(&mut f.field, KeyCode::Up);
        f.field.tick(Duration::from_secs(1));
        assert_eq!(f.peer.notify_count(SELECTION_EVENT), 0);
        // Property pushes still happen eagerly.
        assert!(!f.peer.sets_of("day").is_empty());
    }

    #[test]
    fn test_suspended_swallows_all_traffic() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        f.peer.listen(SELECTION_EVENT);
        focus(&mut f.field);
        let scope = f.guard.suspend();
        press(&mut f.field, KeyCode::Up);
        f.field.tick(Duration::from_secs(1));
        drop(scope);
        assert!(f.peer.log().is_empty());
        // Local state still advanced.
        assert_eq!(f.field.model().day(), 2);
    }

    #[test]
    fn test_remote_setters_are_silent_and_idempotent() {
        let mut f = fixture(WidgetStyle::MEDIUM, Localization::english());
        f.field.set_year(2001);
        f.field.set_month(10);
        f.field.set_day(24);
        f.field.set_day(24);
        assert_eq!(f.field.model().date(), CivilDate::new(2001, 10, 24));
        assert_eq!(f.field.display_text(FieldKind::Day), "24");
        assert_eq!(f.field.display_text(FieldKind::Year), "2001");
        assert!(f.peer.log().is_empty());
    }

    #[test]
    fn test_remote_setter_rebinds_active_spinner() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        assert_eq!(f.field.active_field(), FieldKind::Day);
        f.field.set_month(1);
        assert_eq!(f.field.spinner().range().max(), 28);
        assert_eq!(f.field.spinner().value(), 1);
    }

    fn open_fixture() -> Fixture {
        let mut f = fixture(
            WidgetStyle::MEDIUM | WidgetStyle::DROP_DOWN,
            Localization::english(),
        );
        f.field.set_bounds(Rect::new(100, 100, 140, 20));
        f.field
            .set_slot_bounds(SlotId::DropDownButton, Rect::new(120, 0, 20, 20));
        f.field.toggle_dropdown();
        f
    }

    #[test]
    fn test_dropdown_opens_below_host() {
        let f = open_fixture();
        assert!(f.field.dropdown_open());
        let overlay = match f.field.overlay() {
            Some(overlay) => overlay,
            None => panic!("overlay not created"),
        };
        assert_eq!(overlay.bounds().x, 100);
        assert_eq!(overlay.bounds().y, 120);
    }

    #[test]
    fn test_dropdown_click_selects_day_and_closes() {
        let mut f = open_fixture();
        // Locate the cell for January 15 by scanning the grid.
        let overlay = match f.field.overlay() {
            Some(overlay) => overlay,
            None => panic!("overlay not created"),
        };
        let bounds = overlay.bounds();
        let mut target = None;
        for y in bounds.top()..bounds.bottom() {
            for x in bounds.left()..bounds.right() {
                if let Some(CalendarCell::Day(date)) = overlay.cell_at(x, y)
                    && date == CivilDate::new(1970, 0, 15)
                {
                    target = Some((x, y));
                }
            }
        }
        let (x, y) = match target {
            Some(point) => point,
            None => panic!("day cell not found"),
        };
        f.field
            .handle_event(&Event::Mouse(MouseEvent::new(
                MouseEventKind::Down(MouseButton::Left),
                x,
                y,
            )));
        f.field
            .handle_event(&Event::Mouse(MouseEvent::new(
                MouseEventKind::Click(MouseButton::Left),
                x,
                y,
            )));
        assert!(!f.field.dropdown_open());
        assert_eq!(f.field.model().day(), 15);
        assert_eq!(f.field.display_text(FieldKind::Day), "15");
        assert_eq!(f.peer.sets_of("day"), vec![PropertyValue::Int(15)]);
    }

    #[test]
    fn test_escape_closes_dropdown() {
        let mut f = open_fixture();
        assert!(press(&mut f.field, KeyCode::Escape));
        assert!(!f.field.dropdown_open());
    }

    #[test]
    fn test_arrow_keys_track_overlay_highlight() {
        let mut f = open_fixture();
        press(&mut f.field, KeyCode::Down);
        assert!(f.field.dropdown_open());
        assert_eq!(f.field.model().day(), 8);
        press(&mut f.field, KeyCode::Right);
        assert_eq!(f.field.model().day(), 9);
    }

    #[test]
    fn test_outside_pointer_down_closes_dropdown() {
        let mut f = open_fixture();
        f.doc
            .events()
            .emit(&DocEvent::PointerDown { x: 700, y: 500 });
        f.field.tick(Duration::ZERO);
        assert!(!f.field.dropdown_open());
    }

    #[test]
    fn test_window_blur_closes_dropdown() {
        let mut f = open_fixture();
        f.doc.events().emit(&DocEvent::WindowBlur);
        f.field.tick(Duration::ZERO);
        assert!(!f.field.dropdown_open());
    }

    #[test]
    fn test_pointer_down_inside_overlay_keeps_it_open() {
        let mut f = open_fixture();
        let bounds = match f.field.overlay() {
            Some(overlay) => overlay.bounds(),
            None => panic!("overlay not created"),
        };
        f.doc.events().emit(&DocEvent::PointerDown {
            x: bounds.x + 5,
            y: bounds.y + 5,
        });
        f.field.tick(Duration::ZERO);
        assert!(f.field.dropdown_open());
    }

    #[test]
    fn test_dispose_cancels_subscriptions_and_timer() {
        let mut f = open_fixture();
        f.peer.listen(SELECTION_EVENT);
        focus(&mut f.field);
        press(&mut f.field, KeyCode::Escape);
        press(&mut f.field, KeyCode::Up);
        assert_eq!(f.doc.events().subscriber_count(), 1);
        f.field.dispose();
        assert_eq!(f.doc.events().subscriber_count(), 0);
        f.field.tick(Duration::from_secs(1));
        assert_eq!(f.peer.notify_count(SELECTION_EVENT), 0);
    }

    #[test]
    fn test_slot_id_round_trip() {
        for index in [0u8, 1, 2, 3, 4, 5, 6, 7, 13] {
            let slot = match SlotId::from_index(index) {
                Some(slot) => slot,
                None => panic!("slot index {index} must decode"),
            };
            assert_eq!(slot as u8, index);
        }
        assert_eq!(SlotId::from_index(8), None);
        assert_eq!(SlotId::from_index(14), None);
    }

    #[test]
    fn test_focus_gain_selects_active_label() {
        let mut f = fixture(
            WidgetStyle::MEDIUM,
            Localization::english_with_pattern(DatePattern::DayMonthYear),
        );
        focus(&mut f.field);
        let day_state = f.field.label(FieldKind::Day).state();
        assert!(day_state.contains(StateFlags::SELECTED));
        f.field.handle_event(&Event::Focus(false));
        let day_state = f.field.label(FieldKind::Day).state();
        assert!(!day_state.contains(StateFlags::SELECTED));
    }
}
