use crate::gui::menu::Point;
use gtk::gdk;
use gtk::glib;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// A press shorter than this is an ordinary click, not a summon.
pub const HOLD_THRESHOLD_MS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldEvent {
    /// The hold threshold elapsed with the button still down.
    Summon(Point),
    /// The button came back up before the threshold.
    ClickThrough,
    /// The button came up after a summon, ending the gesture.
    Released,
}

/// Right-button hold recognizer. `install` attaches a [`gtk::GestureClick`]
/// to the overlay widget and arms a one-shot timer on press; `uninstall`
/// detaches it again. Both are idempotent, so show/hide paths can call them
/// without tracking whether they already did.
#[derive(Default)]
pub struct HoldDetector {
    attached: Option<(gtk::GestureClick, gtk::Widget)>,
    pending: Rc<RefCell<Option<glib::SourceId>>>,
}

impl HoldDetector {
    pub fn install(
        &mut self,
        widget: &impl IsA<gtk::Widget>,
        on_event: impl Fn(HoldEvent) + Clone + 'static,
    ) {
        if self.attached.is_some() {
            return;
        }

        let gesture = gtk::GestureClick::new();
        gesture.set_button(gdk::BUTTON_SECONDARY);

        let pending = self.pending.clone();
        let on_press = on_event.clone();
        gesture.connect_pressed(move |_, _, x, y| {
            let point = Point::new(x, y);
            let slot = pending.clone();
            let on_press = on_press.clone();
            let source = glib::timeout_add_local_once(
                Duration::from_millis(HOLD_THRESHOLD_MS),
                move || {
                    slot.borrow_mut().take();
                    on_press(HoldEvent::Summon(point));
                },
            );
            // a second press before release replaces the armed timer
            if let Some(stale) = pending.borrow_mut().replace(source) {
                stale.remove();
            }
        });

        let pending = self.pending.clone();
        gesture.connect_released(move |_, _, _, _| {
            match pending.borrow_mut().take() {
                // timer still armed: short click, let it pass through
                Some(source) => {
                    source.remove();
                    on_event(HoldEvent::ClickThrough);
                }
                None => on_event(HoldEvent::Released),
            }
        });

        widget.add_controller(gesture.clone());
        self.attached = Some((gesture, widget.clone().upcast()));
    }

    pub fn uninstall(&mut self) {
        if let Some(source) = self.pending.borrow_mut().take() {
            source.remove();
        }
        if let Some((gesture, widget)) = self.attached.take() {
            widget.remove_controller(&gesture);
        }
    }

    pub fn is_installed(&self) -> bool {
        self.attached.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Installation needs a realized widget; the no-op side of idempotency is
    // checkable without one.
    #[test]
    fn uninstall_without_install_is_a_noop() {
        let mut detector = HoldDetector::default();
        assert!(!detector.is_installed());

        detector.uninstall();
        detector.uninstall();
        assert!(!detector.is_installed());
        assert!(detector.pending.borrow().is_none());
    }
}
