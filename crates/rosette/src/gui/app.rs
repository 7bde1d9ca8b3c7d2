use crate::document::{MenuDocument, PresetName, StepDirection};
use crate::events::AppEvent;
use crate::gui::editor::{EditorModel, EditorOutput};
use crate::gui::menu::{self, Point, State};
use crate::gui::theme;
use crate::gui::window;
use crate::store;
use crate::sys::exec;
use crate::sys::hold::{HoldDetector, HoldEvent};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub document: Rc<RefCell<MenuDocument>>,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    hold: HoldDetector,
    editor: Option<Controller<EditorModel>>,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Toggle,
    Summon(Point),
    ClickThrough,
    CursorMove(Point),
    Released,
    Scroll(f64),
    Cancel,
    OpenEditor,
    EditorClosed,
    InstallHold,
    UninstallHold,
    SelectPreset(PresetName),
    DocumentReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::OpenEditor => AppMsg::OpenEditor,
            AppEvent::InstallHold => AppMsg::InstallHold,
            AppEvent::UninstallHold => AppMsg::UninstallHold,
            AppEvent::SelectPreset(name) => AppMsg::SelectPreset(name),
            AppEvent::DocumentReload => AppMsg::DocumentReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (MenuDocument, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Rosette"),
            #[watch]
            set_visible: model.visible,
            #[watch]
            set_opacity: if model.visible { 1.0 } else { 0.0 },
            add_css_class: "rosette-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Cancel);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "rosette-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(Point::new(x, y)));
                    }
                },

                add_controller = gtk::EventControllerScroll {
                    set_flags: gtk::EventControllerScrollFlags::VERTICAL,
                    connect_scroll[sender] => move |_, _, dy| {
                        sender.input(AppMsg::Scroll(dy));
                        glib::Propagation::Stop
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Released);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (document, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let state = Rc::new(RefCell::new(State::from_document(&document)));
        let document = Rc::new(RefCell::new(document));

        let model = AppModel {
            state: state.clone(),
            document,
            visible: false,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            hold: HoldDetector::default(),
            editor: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        model.install_hold(&sender);

        let state_draw = state;
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = menu::draw(cr, &state_draw.borrow()) {
                log::error!("Drawing error: {}", e);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                self.visible = true;
                self.drawing_area.queue_draw();
            }
            AppMsg::Hide => {
                self.state.borrow_mut().cancel();
                self.visible = false;
            }
            AppMsg::Toggle => {
                if self.visible {
                    SimpleComponent::update(self, AppMsg::Hide, sender);
                } else {
                    SimpleComponent::update(self, AppMsg::Show, sender);
                }
            }
            AppMsg::Summon(point) => {
                if !self.visible {
                    return;
                }
                // center the wheel on the press, or on the cursor when the
                // press position is unavailable
                let center = window::get_cursor_position(&self.root).unwrap_or(point);
                self.state.borrow_mut().summon(center);
                self.drawing_area.queue_draw();
            }
            AppMsg::ClickThrough => {
                // a short click was never a summon, get out of the way
                self.state.borrow_mut().cancel();
                self.visible = false;
            }
            AppMsg::CursorMove(point) => {
                if !self.visible {
                    return;
                }
                if self.state.borrow_mut().update_cursor(point) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Released => {
                if !self.state.borrow().is_active() {
                    return;
                }
                match self.state.borrow_mut().release() {
                    menu::ReleaseOutcome::Committed(command) => {
                        if let Err(e) = exec::dispatch(&command) {
                            log::error!("Failed to dispatch '{}': {}", command, e);
                        }
                    }
                    menu::ReleaseOutcome::Cancelled => {}
                }
                self.visible = false;
                self.drawing_area.queue_draw();
            }
            AppMsg::Scroll(dy) => {
                if !self.state.borrow().is_active() || dy == 0.0 {
                    return;
                }
                let direction = if dy > 0.0 {
                    StepDirection::Forward
                } else {
                    StepDirection::Backward
                };
                let name = self.document.borrow_mut().cycle_preset(direction);
                log::debug!("cycled to preset '{}'", name);
                if let Err(e) = store::save(&self.document.borrow()) {
                    log::error!("Failed to persist active preset: {}", e);
                }
                self.rebuild_state(true);
            }
            AppMsg::Cancel => {
                self.state.borrow_mut().cancel();
                self.visible = false;
                self.drawing_area.queue_draw();
            }
            AppMsg::OpenEditor => {
                if let Some(editor) = &self.editor {
                    editor.widget().present();
                    return;
                }
                let controller = EditorModel::builder()
                    .launch(self.document.borrow().clone())
                    .forward(sender.input_sender(), |output| match output {
                        EditorOutput::Saved => AppMsg::DocumentReload,
                        EditorOutput::Closed => AppMsg::EditorClosed,
                    });
                controller.widget().present();
                self.editor = Some(controller);
            }
            AppMsg::EditorClosed => {
                self.editor = None;
            }
            AppMsg::InstallHold => {
                self.install_hold(&sender);
            }
            AppMsg::UninstallHold => {
                // end any gesture in flight before the recognizer goes away
                self.hold.uninstall();
                self.state.borrow_mut().cancel();
                self.visible = false;
            }
            AppMsg::SelectPreset(name) => {
                match self.document.borrow_mut().select_preset(&name) {
                    Ok(()) => {
                        if let Err(e) = store::save(&self.document.borrow()) {
                            log::error!("Failed to persist active preset: {}", e);
                        }
                        self.rebuild_state(false);
                    }
                    Err(e) => log::warn!("{}", e),
                }
            }
            AppMsg::DocumentReload => match store::load() {
                Ok(document) => {
                    *self.document.borrow_mut() = document;
                    self.rebuild_state(false);
                    log::info!("Menu document reloaded");
                }
                Err(e) => log::error!("Failed to reload menu document: {}", e),
            },
        }
    }
}

impl AppModel {
    /// Attaches the hold recognizer to the overlay surface. The detector is
    /// idempotent, so repeated `install` commands are harmless.
    fn install_hold(&mut self, sender: &ComponentSender<Self>) {
        let area = self.drawing_area.clone();
        let hold_sender = sender.clone();
        self.hold.install(&area, move |event| {
            hold_sender.input(match event {
                HoldEvent::Summon(point) => AppMsg::Summon(point),
                HoldEvent::ClickThrough => AppMsg::ClickThrough,
                HoldEvent::Released => AppMsg::Released,
            });
        });
    }

    /// Replaces the interaction state with one built from the current
    /// document. With `keep_summon` an in-flight gesture survives at the
    /// same center, dropped back to no selection.
    fn rebuild_state(&self, keep_summon: bool) {
        let mut next = State::from_document(&self.document.borrow());
        {
            let current = self.state.borrow();
            if keep_summon && current.is_active() {
                next.summon(current.center);
            }
        }
        *self.state.borrow_mut() = next;
        self.drawing_area.queue_draw();
    }
}
