use crate::document::{ColorField, MenuDocument, SectorLabel, SizeField};
use crate::store;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use strum::IntoEnumIterator;

/// What the sidebar list currently points at: a top-level sector, or a child
/// under one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Sector(usize),
    Child(usize, usize),
}

/// Editor window over a working copy of the document. Nothing touches disk
/// until Save; the parent reloads from disk when we report `Saved`.
pub struct EditorModel {
    document: MenuDocument,
    selection: Option<Selection>,
    /// Set while widgets are being refreshed from the model, so the change
    /// signals they emit do not loop back into edits.
    syncing: Rc<Cell<bool>>,

    preset_names: gtk::StringList,
    preset_dropdown: gtk::DropDown,
    sector_list: gtk::ListBox,
    rows: Vec<Selection>,
    label_entry: gtk::Entry,
    description_entry: gtk::Entry,
    command_buffer: gtk::TextBuffer,
    size_spins: Vec<(SizeField, gtk::SpinButton)>,
    color_entries: Vec<(ColorField, gtk::Entry)>,
    thickness_spin: gtk::SpinButton,
}

#[derive(Debug)]
pub enum EditorMsg {
    PresetChanged(u32),
    AddPreset,
    DeletePreset,
    RowSelected(Option<i32>),
    AddSector,
    AddChild,
    RemoveEntry,
    MoveUp,
    MoveDown,
    LabelEdited(String),
    DescriptionEdited(String),
    CommandEdited,
    SizeChanged(SizeField, f64),
    ColorChanged(ColorField, String),
    ThicknessChanged(f64),
    Save,
    Close,
}

#[derive(Debug)]
pub enum EditorOutput {
    Saved,
    Closed,
}

#[relm4::component(pub)]
impl SimpleComponent for EditorModel {
    type Init = MenuDocument;
    type Input = EditorMsg;
    type Output = EditorOutput;

    view! {
        #[root]
        gtk::Window {
            set_title: Some("Rosette Editor"),
            set_default_size: (720, 520),

            connect_close_request[sender] => move |_| {
                sender.input(EditorMsg::Close);
                glib::Propagation::Stop
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_margin_all: 12,
                set_spacing: 8,

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 6,

                    gtk::Label { set_label: "Preset:" },

                    #[name = "preset_dropdown"]
                    gtk::DropDown {
                        set_hexpand: true,
                        connect_selected_notify[sender, syncing] => move |dropdown| {
                            if !syncing.get() {
                                sender.input(EditorMsg::PresetChanged(dropdown.selected()));
                            }
                        }
                    },

                    gtk::Button {
                        set_label: "New",
                        connect_clicked => EditorMsg::AddPreset,
                    },
                    gtk::Button {
                        set_label: "Delete",
                        connect_clicked => EditorMsg::DeletePreset,
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 8,
                    set_vexpand: true,

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 6,

                        gtk::ScrolledWindow {
                            set_vexpand: true,
                            set_min_content_width: 220,

                            #[name = "sector_list"]
                            gtk::ListBox {
                                set_selection_mode: gtk::SelectionMode::Single,
                                connect_row_selected[sender, syncing] => move |_, row| {
                                    if !syncing.get() {
                                        sender.input(EditorMsg::RowSelected(row.map(|r| r.index())));
                                    }
                                }
                            }
                        },

                        gtk::Box {
                            set_orientation: gtk::Orientation::Horizontal,
                            set_spacing: 4,

                            gtk::Button {
                                set_label: "+ Sector",
                                connect_clicked => EditorMsg::AddSector,
                            },
                            gtk::Button {
                                set_label: "+ Child",
                                connect_clicked => EditorMsg::AddChild,
                            },
                            gtk::Button {
                                set_label: "Remove",
                                connect_clicked => EditorMsg::RemoveEntry,
                            },
                            gtk::Button {
                                set_label: "Up",
                                connect_clicked => EditorMsg::MoveUp,
                            },
                            gtk::Button {
                                set_label: "Down",
                                connect_clicked => EditorMsg::MoveDown,
                            },
                        },
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 6,
                        set_hexpand: true,

                        gtk::Label {
                            set_label: "Label",
                            set_halign: gtk::Align::Start,
                        },
                        #[name = "label_entry"]
                        gtk::Entry {
                            connect_changed[sender, syncing] => move |entry| {
                                if !syncing.get() {
                                    sender.input(EditorMsg::LabelEdited(entry.text().to_string()));
                                }
                            }
                        },

                        gtk::Label {
                            set_label: "Description",
                            set_halign: gtk::Align::Start,
                        },
                        #[name = "description_entry"]
                        gtk::Entry {
                            connect_changed[sender, syncing] => move |entry| {
                                if !syncing.get() {
                                    sender.input(EditorMsg::DescriptionEdited(entry.text().to_string()));
                                }
                            }
                        },

                        gtk::Label {
                            set_label: "Command",
                            set_halign: gtk::Align::Start,
                        },
                        gtk::ScrolledWindow {
                            set_min_content_height: 80,

                            #[name = "command_view"]
                            gtk::TextView {
                                set_monospace: true,
                            }
                        },

                        #[name = "size_grid"]
                        gtk::Grid {
                            set_column_spacing: 6,
                            set_row_spacing: 4,
                        },

                        #[name = "color_grid"]
                        gtk::Grid {
                            set_column_spacing: 6,
                            set_row_spacing: 4,
                        },
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 6,
                    set_halign: gtk::Align::End,

                    gtk::Button {
                        set_label: "Save",
                        connect_clicked => EditorMsg::Save,
                    },
                    gtk::Button {
                        set_label: "Close",
                        connect_clicked => EditorMsg::Close,
                    },
                },
            }
        }
    }

    fn init(
        document: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = EditorModel {
            document,
            selection: None,
            syncing: Rc::new(Cell::new(false)),
            preset_names: gtk::StringList::new(&[]),
            preset_dropdown: gtk::DropDown::builder().build(),
            sector_list: gtk::ListBox::new(),
            rows: Vec::new(),
            label_entry: gtk::Entry::new(),
            description_entry: gtk::Entry::new(),
            command_buffer: gtk::TextBuffer::new(None),
            size_spins: Vec::new(),
            color_entries: Vec::new(),
            thickness_spin: gtk::SpinButton::with_range(0.0, 10.0, 0.1),
        };

        // the view and field-grid closures check this before emitting, so
        // refreshes never echo back as edits
        let syncing = model.syncing.clone();

        let widgets = view_output!();

        let mut model = model;
        model.preset_dropdown = widgets.preset_dropdown.clone();
        model.sector_list = widgets.sector_list.clone();
        model.label_entry = widgets.label_entry.clone();
        model.description_entry = widgets.description_entry.clone();
        model.command_buffer = widgets.command_view.buffer();
        widgets
            .preset_dropdown
            .set_model(Some(&model.preset_names));

        {
            let sender = sender.clone();
            let syncing = model.syncing.clone();
            model.command_buffer.connect_changed(move |_| {
                if !syncing.get() {
                    sender.input(EditorMsg::CommandEdited);
                }
            });
        }

        for (row, field) in SizeField::iter().enumerate() {
            let label = gtk::Label::new(Some(&field.to_string()));
            label.set_halign(gtk::Align::Start);
            let spin = gtk::SpinButton::with_range(0.1, 1000.0, 1.0);
            spin.set_digits(1);
            let sender = sender.clone();
            let syncing = syncing.clone();
            spin.connect_value_changed(move |spin| {
                if !syncing.get() {
                    sender.input(EditorMsg::SizeChanged(field, spin.value()));
                }
            });
            widgets.size_grid.attach(&label, 0, row as i32, 1, 1);
            widgets.size_grid.attach(&spin, 1, row as i32, 1, 1);
            model.size_spins.push((field, spin));
        }

        for (row, field) in ColorField::iter().enumerate() {
            let label = gtk::Label::new(Some(&field.to_string()));
            label.set_halign(gtk::Align::Start);
            let entry = gtk::Entry::new();
            entry.set_max_length(9); // #RRGGBBAA
            let sender = sender.clone();
            let syncing = syncing.clone();
            entry.connect_changed(move |entry| {
                if !syncing.get() {
                    sender.input(EditorMsg::ColorChanged(field, entry.text().to_string()));
                }
            });
            widgets.color_grid.attach(&label, 0, row as i32, 1, 1);
            widgets.color_grid.attach(&entry, 1, row as i32, 1, 1);
            model.color_entries.push((field, entry));
        }

        {
            let thickness_row = ColorField::iter().count() as i32;
            let label = gtk::Label::new(Some("child_outline_thickness"));
            label.set_halign(gtk::Align::Start);
            model.thickness_spin.set_digits(1);
            let sender = sender.clone();
            let syncing = syncing.clone();
            model.thickness_spin.connect_value_changed(move |spin| {
                if !syncing.get() {
                    sender.input(EditorMsg::ThicknessChanged(spin.value()));
                }
            });
            widgets.color_grid.attach(&label, 0, thickness_row, 1, 1);
            widgets
                .color_grid
                .attach(&model.thickness_spin, 1, thickness_row, 1, 1);
        }

        model.refresh_presets();
        model.refresh_rows();
        model.refresh_fields();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            EditorMsg::PresetChanged(index) => {
                let name = self
                    .document
                    .preset_names()
                    .nth(index as usize)
                    .cloned();
                if let Some(name) = name {
                    if let Err(e) = self.document.select_preset(&name) {
                        log::warn!("{}", e);
                    }
                    self.selection = None;
                    self.refresh_rows();
                    self.refresh_fields();
                }
            }
            EditorMsg::AddPreset => {
                let name = self.document.unique_preset_name("new_preset");
                let source = self.document.active_preset.clone();
                if let Err(e) = self.document.create_preset(name.clone(), Some(&source)) {
                    log::warn!("{}", e);
                    return;
                }
                if self.document.select_preset(&name).is_ok() {
                    self.selection = None;
                    self.refresh_presets();
                    self.refresh_rows();
                    self.refresh_fields();
                }
            }
            EditorMsg::DeletePreset => {
                let name = self.document.active_preset.clone();
                match self.document.delete_preset(&name) {
                    Ok(()) => {
                        self.selection = None;
                        self.refresh_presets();
                        self.refresh_rows();
                        self.refresh_fields();
                    }
                    Err(e) => log::warn!("{}", e),
                }
            }
            EditorMsg::RowSelected(index) => {
                self.selection = index
                    .and_then(|i| usize::try_from(i).ok())
                    .and_then(|i| self.rows.get(i).copied());
                self.refresh_fields();
            }
            EditorMsg::AddSector => {
                if let Some(preset) = self.document.active_mut() {
                    preset.add_sector();
                    self.selection = Some(Selection::Sector(preset.inner_section.len() - 1));
                    self.refresh_rows();
                    self.refresh_fields();
                }
            }
            EditorMsg::AddChild => {
                let parent = match self.selection {
                    Some(Selection::Sector(s)) | Some(Selection::Child(s, _)) => s,
                    None => return,
                };
                if let Some(preset) = self.document.active_mut() {
                    if let Some((_, sector)) = preset.inner_section.get_mut(parent) {
                        sector.add_child();
                        self.selection =
                            Some(Selection::Child(parent, sector.children.len() - 1));
                        self.refresh_rows();
                        self.refresh_fields();
                    }
                }
            }
            EditorMsg::RemoveEntry => {
                let Some(selection) = self.selection else {
                    return;
                };
                let Some(preset) = self.document.active_mut() else {
                    return;
                };
                let result = match selection {
                    Selection::Sector(s) => {
                        let label = preset.inner_section.get(s).map(|(l, _)| l.clone());
                        label.map(|label| preset.remove_sector(&label))
                    }
                    Selection::Child(s, c) => {
                        preset.inner_section.get_mut(s).and_then(|(_, sector)| {
                            let label = sector.children.get(c).map(|(l, _)| l.clone());
                            label.map(|label| sector.remove_child(&label))
                        })
                    }
                };
                match result {
                    Some(Ok(())) => {
                        self.selection = None;
                        self.refresh_rows();
                        self.refresh_fields();
                    }
                    Some(Err(e)) => log::warn!("{}", e),
                    None => {}
                }
            }
            EditorMsg::MoveUp => self.move_selected(-1),
            EditorMsg::MoveDown => self.move_selected(1),
            EditorMsg::LabelEdited(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return;
                }
                let Some(selection) = self.selection else {
                    return;
                };
                let Some(preset) = self.document.active_mut() else {
                    return;
                };
                let new_label = SectorLabel::new(text);
                let result = match selection {
                    Selection::Sector(s) => {
                        let label = preset
                            .inner_section
                            .get(s)
                            .map(|(l, _)| l.clone())
                            .filter(|l| *l != new_label);
                        label.map(|label| preset.rename_sector(&label, new_label))
                    }
                    Selection::Child(s, c) => {
                        preset.inner_section.get_mut(s).and_then(|(_, sector)| {
                            let label = sector
                                .children
                                .get(c)
                                .map(|(l, _)| l.clone())
                                .filter(|l| *l != new_label);
                            label.map(|label| sector.rename_child(&label, new_label))
                        })
                    }
                };
                match result {
                    Some(Ok(())) => self.refresh_rows(),
                    Some(Err(e)) => log::warn!("{}", e),
                    None => {}
                }
            }
            EditorMsg::DescriptionEdited(text) => {
                if let Some(sector) = self.selected_sector_mut() {
                    sector.description = text;
                }
            }
            EditorMsg::CommandEdited => {
                let buffer = &self.command_buffer;
                let text = buffer
                    .text(&buffer.start_iter(), &buffer.end_iter(), false)
                    .to_string();
                if let Some(sector) = self.selected_sector_mut() {
                    sector.command = crate::document::CommandString::new(text.trim());
                }
            }
            EditorMsg::SizeChanged(field, value) => {
                field.set(&mut self.document.ui.size, value);
            }
            EditorMsg::ColorChanged(field, value) => {
                if let Some(preset) = self.document.active_mut() {
                    field.set(&mut preset.colors, value);
                }
            }
            EditorMsg::ThicknessChanged(value) => {
                if let Some(preset) = self.document.active_mut() {
                    preset.colors.child_outline_thickness = value;
                }
            }
            EditorMsg::Save => {
                self.document.normalize();
                if let Err(e) = store::save(&self.document) {
                    log::error!("Failed to save menu document: {}", e);
                    return;
                }
                let _ = sender.output(EditorOutput::Saved);
            }
            EditorMsg::Close => {
                let _ = sender.output(EditorOutput::Closed);
            }
        }
    }
}

impl EditorModel {
    fn selected_sector_mut(&mut self) -> Option<&mut crate::document::Sector> {
        let selection = self.selection?;
        let preset = self.document.active_mut()?;
        match selection {
            Selection::Sector(s) => preset.inner_section.get_mut(s).map(|(_, sector)| sector),
            Selection::Child(s, c) => preset
                .inner_section
                .get_mut(s)?
                .1
                .children
                .get_mut(c)
                .map(|(_, child)| child),
        }
    }

    fn move_selected(&mut self, delta: i64) {
        let Some(selection) = self.selection else {
            return;
        };
        let Some(preset) = self.document.active_mut() else {
            return;
        };
        let shifted = |index: usize, len: usize| -> Option<usize> {
            let target = index as i64 + delta;
            (target >= 0 && (target as usize) < len).then_some(target as usize)
        };
        match selection {
            Selection::Sector(s) => {
                if let Some(to) = shifted(s, preset.inner_section.len()) {
                    preset.move_sector(s, to);
                    self.selection = Some(Selection::Sector(to));
                }
            }
            Selection::Child(s, c) => {
                if let Some((_, sector)) = preset.inner_section.get_mut(s) {
                    if let Some(to) = shifted(c, sector.children.len()) {
                        sector.move_child(c, to);
                        self.selection = Some(Selection::Child(s, to));
                    }
                }
            }
        }
        self.refresh_rows();
    }

    fn refresh_presets(&mut self) {
        self.syncing.set(true);
        while self.preset_names.n_items() > 0 {
            self.preset_names.remove(0);
        }
        let mut active_index = 0;
        for (index, name) in self.document.preset_names().enumerate() {
            self.preset_names.append(name.as_str());
            if *name == self.document.active_preset {
                active_index = index as u32;
            }
        }
        self.preset_dropdown.set_selected(active_index);
        self.syncing.set(false);
    }

    /// Rebuilds the sidebar: one row per sector, children indented under
    /// their parent.
    fn refresh_rows(&mut self) {
        self.syncing.set(true);
        while let Some(row) = self.sector_list.row_at_index(0) {
            self.sector_list.remove(&row);
        }
        self.rows.clear();

        if let Some(preset) = self.document.active() {
            for (s, (label, sector)) in preset.inner_section.iter().enumerate() {
                self.sector_list
                    .append(&left_label(label.as_str(), false));
                self.rows.push(Selection::Sector(s));
                for (c, (child_label, _)) in sector.children.iter().enumerate() {
                    self.sector_list
                        .append(&left_label(child_label.as_str(), true));
                    self.rows.push(Selection::Child(s, c));
                }
            }
        }

        if let Some(index) = self
            .selection
            .and_then(|sel| self.rows.iter().position(|r| *r == sel))
        {
            self.sector_list
                .select_row(self.sector_list.row_at_index(index as i32).as_ref());
        }
        self.syncing.set(false);
    }

    fn refresh_fields(&mut self) {
        self.syncing.set(true);

        let entry = self.selection.and_then(|selection| {
            let preset = self.document.active()?;
            match selection {
                Selection::Sector(s) => {
                    preset.inner_section.get(s).map(|(l, sec)| (l.clone(), sec))
                }
                Selection::Child(s, c) => preset
                    .inner_section
                    .get(s)?
                    .1
                    .children
                    .get(c)
                    .map(|(l, sec)| (l.clone(), sec)),
            }
        });

        match entry {
            Some((label, sector)) => {
                self.label_entry.set_text(label.as_str());
                self.description_entry.set_text(&sector.description);
                self.command_buffer.set_text(sector.command.as_str());
                self.label_entry.set_sensitive(true);
                self.description_entry.set_sensitive(true);
            }
            None => {
                self.label_entry.set_text("");
                self.description_entry.set_text("");
                self.command_buffer.set_text("");
                self.label_entry.set_sensitive(false);
                self.description_entry.set_sensitive(false);
            }
        }

        for (field, spin) in &self.size_spins {
            spin.set_value(field.get(&self.document.ui.size));
        }
        if let Some(preset) = self.document.active() {
            for (field, entry) in &self.color_entries {
                entry.set_text(field.get(&preset.colors));
            }
            self.thickness_spin
                .set_value(preset.colors.child_outline_thickness);
        }

        self.syncing.set(false);
    }
}

fn left_label(text: &str, indented: bool) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.set_halign(gtk::Align::Start);
    if indented {
        label.set_margin_start(18);
    }
    label
}
