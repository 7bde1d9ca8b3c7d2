use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use strum::{Display as StrumDisplay, EnumIter};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, Deref, From, Into,
    AsRef,
)]
#[serde(transparent)]
pub struct PresetName(String);

crate::impl_string_newtype!(PresetName);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, Deref, From, Into,
    AsRef,
)]
#[serde(transparent)]
pub struct SectorLabel(String);

crate::impl_string_newtype!(SectorLabel);

/// Opaque payload handed to the shell on commit. The menu never inspects it.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, Deref, From, Into,
    AsRef,
)]
#[serde(transparent)]
pub struct CommandString(String);

crate::impl_string_newtype!(CommandString);

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("preset '{0}' not found")]
    PresetNotFound(PresetName),
    #[error("preset '{0}' already exists")]
    PresetExists(PresetName),
    #[error("can't delete the last preset")]
    LastPreset,
    #[error("sector '{0}' not found")]
    SectorNotFound(SectorLabel),
    #[error("sector '{0}' already exists")]
    SectorExists(SectorLabel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Forward,
    Backward,
}

/// Layout sizes shared by every preset, `ui.size` in the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalSize {
    #[serde(default = "GlobalSize::default_radius")]
    pub radius: f64,
    #[serde(default = "GlobalSize::default_ring_gap")]
    pub ring_gap: f64,
    #[serde(default = "GlobalSize::default_outer_ring_width")]
    pub outer_ring_width: f64,
    #[serde(default = "GlobalSize::default_child_angle_multiplier")]
    pub child_angle_multiplier: f64,
}

impl GlobalSize {
    fn default_radius() -> f64 {
        150.0
    }

    fn default_ring_gap() -> f64 {
        5.0
    }

    fn default_outer_ring_width() -> f64 {
        25.0
    }

    fn default_child_angle_multiplier() -> f64 {
        1.0
    }

    /// Repairs non-positive fields back to their defaults. Returns whether
    /// anything changed.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        let mut repair = |value: &mut f64, fallback: f64| {
            if !value.is_finite() || *value <= 0.0 {
                *value = fallback;
                changed = true;
            }
        };
        repair(&mut self.radius, Self::default_radius());
        repair(&mut self.ring_gap, Self::default_ring_gap());
        repair(&mut self.outer_ring_width, Self::default_outer_ring_width());
        repair(
            &mut self.child_angle_multiplier,
            Self::default_child_angle_multiplier(),
        );
        changed
    }
}

impl Default for GlobalSize {
    fn default() -> Self {
        Self {
            radius: Self::default_radius(),
            ring_gap: Self::default_ring_gap(),
            outer_ring_width: Self::default_outer_ring_width(),
            child_angle_multiplier: Self::default_child_angle_multiplier(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default)]
    pub size: GlobalSize,
}

/// Per-preset color block. Every field carries a default so documents from
/// older versions keep loading (backfill).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetColors {
    #[serde(default = "PresetColors::default_inner")]
    pub inner: String,
    #[serde(default = "PresetColors::default_inner_highlight")]
    pub inner_highlight: String,
    #[serde(default = "PresetColors::default_inner_line")]
    pub inner_line: String,
    #[serde(default = "PresetColors::default_child")]
    pub child: String,
    #[serde(default = "PresetColors::default_child_line")]
    pub child_line: String,
    #[serde(default = "PresetColors::default_child_text")]
    pub child_text: String,
    #[serde(default = "PresetColors::default_child_text_outline")]
    pub child_text_outline: String,
    #[serde(default = "PresetColors::default_child_outline_thickness")]
    pub child_outline_thickness: f64,
}

impl PresetColors {
    fn default_inner() -> String {
        "#454545B4".into()
    }

    fn default_inner_highlight() -> String {
        "#282828B4".into()
    }

    fn default_inner_line() -> String {
        "#1E1E1E".into()
    }

    fn default_child() -> String {
        "#5285A6".into()
    }

    fn default_child_line() -> String {
        "#1E1E1E".into()
    }

    fn default_child_text() -> String {
        "#FFFFFF".into()
    }

    fn default_child_text_outline() -> String {
        "#141414DC".into()
    }

    fn default_child_outline_thickness() -> f64 {
        1.6
    }
}

impl Default for PresetColors {
    fn default() -> Self {
        Self {
            inner: Self::default_inner(),
            inner_highlight: Self::default_inner_highlight(),
            inner_line: Self::default_inner_line(),
            child: Self::default_child(),
            child_line: Self::default_child_line(),
            child_text: Self::default_child_text(),
            child_text_outline: Self::default_child_text_outline(),
            child_outline_thickness: Self::default_child_outline_thickness(),
        }
    }
}

/// One pie-menu entry. The type recurses, but the tool renders and edits a
/// single level of children.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sector {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub command: CommandString,
    #[serde_as(as = "serde_with::Map<_, _>")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<(SectorLabel, Sector)>,
}

impl Sector {
    pub fn child(&self, label: &SectorLabel) -> Option<&Sector> {
        self.children.iter().find(|(l, _)| l == label).map(|(_, s)| s)
    }

    pub fn add_child(&mut self) -> SectorLabel {
        let label = unique_label(&self.children, "new_child");
        let child = Sector {
            description: label.to_string(),
            command: CommandString::new(format!("echo {label}")),
            children: Vec::new(),
        };
        self.children.push((label.clone(), child));
        label
    }

    pub fn remove_child(&mut self, label: &SectorLabel) -> Result<(), DocumentError> {
        let idx = self
            .children
            .iter()
            .position(|(l, _)| l == label)
            .ok_or_else(|| DocumentError::SectorNotFound(label.clone()))?;
        self.children.remove(idx);
        Ok(())
    }

    pub fn move_child(&mut self, from: usize, to: usize) {
        move_entry(&mut self.children, from, to);
    }

    pub fn rename_child(
        &mut self,
        old: &SectorLabel,
        new: SectorLabel,
    ) -> Result<(), DocumentError> {
        rename_entry(&mut self.children, old, new)
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub colors: PresetColors,
    #[serde_as(as = "serde_with::Map<_, _>")]
    #[serde(default)]
    pub inner_section: Vec<(SectorLabel, Sector)>,
}

impl Preset {
    pub fn sector(&self, label: &SectorLabel) -> Option<&Sector> {
        self.inner_section
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, s)| s)
    }

    pub fn sector_mut(&mut self, label: &SectorLabel) -> Option<&mut Sector> {
        self.inner_section
            .iter_mut()
            .find(|(l, _)| l == label)
            .map(|(_, s)| s)
    }

    /// Appends a sector with a default payload under an auto-unique label.
    pub fn add_sector(&mut self) -> SectorLabel {
        let label = unique_label(&self.inner_section, "new_sector");
        let sector = Sector {
            description: label.to_string(),
            command: CommandString::new(format!("echo {label}")),
            children: Vec::new(),
        };
        self.inner_section.push((label.clone(), sector));
        label
    }

    /// Removes a sector; siblings keep their relative order.
    pub fn remove_sector(&mut self, label: &SectorLabel) -> Result<(), DocumentError> {
        let idx = self
            .inner_section
            .iter()
            .position(|(l, _)| l == label)
            .ok_or_else(|| DocumentError::SectorNotFound(label.clone()))?;
        self.inner_section.remove(idx);
        Ok(())
    }

    /// Drag-style move: the entry at `from` lands at `to`, untouched siblings
    /// keep their relative order.
    pub fn move_sector(&mut self, from: usize, to: usize) {
        move_entry(&mut self.inner_section, from, to);
    }

    pub fn rename_sector(
        &mut self,
        old: &SectorLabel,
        new: SectorLabel,
    ) -> Result<(), DocumentError> {
        rename_entry(&mut self.inner_section, old, new)
    }
}

fn unique_label(existing: &[(SectorLabel, Sector)], base: &str) -> SectorLabel {
    let mut candidate = base.to_string();
    let mut i = 1;
    while existing.iter().any(|(l, _)| l.as_str() == candidate) {
        candidate = format!("{base}_{i}");
        i += 1;
    }
    SectorLabel::new(candidate)
}

fn move_entry(entries: &mut Vec<(SectorLabel, Sector)>, from: usize, to: usize) {
    if from == to || from >= entries.len() || to >= entries.len() {
        return;
    }
    let entry = entries.remove(from);
    entries.insert(to, entry);
}

fn rename_entry(
    entries: &mut [(SectorLabel, Sector)],
    old: &SectorLabel,
    new: SectorLabel,
) -> Result<(), DocumentError> {
    if new != *old && entries.iter().any(|(l, _)| *l == new) {
        return Err(DocumentError::SectorExists(new));
    }
    let entry = entries
        .iter_mut()
        .find(|(l, _)| l == old)
        .ok_or_else(|| DocumentError::SectorNotFound(old.clone()))?;
    entry.0 = new;
    Ok(())
}

/// The whole persisted menu document. `presets` is serialized as a JSON
/// object; entry order is the single source of truth for preset cycling, so
/// it round-trips through `serde_with::Map` into an ordered `Vec`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuDocument {
    #[serde(default)]
    pub active_preset: PresetName,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde_as(as = "serde_with::Map<_, _>")]
    #[serde(default)]
    pub presets: Vec<(PresetName, Preset)>,
}

impl MenuDocument {
    /// Backfill pass run after decode: guarantees at least one preset, a
    /// valid `active_preset` and positive sizes. Returns whether anything
    /// had to be repaired.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        if self.presets.is_empty() {
            self.presets
                .push((PresetName::new("Default"), Preset::default()));
            changed = true;
        }
        if !self.presets.iter().any(|(n, _)| *n == self.active_preset) {
            self.active_preset = self.presets[0].0.clone();
            changed = true;
        }
        if self.ui.size.normalize() {
            changed = true;
        }
        changed
    }

    pub fn preset_names(&self) -> impl Iterator<Item = &PresetName> {
        self.presets.iter().map(|(n, _)| n)
    }

    pub fn preset(&self, name: &PresetName) -> Option<&Preset> {
        self.presets.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn active(&self) -> Option<&Preset> {
        self.preset(&self.active_preset)
    }

    pub fn active_mut(&mut self) -> Option<&mut Preset> {
        let name = self.active_preset.clone();
        self.presets
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| p)
    }

    /// Unknown names leave `active_preset` untouched.
    pub fn select_preset(&mut self, name: &PresetName) -> Result<(), DocumentError> {
        if self.preset(name).is_none() {
            return Err(DocumentError::PresetNotFound(name.clone()));
        }
        self.active_preset = name.clone();
        Ok(())
    }

    /// Cyclic stepping through presets in insertion order (the scroll-wheel
    /// gesture). Returns the newly active name.
    pub fn cycle_preset(&mut self, direction: StepDirection) -> PresetName {
        if self.presets.is_empty() {
            return self.active_preset.clone();
        }
        let idx = self
            .presets
            .iter()
            .position(|(n, _)| *n == self.active_preset)
            .unwrap_or(0);
        let len = self.presets.len();
        let next = match direction {
            StepDirection::Forward => (idx + 1) % len,
            StepDirection::Backward => (idx + len - 1) % len,
        };
        self.active_preset = self.presets[next].0.clone();
        self.active_preset.clone()
    }

    pub fn create_preset(
        &mut self,
        name: PresetName,
        clone_from: Option<&PresetName>,
    ) -> Result<(), DocumentError> {
        if self.preset(&name).is_some() {
            return Err(DocumentError::PresetExists(name));
        }
        let payload = clone_from
            .and_then(|source| self.preset(source).cloned())
            .unwrap_or_default();
        self.presets.push((name, payload));
        Ok(())
    }

    /// Deleting the last preset is rejected; deleting the active preset
    /// moves `active_preset` to the first remaining one.
    pub fn delete_preset(&mut self, name: &PresetName) -> Result<(), DocumentError> {
        if self.presets.len() == 1 {
            return Err(DocumentError::LastPreset);
        }
        let idx = self
            .presets
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| DocumentError::PresetNotFound(name.clone()))?;
        self.presets.remove(idx);
        if self.active_preset == *name {
            self.active_preset = self.presets[0].0.clone();
        }
        Ok(())
    }

    pub fn unique_preset_name(&self, base: &str) -> PresetName {
        let mut candidate = base.to_string();
        let mut i = 1;
        while self.presets.iter().any(|(n, _)| n.as_str() == candidate) {
            candidate = format!("{base}_{i}");
            i += 1;
        }
        PresetName::new(candidate)
    }
}

/// Field handles for the editor's size spin buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum SizeField {
    Radius,
    RingGap,
    OuterRingWidth,
    ChildAngleMultiplier,
}

impl SizeField {
    pub fn get(self, size: &GlobalSize) -> f64 {
        match self {
            Self::Radius => size.radius,
            Self::RingGap => size.ring_gap,
            Self::OuterRingWidth => size.outer_ring_width,
            Self::ChildAngleMultiplier => size.child_angle_multiplier,
        }
    }

    /// Non-positive values are ignored (size invariant).
    pub fn set(self, size: &mut GlobalSize, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            return;
        }
        match self {
            Self::Radius => size.radius = value,
            Self::RingGap => size.ring_gap = value,
            Self::OuterRingWidth => size.outer_ring_width = value,
            Self::ChildAngleMultiplier => size.child_angle_multiplier = value,
        }
    }
}

/// Field handles for the editor's color entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum ColorField {
    Inner,
    InnerHighlight,
    InnerLine,
    Child,
    ChildLine,
    ChildText,
    ChildTextOutline,
}

impl ColorField {
    pub fn get(self, colors: &PresetColors) -> &str {
        match self {
            Self::Inner => &colors.inner,
            Self::InnerHighlight => &colors.inner_highlight,
            Self::InnerLine => &colors.inner_line,
            Self::Child => &colors.child,
            Self::ChildLine => &colors.child_line,
            Self::ChildText => &colors.child_text,
            Self::ChildTextOutline => &colors.child_text_outline,
        }
    }

    pub fn set(self, colors: &mut PresetColors, value: String) {
        match self {
            Self::Inner => colors.inner = value,
            Self::InnerHighlight => colors.inner_highlight = value,
            Self::InnerLine => colors.inner_line = value,
            Self::Child => colors.child = value,
            Self::ChildLine => colors.child_line = value,
            Self::ChildText => colors.child_text = value,
            Self::ChildTextOutline => colors.child_text_outline = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Raw strings, not serde_json::json!: the Value map would reorder keys
    // and we are testing insertion order.
    const THREE_PRESETS: &str = r#"{
        "active_preset": "Modeling",
        "presets": {
            "Modeling": { "inner_section": {} },
            "Rigging": { "inner_section": {} },
            "Animation": { "inner_section": {} }
        }
    }"#;

    fn doc(raw: &str) -> MenuDocument {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn missing_ui_size_falls_back_to_defaults() {
        let d = doc(THREE_PRESETS);
        assert_eq!(d.ui.size, GlobalSize::default());
        assert_eq!(d.ui.size.radius, 150.0);
        assert_eq!(d.ui.size.child_angle_multiplier, 1.0);
    }

    #[test]
    fn missing_colors_are_backfilled() {
        let d = doc(THREE_PRESETS);
        let preset = d.preset(&PresetName::new("Rigging")).unwrap();
        assert_eq!(preset.colors, PresetColors::default());
    }

    #[test]
    fn preset_order_survives_round_trip() {
        let d = doc(THREE_PRESETS);
        let names: Vec<_> = d.preset_names().map(|n| n.as_str().to_string()).collect();
        assert_eq!(names, ["Modeling", "Rigging", "Animation"]);

        let raw = serde_json::to_string_pretty(&d).unwrap();
        let reloaded: MenuDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(reloaded, d);

        // The serialized text itself keeps insertion order (human-diffable).
        let modeling = raw.find("\"Modeling\"").unwrap();
        let rigging = raw.find("\"Rigging\"").unwrap();
        let animation = raw.find("\"Animation\"").unwrap();
        assert!(modeling < rigging && rigging < animation);
    }

    #[test]
    fn sector_order_and_fields_survive_round_trip() {
        let raw = r##"{
            "active_preset": "Default",
            "ui": { "size": { "radius": 120.0, "ring_gap": 4.0, "outer_ring_width": 30.0, "child_angle_multiplier": 1.5 } },
            "presets": {
                "Default": {
                    "colors": { "child": "#102030", "child_outline_thickness": 2.0 },
                    "inner_section": {
                        "Zulu": { "description": "z", "command": "echo z" },
                        "Alpha": {
                            "description": "a",
                            "command": "echo a",
                            "children": {
                                "Nine": { "command": "echo 9" },
                                "One": { "command": "echo 1" }
                            }
                        }
                    }
                }
            }
        }"##;
        let d = doc(raw);
        let reloaded: MenuDocument = serde_json::from_str(&serde_json::to_string(&d).unwrap()).unwrap();
        assert_eq!(reloaded, d);

        let preset = reloaded.active().unwrap();
        let labels: Vec<_> = preset
            .inner_section
            .iter()
            .map(|(l, _)| l.as_str())
            .collect();
        assert_eq!(labels, ["Zulu", "Alpha"]);

        let alpha = preset.sector(&SectorLabel::new("Alpha")).unwrap();
        let children: Vec<_> = alpha.children.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(children, ["Nine", "One"]);
        assert_eq!(alpha.command.as_str(), "echo a");
        assert_eq!(preset.colors.child, "#102030");
        assert_eq!(preset.colors.child_outline_thickness, 2.0);
        assert_eq!(reloaded.ui.size.child_angle_multiplier, 1.5);
    }

    #[test]
    fn dangling_active_preset_is_repaired_to_first() {
        let mut d = doc(
            r#"{ "active_preset": "Gone", "presets": { "First": {}, "Second": {} } }"#,
        );
        assert!(d.normalize());
        assert_eq!(d.active_preset.as_str(), "First");
    }

    #[test]
    fn empty_document_normalizes_to_a_default_preset() {
        let mut d = MenuDocument::default();
        assert!(d.normalize());
        assert_eq!(d.active_preset.as_str(), "Default");
        assert!(d.active().is_some());
        assert!(!d.normalize());
    }

    #[test]
    fn non_positive_sizes_are_repaired() {
        let mut d = doc(
            r#"{ "active_preset": "P", "ui": { "size": { "radius": -5.0, "ring_gap": 0.0 } }, "presets": { "P": {} } }"#,
        );
        assert!(d.normalize());
        assert_eq!(d.ui.size.radius, 150.0);
        assert_eq!(d.ui.size.ring_gap, 5.0);
    }

    #[test]
    fn select_missing_preset_leaves_active_untouched() {
        let mut d = doc(THREE_PRESETS);
        let missing = PresetName::new("Sculpting");
        assert_eq!(
            d.select_preset(&missing),
            Err(DocumentError::PresetNotFound(missing))
        );
        assert_eq!(d.active_preset.as_str(), "Modeling");
    }

    #[test]
    fn cycling_n_times_returns_to_start() {
        let mut d = doc(THREE_PRESETS);
        for _ in 0..3 {
            d.cycle_preset(StepDirection::Forward);
        }
        assert_eq!(d.active_preset.as_str(), "Modeling");
        assert_eq!(
            d.cycle_preset(StepDirection::Backward).as_str(),
            "Animation"
        );
    }

    #[test]
    fn delete_last_preset_is_rejected() {
        let mut d = doc(r#"{ "active_preset": "Only", "presets": { "Only": {} } }"#);
        assert_eq!(
            d.delete_preset(&PresetName::new("Only")),
            Err(DocumentError::LastPreset)
        );
    }

    #[test]
    fn deleting_the_active_preset_falls_back_to_first() {
        let mut d = doc(THREE_PRESETS);
        d.delete_preset(&PresetName::new("Modeling")).unwrap();
        assert_eq!(d.active_preset.as_str(), "Rigging");
        assert_eq!(d.presets.len(), 2);
    }

    #[test]
    fn create_preset_rejects_duplicates_and_clones() {
        let mut d = doc(THREE_PRESETS);
        assert_eq!(
            d.create_preset(PresetName::new("Rigging"), None),
            Err(DocumentError::PresetExists(PresetName::new("Rigging")))
        );
        d.active_mut().unwrap().add_sector();
        d.create_preset(
            PresetName::new("Modeling copy"),
            Some(&PresetName::new("Modeling")),
        )
        .unwrap();
        let clone = d.preset(&PresetName::new("Modeling copy")).unwrap();
        assert_eq!(clone.inner_section.len(), 1);
    }

    fn preset_with(labels: &[&str]) -> Preset {
        Preset {
            colors: PresetColors::default(),
            inner_section: labels
                .iter()
                .map(|l| (SectorLabel::new(*l), Sector::default()))
                .collect(),
        }
    }

    #[test]
    fn removing_middle_sector_keeps_sibling_order() {
        let mut preset = preset_with(&["a", "b", "c"]);
        preset.remove_sector(&SectorLabel::new("b")).unwrap();
        let labels: Vec<_> = preset.inner_section.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["a", "c"]);
    }

    #[test]
    fn move_sector_preserves_untouched_order() {
        let mut preset = preset_with(&["a", "b", "c", "d"]);
        preset.move_sector(3, 1);
        let labels: Vec<_> = preset.inner_section.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["a", "d", "b", "c"]);

        preset.move_sector(0, 3);
        let labels: Vec<_> = preset.inner_section.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["d", "b", "c", "a"]);
    }

    #[test]
    fn add_sector_generates_unique_labels() {
        let mut preset = Preset::default();
        assert_eq!(preset.add_sector().as_str(), "new_sector");
        assert_eq!(preset.add_sector().as_str(), "new_sector_1");
        assert_eq!(preset.add_sector().as_str(), "new_sector_2");
    }

    #[test]
    fn rename_sector_rejects_duplicates() {
        let mut preset = preset_with(&["a", "b"]);
        assert_eq!(
            preset.rename_sector(&SectorLabel::new("a"), SectorLabel::new("b")),
            Err(DocumentError::SectorExists(SectorLabel::new("b")))
        );
        preset
            .rename_sector(&SectorLabel::new("a"), SectorLabel::new("z"))
            .unwrap();
        assert!(preset.sector(&SectorLabel::new("z")).is_some());
    }

    #[test]
    fn child_crud_mirrors_sector_crud() {
        let mut preset = preset_with(&["a"]);
        let parent = preset.sector_mut(&SectorLabel::new("a")).unwrap();
        let first = parent.add_child();
        let second = parent.add_child();
        assert_eq!(parent.children.len(), 2);

        parent.move_child(1, 0);
        assert_eq!(parent.children[0].0, second);

        parent.remove_child(&first).unwrap();
        assert_eq!(parent.children.len(), 1);
        assert_eq!(
            parent.remove_child(&first),
            Err(DocumentError::SectorNotFound(first))
        );
    }
}
