use crate::document::{CommandString, MenuDocument, PresetName, SectorLabel};
use crate::gui::menu::geometry::{polar, ChildFan, Point, Ring, RingLayout, SectorWheel};
use crate::gui::theme::MenuPalette;

/// Flat snapshot of one sector, resolved from the document when the state is
/// (re)built so the draw path never walks the document itself.
#[derive(Debug, Clone)]
pub struct SectorView {
    pub label: SectorLabel,
    pub description: String,
    pub command: CommandString,
    pub children: Vec<ChildView>,
}

#[derive(Debug, Clone)]
pub struct ChildView {
    pub label: SectorLabel,
    pub description: String,
    pub command: CommandString,
}

/// Where the current gesture is.
///
/// `Hovering` only holds childless sectors; entering a sector that has
/// children goes straight to `ChildRevealed` with no child selected yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Dormant,
    Summoned,
    Hovering { sector: usize },
    ChildRevealed { sector: usize, child: Option<usize> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Committed(CommandString),
    Cancelled,
}

pub struct State {
    pub preset_name: PresetName,
    pub sectors: Vec<SectorView>,
    pub layout: RingLayout,
    pub wheel: SectorWheel,
    pub child_angle_multiplier: f64,
    pub palette: MenuPalette,
    pub center: Point,
    pub phase: Phase,
}

impl State {
    pub fn from_document(document: &MenuDocument) -> Self {
        let sectors: Vec<SectorView> = document
            .active()
            .map(|preset| {
                preset
                    .inner_section
                    .iter()
                    .map(|(label, sector)| SectorView {
                        label: label.clone(),
                        description: sector.description.clone(),
                        command: sector.command.clone(),
                        children: sector
                            .children
                            .iter()
                            .map(|(child_label, child)| ChildView {
                                label: child_label.clone(),
                                description: child.description.clone(),
                                command: child.command.clone(),
                            })
                            .collect(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let palette = document
            .active()
            .map(|preset| MenuPalette::from_colors(&preset.colors))
            .unwrap_or_else(|| MenuPalette::from_colors(&Default::default()));

        let wheel = SectorWheel::new(sectors.len());

        Self {
            preset_name: document.active_preset.clone(),
            sectors,
            layout: RingLayout::from_size(&document.ui.size),
            wheel,
            child_angle_multiplier: document.ui.size.child_angle_multiplier,
            palette,
            center: Point::default(),
            phase: Phase::Dormant,
        }
    }

    pub fn summon(&mut self, center: Point) {
        self.center = center;
        self.phase = Phase::Summoned;
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Dormant
    }

    pub fn child_fan(&self, sector: usize) -> Option<ChildFan> {
        let view = self.sectors.get(sector)?;
        if view.children.is_empty() {
            return None;
        }
        Some(ChildFan::centered_on(
            self.wheel.center_angle(sector),
            view.children.len(),
            self.child_angle_multiplier,
        ))
    }

    /// Advances the phase for a new cursor position. Returns whether anything
    /// visible changed.
    pub fn update_cursor(&mut self, cursor: Point) -> bool {
        if self.phase == Phase::Dormant {
            return false;
        }

        let pointer = polar(self.center, cursor);
        let next = match self.phase {
            Phase::ChildRevealed { sector, .. } => {
                match self.layout.ring_at(pointer.distance, true) {
                    Ring::Outer => {
                        let child = self
                            .child_fan(sector)
                            .and_then(|fan| fan.hit(pointer.angle_deg));
                        Phase::ChildRevealed { sector, child }
                    }
                    Ring::Inner => self.hover_phase(pointer.angle_deg),
                    Ring::None if pointer.distance <= self.layout.dead_zone => Phase::Summoned,
                    // gap between the rings, or past the outer edge: keep the
                    // fan open but drop the child highlight
                    Ring::None => Phase::ChildRevealed {
                        sector,
                        child: None,
                    },
                }
            }
            _ => match self.layout.ring_at(pointer.distance, false) {
                Ring::Inner => self.hover_phase(pointer.angle_deg),
                _ => Phase::Summoned,
            },
        };

        let changed = next != self.phase;
        self.phase = next;
        changed
    }

    fn hover_phase(&self, angle_deg: f64) -> Phase {
        match self.wheel.hit(angle_deg) {
            Some(sector) if !self.sectors[sector].children.is_empty() => Phase::ChildRevealed {
                sector,
                child: None,
            },
            Some(sector) => Phase::Hovering { sector },
            None => Phase::Summoned,
        }
    }

    /// Ends the gesture. A highlighted child wins over its parent; a revealed
    /// fan with no child highlighted falls back to the parent's own command.
    pub fn release(&mut self) -> ReleaseOutcome {
        let outcome = match self.phase {
            Phase::ChildRevealed {
                sector,
                child: Some(child),
            } => self
                .sectors
                .get(sector)
                .and_then(|s| s.children.get(child))
                .map(|c| ReleaseOutcome::Committed(c.command.clone())),
            Phase::ChildRevealed {
                sector,
                child: None,
            }
            | Phase::Hovering { sector } => self
                .sectors
                .get(sector)
                .map(|s| ReleaseOutcome::Committed(s.command.clone())),
            Phase::Summoned | Phase::Dormant => None,
        }
        .unwrap_or(ReleaseOutcome::Cancelled);

        self.phase = Phase::Dormant;
        outcome
    }

    pub fn cancel(&mut self) {
        self.phase = Phase::Dormant;
    }

    pub fn hovered_sector(&self) -> Option<usize> {
        match self.phase {
            Phase::Hovering { sector } | Phase::ChildRevealed { sector, .. } => Some(sector),
            _ => None,
        }
    }

    pub fn revealed_sector(&self) -> Option<usize> {
        match self.phase {
            Phase::ChildRevealed { sector, .. } => Some(sector),
            _ => None,
        }
    }

    pub fn hovered_child(&self) -> Option<(usize, usize)> {
        match self.phase {
            Phase::ChildRevealed {
                sector,
                child: Some(child),
            } => Some((sector, child)),
            _ => None,
        }
    }

    /// Description line shown under the wheel, most specific target first.
    pub fn hovered_description(&self) -> Option<&str> {
        if let Some((sector, child)) = self.hovered_child() {
            let text = self.sectors.get(sector)?.children.get(child)?.description.as_str();
            return (!text.is_empty()).then_some(text);
        }
        let text = self.sectors.get(self.hovered_sector()?)?.description.as_str();
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DEFAULT_DOCUMENT;

    // Built-in document: Terminal, Files (3 children), Browser, Lock.
    // Four sectors, so Terminal is centered at 270° (top) with 90° spans.
    fn state() -> State {
        let document: MenuDocument = serde_json::from_str(DEFAULT_DOCUMENT).unwrap();
        let mut state = State::from_document(&document);
        state.summon(Point::new(200.0, 200.0));
        state
    }

    #[test]
    fn dormant_ignores_cursor_updates() {
        let document: MenuDocument = serde_json::from_str(DEFAULT_DOCUMENT).unwrap();
        let mut state = State::from_document(&document);
        assert!(!state.update_cursor(Point::new(500.0, 500.0)));
        assert_eq!(state.phase, Phase::Dormant);
    }

    #[test]
    fn summoned_release_cancels() {
        let mut state = state();
        assert_eq!(state.release(), ReleaseOutcome::Cancelled);
        assert_eq!(state.phase, Phase::Dormant);
    }

    #[test]
    fn dead_zone_keeps_the_menu_unselected() {
        let mut state = state();
        assert!(!state.update_cursor(Point::new(205.0, 200.0)));
        assert_eq!(state.phase, Phase::Summoned);
    }

    #[test]
    fn hovering_a_childless_sector_commits_its_command() {
        let mut state = state();
        // straight up 100px: sector 0 (Terminal), no children
        assert!(state.update_cursor(Point::new(200.0, 100.0)));
        assert_eq!(state.phase, Phase::Hovering { sector: 0 });
        assert_eq!(state.hovered_description(), Some("Open a terminal"));
        assert_eq!(
            state.release(),
            ReleaseOutcome::Committed(CommandString::new("foot"))
        );
        assert!(!state.is_active());
    }

    #[test]
    fn sector_with_children_reveals_the_fan_immediately() {
        let mut state = state();
        // straight right 100px: sector 1 (Files)
        assert!(state.update_cursor(Point::new(300.0, 200.0)));
        assert_eq!(
            state.phase,
            Phase::ChildRevealed {
                sector: 1,
                child: None
            }
        );
        // release with no child highlighted runs the parent command
        assert_eq!(
            state.release(),
            ReleaseOutcome::Committed(CommandString::new("xdg-open ~"))
        );
    }

    #[test]
    fn outer_ring_highlights_and_commits_a_child() {
        let mut state = state();
        state.update_cursor(Point::new(300.0, 200.0));
        // Files fan: 3 children, 75° arc centered on 0° → spans start at
        // -37.5°. Outer annulus is (155, 180]. Straight right at 170px sits
        // in the middle child's span.
        assert!(state.update_cursor(Point::new(370.0, 200.0)));
        assert_eq!(state.hovered_child(), Some((1, 1)));
        assert_eq!(state.hovered_description(), Some("Open the downloads directory"));
        assert_eq!(
            state.release(),
            ReleaseOutcome::Committed(CommandString::new("xdg-open ~/Downloads"))
        );
    }

    #[test]
    fn gap_between_rings_keeps_the_fan_open() {
        let mut state = state();
        state.update_cursor(Point::new(300.0, 200.0));
        // distance 153: past the inner radius, before the outer annulus
        assert!(!state.update_cursor(Point::new(353.0, 200.0)));
        assert_eq!(
            state.phase,
            Phase::ChildRevealed {
                sector: 1,
                child: None
            }
        );
    }

    #[test]
    fn outer_ring_is_inert_without_a_revealed_fan() {
        let mut state = state();
        // straight up 170px would be the outer annulus, but no fan is open
        assert!(!state.update_cursor(Point::new(200.0, 30.0)));
        assert_eq!(state.phase, Phase::Summoned);
    }

    #[test]
    fn moving_back_inside_switches_sectors() {
        let mut state = state();
        state.update_cursor(Point::new(300.0, 200.0));
        assert_eq!(state.revealed_sector(), Some(1));
        // straight down 100px: sector 2 (Browser), childless
        assert!(state.update_cursor(Point::new(200.0, 300.0)));
        assert_eq!(state.phase, Phase::Hovering { sector: 2 });
    }

    #[test]
    fn returning_to_the_dead_zone_resets_to_summoned() {
        let mut state = state();
        state.update_cursor(Point::new(300.0, 200.0));
        assert!(state.update_cursor(Point::new(200.0, 200.0)));
        assert_eq!(state.phase, Phase::Summoned);
    }

    #[test]
    fn cancel_goes_dormant_from_any_phase() {
        let mut state = state();
        state.update_cursor(Point::new(300.0, 200.0));
        state.cancel();
        assert!(!state.is_active());
    }

    #[test]
    fn empty_preset_never_hovers() {
        let document: MenuDocument = serde_json::from_str(
            r#"{ "active_preset": "Empty", "presets": { "Empty": {} } }"#,
        )
        .unwrap();
        let mut state = State::from_document(&document);
        state.summon(Point::new(200.0, 200.0));
        assert!(!state.update_cursor(Point::new(200.0, 100.0)));
        assert_eq!(state.phase, Phase::Summoned);
        assert_eq!(state.release(), ReleaseOutcome::Cancelled);
    }

    #[test]
    fn child_fan_geometry_respects_the_multiplier() {
        let document: MenuDocument = serde_json::from_str(DEFAULT_DOCUMENT).unwrap();
        let state = State::from_document(&document);
        let fan = state.child_fan(1).unwrap();
        assert_eq!(fan.count, 3);
        assert_eq!(fan.step_deg, 25.0);
        // centered on sector 1's center angle (0°)
        assert_eq!(fan.total_arc(), 75.0);
        assert_eq!(state.child_fan(0), None);
    }
}
