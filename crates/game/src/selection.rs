//! Selection and popup state for the career map.
//!
//! States:
//! - `Idle`: nothing selected, camera on the overview.
//! - `Focusing`: an entry was clicked, camera en route, popup closed.
//! - `Viewing`: camera arrived, popup open.
//! - `Browsing`: sequential "view all" mode; the popup opens immediately and
//!   stale arrival signals are ignored.

/// Current map interaction state. Entries are registry indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MapState {
    #[default]
    Idle,
    Focusing { entry: usize },
    Viewing { entry: usize },
    Browsing { index: usize },
}

impl MapState {
    pub fn selected(&self) -> Option<usize> {
        match *self {
            MapState::Idle => None,
            MapState::Focusing { entry } | MapState::Viewing { entry } => Some(entry),
            MapState::Browsing { index } => Some(index),
        }
    }

    pub fn popup_open(&self) -> bool {
        matches!(self, MapState::Viewing { .. } | MapState::Browsing { .. })
    }

    pub fn browse_index(&self) -> Option<usize> {
        match *self {
            MapState::Browsing { index } => Some(index),
            _ => None,
        }
    }
}

/// Flat view of the selection for callers that think in flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSelection {
    pub selected: Option<usize>,
    pub popup_open: bool,
    pub browse_index: Option<usize>,
}

impl From<MapState> for SceneSelection {
    fn from(state: MapState) -> Self {
        Self {
            selected: state.selected(),
            popup_open: state.popup_open(),
            browse_index: state.browse_index(),
        }
    }
}

/// Which on-screen controls are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Orbit/zoom is only allowed while no popup is open.
    pub orbit_enabled: bool,
    pub view_all_enabled: bool,
    /// Prev/Next are shown only while browsing.
    pub browsing: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Outcome of feeding one event to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: MapState,
    pub to: MapState,
    /// The camera target must be reassigned (even if it names the same entry).
    pub retarget: bool,
}

impl Transition {
    fn unchanged(state: MapState) -> Self {
        Self {
            from: state,
            to: state,
            retarget: false,
        }
    }

    pub fn changed(&self) -> bool {
        self.from != self.to || self.retarget
    }

    /// Popup went from closed to open.
    pub fn popup_opened(&self) -> bool {
        !self.from.popup_open() && self.to.popup_open()
    }
}

/// The selection state machine over a registry of `len` entries.
#[derive(Debug, Clone)]
pub struct SelectionMachine {
    state: MapState,
    len: usize,
}

impl SelectionMachine {
    pub fn new(len: usize) -> Self {
        Self {
            state: MapState::Idle,
            len,
        }
    }

    pub fn state(&self) -> MapState {
        self.state
    }

    pub fn selection(&self) -> SceneSelection {
        self.state.into()
    }

    fn go(&mut self, to: MapState, retarget: bool) -> Transition {
        let from = self.state;
        self.state = to;
        if from != to {
            log::debug!("Map state {:?} -> {:?}", from, to);
        }
        Transition { from, to, retarget }
    }

    /// Manual pick of an entry. Always focuses it and leaves browse mode.
    pub fn select_entry(&mut self, entry: usize) -> Transition {
        if entry >= self.len {
            log::warn!("Ignoring selection of out-of-range entry {entry} (len {})", self.len);
            return Transition::unchanged(self.state);
        }
        self.go(MapState::Focusing { entry }, true)
    }

    /// The camera reached its focus target. Opens the popup only when focusing;
    /// arrivals during browse mode or after a dismiss are stale and ignored.
    pub fn camera_arrived(&mut self) -> Transition {
        match self.state {
            MapState::Focusing { entry } => self.go(MapState::Viewing { entry }, false),
            other => {
                log::trace!("Ignoring camera arrival in {:?}", other);
                Transition::unchanged(other)
            }
        }
    }

    /// Close the popup / cancel focusing and return to the overview.
    pub fn dismiss(&mut self) -> Transition {
        if self.state == MapState::Idle {
            return Transition::unchanged(self.state);
        }
        self.go(MapState::Idle, true)
    }

    /// Enter sequential browse mode at the first entry.
    pub fn start_browse_all(&mut self) -> Transition {
        if self.len == 0 {
            return Transition::unchanged(self.state);
        }
        self.go(MapState::Browsing { index: 0 }, true)
    }

    pub fn next(&mut self) -> Transition {
        match self.state {
            MapState::Browsing { index } if index + 1 < self.len => {
                self.go(MapState::Browsing { index: index + 1 }, true)
            }
            other => Transition::unchanged(other),
        }
    }

    pub fn prev(&mut self) -> Transition {
        match self.state {
            MapState::Browsing { index } if index > 0 => self.go(MapState::Browsing { index: index - 1 }, true),
            other => Transition::unchanged(other),
        }
    }

    pub fn controls(&self) -> Controls {
        let browse = self.state.browse_index();
        Controls {
            orbit_enabled: !self.state.popup_open(),
            view_all_enabled: self.len > 0,
            browsing: browse.is_some(),
            prev_enabled: browse.is_some_and(|i| i > 0),
            next_enabled: browse.is_some_and(|i| i + 1 < self.len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_focuses_then_arrival_opens_popup() {
        let mut m = SelectionMachine::new(3);
        let t = m.select_entry(1);
        assert!(t.retarget);
        assert_eq!(m.state(), MapState::Focusing { entry: 1 });
        assert!(m.controls().orbit_enabled);

        let t = m.camera_arrived();
        assert!(t.popup_opened());
        assert_eq!(m.state(), MapState::Viewing { entry: 1 });
        assert!(!m.controls().orbit_enabled);

        // A second arrival signal changes nothing.
        assert!(!m.camera_arrived().changed());
    }

    #[test]
    fn arrival_is_ignored_outside_focusing() {
        let mut m = SelectionMachine::new(3);
        assert!(!m.camera_arrived().changed());
        m.start_browse_all();
        let t = m.camera_arrived();
        assert!(!t.changed());
        assert_eq!(m.state(), MapState::Browsing { index: 0 });
    }

    #[test]
    fn reselect_from_viewing_refocuses() {
        let mut m = SelectionMachine::new(2);
        m.select_entry(0);
        m.camera_arrived();
        let t = m.select_entry(0);
        assert!(t.retarget);
        assert_eq!(m.state(), MapState::Focusing { entry: 0 });
        assert!(m.camera_arrived().popup_opened());
    }

    #[test]
    fn browse_walks_to_end_and_back() {
        let mut m = SelectionMachine::new(4);
        assert!(m.start_browse_all().popup_opened());
        for _ in 0..3 {
            assert!(m.next().changed());
        }
        assert_eq!(m.state(), MapState::Browsing { index: 3 });
        let c = m.controls();
        assert!(c.browsing && c.prev_enabled && !c.next_enabled);

        let before = m.state();
        assert!(!m.next().changed());
        assert_eq!(m.state(), before);

        for _ in 0..3 {
            m.prev();
        }
        assert_eq!(m.state(), MapState::Browsing { index: 0 });
        assert!(!m.prev().changed());
        let c = m.controls();
        assert!(!c.prev_enabled && c.next_enabled);
    }

    #[test]
    fn next_prev_outside_browse_are_noops() {
        let mut m = SelectionMachine::new(2);
        m.select_entry(0);
        m.camera_arrived();
        assert!(!m.next().changed());
        assert!(!m.prev().changed());
        assert_eq!(m.state(), MapState::Viewing { entry: 0 });
        assert!(!m.controls().browsing);
    }

    #[test]
    fn manual_click_exits_browse() {
        let mut m = SelectionMachine::new(3);
        m.start_browse_all();
        m.next();
        m.select_entry(2);
        assert_eq!(m.state(), MapState::Focusing { entry: 2 });
        assert_eq!(m.selection().browse_index, None);
    }

    #[test]
    fn dismiss_from_every_state_clears_everything() {
        let setups: [fn(&mut SelectionMachine); 3] = [
            |m| {
                m.select_entry(1);
            },
            |m| {
                m.select_entry(1);
                m.camera_arrived();
            },
            |m| {
                m.start_browse_all();
                m.next();
            },
        ];
        for setup in setups {
            let mut m = SelectionMachine::new(3);
            setup(&mut m);
            assert!(m.dismiss().changed());
            assert_eq!(m.state(), MapState::Idle);
            assert_eq!(
                m.selection(),
                SceneSelection {
                    selected: None,
                    popup_open: false,
                    browse_index: None
                }
            );
        }
        let mut idle = SelectionMachine::new(3);
        assert!(!idle.dismiss().changed());
    }

    #[test]
    fn selection_invariants_hold() {
        let mut m = SelectionMachine::new(3);
        let check = |m: &SelectionMachine| {
            let s = m.selection();
            if s.popup_open {
                assert!(s.selected.is_some());
            }
            if let Some(i) = s.browse_index {
                assert_eq!(s.selected, Some(i));
            }
        };
        check(&m);
        m.select_entry(2);
        check(&m);
        m.camera_arrived();
        check(&m);
        m.start_browse_all();
        check(&m);
        m.next();
        check(&m);
        m.dismiss();
        check(&m);
    }

    #[test]
    fn empty_registry_cannot_browse_or_select() {
        let mut m = SelectionMachine::new(0);
        assert!(!m.start_browse_all().changed());
        assert!(!m.select_entry(0).changed());
        assert!(!m.controls().view_all_enabled);
    }
}
