use serde::{Deserialize, Serialize};

use crate::entities::estimate::{exceeds_threshold, sort_by_distance, with_estimates};
use crate::entities::{Category, Coordinates, Destination, Route};
use crate::error::{invalid_input_error, Error};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UiFlags {
    pub sidebar_open: bool,
    pub mobile: bool,
    pub loading: bool,
    pub debug: bool,
}

/// Everything the explorer shows. Transitions are plain methods with no I/O;
/// the engine performs service calls between them.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ViewState {
    pub user_location: Option<Coordinates>,
    pub user_elevation: Option<f64>,
    pub destinations: Vec<Destination>,
    pub selected: Option<Destination>,
    pub category: Option<Category>,
    pub flags: UiFlags,
    #[serde(skip)]
    last_computed: Option<Coordinates>,
    #[serde(skip)]
    selection_sequence: u64,
    #[serde(skip)]
    list_generation: u64,
}

/// Work captured when a recompute starts.
#[derive(Clone, Debug)]
pub struct Recompute {
    pub origin: Coordinates,
    pub origin_elevation: Option<f64>,
    pub estimates: Vec<Destination>,
    previous: Option<Coordinates>,
    generation: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionTicket {
    pub destination: Destination,
    pub sequence: u64,
}

impl ViewState {
    pub fn new(destinations: Vec<Destination>, debug: bool) -> Self {
        Self {
            destinations,
            flags: UiFlags {
                sidebar_open: true,
                debug,
                ..UiFlags::default()
            },
            ..Self::default()
        }
    }

    pub fn last_computed(&self) -> Option<Coordinates> {
        self.last_computed
    }

    pub fn set_location(&mut self, location: Coordinates) {
        self.user_location = Some(location);
    }

    pub fn set_elevation(&mut self, elevation: Option<f64>) {
        self.user_elevation = elevation;
    }

    /// Starts a recompute when none is in flight and the user moved far enough.
    pub fn begin_recompute(&mut self) -> Option<Recompute> {
        if self.flags.loading {
            return None;
        }

        let origin = self.user_location?;

        if !exceeds_threshold(self.last_computed, origin) {
            return None;
        }

        let previous = self.last_computed.replace(origin);
        self.flags.loading = true;

        Some(Recompute {
            origin,
            origin_elevation: self.user_elevation,
            estimates: with_estimates(&self.destinations, origin, self.user_elevation),
            previous,
            generation: self.list_generation,
        })
    }

    /// Installs the curated list. When the list was replaced while curation
    /// ran, the result is dropped, the recompute is rolled back and false is
    /// returned.
    pub fn complete_recompute(
        &mut self,
        recompute: Recompute,
        mut curated: Vec<Destination>,
    ) -> bool {
        if recompute.generation != self.list_generation {
            self.abort_recompute(recompute);
            return false;
        }

        sort_by_distance(&mut curated);

        if let Some(selected) = &self.selected {
            if let Some(fresh) = curated.iter().find(|d| d.id == selected.id) {
                self.selected = Some(fresh.clone());
            }
        }

        self.destinations = curated;
        self.flags.loading = false;

        true
    }

    /// Leaves the list untouched and lets the next location update retry.
    pub fn abort_recompute(&mut self, recompute: Recompute) {
        self.last_computed = recompute.previous;
        self.flags.loading = false;
    }

    pub fn find(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    pub fn select(&mut self, id: &str) -> Result<SelectionTicket, Error> {
        let destination = self.find(id).cloned().ok_or_else(invalid_input_error)?;

        self.selection_sequence += 1;
        self.selected = Some(destination.clone());

        Ok(SelectionTicket {
            destination,
            sequence: self.selection_sequence,
        })
    }

    pub fn is_current_selection(&self, ticket: &SelectionTicket) -> bool {
        ticket.sequence == self.selection_sequence
            && self
                .selected
                .as_ref()
                .map_or(false, |d| d.id == ticket.destination.id)
    }

    pub fn clear_selection(&mut self) {
        self.selection_sequence += 1;
        self.selected = None;
    }

    /// Swaps the route on the list entry and keeps the list sorted, and on the
    /// selection when it matches. Returns true when the selection changed.
    pub fn replace_route(&mut self, id: &str, route: Route, update_selection: bool) -> bool {
        if let Some(destination) = self.destinations.iter_mut().find(|d| d.id == id) {
            destination.route = Some(route.clone());
            sort_by_distance(&mut self.destinations);
        }

        match &mut self.selected {
            Some(selected) if update_selection && selected.id == id => {
                selected.route = Some(route);
                true
            }
            _ => false,
        }
    }

    pub fn filter(&mut self, category: Category, seed: &[Destination]) {
        self.destinations = seed
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect();
        self.list_generation += 1;
        self.category = Some(category);
        self.clear_selection();
    }

    pub fn clear_filter(&mut self, seed: &[Destination]) {
        self.destinations = seed.to_vec();
        self.list_generation += 1;
        self.category = None;
        self.clear_selection();
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.flags.sidebar_open = !self.flags.sidebar_open;
        self.flags.sidebar_open
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.flags.debug = !self.flags.debug;
        self.flags.debug
    }

    pub fn set_mobile(&mut self, mobile: bool) {
        self.flags.mobile = mobile;
    }
}
