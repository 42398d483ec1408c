//! Browse state: which container is current and where its cursor is.
//!
//! Cursor moves that fall off either end of a container hand over to the
//! neighbouring container, and every move is published on the
//! [`NavigationBus`].

use crate::navigation::{NavEvent, NavigationBus};
use crate::types::{Container, Content, CursorMove};

/// Ordered containers plus the current selection.
pub struct BrowseState {
    containers: Vec<Container>,
    selected: usize,
    fullscreen: bool,
    nav: NavigationBus,
}

impl BrowseState {
    pub fn new(containers: Vec<Container>, nav: NavigationBus) -> Self {
        Self {
            containers,
            selected: 0,
            fullscreen: false,
            nav,
        }
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn current_container(&self) -> Option<&Container> {
        self.containers.get(self.selected)
    }

    pub fn current_container_mut(&mut self) -> Option<&mut Container> {
        self.containers.get_mut(self.selected)
    }

    pub fn container_mut(&mut self, container_id: &str) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| c.id == container_id)
    }

    pub fn current_content(&self) -> Option<&Content> {
        self.current_container()?.current_content()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Make the container at `index` current.
    pub fn select_container(&mut self, index: usize) -> Option<&Container> {
        let container = self.containers.get(index)?;
        self.nav.emit(NavEvent::SelectContainer {
            container_id: container.id.clone(),
        });
        self.selected = index;
        self.containers.get(index)
    }

    /// Select `item` in the container that owns it.
    ///
    /// Returns `false` when no loaded container holds the item.
    pub fn select_content(&mut self, item: &Content) -> bool {
        let found = self
            .containers
            .iter_mut()
            .enumerate()
            .filter(|(_, c)| item.container_id.is_empty() || c.id == item.container_id)
            .find_map(|(i, c)| c.select_content(item).map(|_| (i, c.id.clone())));

        let Some((index, container_id)) = found else {
            return false;
        };
        self.selected = index;
        self.nav.emit(NavEvent::SelectContent {
            container_id,
            content_id: item.id.clone(),
        });
        true
    }

    /// Step to the next item, moving into the next container at the end.
    ///
    /// At the end of a container that has more on the server a
    /// [`NavEvent::LoadMore`] is published and the cursor stays put.
    pub fn next_content(&mut self) -> Option<&Content> {
        let has_next = self.selected + 1 < self.containers.len();
        let container = self.containers.get_mut(self.selected)?;
        match container.next_content() {
            CursorMove::Selected(_) => {}
            CursorMove::PastEnd if container.has_more() => {
                let last = container.count().saturating_sub(1);
                container.set_row_idx(last);
                let container_id = container.id.clone();
                self.nav.emit(NavEvent::LoadMore { container_id });
            }
            CursorMove::PastEnd | CursorMove::BeforeStart => {
                if has_next {
                    self.selected += 1;
                    self.containers[self.selected].set_row_idx(0);
                    self.nav.emit(NavEvent::NextContainer);
                } else {
                    let last = container.count().saturating_sub(1);
                    container.set_row_idx(last);
                }
            }
        }
        self.current_content()
    }

    /// Step to the previous item, moving to the end of the previous
    /// container at the start.
    pub fn prev_content(&mut self) -> Option<&Content> {
        let container = self.containers.get_mut(self.selected)?;
        if container.prev_content() == CursorMove::BeforeStart && self.selected > 0 {
            self.selected -= 1;
            let prev = &mut self.containers[self.selected];
            let last = prev.count().saturating_sub(1);
            prev.set_row_idx(last);
            self.nav.emit(NavEvent::PrevContainer);
        }
        self.current_content()
    }

    /// Show the current item fullscreen. Returns `false` with nothing selected.
    pub fn view_fullscreen(&mut self) -> bool {
        let Some(content_id) = self.current_content().map(|c| c.id.clone()) else {
            return false;
        };
        self.fullscreen = true;
        self.nav.emit(NavEvent::ViewFullscreen { content_id });
        true
    }

    pub fn hide_fullscreen(&mut self) {
        if self.fullscreen {
            self.fullscreen = false;
            self.nav.emit(NavEvent::HideFullscreen);
        }
    }
}
