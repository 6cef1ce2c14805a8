use crate::{
    dom::document::Document,
    foundation::core::NodeId,
    foundation::error::{ViewKitError, ViewKitResult},
    transition::runner::Transition,
    view::handle::ViewHandle,
    view::port::{Selection, ViewPort},
};

/// Notifications emitted by a [`ViewSelector`].
#[derive(Clone, Debug, PartialEq)]
pub enum SelectorEvent {
    /// A view was selected.
    Selected {
        /// The newly active view.
        view: ViewHandle,
        /// Its position in the list.
        index: usize,
    },
}

/// Indexed selection over a list replaced wholesale by `set_views`.
#[derive(Debug, Default)]
pub struct IndexSelection {
    views: Vec<ViewHandle>,
    index: Option<usize>,
    transition: Option<Transition>,
}

impl Selection for IndexSelection {
    type Event = SelectorEvent;

    fn current(&self) -> Option<&ViewHandle> {
        self.index.and_then(|i| self.views.get(i))
    }
}

/// Tab-style navigation: one view of a fixed list is visible.
pub type ViewSelector = ViewPort<IndexSelection>;

impl ViewPort<IndexSelection> {
    /// Empty selector mounting into `mount`.
    pub fn new(mount: NodeId) -> Self {
        Self::with_selection(mount, IndexSelection::default())
    }

    /// Selector holding `views`, nothing selected.
    pub fn with_views(mount: NodeId, views: Vec<ViewHandle>) -> Self {
        let mut selector = Self::new(mount);
        selector.set_views(views);
        selector
    }

    /// Default selection transition.
    pub fn transition(&self) -> Option<&Transition> {
        self.selection.transition.as_ref()
    }

    /// Replace the default selection transition.
    pub fn set_transition(&mut self, transition: Option<Transition>) {
        self.selection.transition = transition;
    }

    /// Held views.
    pub fn views(&self) -> &[ViewHandle] {
        &self.selection.views
    }

    /// Selected index.
    pub fn index(&self) -> Option<usize> {
        self.selection.index
    }

    /// Replace the held views and reset the selection.
    ///
    /// Nothing is rendered; call [`select_view`](Self::select_view) afterwards.
    pub fn set_views(&mut self, views: Vec<ViewHandle>) {
        for view in &self.selection.views {
            if view.owning_selector() == Some(self.id) {
                view.set_owning_selector(None);
            }
        }
        for view in &views {
            view.set_owning_selector(Some(self.id));
        }
        self.selection.views = views;
        self.selection.index = None;
    }

    /// Select and show the view at `index`.
    ///
    /// Fails with [`ViewKitError::OutOfRange`] without touching any state when
    /// `index >= views().len()`. A failing transition hook is reported after
    /// `Selected`; the view is shown regardless.
    #[tracing::instrument(skip(self, doc, transition), fields(port = %self.id))]
    pub fn select_view(
        &mut self,
        doc: &mut Document,
        index: usize,
        transition: Option<&Transition>,
    ) -> ViewKitResult<()> {
        let len = self.selection.views.len();
        let Some(view) = self.selection.views.get(index).cloned() else {
            return Err(ViewKitError::out_of_range(index, len));
        };
        let transition = transition.or(self.selection.transition.as_ref()).cloned();

        self.selection.index = Some(index);
        let swapped = self.render(doc, transition.as_ref());
        self.events.emit(&SelectorEvent::Selected { view, index });
        swapped.map(|_| ())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/selector.rs"]
mod tests;
