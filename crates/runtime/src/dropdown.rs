use std::collections::HashMap;

use api::{ApiError, Backend, fetch_options};
use formats::OptionList;
use log::{info, warn};

use crate::selection::SelectionState;
use crate::view::{Selector, ViewAdapter};

/// Most recently loaded option list per selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionLists {
    lists: HashMap<Selector, OptionList>,
}

impl OptionLists {
    pub fn get(&self, selector: Selector) -> Option<&OptionList> {
        self.lists.get(&selector)
    }

    pub fn contains(&self, selector: Selector, value: &str) -> bool {
        self.get(selector).is_some_and(|l| l.contains(value))
    }

    pub fn replace(&mut self, selector: Selector, list: OptionList) {
        self.lists.insert(selector, list);
    }
}

/// Fills one selector from its backend list and establishes its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownLoader {
    pub selector: Selector,
    /// Chosen when offered; otherwise the first option wins.
    pub preferred: String,
}

impl DropdownLoader {
    pub fn new(selector: Selector, preferred: impl Into<String>) -> Self {
        Self {
            selector,
            preferred: preferred.into(),
        }
    }

    pub async fn fetch<B: Backend>(&self, backend: &B) -> Result<OptionList, ApiError> {
        fetch_options(backend, &self.selector.endpoint()).await
    }

    /// Replaces the selector's options with `list` and selects the default.
    ///
    /// An empty list clears the control and the selection field. Returns the
    /// chosen value.
    pub fn apply<V: ViewAdapter>(
        &self,
        list: OptionList,
        options: &mut OptionLists,
        selection: &mut SelectionState,
        view: &mut V,
    ) -> Option<String> {
        let chosen = list.default_choice(&self.preferred).map(str::to_string);
        view.populate_options(self.selector, list.values(), chosen.as_deref());
        match &chosen {
            Some(value) => info!(
                "loaded {} {}; default {value}",
                list.len(),
                self.selector.plural()
            ),
            None => warn!("no {} found", self.selector.plural()),
        }
        options.replace(self.selector, list);
        selection.set(self.selector, chosen.clone());
        chosen
    }
}
