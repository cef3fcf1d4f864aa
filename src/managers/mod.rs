// InspireVault state managers
// Managers handle stateful operations: the bookmark store, category selection, the add-bookmark form.

pub mod bookmark_form;
pub mod bookmark_store;
pub mod category_filter;
