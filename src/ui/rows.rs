//! Shared row construction for the settings grids
//!
//! Every editable control follows the same contract: seed the initial value
//! from the config store at construction time, then write the new value back
//! and persist on each change notification.

use crate::config::ConfigStore;
use gtk4::prelude::*;
use gtk4::{Adjustment, DropDown, Entry, Grid, Label, SpinButton, StringList};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

pub type SharedStore = Rc<RefCell<ConfigStore>>;

pub fn settings_grid() -> Grid {
    let grid = Grid::new();
    grid.set_margin_start(20);
    grid.set_margin_end(20);
    grid.set_margin_top(20);
    grid.set_margin_bottom(20);
    grid.set_row_spacing(10);
    grid.set_column_spacing(10);
    grid
}

pub fn attach_label(grid: &Grid, row: i32, text: &str) {
    let label = Label::new(Some(text));
    label.set_halign(gtk4::Align::Start);
    grid.attach(&label, 0, row, 1, 1);
}

/// Write one edit through to the document and flush it. Failures are
/// logged, never surfaced.
pub fn persist(store: &SharedStore, path: &str, value: &str) {
    let mut store = store.borrow_mut();
    store.set(path, value);
    if let Err(e) = store.save() {
        warn!("failed to persist {}: {}", path, e);
    }
}

/// yes/no dropdown bound to a boolean config element.
pub fn bool_row(
    grid: &Grid,
    row: i32,
    label: &str,
    store: &SharedStore,
    path: &'static str,
) -> DropDown {
    attach_label(grid, row, label);
    let dropdown = DropDown::new(Some(StringList::new(&["no", "yes"])), None::<gtk4::Expression>);
    dropdown.set_selected(store.borrow().get_bool(path) as u32);
    let store = store.clone();
    dropdown.connect_selected_notify(move |dropdown| {
        persist(&store, path, if dropdown.selected() == 1 { "yes" } else { "no" });
    });
    grid.attach(&dropdown, 1, row, 1, 1);
    dropdown
}

/// Dropdown over fixed choices whose canonical text is stored verbatim.
/// An unrecognized stored value preselects the first choice.
pub fn choice_row(
    grid: &Grid,
    row: i32,
    label: &str,
    store: &SharedStore,
    path: &'static str,
    choices: &'static [&'static str],
) -> DropDown {
    attach_label(grid, row, label);
    let dropdown = DropDown::new(Some(StringList::new(choices)), None::<gtk4::Expression>);
    let selected = {
        let store = store.borrow();
        store
            .get(path)
            .and_then(|value| choices.iter().position(|c| c.eq_ignore_ascii_case(value)))
            .unwrap_or(0)
    };
    dropdown.set_selected(selected as u32);
    let store = store.clone();
    dropdown.connect_selected_notify(move |dropdown| {
        if let Some(choice) = choices.get(dropdown.selected() as usize) {
            persist(&store, path, choice);
        }
    });
    grid.attach(&dropdown, 1, row, 1, 1);
    dropdown
}

/// Spin button bound to an integer config element.
pub fn spin_row(
    grid: &Grid,
    row: i32,
    label: &str,
    store: &SharedStore,
    path: &'static str,
    upper: f64,
    step: f64,
) -> SpinButton {
    attach_label(grid, row, label);
    let adjustment = Adjustment::new(0.0, 0.0, upper, step, step * 2.0, 0.0);
    let spin = SpinButton::new(Some(&adjustment), 1.0, 0);
    spin.set_value(store.borrow().get_int(path) as f64);
    let store = store.clone();
    spin.connect_value_changed(move |spin| {
        persist(&store, path, &spin.value_as_int().to_string());
    });
    grid.attach(&spin, 1, row, 1, 1);
    spin
}

/// Free-text entry bound to a string config element.
pub fn entry_row(
    grid: &Grid,
    row: i32,
    label: &str,
    store: &SharedStore,
    path: &'static str,
) -> Entry {
    attach_label(grid, row, label);
    let entry = Entry::new();
    {
        let store = store.borrow();
        if let Some(value) = store.get(path) {
            entry.set_text(value);
        }
    }
    let store = store.clone();
    entry.connect_changed(move |entry| {
        persist(&store, path, entry.text().as_str());
    });
    grid.attach(&entry, 1, row, 1, 1);
    entry
}

/// Dropdown over discovered theme names. `current` preselects when present
/// among `themes`; `apply` runs once per selection change.
pub fn theme_row<F>(
    grid: &Grid,
    row: i32,
    label: &str,
    themes: &[String],
    current: Option<&str>,
    apply: F,
) -> DropDown
where
    F: Fn(&str) + 'static,
{
    attach_label(grid, row, label);
    let refs: Vec<&str> = themes.iter().map(String::as_str).collect();
    let dropdown = DropDown::new(Some(StringList::new(&refs)), None::<gtk4::Expression>);
    match current.and_then(|c| themes.iter().position(|t| t == c)) {
        Some(idx) => dropdown.set_selected(idx as u32),
        None => dropdown.set_selected(gtk4::INVALID_LIST_POSITION),
    }
    let names: Vec<String> = themes.to_vec();
    dropdown.connect_selected_notify(move |dropdown| {
        if let Some(name) = names.get(dropdown.selected() as usize) {
            apply(name);
        }
    });
    grid.attach(&dropdown, 1, row, 1, 1);
    dropdown
}
