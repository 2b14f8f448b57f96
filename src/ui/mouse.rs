//! "Mouse & Touchpad" page

use crate::settings::DesktopSettings;
use crate::theme;
use crate::ui::rows::{self, SharedStore};
use gtk4::prelude::*;
use gtk4::{Adjustment, Box as GtkBox, DropDown, Orientation, SpinButton};

pub struct MousePage {
    root: GtkBox,
    pub cursor_theme: DropDown,
    pub cursor_size: SpinButton,
    pub natural_scroll: DropDown,
    pub double_click_time: SpinButton,
    pub follow_mouse: DropDown,
    pub follow_mouse_requires_movement: DropDown,
    pub raise_on_focus: DropDown,
}

impl MousePage {
    pub fn build(store: &SharedStore, settings: &DesktopSettings) -> Self {
        let root = GtkBox::new(Orientation::Vertical, 0);
        let grid = rows::settings_grid();
        root.append(&grid);
        let mut row = 0;

        let cursor_themes = theme::installed_themes("icons", Some("cursors"));
        let settings_for_cursor = settings.clone();
        let cursor_theme = rows::theme_row(
            &grid,
            row,
            "Cursor Theme",
            &cursor_themes,
            Some(&settings.cursor_theme()),
            move |name| settings_for_cursor.set_cursor_theme(name),
        );
        row += 1;

        rows::attach_label(&grid, row, "Cursor Size");
        let adjustment = Adjustment::new(0.0, 0.0, 512.0, 1.0, 2.0, 0.0);
        let cursor_size = SpinButton::new(Some(&adjustment), 1.0, 0);
        cursor_size.set_value(settings.cursor_size() as f64);
        let settings_for_size = settings.clone();
        cursor_size.connect_value_changed(move |spin| {
            settings_for_size.set_cursor_size(spin.value_as_int());
        });
        grid.attach(&cursor_size, 1, row, 1, 1);
        row += 1;

        let natural_scroll = rows::bool_row(
            &grid,
            row,
            "Natural Scroll",
            store,
            "/labwc_config/libinput/device/naturalscroll",
        );
        row += 1;

        let double_click_time = rows::spin_row(
            &grid,
            row,
            "Double Click Time",
            store,
            "/labwc_config/mouse/doubleClickTime",
            4000.0,
            100.0,
        );
        row += 1;

        let follow_mouse = rows::bool_row(
            &grid,
            row,
            "Focus Follow Mouse",
            store,
            "/labwc_config/focus/followMouse",
        );
        row += 1;

        let follow_mouse_requires_movement = rows::bool_row(
            &grid,
            row,
            "Follow Mouse Requires Movement",
            store,
            "/labwc_config/focus/followMouseRequiresMovement",
        );
        row += 1;

        let raise_on_focus = rows::bool_row(
            &grid,
            row,
            "Raise On Focus",
            store,
            "/labwc_config/focus/raiseOnFocus",
        );

        Self {
            root,
            cursor_theme,
            cursor_size,
            natural_scroll,
            double_click_time,
            follow_mouse,
            follow_mouse_requires_movement,
            raise_on_focus,
        }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.root
    }
}
