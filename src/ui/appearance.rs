//! "Appearance" page

use crate::font::{self, FontScope, FontSpec};
use crate::settings::DesktopSettings;
use crate::theme;
use crate::ui::rows::{self, SharedStore};
use gtk4::prelude::*;
use gtk4::{Box as GtkBox, DropDown, Entry, FontDialog, FontDialogButton, Label, Orientation,
    SpinButton, StringList};

pub struct AppearancePage {
    root: GtkBox,
    pub openbox_theme: DropDown,
    pub corner_radius: SpinButton,
    pub button_layout: Entry,
    pub show_title: DropDown,
    pub drop_shadows: DropDown,
    pub gtk_theme: DropDown,
    pub color_scheme: DropDown,
    pub icon_theme: DropDown,
    pub font_buttons: Vec<FontDialogButton>,
}

impl AppearancePage {
    pub fn build(store: &SharedStore, settings: &DesktopSettings) -> Self {
        let root = GtkBox::new(Orientation::Vertical, 0);
        let grid = rows::settings_grid();
        root.append(&grid);
        let mut row = 0;

        let openbox_themes = theme::installed_themes("themes", Some("openbox-3/themerc"));
        let current_theme = store.borrow().get("/labwc_config/theme/name").map(str::to_string);
        let store_for_theme = store.clone();
        let openbox_theme = rows::theme_row(
            &grid,
            row,
            "Openbox Theme",
            &openbox_themes,
            current_theme.as_deref(),
            move |name| rows::persist(&store_for_theme, "/labwc_config/theme/name", name),
        );
        row += 1;

        let corner_radius = rows::spin_row(
            &grid,
            row,
            "Corner Radius",
            store,
            "/labwc_config/theme/cornerradius",
            20.0,
            1.0,
        );
        row += 1;

        let button_layout = rows::entry_row(
            &grid,
            row,
            "Button Layout",
            store,
            "/labwc_config/theme/titlebar/layout",
        );
        row += 1;
        let hint = Label::new(Some("Values: icon,menu,shade:max,iconify,close"));
        hint.set_halign(gtk4::Align::Start);
        hint.add_css_class("dim-label");
        grid.attach(&hint, 1, row, 1, 1);
        row += 1;

        let show_title = rows::bool_row(
            &grid,
            row,
            "Show Title",
            store,
            "/labwc_config/theme/titlebar/showTitle",
        );
        row += 1;

        let drop_shadows = rows::bool_row(
            &grid,
            row,
            "Drop Shadows",
            store,
            "/labwc_config/theme/dropShadows",
        );
        row += 1;

        let gtk_themes = theme::installed_themes("themes", Some("gtk-3.0/gtk.css"));
        let settings_for_gtk = settings.clone();
        let gtk_theme = rows::theme_row(
            &grid,
            row,
            "Gtk Theme",
            &gtk_themes,
            Some(&settings.gtk_theme()),
            move |name| settings_for_gtk.set_gtk_theme(name),
        );
        row += 1;

        rows::attach_label(&grid, row, "Color Scheme");
        let color_scheme = DropDown::new(
            Some(StringList::new(&["default", "prefer-dark", "prefer-light"])),
            None::<gtk4::Expression>,
        );
        color_scheme.set_selected(settings.color_scheme().max(0) as u32);
        let settings_for_scheme = settings.clone();
        color_scheme.connect_selected_notify(move |dropdown| {
            settings_for_scheme.set_color_scheme(dropdown.selected() as i32);
        });
        grid.attach(&color_scheme, 1, row, 1, 1);
        row += 1;

        let icon_themes = theme::installed_themes("icons", None);
        let settings_for_icons = settings.clone();
        let icon_theme = rows::theme_row(
            &grid,
            row,
            "Icon Theme",
            &icon_themes,
            Some(&settings.icon_theme()),
            move |name| settings_for_icons.set_icon_theme(name),
        );
        row += 1;

        // One font row per scope; the same codec handles all three.
        let mut font_buttons = Vec::new();
        for scope in FontScope::ALL {
            rows::attach_label(&grid, row, scope.label());
            let button = FontDialogButton::new(Some(FontDialog::new()));
            let initial = font::initial_descriptor(&store.borrow(), scope);
            button.set_font_desc(&FontSpec::parse(&initial).to_description());
            let store_for_font = store.clone();
            button.connect_font_desc_notify(move |button| {
                if let Some(desc) = button.font_desc() {
                    let spec = FontSpec::from_description(&desc);
                    font::write_font(&mut store_for_font.borrow_mut(), scope, &spec);
                }
            });
            grid.attach(&button, 1, row, 1, 1);
            row += 1;
            font_buttons.push(button);
        }

        Self {
            root,
            openbox_theme,
            corner_radius,
            button_layout,
            show_title,
            drop_shadows,
            gtk_theme,
            color_scheme,
            icon_theme,
            font_buttons,
        }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.root
    }
}
