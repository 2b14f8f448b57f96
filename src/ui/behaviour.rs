//! "Behaviour" page

use crate::ui::rows::{self, SharedStore};
use gtk4::gio;
use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, DropDown, FileDialog, FileFilter, Image, Orientation,
    SpinButton};
use log::info;

const FALLBACK_ICON_PATH: &str = "/labwc_config/theme/fallbackIcon";
const PREVIEW_SIZE: i32 = 64;

pub struct BehaviourPage {
    root: GtkBox,
    pub top_maximize: DropDown,
    pub gap: SpinButton,
    pub placement: DropDown,
    pub adaptive_sync: DropDown,
    pub allow_tearing: DropDown,
    pub xwayland_persistence: DropDown,
    pub popup_show: DropDown,
    pub draw_contents: DropDown,
    pub corner_range: SpinButton,
    pub icon_button: Button,
    pub icon_preview: Image,
}

impl BehaviourPage {
    pub fn build(store: &SharedStore) -> Self {
        let root = GtkBox::new(Orientation::Vertical, 0);
        let grid = rows::settings_grid();
        root.append(&grid);
        let mut row = 0;

        let top_maximize = rows::bool_row(
            &grid,
            row,
            "Top Maximize",
            store,
            "/labwc_config/snapping/topMaximize",
        );
        row += 1;

        let gap = rows::spin_row(&grid, row, "Gap", store, "/labwc_config/core/gap", 20.0, 1.0);
        row += 1;

        let placement = rows::choice_row(
            &grid,
            row,
            "Window Placement",
            store,
            "/labwc_config/placement/policy",
            &["Automatic", "Center", "Cascade"],
        );
        row += 1;

        let adaptive_sync = rows::bool_row(
            &grid,
            row,
            "Adaptive Sync",
            store,
            "/labwc_config/core/adaptiveSync",
        );
        row += 1;

        let allow_tearing = rows::bool_row(
            &grid,
            row,
            "Allow Tearing",
            store,
            "/labwc_config/core/allowTearing",
        );
        row += 1;

        let xwayland_persistence = rows::bool_row(
            &grid,
            row,
            "Xwayland Persistence",
            store,
            "/labwc_config/core/xwaylandPersistence",
        );
        row += 1;

        let popup_show = rows::choice_row(
            &grid,
            row,
            "Show Resize Popup",
            store,
            "/labwc_config/resize/popupShow",
            &["Nonpixel", "Always", "Never"],
        );
        row += 1;

        let draw_contents = rows::bool_row(
            &grid,
            row,
            "Draw Window Contents",
            store,
            "/labwc_config/resize/drawContents",
        );
        row += 1;

        let corner_range = rows::spin_row(
            &grid,
            row,
            "Corner Range",
            store,
            "/labwc_config/resize/cornerRange",
            20.0,
            1.0,
        );
        row += 1;

        // Fallback icon: chooser button plus a small preview of the file.
        rows::attach_label(&grid, row, "Select FallBack Icon");
        let hbox = GtkBox::new(Orientation::Horizontal, 5);

        let icon_button = Button::with_label("Select Icon File");
        hbox.append(&icon_button);

        let icon_preview = Image::new();
        icon_preview.set_pixel_size(PREVIEW_SIZE);
        hbox.append(&icon_preview);

        {
            let store = store.borrow();
            if let Some(path) = store.get(FALLBACK_ICON_PATH) {
                icon_preview.set_from_file(Some(path));
            }
        }

        let store_for_icon = store.clone();
        let preview_for_icon = icon_preview.clone();
        icon_button.connect_clicked(move |button| {
            let window = button
                .root()
                .and_then(|root| root.downcast::<gtk4::Window>().ok());
            let store = store_for_icon.clone();
            let preview = preview_for_icon.clone();

            gtk4::glib::MainContext::default().spawn_local(async move {
                let image_filter = FileFilter::new();
                image_filter.set_name(Some("Image Files"));
                image_filter.add_mime_type("image/png");
                image_filter.add_mime_type("image/jpeg");
                image_filter.add_mime_type("image/svg+xml");
                image_filter.add_pattern("*.png");
                image_filter.add_pattern("*.jpg");
                image_filter.add_pattern("*.jpeg");
                image_filter.add_pattern("*.svg");

                let filters = gio::ListStore::new::<FileFilter>();
                filters.append(&image_filter);

                let dialog = FileDialog::builder()
                    .title("Select Icon")
                    .modal(true)
                    .filters(&filters)
                    .default_filter(&image_filter)
                    .build();

                match dialog.open_future(window.as_ref()).await {
                    Ok(file) => {
                        if let Some(path) = file.path() {
                            rows::persist(&store, FALLBACK_ICON_PATH, &path.to_string_lossy());
                            preview.set_from_file(Some(&path));
                        }
                    }
                    Err(e) => info!("icon dialog cancelled or failed: {}", e),
                }
            });
        });

        grid.attach(&hbox, 1, row, 1, 1);

        Self {
            root,
            top_maximize,
            gap,
            placement,
            adaptive_sync,
            allow_tearing,
            xwayland_persistence,
            popup_show,
            draw_contents,
            corner_range,
            icon_button,
            icon_preview,
        }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.root
    }
}
