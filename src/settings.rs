//! Desktop settings store
//!
//! Wraps the `org.gnome.desktop.interface` GSettings schema for the handful
//! of keys the editor touches. Writes apply immediately; GSettings owns its
//! own persistence.

use gtk4::gio;
use gtk4::prelude::*;
use log::warn;

pub const INTERFACE_SCHEMA: &str = "org.gnome.desktop.interface";

#[derive(Clone)]
pub struct DesktopSettings {
    inner: gio::Settings,
}

impl DesktopSettings {
    pub fn new() -> Self {
        Self {
            inner: gio::Settings::new(INTERFACE_SCHEMA),
        }
    }

    pub fn gtk_theme(&self) -> String {
        self.inner.string("gtk-theme").to_string()
    }

    pub fn set_gtk_theme(&self, name: &str) {
        self.set_string("gtk-theme", name);
    }

    pub fn icon_theme(&self) -> String {
        self.inner.string("icon-theme").to_string()
    }

    pub fn set_icon_theme(&self, name: &str) {
        self.set_string("icon-theme", name);
    }

    pub fn cursor_theme(&self) -> String {
        self.inner.string("cursor-theme").to_string()
    }

    pub fn set_cursor_theme(&self, name: &str) {
        self.set_string("cursor-theme", name);
    }

    pub fn cursor_size(&self) -> i32 {
        self.inner.int("cursor-size")
    }

    pub fn set_cursor_size(&self, size: i32) {
        if let Err(e) = self.inner.set_int("cursor-size", size) {
            warn!("failed to update cursor-size: {}", e);
        }
    }

    /// Enum index of the color-scheme key: 0 default, 1 prefer-dark,
    /// 2 prefer-light.
    pub fn color_scheme(&self) -> i32 {
        self.inner.enum_("color-scheme")
    }

    pub fn set_color_scheme(&self, value: i32) {
        if let Err(e) = self.inner.set_enum("color-scheme", value) {
            warn!("failed to update color-scheme: {}", e);
        }
    }

    fn set_string(&self, key: &str, value: &str) {
        if let Err(e) = self.inner.set_string(key, value) {
            warn!("failed to update {}: {}", key, e);
        }
    }
}

impl Default for DesktopSettings {
    fn default() -> Self {
        Self::new()
    }
}
