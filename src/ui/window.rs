//! Top-level settings window

use crate::settings::DesktopSettings;
use crate::ui::appearance::AppearancePage;
use crate::ui::behaviour::BehaviourPage;
use crate::ui::mouse::MousePage;
use crate::ui::rows::SharedStore;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, HeaderBar, Stack, StackSwitcher};

pub struct SettingsWindow {
    window: ApplicationWindow,
    pub appearance: AppearancePage,
    pub behaviour: BehaviourPage,
    pub mouse: MousePage,
}

impl SettingsWindow {
    pub fn build(app: &Application, store: &SharedStore, settings: &DesktopSettings) -> Self {
        let stack = Stack::new();
        let appearance = AppearancePage::build(store, settings);
        stack.add_titled(appearance.widget(), Some("appearance"), "Appearance");
        let behaviour = BehaviourPage::build(store);
        stack.add_titled(behaviour.widget(), Some("behaviour"), "Behaviour");
        let mouse = MousePage::build(store, settings);
        stack.add_titled(mouse.widget(), Some("mouse"), "Mouse & Touchpad");

        let switcher = StackSwitcher::new();
        switcher.set_stack(Some(&stack));
        let header = HeaderBar::new();
        header.set_title_widget(Some(&switcher));

        let window = ApplicationWindow::builder()
            .application(app)
            .title("labwc-tweaks")
            .default_width(600)
            .default_height(540)
            .build();
        window.set_titlebar(Some(&header));
        window.set_child(Some(&stack));

        Self {
            window,
            appearance,
            behaviour,
            mouse,
        }
    }

    pub fn present(&self) {
        self.window.present();
    }
}
