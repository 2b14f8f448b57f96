use clap::Parser;
use gtk4::prelude::*;
use gtk4::Application;
use labwc_tweaks::config::ConfigStore;
use labwc_tweaks::settings::DesktopSettings;
use labwc_tweaks::ui::SettingsWindow;
use log::{info, warn};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

const APP_ID: &str = "org.labwc.tweaks";

/// labwc-tweaks - A GTK4 preferences editor for the labwc Wayland compositor
#[derive(Parser, Debug, Clone)]
#[command(name = "labwc-tweaks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Configuration file to edit instead of the default rc.xml
    #[arg(value_name = "RC_FILE")]
    rc_file: Option<PathBuf>,
}

/// Global CLI options accessible from build_ui
static CLI_OPTIONS: std::sync::OnceLock<Cli> = std::sync::OnceLock::new();

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only; RUST_LOG overrides the CLI setting
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    CLI_OPTIONS.set(cli).expect("CLI options already set");

    let app = Application::builder().application_id(APP_ID).build();
    app.connect_activate(build_ui);

    // Run the application (pass empty args since we already parsed them)
    app.run_with_args(&["labwc-tweaks"]);
}

fn default_rc_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("labwc").join("rc.xml"))
        .unwrap_or_else(|| PathBuf::from("rc.xml"))
}

fn build_ui(app: &Application) {
    let rc_path = CLI_OPTIONS
        .get()
        .and_then(|cli| cli.rc_file.clone())
        .unwrap_or_else(default_rc_path);
    info!("editing {}", rc_path.display());

    let store = match ConfigStore::load(&rc_path) {
        Ok(store) => store,
        Err(e) => {
            warn!(
                "failed to load {}, starting from an empty document: {}",
                rc_path.display(),
                e
            );
            ConfigStore::empty(rc_path)
        }
    };
    let store = Rc::new(RefCell::new(store));
    let settings = DesktopSettings::new();

    SettingsWindow::build(app, &store, &settings).present();
}
