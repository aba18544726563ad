use clap::Parser;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, Box as GtkBox, Button, Orientation};
use log::{error, info, warn};
use serde_json::{json, Value};
use speedo::config::{self, AppConfig};
use speedo::ui::GaugeWidget;
use std::rc::Rc;

const APP_ID: &str = "com.github.speedo_gauge.speedo";

/// Speedo - a custom-drawn speedometer gauge widget for GTK4
#[derive(Parser, Debug, Clone)]
#[command(name = "speedo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Start from configuration defaults, ignoring any saved gauge state
    #[arg(long = "fresh")]
    fresh: bool,

    /// Configuration file to load instead of the default location
    #[arg(value_name = "CONFIG_FILE")]
    config_file: Option<String>,
}

/// Global CLI options accessible from build_ui
static CLI_OPTIONS: std::sync::OnceLock<Cli> = std::sync::OnceLock::new();

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger with verbosity based on -d/--debug flag.
    // RUST_LOG overrides the CLI setting.
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting Speedo v{}", env!("CARGO_PKG_VERSION"));

    // Store CLI options for access in build_ui
    CLI_OPTIONS.set(cli).expect("CLI options already set");

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(build_ui);

    // Run the application (pass empty args since we already parsed them)
    app.run_with_args(&["speedo"]);
}

fn build_ui(app: &Application) {
    info!("Building UI");

    let cli = CLI_OPTIONS.get().cloned().expect("CLI options not set");

    // Load configuration - from the given file if specified, otherwise
    // from the default config location
    let app_config = if let Some(ref config_path) = cli.config_file {
        match AppConfig::load_from_path(std::path::Path::new(config_path)) {
            Ok(config) => {
                info!("Loaded configuration from: {}", config_path);
                config
            }
            Err(e) => {
                warn!("Failed to load config file '{}': {}", config_path, e);
                AppConfig::load().unwrap_or_default()
            }
        }
    } else {
        match AppConfig::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config, using defaults: {}", e);
                AppConfig::default()
            }
        }
    };

    // An out-of-bounds initial speed is fatal: the gauge cannot be built
    // in an invalid state, and the error is not swallowed.
    let gauge = match GaugeWidget::new(&app_config.gauge) {
        Ok(gauge) => Rc::new(gauge),
        Err(e) => {
            error!("Invalid gauge configuration: {e}");
            std::process::exit(1);
        }
    };

    // Restore the saved snapshot. The widget takes its three fields and
    // hands the opaque super-state back; the shell owns that blob and
    // reads its window geometry out of it.
    let mut restored_window = None;
    if !cli.fresh {
        match config::load_snapshot() {
            Ok(Some(state)) => {
                let super_state = gauge.restore_state(state);
                restored_window = window_size_from_state(&super_state);
                info!("Restored gauge state (speed {})", gauge.speed());
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to load saved state: {}", e),
        }
    }

    let (width, height) =
        restored_window.unwrap_or((app_config.window.width, app_config.window.height));

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Speedo")
        .default_width(width)
        .default_height(height)
        .build();

    let content = GtkBox::new(Orientation::Vertical, 12);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);
    content.append(gauge.widget());

    // The two demo controls: step the speed up or down through the
    // animated path.
    let step = app_config.speed_step;
    let buttons = GtkBox::new(Orientation::Horizontal, 12);
    buttons.set_halign(gtk4::Align::Center);

    let decelerate = Button::with_label("Decelerate");
    let gauge_for_down = gauge.clone();
    decelerate.connect_clicked(move |_| gauge_for_down.adjust_by_delta_animated(-step));
    buttons.append(&decelerate);

    let accelerate = Button::with_label("Accelerate");
    let gauge_for_up = gauge.clone();
    accelerate.connect_clicked(move |_| gauge_for_up.adjust_by_delta_animated(step));
    buttons.append(&accelerate);

    content.append(&buttons);
    window.set_child(Some(&content));

    // Save the gauge snapshot on close, with the window geometry as the
    // opaque host blob.
    let gauge_for_close = gauge.clone();
    window.connect_close_request(move |window| {
        let super_state = json!({
            "width": window.default_width(),
            "height": window.default_height(),
        });
        let snapshot = gauge_for_close.save_state(super_state);
        match config::save_snapshot(&snapshot) {
            Ok(()) => info!("Saved gauge state (speed {})", snapshot.speed),
            Err(e) => warn!("Failed to save gauge state: {}", e),
        }
        glib::Propagation::Proceed
    });

    window.present();
}

/// Pull window dimensions back out of the opaque super-state blob.
fn window_size_from_state(state: &Value) -> Option<(i32, i32)> {
    let width = state.get("width")?.as_i64()? as i32;
    let height = state.get("height")?.as_i64()? as i32;
    Some((width, height))
}
