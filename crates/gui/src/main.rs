mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::adapter`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use stlclip_gui_lib::adapter;
pub use stlclip_gui_lib::command;
pub use stlclip_gui_lib::harness;
pub use stlclip_gui_lib::state;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use app::StlClipApp;
use state::AppSettings;

/// What the command line asked for.
enum Launch {
    /// Open the window, optionally with a file already loaded
    Window(Option<PathBuf>),
    /// Run a JSON command file without a window
    Batch(PathBuf),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stlclip_gui=info".into()),
        )
        .init();

    match parse_args(std::env::args().skip(1)) {
        Ok(Launch::Batch(path)) => run_batch(&path),
        Ok(Launch::Window(initial_file)) => run_window(initial_file),
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: stlclip-gui [PATH.stl] | --batch COMMANDS.json");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Launch, String> {
    let mut initial_file = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--batch" => {
                let path = args.next().ok_or("--batch needs a file")?;
                return Ok(Launch::Batch(PathBuf::from(path)));
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            path => initial_file = Some(PathBuf::from(path)),
        }
    }
    Ok(Launch::Window(initial_file))
}

fn run_window(initial_file: Option<PathBuf>) -> ExitCode {
    // MSAA is fixed when the GL context is created
    let antialiasing = AppSettings::load().viewport.antialiasing;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("STL Clip")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        multisampling: if antialiasing { 4 } else { 0 },
        depth_buffer: 24,
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "stlclip-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(StlClipApp::new(cc, initial_file)))),
    ) {
        tracing::error!("Failed to start application: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_batch(path: &Path) -> ExitCode {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to read command file {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut harness = harness::TestHarness::with_settings(&AppSettings::load().clip);
    let responses = match command::execute_json_batch(&mut harness, &json) {
        Ok(responses) => responses,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let failed = responses.iter().filter(|r| !r.success).count();
    match serde_json::to_string_pretty(&responses) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            tracing::error!("Failed to serialize responses: {e}");
            return ExitCode::FAILURE;
        }
    }
    tracing::info!(commands = responses.len(), failed, "batch finished");
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
