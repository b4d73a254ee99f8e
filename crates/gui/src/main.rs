mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::i18n`, `crate::state`, etc.
// resolve to the lib crate everywhere in the binary.
pub use polyview_lib::fixtures;
pub use polyview_lib::i18n;
pub use polyview_lib::state;

use app::PolyviewApp;
use shared::MeshPayload;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polyview=info,polyview_lib=info".into()),
        )
        .init();

    // Parse --payload <path> argument
    let initial_payload = parse_payload_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Polyview: polyhedron viewer")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "polyview",
        native_options,
        Box::new(move |cc| Ok(Box::new(PolyviewApp::new(cc, initial_payload)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_payload_arg() -> Option<MeshPayload> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--payload" && i + 1 < args.len() {
            let path = &args[i + 1];
            match std::fs::read_to_string(path) {
                Ok(json) => match MeshPayload::from_json(&json) {
                    Ok(payload) => {
                        tracing::info!(
                            "Loaded payload from {path} ({} vertices)",
                            payload.vertex_count()
                        );
                        return Some(payload);
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse payload JSON from {path}: {e}");
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to read payload file {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
