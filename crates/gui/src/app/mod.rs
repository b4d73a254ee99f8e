//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;
use polyview_lib::input::ViewerEvent;
use polyview_lib::state::ViewerSettings;
use polyview_lib::Viewer;
use shared::MeshPayload;

use crate::fixtures;
use crate::ui::{display_panel, status_bar};
use crate::viewport::ViewportPanel;

/// Fixture shown when no payload is given on the command line
const DEFAULT_FIXTURE: &str = "cube_dual";

/// Panel visibility flags
pub struct PanelVisibility {
    pub display: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self { display: true }
    }
}

/// Combined application state
pub struct AppState {
    pub viewer: Viewer,
    pub panels: PanelVisibility,
    /// Most recent segment formed by a measurement click
    pub last_segment: Option<ViewerEvent>,
}

impl AppState {
    pub fn load_payload(&mut self, payload: MeshPayload) {
        self.viewer.set_payload(payload);
        self.last_segment = None;
    }

    pub fn load_fixture(&mut self, name: &str) {
        match fixtures::by_name(name) {
            Some(payload) => self.load_payload(payload),
            None => tracing::warn!("Unknown fixture {name}"),
        }
    }
}

/// Main application
pub struct PolyviewApp {
    state: AppState,
    viewport: ViewportPanel,
}

impl PolyviewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_payload: Option<MeshPayload>) -> Self {
        let mut state = AppState {
            viewer: Viewer::new(ViewerSettings::load()),
            panels: PanelVisibility::default(),
            last_segment: None,
        };

        // CLI argument takes priority, then the default fixture
        match initial_payload {
            Some(payload) => state.load_payload(payload),
            None => state.load_fixture(DEFAULT_FIXTURE),
        }

        styles::configure_styles(&cc.egui_ctx, &state.viewer.settings().theme);

        Self {
            state,
            viewport: ViewportPanel::new(),
        }
    }
}

impl eframe::App for PolyviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        keyboard::handle_keyboard(ctx, &mut self.state);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::shapes_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state);
                menus::language_menu(ui);
            });
        });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Right panel: layers + measurement readout ────────
        if self.state.panels.display {
            egui::SidePanel::right("display_panel")
                .default_width(250.0)
                .width_range(200.0..=420.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        display_panel::show(ui, &mut self.state);
                    });
                });
        }

        // ── Central panel: viewport ──────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.state.viewer.settings().save() {
            tracing::error!("Failed to save settings: {e}");
        }
    }
}
