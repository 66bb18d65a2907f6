#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    tracing_subscriber::fmt().with_target(false).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("fluid-clamp")
            .with_inner_size([560.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "fluid-clamp",
        options,
        Box::new(|cc| Ok(Box::new(fluid_clamp_ui::ClampApp::new(cc)))),
    )
}

// The web build starts from `fluid_clamp_ui::start` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
