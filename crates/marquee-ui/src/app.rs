//! Main GTK4 application for the launcher

use gtk4::glib;
use gtk4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{error, info};

use marquee_catalog::{Catalog, load_catalog};
use marquee_config::LauncherConfig;
use marquee_core::{CoreEvent, LaunchEngine, count_label, visibility};
use marquee_host::{HostEvent, LocalHost, ProcessHost};
use marquee_theme::{AccentPool, derive_tile_color};

use crate::grid::LauncherGrid;
use crate::icons;
use crate::tile::LauncherTile;

/// Static CSS styling; per-tile backgrounds and the status-bar accent are
/// appended at startup once the catalog colors are known
const LAUNCHER_CSS: &str = r#"
window {
    background-color: #1e1e24;
}

.launcher-grid {
    padding: 16px;
}

.launcher-tile {
    border-radius: 8px;
    border-width: 2px;
    border-style: solid;
    border-color: transparent;
    padding: 10px;
}

.tile-name {
    color: #ffffff;
    font-weight: bold;
    font-size: 13px;
}

.tile-action {
    color: #dddddd;
    font-size: 11px;
}

.status-bar {
    background-color: #2a2a32;
    padding: 6px 12px;
}

.status-label, .count-label {
    color: #ffffff;
    font-size: 13px;
}
"#;

const IDLE_STATUS: &str = "Select a game";

/// Widgets and data the launch-event handler touches; entries are looked
/// up by key at delivery time
struct UiHandles {
    window: gtk4::ApplicationWindow,
    grid: LauncherGrid,
    status_label: gtk4::Label,
    catalog: Arc<Catalog>,
}

pub struct LauncherApp {
    config: LauncherConfig,
    catalog_path: PathBuf,
}

impl LauncherApp {
    pub fn new(config: LauncherConfig, catalog_path: PathBuf) -> Self {
        Self {
            config,
            catalog_path,
        }
    }

    pub fn run(&self) -> i32 {
        let app = gtk4::Application::builder()
            .application_id("org.marquee.launcher")
            .build();

        let config = self.config.clone();
        let catalog_path = self.catalog_path.clone();

        app.connect_activate(move |app| {
            Self::build_ui(app, &config, &catalog_path);
        });

        // CLI args are already consumed by clap
        app.run_with_args::<glib::GString>(&[]).into()
    }

    fn build_ui(app: &gtk4::Application, config: &LauncherConfig, catalog_path: &PathBuf) {
        let provider = gtk4::CssProvider::new();
        provider.load_from_string(LAUNCHER_CSS);
        gtk4::style_context_add_provider_for_display(
            &gtk4::gdk::Display::default().expect("Could not get default display"),
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );

        let window = gtk4::ApplicationWindow::builder()
            .application(app)
            .title("Marquee")
            .default_width(820)
            .default_height(640)
            .resizable(false)
            .build();

        // A missing catalog is fatal to population only: surface it once
        // and keep running with an empty grid
        let catalog = match load_catalog(catalog_path, &config.deny) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!(path = %catalog_path.display(), error = %e, "Could not open catalog");
                alert(
                    &window,
                    "Error",
                    &format!("Could not open {}: {}", catalog_path.display(), e),
                );
                Catalog::new()
            }
        };
        let catalog = Arc::new(catalog);
        info!(entries = catalog.len(), "Catalog loaded");

        // Per-entry tiles and derived colors
        let mut tiles = Vec::new();
        let mut accent_pool = AccentPool::new();
        let mut dynamic_css = String::new();

        for (index, entry) in catalog.iter().enumerate() {
            let pixbuf = icons::resolve_icon(&entry.icon_ref);
            let bitmap = pixbuf.as_ref().and_then(icons::pixbuf_to_rgba);
            let color = derive_tile_color(bitmap.as_ref());
            accent_pool.push(color);

            let bg_class = format!("tile-bg-{}", index);
            dynamic_css.push_str(&format!(
                ".{} {{ background-color: {}; border-color: {}; }}\n",
                bg_class,
                color.css_rgba(0.7),
                color.css_rgb(),
            ));

            let tile = LauncherTile::new();
            tile.bind(entry.id.clone(), &entry.display_name, &bg_class);
            if let Some(ref pixbuf) = pixbuf {
                let texture = gtk4::gdk::Texture::for_pixbuf(pixbuf);
                tile.set_icon_paintable(Some(&texture));
            }
            tiles.push(tile);
        }

        if let Some(accent) = accent_pool.pick_accent() {
            dynamic_css.push_str(&format!(
                ".status-bar {{ background-color: {}; }}\n",
                accent.css_rgb()
            ));
        }

        let dynamic_provider = gtk4::CssProvider::new();
        dynamic_provider.load_from_string(&dynamic_css);
        gtk4::style_context_add_provider_for_display(
            &gtk4::gdk::Display::default().expect("Could not get default display"),
            &dynamic_provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );

        // Layout: search on top, grid in the middle, status bar below
        let root = gtk4::Box::new(gtk4::Orientation::Vertical, 0);

        let search = gtk4::SearchEntry::new();
        search.set_placeholder_text(Some("Search games"));
        search.set_margin_top(8);
        search.set_margin_start(8);
        search.set_margin_end(8);
        root.append(&search);

        let grid = LauncherGrid::new(config.columns);
        root.append(&grid);

        let status_bar = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
        status_bar.add_css_class("status-bar");
        let status_label = gtk4::Label::new(Some(IDLE_STATUS));
        status_label.add_css_class("status-label");
        status_label.set_halign(gtk4::Align::Start);
        status_label.set_hexpand(true);
        let counts = gtk4::Label::new(Some(&count_label(catalog.len(), catalog.len())));
        counts.add_css_class("count-label");
        status_bar.append(&status_label);
        status_bar.append(&counts);
        root.append(&status_bar);

        window.set_child(Some(&root));

        grid.set_tiles(tiles);

        // Search filtering: every change recomputes visibility and fully
        // rebuilds the grid
        let grid_for_search = grid.clone();
        let counts_for_search = counts.clone();
        let catalog_for_search = catalog.clone();
        search.connect_search_changed(move |entry| {
            let term = entry.text();
            let visible = visibility(&catalog_for_search, &term);
            grid_for_search.rebuild(&visible);

            let shown = visible.iter().filter(|v| **v).count();
            counts_for_search.set_text(&count_label(shown, catalog_for_search.len()));
        });

        // Process host and launch engine. Launch and shutdown block the UI
        // thread for a bounded wait; exit events arrive asynchronously and
        // are pumped onto the main loop below.
        let runtime = Arc::new(Runtime::new().expect("Failed to create tokio runtime"));
        let host = Arc::new(LocalHost::new());
        let mut event_rx = host.subscribe();
        let _monitor = {
            let _guard = runtime.enter();
            host.start_monitor()
        };

        let engine = Rc::new(RefCell::new(LaunchEngine::new(
            catalog.clone(),
            host as Arc<dyn ProcessHost>,
        )));

        let ui = Rc::new(UiHandles {
            window: window.clone(),
            grid: grid.clone(),
            status_label: status_label.clone(),
            catalog: catalog.clone(),
        });

        let engine_for_launch = engine.clone();
        let runtime_for_launch = runtime.clone();
        let ui_for_launch = ui.clone();
        grid.connect_launch(move |entry_id| {
            info!(entry_id = %entry_id, "Launch requested");
            let result = {
                let mut engine = engine_for_launch.borrow_mut();
                runtime_for_launch.block_on(engine.launch(&entry_id))
            };
            match result {
                Ok(event) => apply_event(&ui_for_launch, &event),
                Err(e) => {
                    error!(entry_id = %entry_id, error = %e, "Launch failed");
                    alert(&ui_for_launch.window, "Error", &e.to_string());
                }
            }
        });

        // Exit notifications are marshaled onto the UI thread before any
        // widget or engine state is touched
        let engine_for_exit = engine.clone();
        let ui_for_exit = ui.clone();
        glib::spawn_future_local(async move {
            while let Some(HostEvent::Exited { entry_id, status }) = event_rx.recv().await {
                let event = engine_for_exit.borrow_mut().handle_exit(&entry_id, status);
                apply_event(&ui_for_exit, &event);
            }
        });

        // Teardown: force-terminate running processes with a bounded wait
        let engine_for_close = engine.clone();
        let runtime_for_close = runtime.clone();
        window.connect_close_request(move |_| {
            runtime_for_close.block_on(engine_for_close.borrow_mut().shutdown());
            glib::Propagation::Proceed
        });

        window.present();
    }
}

/// Apply a launch-lifecycle event to the UI
fn apply_event(ui: &UiHandles, event: &CoreEvent) {
    let entry_id = event.entry_id();
    let name = ui
        .catalog
        .by_id(entry_id)
        .map(|e| e.display_name.clone())
        .unwrap_or_else(|| entry_id.to_string());

    match event {
        CoreEvent::Started { .. } => {
            if let Some(tile) = ui.grid.tile_for(entry_id) {
                tile.set_running(true);
            }
            ui.status_label.set_text(&format!("Running: {}", name));
            // Get out of the way while the program runs
            ui.window.minimize();
        }
        CoreEvent::AlreadyRunning { .. } => {
            alert(&ui.window, "Info", &format!("{} is already running!", name));
        }
        CoreEvent::StartFailed { message, .. } => {
            alert(
                &ui.window,
                "Error",
                &format!("Failed to start {}: {}", name, message),
            );
        }
        CoreEvent::Exited { .. } => {
            if let Some(tile) = ui.grid.tile_for(entry_id) {
                tile.set_running(false);
            }
            ui.status_label.set_text(IDLE_STATUS);
            // The launcher window returns once the program closes
            ui.window.unminimize();
            ui.window.present();
        }
    }
}

fn alert(window: &gtk4::ApplicationWindow, heading: &str, body: &str) {
    let dialog = gtk4::AlertDialog::builder()
        .message(heading)
        .detail(body)
        .modal(true)
        .build();
    dialog.show(Some(window));
}
