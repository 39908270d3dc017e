use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use gol_stage::{
    application::GameOfLife,
    config::StageConfig,
    domain::{PresetCatalog, presets},
    input,
    rendering::{
        Capabilities, Container,
        panel::{self, PanelState},
    },
    ui::{self, PresetPicker},
};
use macroquad::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Top of the preset picker inside the panel
const PICKER_TOP: f32 = 30.0;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SurfaceChoice {
    /// Raster canvas
    Native,
    /// Retained rectangles
    Elements,
}

/// Conway's Game of Life on a wrap-around board
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file with the starting configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preset to load at startup, as "Category/Name"
    #[arg(long)]
    preset: Option<String>,

    /// JSON file with extra presets ({"Category": {"Name": {...}}})
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Force a drawing surface instead of probing
    #[arg(long, value_enum)]
    surface: Option<SurfaceChoice>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Conway's Game of Life".to_owned(),
        window_width: 900,
        window_height: 700,
        window_resizable: true,
        ..Default::default()
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match StageConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!(path = %path.display(), %err, "failed to load configuration");
                std::process::exit(1);
            }
        },
        None => StageConfig::default(),
    };

    let mut catalog = presets::catalog();
    if let Some(path) = &args.presets {
        match catalog.extend_from_file(path) {
            Ok(added) => info!(path = %path.display(), added, "loaded presets"),
            Err(err) => {
                error!(path = %path.display(), %err, "failed to load presets");
                std::process::exit(1);
            }
        }
    }

    if args.dump_config {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{json}"),
            Err(err) => error!(%err, "failed to serialize configuration"),
        }
        return;
    }

    if let Some(choice) = args.surface {
        let caps = match choice {
            SurfaceChoice::Native => Capabilities::without(""),
            SurfaceChoice::Elements => Capabilities::without("native"),
        };
        caps.install();
    }

    macroquad::Window::from_config(window_conf(), run(config, catalog, args.preset));
}

async fn run(config: StageConfig, catalog: PresetCatalog, startup_preset: Option<String>) {
    let container = Container::new(ui::stage_area_width(), ui::stage_area_height());
    let mut game = match GameOfLife::new(container, config) {
        Ok(game) => game,
        Err(err) => {
            error!(%err, "cannot create the stage");
            return;
        }
    };
    info!(backend = %game.stage().backend(), "stage ready");

    let panel_state = Rc::new(RefCell::new(PanelState::default()));
    let sink = Rc::clone(&panel_state);
    game.subscribe(move |event, game| sink.borrow_mut().record(event, game));

    let mut picker = PresetPicker::new(ui::panel_x(), PICKER_TOP, ui::PANEL_WIDTH, &catalog);
    if let Some(path) = startup_preset {
        match catalog.find(&path) {
            Some(options) => {
                game.apply_preset(options);
                if let Some((category, name)) = path.split_once('/') {
                    picker.select(category.trim(), name.trim());
                }
            }
            None => warn!(preset = %path, "unknown preset"),
        }
    }

    let mut rng = ::rand::rng();

    loop {
        let mouse_pos = mouse_position();
        let px = ui::panel_x();
        picker.set_position(px, PICKER_TOP);
        let buttons = ui::create_buttons(px);

        let container = Container::new(ui::stage_area_width(), ui::stage_area_height());
        if game.stage().container() != container {
            game.set_container(container);
        }
        let (surface_w, _) = game.stage().surface().size();
        let left = ((container.width - surface_w as f32) / 2.0).max(0.0).round();
        let origin = (left, game.stage().top());

        let picked = picker
            .update(mouse_pos)
            .then(|| picker.selected())
            .flatten()
            .and_then(|(category, name)| catalog.get(category, name));
        if let Some(options) = picked {
            game.stop();
            game.apply_preset(options);
            panel_state.borrow_mut().reset();
        }

        let over_picker = picker.is_open() || picker.covers(mouse_pos);
        if !over_picker {
            if let Some(action) = input::clicked_action(&buttons, mouse_pos) {
                if action.is_enabled(game.is_running()) {
                    action.apply(&mut game, &mut rng);
                }
            }
        }
        let on_stage = mouse_pos.0 < ui::stage_area_width() && !over_picker;
        input::handle_pointer(&mut game, origin, mouse_pos, on_stage);
        for action in input::pressed_actions() {
            action.apply(&mut game, &mut rng);
        }

        game.tick(Duration::from_secs_f32(get_frame_time()));

        clear_background(Color::from_rgba(45, 45, 45, 255));
        game.present(left);
        panel::draw_panel(
            &panel_state.borrow(),
            game.config(),
            game.stage().backend(),
            &buttons,
            &picker,
            mouse_pos,
        );

        next_frame().await;
    }
}
