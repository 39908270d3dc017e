use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gol_stage::{
    Cell, Container, GameOfLife, SimulationEvent, SimulationState, Stage, StageConfig,
    presets,
    rendering::{ElementSurface, NativeSurface},
};

fn game_on(surface: Box<dyn gol_stage::DrawingSurface>) -> GameOfLife {
    let stage = Stage::with_surface(Container::new(600.0, 600.0), StageConfig::default(), surface);
    GameOfLife::with_stage(stage)
}

fn alive_cells(game: &GameOfLife) -> Vec<(usize, usize)> {
    game.grid()
        .iter_cells()
        .filter(|(_, _, cell)| cell.is_alive())
        .map(|(x, y, _)| (x, y))
        .collect()
}

#[test]
fn gliders_return_shifted_after_four_generations() {
    let catalog = presets::catalog();
    let mut game = game_on(Box::new(ElementSurface::new()));
    game.apply_preset(catalog.find("Spaceships/Glider").expect("glider preset"));

    let start = alive_cells(&game);
    assert_eq!(start.len(), 10);
    let (width, height) = game.grid().dimensions();

    for _ in 0..4 {
        game.step();
    }
    let mut moved = alive_cells(&game);
    moved.sort();
    let mut expected: Vec<_> = start
        .iter()
        .map(|&(x, y)| ((x + 1) % width, (y + 1) % height))
        .collect();
    expected.sort();
    assert_eq!(moved, expected);
}

#[test]
fn timer_drives_generations_until_stopped() {
    let catalog = presets::catalog();
    let mut game = game_on(Box::new(ElementSurface::new()));
    game.apply_preset(catalog.find("Oscillators/Beacon").expect("beacon preset"));
    let seed = game.grid().clone();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.subscribe(move |event, _| {
        let gen_no = event.stats().map(|stats| stats.gen_no);
        sink.borrow_mut().push((event.name(), gen_no));
    });

    game.start();
    assert_eq!(game.state(), SimulationState::Running);
    let period = game.config().period();
    let mut fired = 0;
    for _ in 0..40 {
        if game.tick(period / 4) {
            fired += 1;
        }
    }
    game.stop();

    assert_eq!(fired, 10);
    // Ten generations of a period-2 oscillator
    assert_eq!(game.grid(), &seed);
    let events = events.borrow();
    assert_eq!(events.first(), Some(&("started", None)));
    assert_eq!(events.get(10), Some(&("stepped", Some(10))));
    assert_eq!(events.last(), Some(&("stopped", None)));
}

#[test]
fn lone_cells_die_out_and_stop_the_run() {
    let mut game = game_on(Box::new(NativeSurface::new()));
    game.pointer_down((7.0, 7.0));
    game.pointer_up();
    game.pointer_down((52.0, 52.0));
    game.pointer_up();
    assert_eq!(game.grid().population(), 2);

    let all_dead = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&all_dead);
    game.subscribe(move |event, game| {
        if let SimulationEvent::AllDead(stats) = event {
            assert!(game.is_running());
            *sink.borrow_mut() = Some(stats.gen_no);
        }
    });

    game.start();
    game.tick(game.config().period());
    assert_eq!(*all_dead.borrow(), Some(1));
    assert_eq!(game.state(), SimulationState::Stopped);
    assert!(game.grid().iter_cells().all(|(_, _, cell)| cell == Cell::Dead));
    assert!(!game.tick(Duration::from_secs(60)));
}
