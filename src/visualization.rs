//! Interactive game window using kiss3d.
//!
//! Shapes are laid out in a grid of slots. Keys 1-9 pick a slot, Space
//! starts or restarts, Escape quits. Timer and score live in the title bar.

use std::time::Instant;

use kiss3d::event::{Action, Key, WindowEvent};
use kiss3d::prelude::*;

use polymatch::{Game, RandomSource, Round, State};

/// Number of slot columns in the layout.
const COLUMNS: usize = 3;

/// Returns the display color of a shape.
fn shape_color(state: State, selected: bool, in_pair: bool) -> Color {
    match (state, selected, in_pair) {
        (State::Fail, true, _) => Color::new(1.0, 0.2, 0.2, 1.0), // red
        (State::Success, _, true) | (State::Result, _, true) => Color::new(0.2, 1.0, 0.2, 1.0), // green
        (State::Success, _, false) | (State::Result, _, false) => Color::new(0.6, 0.6, 0.6, 1.0), // faded
        (_, true, _) => Color::new(1.0, 1.0, 0.2, 1.0), // yellow
        _ => Color::new(0.3, 0.5, 1.0, 1.0), // blue
    }
}

/// Represents a rendered cube in the 3D scene.
struct RenderedCube {
    node: SceneNode3d,
    /// The cube's position when the shape is at rest.
    base_position: Vec3,
    /// Which slot the cube belongs to.
    slot: usize,
}

/// What the scene currently shows; a change triggers a rebuild.
#[derive(PartialEq)]
struct SceneKey {
    round_number: u64,
    rotations: Vec<usize>,
    pair: (usize, usize),
    aligned: bool,
    visible: bool,
}

impl SceneKey {
    fn of<R: RandomSource>(game: &Game<R>) -> Self {
        let round = game.round();
        let state = game.state();
        Self {
            round_number: game.round_number(),
            rotations: round.shapes().iter().map(|shape| shape.rotation_index()).collect(),
            pair: round.pair(),
            aligned: matches!(state, State::Success | State::Result),
            visible: state != State::Intro,
        }
    }
}

/// Builds the cubes for every slot of a round.
///
/// Coordinate conventions:
/// - Block coordinates are spaced `BLOCK_SPACING` apart; they are scaled so
///   neighbouring cubes sit one world unit apart.
/// - Each shape is centred on its own slot; slots form a grid around the origin.
/// - When `aligned` is set the second pair slot is shown in the first slot's
///   orientation, revealing the match.
fn build_scene(scene: &mut SceneNode3d, round: &Round, key: &SceneKey) -> Vec<RenderedCube> {
    /// Size of each rendered cube (slightly smaller than 1.0 for visible gaps).
    const CUBE_SIZE: f32 = 0.9;
    /// World distance between neighbouring blocks.
    const BLOCK_SCALE: f32 = 0.5;
    /// Distance between slot centres.
    const SLOT_SPACING: f32 = 12.0;

    if !key.visible {
        return Vec::new();
    }

    let rows = round.len().div_ceil(COLUMNS);
    let (first, second) = round.pair();

    let mut rendered_cubes = Vec::new();
    for (slot, shape) in round.shapes().iter().enumerate() {
        let rotation = if key.aligned && slot == second {
            round.shapes()[first].rotation()
        } else {
            shape.rotation()
        };
        let positions: Vec<Vec3> = shape
            .blocks()
            .iter()
            .map(|&block| {
                let (x, y, z) = rotation.apply(block);
                Vec3::new(x as f32, y as f32, z as f32) * BLOCK_SCALE
            })
            .collect();
        let centroid = positions.iter().fold(Vec3::ZERO, |acc, &pos| acc + pos)
            / positions.len() as f32;

        let column = (slot % COLUMNS) as f32 - (COLUMNS as f32 - 1.0) / 2.0;
        let row = (rows as f32 - 1.0) / 2.0 - (slot / COLUMNS) as f32;
        let slot_center = Vec3::new(column * SLOT_SPACING, row * SLOT_SPACING, 0.0);

        for position in positions {
            let base_position = position - centroid + slot_center;
            let node = scene
                .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
                .set_position(base_position);
            rendered_cubes.push(RenderedCube {
                node,
                base_position,
                slot,
            });
        }
    }

    rendered_cubes
}

/// Formats the play clock as `mm:ss.mmm`.
fn format_clock(seconds: f32) -> String {
    let millis = (seconds * 1000.0) as u32;
    format!(
        "{:02}:{:02}.{:03}",
        millis / 60_000,
        (millis / 1000) % 60,
        millis % 1000
    )
}

fn window_title<R: RandomSource>(game: &Game<R>) -> String {
    match game.state() {
        State::Intro => "SELECT THE MATCHING PAIR - press Space to start".to_string(),
        State::Result => {
            // shown once a pair was found
            let accuracy = game
                .accuracy()
                .filter(|_| game.score() > 0)
                .map(|accuracy| format!(", accuracy {accuracy:.2}%"))
                .unwrap_or_default();
            format!(
                "{} SHAPES ROTATED{} - press Space to retry",
                game.score(),
                accuracy
            )
        }
        _ => format!(
            "{} - score {} - [1-{}] select",
            format_clock(game.remaining()),
            game.score(),
            game.round().len()
        ),
    }
}

/// Keys that pick slots, in slot order.
const SLOT_KEYS: [Key; 9] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
    Key::Key9,
];

/// Maps a number key to a slot index.
fn slot_for_key(key: Key) -> Option<usize> {
    SLOT_KEYS.iter().position(|&slot_key| slot_key == key)
}

/// Runs the game in an interactive 3D window.
pub fn play<R: RandomSource>(game: Game<R>) {
    pollster::block_on(play_async(game));
}

async fn play_async<R: RandomSource>(mut game: Game<R>) {
    let mut window = Window::new(&window_title(&game)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(40.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(20.0, 20.0, 20.0));

    let mut scene_key = SceneKey::of(&game);
    let mut rendered_cubes = build_scene(&mut scene, game.round(), &scene_key);
    let mut last_frame = Instant::now();

    /// Height of the idle bobbing animation.
    const BOB_AMPLITUDE: f32 = 0.15;

    loop {
        for event in window.events().iter() {
            if let WindowEvent::Key(key, action, _) = event.value {
                if action == Action::Press {
                    match key {
                        Key::Escape => return,
                        Key::Space => game.press(),
                        _ => {
                            if let Some(slot) = slot_for_key(key) {
                                game.select(slot);
                            }
                        }
                    }
                }
            }
        }

        let now = Instant::now();
        game.update(now.duration_since(last_frame).as_secs_f32());
        last_frame = now;

        let key = SceneKey::of(&game);
        if key != scene_key {
            for mut cube in rendered_cubes.drain(..) {
                cube.node.remove();
            }
            rendered_cubes = build_scene(&mut scene, game.round(), &key);
            scene_key = key;
        }

        let state = game.state();
        let round = game.round();
        for cube in &mut rendered_cubes {
            let shape = &round.shapes()[cube.slot];
            let bob = BOB_AMPLITUDE * (2.0 * shape.phase + cube.slot as f32).sin();
            let color = shape_color(state, shape.selected, round.is_pair(cube.slot));
            cube.node.set_color(color);
            cube.node
                .set_position(cube.base_position + Vec3::new(0.0, bob, 0.0));
        }

        window.set_title(&window_title(&game));

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
