use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tinycaster::color::{self, darken, pack_color};
use tinycaster::core::enemy::Sprite;
use tinycaster::core::maze::TileMap;
use tinycaster::core::player::Player;
use tinycaster::core::process_events::Intents;
use tinycaster::framebuffer::Framebuffer;
use tinycaster::game::{GameState, Tuning};
use tinycaster::render::render3d::{RenderSettings, Renderer};
use tinycaster::textures::TextureAtlas;

const TILE: usize = 8;

/// Six flat tiles; tile 1 is pure red, the others are distinct greys.
fn walls() -> TextureAtlas {
    let w = TILE * 6;
    let px = (0..w * TILE)
        .map(|i| match (i % w) / TILE {
            1 => color::RED,
            t => pack_color(30 * t as u8, 30 * t as u8, 30 * t as u8, 255),
        })
        .collect();
    TextureAtlas::from_pixels(w, TILE, px).unwrap()
}

fn monsters() -> TextureAtlas {
    TextureAtlas::from_pixels(TILE * 3, TILE, vec![color::YELLOW; TILE * TILE * 3]).unwrap()
}

fn game(x: f32, y: f32, a: f32, sprites: Vec<Sprite>) -> GameState {
    GameState::new(
        TileMap::default(),
        Player::new(x, y, a, FRAC_PI_3),
        sprites,
        walls(),
        monsters(),
        None,
        Tuning::default(),
    )
    .unwrap()
}

#[test]
fn leftmost_column_is_a_fisheye_corrected_wall() {
    // column 0 looks straight down +x at the far wall, 13 cells away
    let game = game(2.0, 14.0, FRAC_PI_6, Vec::new());
    let mut fb = Framebuffer::new(256, 512);
    let mut renderer = Renderer::new(RenderSettings::default());
    renderer.render(&mut fb, &game.scene(Instant::now()));

    let depth = renderer.depth_buffer()[0];
    assert!((depth - 13.0 * FRAC_PI_6.cos()).abs() < 1e-3, "{depth}");

    // round(512 / 11.258) = 45 rows centred on the horizon
    assert_eq!(fb.get_pixel(0, 233), darken(game.tex_walls.pixel_at(0, 0, 4)));
    for y in 234..279 {
        assert_eq!(fb.get_pixel(0, y), color::RED, "row {y}");
    }
    assert_eq!(fb.get_pixel(0, 279), darken(game.tex_walls.pixel_at(0, 0, 2)));
}

#[test]
fn opening_a_door_clears_the_view_and_the_prompt() {
    let mut game = game(11.5, 3.5, -FRAC_PI_2, Vec::new());
    let mut fb = Framebuffer::new(64, 32);
    let mut renderer = Renderer::new(RenderSettings::default());

    let report = renderer.render(&mut fb, &game.scene(Instant::now()));
    assert!(report.door_prompt);
    assert!((renderer.depth_buffer()[32] - 0.5).abs() < 1e-3);

    game.apply(
        &Intents {
            use_door: true,
            ..Intents::default()
        },
        Instant::now(),
    );
    let report = renderer.render(&mut fb, &game.scene(Instant::now()));
    assert!(!report.door_prompt);
    assert!((renderer.depth_buffer()[32] - 2.5).abs() < 1e-3);
}

#[test]
fn wandering_never_enters_a_wall() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = game(2.0, 14.0, 0.0, Vec::new());
    for _ in 0..2000 {
        let intents = Intents {
            turn: rng.gen_range(-1..=1),
            walk: rng.gen_range(-1..=1),
            ..Intents::default()
        };
        game.apply(&intents, Instant::now());
        game.tick();
        let p = &game.player;
        assert!(game.map.is_walkable_at(p.pos.x, p.pos.y), "({}, {})", p.pos.x, p.pos.y);
    }
}

#[test]
fn running_diagonally_into_a_wall_slides() {
    // heading up-right against the top wall of the bottom corridor
    let mut game = game(2.0, 13.05, -FRAC_PI_2 / 2.0, Vec::new());
    let start = game.player.pos;
    game.apply(
        &Intents {
            walk: 1,
            ..Intents::default()
        },
        Instant::now(),
    );
    for _ in 0..5 {
        game.tick();
    }
    assert!(game.player.pos.x > start.x + 0.3);
    assert!(game.player.pos.y >= 13.0);
}

#[test]
fn shooting_the_nearest_monster_removes_it_from_the_next_frame() {
    let sprites = vec![Sprite::new(4.0, 14.0, 0), Sprite::new(6.0, 14.0, 1)];
    let mut game = game(2.0, 14.0, 0.0, sprites);
    let now = Instant::now();
    game.apply(
        &Intents {
            fire: true,
            ..Intents::default()
        },
        now,
    );
    assert_eq!(game.monsters.len(), 1);
    assert_eq!(game.monsters[0].x, 6.0);
    assert!(game.scene(now).firing);
}

#[test]
fn snapshot_is_a_binary_ppm() {
    let game = game(2.0, 14.0, 0.0, Vec::new());
    let mut fb = Framebuffer::new(32, 16);
    Renderer::new(RenderSettings::default()).render(&mut fb, &game.scene(Instant::now()));
    let mut out = Vec::new();
    fb.write_ppm(&mut out).unwrap();
    let header = b"P6\n32 16\n255\n";
    assert_eq!(&out[..header.len()], header);
    assert_eq!(out.len(), header.len() + 32 * 16 * 3);
}
