use anyhow::{Context, Result};
use glam::Vec2;
use log::info;
use std::time::Duration;

use rusted_platformer::engine::camera::Camera;
use rusted_platformer::engine::game_loop::GameLoop;
use rusted_platformer::engine::input::{HeldInput, InputSampler};
use rusted_platformer::engine::physics::{KinematicBody, PhysicsWorld};
use rusted_platformer::game::animation::{AnimationPlayer, ClipSequencer};
use rusted_platformer::game::characters::{
    HeroController, HeroEffects, MotionEvent, MotionStateMachine,
};
use rusted_platformer::game::HeroConfig;

/// Simulated render frame: two fixed updates each
const FRAME_TIME: Duration = Duration::from_micros(33_334);

const HERO_HALF_EXTENTS: Vec2 = Vec2::new(0.4, 0.9);
const SPAWN: Vec2 = Vec2::new(0.0, 6.0);

/// A stretch of the scripted session with the buttons held during it
struct Phase {
    name: &'static str,
    duration: f32,
    held: HeldInput,
}

impl Phase {
    fn new(name: &'static str, duration: f32, horizontal: f32, vertical: f32) -> Self {
        Self {
            name,
            duration,
            held: HeldInput {
                horizontal,
                vertical,
                ..HeldInput::default()
            },
        }
    }

    fn jump(mut self) -> Self {
        self.held.jump = true;
        self
    }

    fn attack(mut self) -> Self {
        self.held.attack = true;
        self
    }
}

fn script() -> Vec<Phase> {
    vec![
        Phase::new("stand", 0.5, 0.0, 0.0),
        Phase::new("walk", 1.0, 0.4, 0.0),
        Phase::new("hop", 0.1, 0.0, 0.0).jump(),
        Phase::new("release early", 0.9, 0.0, 0.0),
        Phase::new("run off the ledge", 1.5, 1.0, 0.0),
        Phase::new("crouch", 0.5, 0.0, -1.0),
        Phase::new("attack", 0.5, 0.0, 0.0).attack(),
        Phase::new("rest", 0.5, 0.0, 0.0),
    ]
}

/// Phase running at simulation time `now`
fn phase_at(phases: &[Phase], now: f32) -> Option<(usize, &Phase)> {
    let mut end = 0.0;
    for (index, phase) in phases.iter().enumerate() {
        end += phase.duration;
        if now < end {
            return Some((index, phase));
        }
    }
    None
}

fn build_level() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    // Floor, top at y = 0
    world.add_platform(Vec2::new(10.0, -0.5), Vec2::new(30.0, 0.5));
    // Ledge the hero starts on, top at y = 6
    world.add_platform(Vec2::new(0.0, 5.5), Vec2::new(4.0, 0.5));
    world
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Rusted Platformer...");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            HeroConfig::load(&path).with_context(|| format!("Failed to load config {}", path))?
        }
        None => {
            info!("No config given, using the standard hero");
            HeroConfig::standard()
        }
    };

    let library = config
        .build_library()
        .context("Failed to build clip library")?;
    let catalog = config
        .build_catalog(&library)
        .context("Failed to build animation catalog")?;
    info!(
        "Loaded {} clips, {} state clips, {} transitions",
        library.len(),
        catalog.state_count(),
        catalog.transition_count()
    );

    let body = KinematicBody::new(build_level(), SPAWN, HERO_HALF_EXTENTS);
    info!("Level built with {} platforms", body.world().platform_count());

    let mut hero = HeroController::new(
        MotionStateMachine::new(config.motion),
        AnimationPlayer::new(catalog, ClipSequencer::new()),
        body,
    );

    HeroEffects::new()
        .on_jump(|| info!("Dust puff (jump)"))
        .on_land(|| info!("Dust puff (land)"))
        .on_hard_land(|| info!("Screen shake (hard land)"))
        .attach(hero.events_mut());
    hero.subscribe(|event| {
        if let MotionEvent::StateChanged(state) = event {
            info!("Hero is now {}", state);
        }
    });

    hero.animation_mut().engine_mut().subscribe(|event| {
        if event.name == "footstep" {
            log::debug!("Footstep at {:.3}s", event.time);
        } else {
            info!("Clip event '{}'", event.name);
        }
    });

    let mut camera = Camera::new(Vec2::ZERO, config.camera);
    camera.snap_to(hero.position());

    let phases = script();
    let total: f32 = phases.iter().map(|phase| phase.duration).sum();
    let mut sampler = InputSampler::new();
    let mut game_loop = GameLoop::new();
    let mut current_phase = None;

    'session: while game_loop.now() < total {
        for time in game_loop.advance(FRAME_TIME) {
            let Some((index, phase)) = phase_at(&phases, time.now) else {
                break 'session;
            };
            if current_phase != Some(index) {
                info!("== {} ==", phase.name);
                current_phase = Some(index);
            }

            let input = sampler.sample(phase.held);
            hero.tick(time, &input);
            hero.animation_mut().engine_mut().update(time.dt, &library);
            camera.update(hero.position(), time.dt);
        }
    }

    let position = hero.position();
    info!(
        "Session over after {} updates: hero at ({:.2}, {:.2}), camera at ({:.2}, {:.2})",
        game_loop.update_count(),
        position.x,
        position.y,
        camera.position.x,
        camera.position.y
    );
    if let Some(frame) = hero
        .animation()
        .engine()
        .frame_data(hero.layer(), &library)
    {
        info!(
            "Showing '{}' frame {}",
            library.name(frame.clip),
            frame.frame_index
        );
    }

    Ok(())
}
