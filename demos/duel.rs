//! Two figures staring each other down, run headless.
//!
//! The player drives a scripted loop (forward while turning left, then
//! forward while turning right) while the drone circles on autopilot. Every
//! frame is recorded instead of drawn; the positions are printed once a
//! second of simulated time.
//!
//! Run: cargo run --example duel [config.json]
//! Logs: RUST_LOG=hypsaucer=debug cargo run --example duel

use hypsaucer::{FrameRecorder, KeyboardState, Scene, SceneError, SimulationConfig};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<(), SceneError> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::default(),
    };
    let keys = config.keys;
    let frame_millis = config.tick_millis();
    let mut scene = Scene::new(config)?;
    let mut keyboard = KeyboardState::new();
    let mut recorder = FrameRecorder::new();

    println!("=== Duel ===\n");
    println!(
        "{:>6} {:>20} {:>20} {:>10}",
        "tick", "player", "drone", "distance"
    );

    keyboard.press(keys.move_forward);
    keyboard.press(keys.rotate_left);

    let mut now = 0;
    for frame in 0..600u64 {
        if frame == 300 {
            keyboard.release(keys.rotate_left);
            keyboard.press(keys.rotate_right);
        }
        now += frame_millis + 1;
        scene.update(now, keyboard.intents(&keys))?;

        recorder.clear();
        scene.frame(&mut recorder)?;

        if frame % 60 == 0 {
            let player = scene.entity(scene.player())?.body().center();
            let drone = scene.entity(scene.drone())?.body().center();
            let [px, py] = player.to_plane();
            let [dx, dy] = drone.to_plane();
            println!(
                "{:>6} {:>20} {:>20} {:>10.4}",
                scene.ticks(),
                format!("({:.3}, {:.3})", px, py),
                format!("({:.3}, {:.3})", dx, dy),
                player.distance(drone)
            );
        }
    }

    let player = scene.entity(scene.player())?;
    println!("\nTrail points: {}", player.trail().len());
    println!("Draw calls in last frame: {}", recorder.calls().len());
    println!("Last frame in view? {}", recorder.all_in_view());
    println!(
        "Player residual after {} ticks: {:.2e}",
        scene.ticks(),
        player.body().center().residuals().max()
    );

    Ok(())
}
