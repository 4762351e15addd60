// What you SEE:
// • A window filled with a slowly flowing field of dithered dots.
// • Space pauses the flow, L switches to the liquid flow, R toggles pointer ripples.
// • S writes the current frame to dither-<time>.png. ESC quits.
//
// Usage: dither-field [hero|liquid|ripple]   (RUST_LOG=debug for more output)

use dither_field::draw::{Command, Drawer};
use dither_field::{snapshot, DitherRenderer, Error, FrameDriver, Preset};
use log::{info, warn};
use std::path::PathBuf;

const WIDTH: usize = 480; // buffer pixels; the window is twice this
const HEIGHT: usize = 320;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    /* --- Configuration ---
       Visual: decides colors, dot size and which flow you see. */
    let preset = match std::env::args().nth(1) {
        Some(name) => name.parse::<Preset>()?,
        None => Preset::Hero,
    };
    info!("preset: {:?}", preset);
    let config = preset.config().with_size(WIDTH, HEIGHT);

    /* --- Window + renderer ---
       Visual: window opens; first frame appears on the first tick. */
    let mut drawer = Drawer::new("Dither Field", WIDTH, HEIGHT)?;
    let mut driver = FrameDriver::new(DitherRenderer::new(config)?);
    driver.start();

    /* ------------------------------ Main loop ------------------------------ */
    while driver.is_running() {
        for cmd in drawer.commands() {
            handle(&mut driver, cmd)?;
        }
        driver.tick(&mut drawer)?;
    }

    Ok(())
}

fn handle(driver: &mut FrameDriver, cmd: Command) -> Result<(), Error> {
    let renderer = driver.renderer_mut();
    match cmd {
        Command::TogglePause => {
            let paused = !renderer.is_paused();
            renderer.set_paused(paused);
            info!("paused: {paused}");
        }
        Command::ToggleLiquid => {
            let mut cfg = renderer.config().clone();
            cfg.enable_liquid = !cfg.enable_liquid;
            if let Err(e) = renderer.set_config(cfg) {
                warn!("config rejected: {e}");
            }
        }
        Command::ToggleRipples => {
            let mut cfg = renderer.config().clone();
            cfg.enable_ripples = !cfg.enable_ripples;
            if let Err(e) = renderer.set_config(cfg) {
                warn!("config rejected: {e}");
            }
        }
        Command::Snapshot => {
            let path = PathBuf::from(format!("dither-{:.3}.png", renderer.time()));
            if let Some(frame) = renderer.render() {
                snapshot::save_png(frame, &path)?;
                info!("snapshot written to {}", path.display());
            }
        }
    }
    Ok(())
}
