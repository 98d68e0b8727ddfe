//! Headless entry point: `ricochet [scene.json] [out.png]`.

use ricochet_app::{AppResult, SceneConfig, run_scene, write_png};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_OUTPUT: &str = "ricochet.png";

fn run(scene_path: Option<PathBuf>, output: &Path) -> AppResult<()> {
    let scene = match scene_path {
        Some(path) => {
            log::info!("Loading scene from {}", path.display());
            SceneConfig::load(&path)?
        }
        None => SceneConfig::default(),
    };
    let (canvas, report) = run_scene(&scene)?;
    log::info!("{} dabs over {} ticks", report.dabs, report.ticks);
    write_png(&canvas, output)
}

#[cfg(feature = "native")]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Ricochet");

    let mut args = std::env::args_os().skip(1);
    let scene_path = args.next().map(PathBuf::from);
    let output = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from);

    match run(scene_path, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
