//! Command line front end: builds a scene, renders it in parallel and writes
//! the framebuffer as a binary PPM image.

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info, warn};

use phong_ray_tracer::camera::Camera;
use phong_ray_tracer::picture::{Color, Picture};
use phong_ray_tracer::ppm;
use phong_ray_tracer::render::render;
use phong_ray_tracer::scene::Scene;

use crate::cli::{Args, SceneKind};

mod cli;

fn build_scene(args: &Args) -> Scene {
    match args.scene {
        SceneKind::Classic => Scene::classic(),
        SceneKind::Random => {
            let mut rng = fastrand::Rng::with_seed(args.seed);
            Scene::random(&mut rng, args.spheres, args.lights)
        }
    }
}

fn compare_with_reference(args: &Args, picture: &Picture<Color>) {
    let Some(path) = &args.reference else {
        return;
    };
    match ppm::load_ppm(path).and_then(|reference| ppm::compare(&reference, picture)) {
        Ok(comparison) if comparison.matches() => {
            info!(target: "app", "Image matches reference {}", path.display());
        }
        Ok(comparison) => {
            warn!(target: "app", "{:.2}% of the pixels differ from reference {}",
                comparison.mismatch_ratio() * 100.0, path.display());
        }
        Err(err) => warn!(target: "app", "Could not compare with reference {}: {}", path.display(), err),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .target(env_logger::Target::Stdout)
        .init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring render threads")?;
    }

    let scene = build_scene(&args);
    debug!(target: "app", "Scene has {} objects ({} spheres) and {} lights",
        scene.objects.len(), scene.sphere_count(), scene.lights.len());

    let camera = Camera::default();
    debug!(target: "app", "Camera field of view {:.2} degrees", camera.field_of_view().to_degrees());

    let settings = args.render_settings();
    info!(target: "app", "Starting {}x{} render...", settings.width, settings.height);
    let start = Instant::now();
    let picture = render(&scene, &camera, &settings);
    let elapsed = start.elapsed();
    info!(target: "app", "Finished rendering. Took {:?}", elapsed);

    match ppm::save_ppm(&args.output, &picture) {
        Ok(()) => info!(target: "app", "Saved {}", args.output.display()),
        Err(err) => error!(target: "app", "Could not write {}: {}", args.output.display(), err),
    }

    compare_with_reference(&args, &picture);
    Ok(())
}
