use glam::DVec3;
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use ooze_fluids::{
    lattice::InitError,
    scene::{Command, Scene},
    viscoelastic::ViscoelasticFluid,
};
use ooze_io::{
    decode::{DecodingError, FluidDataDecoder},
    encode::{EncodingError, FluidDataEncoder},
};
use thiserror::Error;

use crate::cli::{InspectArgs, RunArgs};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Decoding(#[from] DecodingError),
    #[error(transparent)]
    Template(#[from] indicatif::style::TemplateError),
}

fn progress_bar(message: &str, len: u64) -> Result<ProgressBar, RunError> {
    let bar_template = format!("{message} {{spinner:.green}} [{{elapsed}}] [{{bar:50.white/white}}] {{pos}}/{{len}} ({{eta}})");
    let style = ProgressStyle::with_template(&bar_template)?
        .progress_chars("=> ").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    Ok(ProgressBar::new(len).with_style(style))
}

pub fn run(args: &RunArgs) -> Result<(), RunError> {
    let params = args.params();
    let fluid = ViscoelasticFluid::new(&params)?;
    let mut scene = Scene::new(fluid, params);

    let mut encoder = args.output
        .clone()
        .map(|path| FluidDataEncoder::new(path, args.frames, args.fps))
        .transpose()?;

    if let Some(encoder) = encoder.as_mut() {
        encoder.encode_metadata(&scene)?;
    }

    let progress = progress_bar("Running Simulation", args.frames)?;

    scene.command(Command::Start);

    for _frame in (0..args.frames).progress_with(progress) {
        if !scene.tick() {
            break;
        }

        if let Some(encoder) = encoder.as_mut() {
            encoder.encode_frame(&scene)?;
        }
    }

    scene.command(Command::Terminate);

    let relaunch = scene.fluid.relaunch_state();
    log::info!(
        "ran {} steps: {} springs, {} particles on the floor, energy loss {}",
        scene.steps(),
        scene.fluid.springs().len(),
        relaunch.floor_contacts(),
        relaunch.energy_loss(),
    );

    if let (Some(encoder), Some(path)) = (encoder, &args.output) {
        log::info!("recorded {} frames to {}", encoder.frames_written(), path.display());
    }

    Ok(())
}

pub fn inspect(args: &InspectArgs) -> Result<(), RunError> {
    let mut decoder = FluidDataDecoder::new(args.path.clone());
    let meta = decoder.decode_metadata()?;

    println!(
        "{} frames at {} fps, {}D, particle radius {}",
        meta.num_frames, meta.fps, meta.dim, meta.particle_radius,
    );

    if let (Some(min), Some(max)) = (meta.min_corner::<3>(), meta.max_corner::<3>()) {
        println!("container {} to {}", DVec3::from_array(min), DVec3::from_array(max));
    }

    let mut frame_index = 0;
    while let Some(frame) = decoder.decode_frame()? {
        let n = frame.positions.len::<3>();

        let centroid = frame.positions.iter::<3>().map(DVec3::from_array).sum::<DVec3>() / n.max(1) as f64;
        let lowest = frame.positions.iter::<3>().map(|p| p[1]).fold(f64::INFINITY, f64::min);
        let max_speed = frame.velocities.iter::<3>().map(|v| DVec3::from_array(v).length()).fold(0.0, f64::max);

        println!(
            "{frame_index:>6}: {n} particles, centroid {centroid:.3}, lowest y {lowest:.3}, max speed {max_speed:.3}",
        );

        frame_index += 1;
    }

    Ok(())
}
