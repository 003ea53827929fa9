// main.rs
//
// Builds an octahedral sphere mesh, prints its diagnostics and writes it out
// as a legacy VTK file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nalgebra::Point3;
use octasphere::float_types::Real;
use octasphere::io::write_vtk;
use octasphere::{Sphere, SphereParams, WeldPolicy};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Octahedral sphere mesh generator
///
/// Subdivides the faces of an octahedron, projects every vertex onto the
/// sphere and writes the result as a VTK unstructured grid.
#[derive(Parser)]
#[command(name = "octasphere")]
#[command(version, long_about = None)]
struct Cli {
    /// Sphere center
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        default_values_t = [0.0, 0.0, 0.0],
        allow_negative_numbers = true
    )]
    center: Vec<Real>,

    /// Sphere radius
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    radius: Real,

    /// Subdivisions per octahedron edge
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    resolution: i64,

    /// Output VTK file
    #[arg(long, short, default_value = "sphere.vtk")]
    output: PathBuf,

    /// Title line written into the VTK header
    #[arg(long, default_value = octasphere::io::vtk::DEFAULT_TITLE)]
    title: String,

    /// How coincident grid points are merged
    #[arg(long, value_enum, default_value_t = Weld::Exact)]
    weld: Weld,

    /// Skip the per-triangle area and centroid listing
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Weld {
    /// Bit-exact coordinate equality
    Exact,
    /// Coordinates snapped to the tolerance grid
    Snapped,
}

impl From<Weld> for WeldPolicy {
    fn from(weld: Weld) -> Self {
        match weld {
            Weld::Exact => WeldPolicy::Exact,
            Weld::Snapped => WeldPolicy::snapped(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    let params = SphereParams {
        center: Point3::new(cli.center[0], cli.center[1], cli.center[2]),
        radius: cli.radius,
        resolution: cli.resolution,
        weld: cli.weld.into(),
    };

    #[cfg(feature = "parallel")]
    let sphere = Sphere::from_params_parallel(&params);
    #[cfg(not(feature = "parallel"))]
    let sphere = Sphere::from_params(&params);
    let sphere = sphere.context("could not build sphere mesh")?;

    report(&sphere, cli.quiet);

    write_vtk(sphere.mesh(), &cli.output, &cli.title)
        .with_context(|| format!("could not write {}", cli.output.display()))?;
    info!(path = %cli.output.display(), "mesh written");
    println!("Mesh written to {}", cli.output.display());
    Ok(())
}

fn report(sphere: &Sphere, quiet: bool) {
    let origin = sphere.center();
    println!("Generated sphere mesh.");
    println!("Total vertices: {}", sphere.vertex_count());
    println!("Total cells: {}", sphere.triangle_count());
    println!("Origin: ({}, {}, {})", origin.x, origin.y, origin.z);
    println!("Radius: {}", sphere.radius());
    println!("Resolution: {}", sphere.resolution());

    if quiet {
        return;
    }

    let stats = sphere.mesh().triangle_stats();
    for (i, s) in stats.iter().enumerate() {
        println!("Area of triangle {i}: {}", s.area);
    }
    for (i, s) in stats.iter().enumerate() {
        let c = s.centroid;
        println!("Centroid of triangle {i}: ({}, {}, {})", c.x, c.y, c.z);
    }
}
