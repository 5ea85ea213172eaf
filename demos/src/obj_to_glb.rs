//! Run the full viewing pipeline over an OBJ file from the command line

use clap::Parser;
use meshwire_viewer::{FileSurface, LogSink, ViewerPipeline};
use std::path::PathBuf;

/// Convert an OBJ mesh into a recentered point-cloud + wireframe GLB
#[derive(Parser)]
#[command(name = "obj_to_glb", version)]
struct Args {
    /// Path to the input OBJ mesh
    input: PathBuf,

    /// Path of the GLB file to write
    #[arg(short, long, default_value = "wireframe.glb")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut status = LogSink;
    let mut surface = FileSurface::new(&args.output);
    let report = ViewerPipeline::new(&args.input, &mut status, &mut surface).run()?;

    println!(
        "Wrote {} ({} vertices, {} derived primitives)",
        args.output.display(),
        report.vertex_count,
        report.primitive_count
    );
    Ok(())
}
