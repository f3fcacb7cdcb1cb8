use clap::Parser;
use camkii::game_logic::errors::CamkiiResult;
use camkii::CellLayout;

mod cellgen {
    pub mod cli_utils;
    pub mod layout_generator;
}

use cellgen::cli_utils::*;
use cellgen::layout_generator::{LayoutGenerationConfig, LayoutGenerator};

#[derive(Parser, Clone)]
#[command(name = "cellgen")]
#[command(about = "Generate random cell layouts for the CaMKII explorer")]
struct Args {
    /// Layout name
    #[arg(long, default_value = "generated_cell")]
    name: String,

    /// Number of microtubules to place
    #[arg(long, default_value = "8")]
    count: usize,

    /// Random seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Radius of the region microtubule centers are placed in
    #[arg(long, default_value = "20.0")]
    extent: f32,

    /// Player spawn position (format: X,Y,Z)
    #[arg(long, default_value = "0.0,5.0,5.0")]
    player_spawn: String,

    /// Clear space kept around the player spawn
    #[arg(long, default_value = "2.5")]
    spawn_clearance: f32,

    /// Microtubule radius
    #[arg(long, default_value = "0.5")]
    radius: f32,

    /// Microtubule length
    #[arg(long, default_value = "10.0")]
    length: f32,

    /// Output file path relative to the cells/ directory (e.g., "my_cell.bin")
    #[arg(long)]
    output: Option<String>,
}

fn main() -> CamkiiResult<()> {
    let args = Args::parse();

    let player_spawn = parse_position(&args.player_spawn)?;
    let output_filename = args.output.unwrap_or_else(|| format!("{}.bin", args.name));
    validate_output_path(&output_filename)?;

    let seed = args.seed.unwrap_or_else(rand::random);

    let layout = LayoutGenerator::generate(LayoutGenerationConfig {
        name: args.name,
        count: args.count,
        seed,
        extent: args.extent,
        player_spawn,
        spawn_clearance: args.spawn_clearance,
        radius: args.radius,
        length: args.length,
    })?;

    let full_path = layout.save_to_file(&output_filename)?;
    println!("Cell layout saved successfully to: {}", full_path.display());
    print_layout_summary(&layout, &output_filename, seed);
    Ok(())
}

fn print_layout_summary(layout: &CellLayout, output_filename: &str, seed: u64) {
    println!("\nLayout summary:");
    println!("  Name: {}", layout.name);
    println!("  Seed: {seed}");
    println!("  Player spawn: {}", layout.player_spawn);
    println!("  Microtubules: {}", layout.microtubules.len());

    for (i, placement) in layout.microtubules.iter().enumerate() {
        println!(
            "    #{i}: position={}, rotation={}, radius={}, length={}",
            placement.position, placement.rotation, placement.radius, placement.length
        );
    }

    println!("\nRun it with: cargo run -- --layout {output_filename}");
}
