//! Command-line interface for season_palette
//!
//! Runs either the skin analysis on a face crop or the whole-image palette
//! on an outfit photo and prints the report.

use season_palette::{
    image_loader::{self, Region},
    AnalysisError, PaletteAnalyzer, PaletteReport, PipelineConfig,
};
use std::{env, path::Path, process};
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Skin,
    Palette,
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args: Vec<String> = env::args().collect();

    let mut mode = Mode::Palette;
    let mut json = false;
    let mut clusters = None;
    let mut seed = None;
    let mut config_path = None;
    let mut region = None;
    let mut image_path_arg = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--skin" => mode = Mode::Skin,
            "--palette" => mode = Mode::Palette,
            "--json" => json = true,
            "--k" => clusters = Some(parse_value(&args, &mut i, "--k")),
            "--seed" => seed = Some(parse_value(&args, &mut i, "--seed")),
            "--config" => config_path = Some(next_value(&args, &mut i, "--config").to_string()),
            "--region" => region = Some(parse_region(next_value(&args, &mut i, "--region"))),
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let image_path_str = match image_path_arg {
        Some(path) => path,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };
    let image_path = Path::new(&image_path_str);

    if !image_path.exists() {
        eprintln!("Error: File '{}' does not exist", image_path.display());
        process::exit(1);
    }

    let mut config = match &config_path {
        Some(path) => PipelineConfig::from_json_file(Path::new(path)).unwrap_or_else(|e| fail(e)),
        None if mode == Mode::Palette => PipelineConfig::outfit(),
        None => PipelineConfig::default(),
    };
    if let Some(k) = clusters {
        config = config.with_clusters(k);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    match run(image_path, mode, region, config) {
        Ok(report) => print_report(&report, json),
        Err(error) => fail(error),
    }
}

fn run(
    image_path: &Path,
    mode: Mode,
    region: Option<Region>,
    config: PipelineConfig,
) -> season_palette::Result<PaletteReport> {
    let analyzer = PaletteAnalyzer::new(config)?;
    let mut image = image_loader::load_image(image_path)?;
    if let Some(region) = region {
        image = image_loader::crop_region(&image, region)?;
    }

    match mode {
        Mode::Skin => analyzer.analyze_skin(&image),
        Mode::Palette => analyzer.analyze_palette(&image),
    }
}

fn fail(error: AnalysisError) -> ! {
    eprintln!("Analysis failed: {}", error);
    if error.is_recoverable() {
        eprintln!("Suggestion: {}", error.user_message());
    }
    process::exit(1);
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> T {
    let raw = next_value(args, i, flag);
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value '{}' for {}", raw, flag);
        process::exit(1);
    })
}

/// Parse `x,y,width,height`
fn parse_region(raw: &str) -> Region {
    let parts: Vec<u32> = raw.split(',').filter_map(|p| p.trim().parse().ok()).collect();
    match parts.as_slice() {
        [x, y, width, height] => Region::new(*x, *y, *width, *height),
        _ => {
            eprintln!("Error: --region expects x,y,width,height");
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!();
    eprintln!("Extract dominant colors and classify them into color seasons.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --skin              Treat the image as a face crop and sample skin pixels");
    eprintln!("  --palette           Cluster every pixel of the resized image (default)");
    eprintln!("  --region X,Y,W,H    Crop to this bounding box before analysis");
    eprintln!("  --k N               Number of clusters (1-10)");
    eprintln!("  --seed N            Random seed for k-means restarts");
    eprintln!("  --config FILE       Load pipeline configuration from JSON");
    eprintln!("  --json              Print the report as JSON");
    eprintln!("  --help, -h          Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} outfit.jpg", program_name);
    eprintln!("  {} --skin --region 120,80,200,240 portrait.jpg", program_name);
    eprintln!("  {} --k 4 --seed 7 --json outfit.png", program_name);
}

fn print_report(report: &PaletteReport, json: bool) {
    if json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Dominant colors ({} samples):", report.sample_count);
    for (rank, c) in report.colors.iter().enumerate() {
        println!(
            "  {}. {} {:>5.1}%  {} -> {}  ({})",
            rank + 1,
            c.color.hex,
            c.color.percentage,
            c.classification.label(),
            c.classification.season,
            c.mood.description()
        );
    }

    println!();
    println!(
        "Overall: {} ({}), mean color {}",
        report.aggregate.season,
        report.aggregate.label(),
        report.mean_color.hex
    );

    if !report.harmonies.is_empty() {
        println!();
        println!("Harmony suggestions:");
        let converter = season_palette::ColorConverter::new();
        for set in &report.harmonies {
            println!(
                "  {}: complementary {}, analogous {} {}",
                converter.rgb_to_hex(set.base),
                converter.rgb_to_hex(set.complementary),
                converter.rgb_to_hex(set.analogous[0]),
                converter.rgb_to_hex(set.analogous[1])
            );
        }
    }
}
