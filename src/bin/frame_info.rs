//! Geodetic Frame Information Tool
//!
//! Prints the geocentric anchor position, the East-North-Up frame and,
//! optionally, the geographic region of a box around the anchor for a given
//! longitude/latitude/height.
//!
//! Usage:
//!   cargo run --bin frame_info -- --lon -75.6 --lat 40.0 [--height 0] [--box-size 50]

use clap::{ArgAction, Parser};
use geoframe::anchor::GeoAnchor;
use geoframe::ellipsoid::Ellipsoid;
use geoframe::region::BoundingRegion;
use geoframe::transform::{authoring, MatrixLayout, Transform};
use geoframe::Cartesian3;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Geodetic Frame Information Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Displays the WGS84 anchor position and ENU frame for a geographic coordinate",
    long_about = None
)]
struct Args {
    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Height above the ellipsoid in meters
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    height: f64,

    /// Unity-style yaw, pitch and roll in degrees applied to the model
    #[arg(long, num_args = 3, value_names = ["YAW", "PITCH", "ROLL"], allow_hyphen_values = true)]
    unity_rotation: Option<Vec<f64>>,

    /// Edge length in meters of a local box whose bounding region is printed
    #[arg(long)]
    box_size: Option<f64>,

    /// Print matrices column-major instead of row-major
    #[arg(short, long, action = ArgAction::SetTrue)]
    column_major: bool,

    /// Emit JSON instead of formatted text
    #[arg(short, long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{}: {}", name, value);
}

fn format_vector(v: &Cartesian3) -> String {
    format!("({:.6}, {:.6}, {:.6})", v.x, v.y, v.z)
}

/// Region of an axis-aligned local box of edge `size`, resting on the anchor
fn local_box_region(anchor: &GeoAnchor, local: &Transform, size: f64) -> Result<BoundingRegion> {
    let half = (size / 2.0) as f32;
    let size = size as f32;
    let mut positions = Vec::with_capacity(24);
    for &x in &[-half, half] {
        for &y in &[-half, half] {
            for &z in &[0.0, size] {
                positions.extend_from_slice(&[x, y, z]);
            }
        }
    }
    anchor.reproject_positions(&mut positions, local)?;
    Ok(anchor.bounding_region(&positions)?)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let layout = if args.column_major {
        MatrixLayout::ColumnMajor
    } else {
        MatrixLayout::RowMajor
    };

    let anchor = GeoAnchor::from_degrees(args.lon, args.lat, args.height, Ellipsoid::wgs84());

    let local = match args.unity_rotation.as_deref() {
        Some([yaw, pitch, roll]) => authoring::unity_local_rotation(
            &Transform::identity(),
            *yaw,
            *pitch,
            *roll,
            1.0,
            1.0,
            1.0,
        )?,
        _ => Transform::identity(),
    };

    let region = args
        .box_size
        .map(|size| local_box_region(&anchor, &local, size))
        .transpose()?;

    if args.json {
        let mut output = serde_json::json!({
            "geographic": anchor.geographic(),
            "extensions": anchor.extension_json()?,
            "frame": anchor.frame().to_array(layout),
            "vertexTransform": anchor.vertex_transform(&local).to_array(layout),
        });
        if let Some(region) = region {
            output["boundingVolume"] = region.to_json();
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_section_header("Anchor");
    print_named_value("Geographic", anchor.geographic());
    print_named_value("Geocentric", format_vector(&anchor.position()));

    print_section_header("ENU Frame");
    print_named_value("East", format_vector(&anchor.frame().east()));
    print_named_value("North", format_vector(&anchor.frame().north()));
    print_named_value("Up", format_vector(&anchor.frame().up()));
    if anchor.frame().is_degenerate() {
        println!("Warning: frame basis is degenerate at this origin");
    }

    print_section_header(match layout {
        MatrixLayout::RowMajor => "Vertex Transform (row-major)",
        MatrixLayout::ColumnMajor => "Vertex Transform (column-major)",
    });
    let flat = anchor.vertex_transform(&local).to_array(layout);
    for row in flat.chunks(4) {
        println!(
            "[{:>14.9} {:>14.9} {:>14.9} {:>14.9}]",
            row[0], row[1], row[2], row[3]
        );
    }

    if let Some(region) = region {
        print_section_header("Bounding Region");
        print_named_value("West", format!("{:.9}°", region.west.to_degrees()));
        print_named_value("South", format!("{:.9}°", region.south.to_degrees()));
        print_named_value("East", format!("{:.9}°", region.east.to_degrees()));
        print_named_value("North", format!("{:.9}°", region.north.to_degrees()));
        print_named_value(
            "Height",
            format!(
                "{:.3} m .. {:.3} m",
                region.minimum_height, region.maximum_height
            ),
        );
    }

    Ok(())
}
