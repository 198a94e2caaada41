//! Tooth-numbering ruler etched next to a grid of gear pockets.
//!
//! Connection settings come from `ClientConfig::load()`; geometry below is
//! in inches regardless of the configured units.

use anyhow::{Context, Result};
use laser_api::handles::{EtchItem, TextStyle};
use laser_api::{ApiClient, ClientConfig, Units, Vector};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Teeth that get a tick mark and a number.
const LABELED_TEETH: [u32; 13] = [1, 6, 12, 18, 24, 30, 36, 42, 48, 54, 60, 66, 72];

const POCKET_ROWS: u32 = 10;
const POCKET_COLUMNS: u32 = 2;

/// Ruler layout, inches.
struct Layout {
    pocket_corner: Vector,
    pocket_spacing: Vector,
    first_tooth_x: f64,
    tooth_pitch: f64,
    tooth_height: f64,
    printable_height: f64,
    text_gap: f64,
    line_width: f64,
}

impl Default for Layout {
    fn default() -> Self {
        let font_height = 12.0 / 72.0;
        let font_scale = 1.2;
        Self {
            pocket_corner: Vector::new(0.75, -0.775),
            pocket_spacing: Vector::new(8.0, -14.355 / 9.0),
            first_tooth_x: 0.2,
            tooth_pitch: 0.1,
            tooth_height: 0.153 + 0.018,
            printable_height: 0.27,
            text_gap: font_scale * font_height,
            line_width: 0.01,
        }
    }
}

async fn etch_pocket(etch: &EtchItem, layout: &Layout, corner: Vector) -> Result<()> {
    // From the bottom to the top of the printable area
    let up = Vector::new(0.0, -layout.printable_height);
    let up_unit = up.try_unit()?;
    let half = layout.printable_height * 0.5;

    for tooth in LABELED_TEETH {
        let bottom = corner
            + Vector::new(
                layout.first_tooth_x + layout.tooth_pitch * f64::from(tooth - 1),
                -layout.tooth_height,
            );
        let lower_end = bottom + up_unit * (half - layout.text_gap / 2.0);
        let upper_end = bottom + up_unit * (half + layout.text_gap / 2.0);
        let center = bottom + up_unit * half;
        let top = bottom + up;

        etch.add_line(bottom, lower_end, layout.line_width).await?;
        etch.add_text(center, 0.0, &tooth.to_string(), TextStyle::default())
            .await?;
        etch.add_line(top, upper_end, layout.line_width).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "laser_api=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    tracing::info!("Starting laser-ruler v{}", env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::load()
        .context("Failed to load client config")?
        .with_units(Units::Inches);
    let client = ApiClient::new(config);

    let etch = client
        .create_etch()
        .await
        .context("Failed to create etch entity")?;
    etch.as_item().set_name("RPC Created Etch").await?;

    let layout = Layout::default();
    for row in 0..POCKET_ROWS {
        for col in 0..POCKET_COLUMNS {
            let corner = layout.pocket_corner
                + Vector::new(
                    layout.pocket_spacing.x * f64::from(col),
                    layout.pocket_spacing.y * f64::from(row),
                );
            etch_pocket(&etch, &layout, corner)
                .await
                .with_context(|| format!("Failed to etch pocket at row {}, column {}", row, col))?;
        }
    }

    client.close().await;
    tracing::info!("Etched {} pockets", POCKET_ROWS * POCKET_COLUMNS);
    Ok(())
}
