use clap::Parser;
use plotters::prelude::*;
use rollatron_rs::game::stats::roll_sum_histogram;
use rollatron_rs::game::{GameConfig, GameState};

const BAR_COLOR: RGBColor = RGBColor(0x63, 0x66, 0xf1); // palette primary

#[derive(Debug, Parser)]
#[command(name = "rollatron-chart")]
#[command(about = "Render a simulated roll-frequency histogram to PNG")]
struct Args {
    /// Number of rolls to simulate
    #[arg(short = 'n', long, default_value_t = 500)]
    num: u32,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Enable the Cities & Knights event die
    #[arg(long)]
    cities_knights: bool,

    /// Output image path
    #[arg(long, default_value = "roll_histogram.png")]
    out: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut state = GameState::new(GameConfig {
        seed: Some(args.seed),
    });
    if args.cities_knights {
        state.toggle_third_die();
    }
    state.start_new_game(["Alice", "Bob"]);

    for _ in 0..args.num {
        let values = state.roll_values();
        state.add_roll(values)?;
        state.next_turn()?;
    }

    let histogram = roll_sum_histogram(&state.roll_history);
    render_histogram(&histogram, &args.out, args.num)?;
    println!("Wrote {}", args.out);
    Ok(())
}

fn render_histogram(
    histogram: &[u32; 11],
    filename: &str,
    rolls: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(filename, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let max = histogram.iter().copied().max().unwrap_or(0).max(1);
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Two-dice sums over {rolls} rolls"),
            ("sans-serif", 28),
        )
        .margin(16)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d(1.5f64..12.5f64, 0f64..f64::from(max) * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(11)
        .x_desc("sum")
        .y_desc("rolls")
        .draw()?;

    chart.draw_series(histogram.iter().enumerate().map(|(offset, &count)| {
        let sum = offset as f64 + 2.0;
        Rectangle::new(
            [(sum - 0.4, 0.0), (sum + 0.4, f64::from(count))],
            BAR_COLOR.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}
