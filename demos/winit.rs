use wander::{Padding, PlotLayout};
use wander_core::{RngSteps, WalkParameters};

fn main() {
    const NUM_STEPS: usize = 550;

    let walk = wander_core::run(WalkParameters::new(NUM_STEPS, 2), RngSteps::seeded(550)).unwrap();

    println!("{}", wander::StatsReport(&walk.stats));

    wander::plot_walk(
        &walk.path,
        PlotLayout::new()
            .with_size(800.0, 600.0)
            .with_path_width(1.5)
            .with_padding(Padding {
                top: 20.0,
                bottom: 20.0,
                left: 50.0,
                right: 20.0,
            }),
    )
    .unwrap();
}
