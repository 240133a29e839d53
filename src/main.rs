use std::env;
use std::path::Path;

use anyhow::Result;
use log::info;
use screen_transmittance::io::{ScreenDefinition, from_screen_string, read_screen_definition};
use screen_transmittance::{
    Compass, DiffuseMode, DiffuseIntegrator, IrradianceStep, ScreenEvaluator, SunPosition,
    period_transmittance,
};

const DEMO_SCREEN: &str = r#"{
    "front_width": 150.0,
    "front_height": 150.0,
    "openings": [
        { "kind": "square", "width": 130.0, "height": 130.0, "depth": 100.0 }
    ]
}"#;

fn main() -> Result<()> {
    env_logger::init();

    let definition: ScreenDefinition = match env::args().nth(1) {
        Some(path) => read_screen_definition(Path::new(&path))?,
        None => from_screen_string(DEMO_SCREEN)?,
    };
    let assembly = definition.to_assembly()?;
    info!(
        "Loaded screen block with {} openings",
        assembly.openings().len()
    );

    println!(
        "Opening area rate: {:.4}, partition area rate: {:.4}",
        assembly.opening_area_rate(),
        assembly.partition_area_rate()
    );

    let integrator = DiffuseIntegrator::new(definition.config.sample_density());
    for (i, opening) in assembly.openings().iter().enumerate() {
        let sky = integrator.transmittance(opening, DiffuseMode::Sky);
        let reflected = integrator.transmittance(opening, DiffuseMode::Reflected);
        println!("{opening}: sky {sky:.6}, reflected {reflected:.6} (opening {i})");
    }

    let steps: Vec<IrradianceStep> = [(15.0, -60.0), (35.0, -30.0), (50.0, 20.0), (25.0, 70.0)]
        .into_iter()
        .map(|(alt, az)| IrradianceStep::new(SunPosition::new(alt, az), 500.0, 100.0, 50.0))
        .collect();

    for compass in [Compass::S, Compass::E, Compass::W] {
        let oriented = assembly.with_azimuth(compass.azimuth())?;
        let evaluator = ScreenEvaluator::new(oriented, definition.config.clone())?;
        let rows = evaluator.run(&steps)?;
        for row in &rows {
            println!(
                "{compass:>2} sun ({:5.1}, {:6.1}): direct {:.4}, screen rate {:.4}",
                row.sun.altitude,
                row.sun.azimuth,
                row.openings[0].direct_rate,
                row.screen_rate
            );
        }
        println!("{compass:>2} period transmittance: {:.4}", period_transmittance(&rows));
    }
    Ok(())
}
