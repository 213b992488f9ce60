//! Scores a few hand-wired cart-pole controllers against the
//! single-pole-balancing evaluator, as a sanity check on the simulation
//! rather than a search for a good controller (phenome-core evaluates
//! phenomes, it doesn't search for them).

use phenome_core::{
    sigmoid_steep, AcyclicActivation, CyclicGraph, DagGraph, PhenomeResult, PoleBalanceConfig,
    PoleBalanceEvaluator, WeightedConnection,
};

/// Builds a controller that reacts only to the pole angle input (node id 3:
/// bias=0, cartPos=1, cartVel=2, poleAngle=3, poleAngVel=4), pushing the
/// cart proportionally to it. `gain` of zero is the force-neutral
/// controller (sigmoid(0) == 0.5); larger gains approximate a proportional
/// controller that can balance the pole for longer.
fn angle_reactive_controller(gain: f32) -> PhenomeResult<AcyclicActivation> {
    let connections = vec![WeightedConnection::new(3, 5, gain)];
    let graph = CyclicGraph::build(&connections, 5, 1)?;
    let depth = phenome_core::depth::analyze(&graph)?;
    let dag = DagGraph::build(&graph, &depth)?;
    Ok(AcyclicActivation::new(dag, sigmoid_steep))
}

fn main() -> PhenomeResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let evaluator = PoleBalanceEvaluator::new(PoleBalanceConfig {
        max_steps: 5_000,
        ..Default::default()
    });

    for gain in [0.0, -2.0, -10.0, -50.0] {
        let mut phenome = angle_reactive_controller(gain)?;
        let fitness = evaluator.evaluate(&mut phenome);
        println!("gain {gain:>6.1} -> fitness {fitness:.4}");
    }

    Ok(())
}
