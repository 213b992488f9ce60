//! Hand-wired XOR network, run through the acyclic activation engine.
//!
//! There is no training loop here: phenome-core evaluates phenomes, it
//! doesn't produce them. The weights below are the textbook two-hidden-unit
//! XOR solution (an OR unit and a NAND unit feeding an AND unit), wired
//! directly as a connection list the way a genome decoder would hand one to
//! `CyclicGraph::build`.

use phenome_core::{sigmoid_steep, AcyclicActivation, CyclicGraph, DagGraph, PhenomeResult, WeightedConnection};

fn main() -> PhenomeResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // 3 inputs: x1, x2, and a constant bias input fixed at 1.0.
    // 1 output. Node ids 0,1,2 are inputs, 3 is the output, 4 and 5 hidden.
    let connections = vec![
        WeightedConnection::new(0, 4, 20.0),
        WeightedConnection::new(1, 4, 20.0),
        WeightedConnection::new(2, 4, -10.0), // OR unit
        WeightedConnection::new(0, 5, -20.0),
        WeightedConnection::new(1, 5, -20.0),
        WeightedConnection::new(2, 5, 30.0), // NAND unit
        WeightedConnection::new(4, 3, 20.0),
        WeightedConnection::new(5, 3, 20.0),
        WeightedConnection::new(2, 3, -30.0), // AND of the two above
    ];

    let graph = CyclicGraph::build(&connections, 3, 1)?;
    let depth = phenome_core::depth::analyze(&graph)?;
    let dag = DagGraph::build(&graph, &depth)?;

    let mut engine = AcyclicActivation::new(dag, sigmoid_steep);

    println!("x1 x2 | xor");
    for &(x1, x2) in &[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)] {
        let outputs = engine.activate(&[x1, x2, 1.0]);
        println!(" {x1}  {x2} | {:.4}", outputs[0]);
    }

    Ok(())
}
