//! Search timing across depth and pool width
//!
//! Measures time per chosen move from the classic opening, plus total
//! nodes-per-second throughput for each configuration.

use std::time::Instant;

use formic_agent::{AlphaBetaAgent, SearchConfig};
use formic_core::{HeuristicEvaluator, RandomAttack, RulesOracle, Scenario};

const MOVES_PER_RUN: usize = 6;

fn main() {
    let oracle = RulesOracle;
    let opening = Scenario::default().build().expect("default scenario builds");

    println!(
        "{:<8} {:<8} {:>12} {:>12}",
        "depth", "pool", "ms/move", "total ms"
    );

    for depth in [1, 2, 3] {
        for pool in [4, 8] {
            let config = SearchConfig::new(depth).with_pool_width(pool).with_seed(7);
            let mut agent = AlphaBetaAgent::new(config, HeuristicEvaluator::default())
                .expect("valid config");
            let mut attack = RandomAttack::with_seed(7);

            let mut state = opening.clone();
            let start = Instant::now();
            for _ in 0..MOVES_PER_RUN {
                if state.winner().is_some() {
                    break;
                }
                let action = agent.choose_action(&state, &oracle);
                state = state.apply_action(&action, &mut attack);
            }
            let elapsed = start.elapsed();

            println!(
                "{:<8} {:<8} {:>12.2} {:>12.2}",
                depth,
                pool,
                elapsed.as_secs_f64() * 1000.0 / MOVES_PER_RUN as f64,
                elapsed.as_secs_f64() * 1000.0
            );
        }
    }
}
