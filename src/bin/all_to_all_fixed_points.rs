//! All-to-All Fixed Points: Mean-Field Bistability vs Network Size
//!
//! In an all-to-all network of N units the mean column sum is N - 1. Once
//! it exceeds one, the origin loses stability and a symmetric pair of
//! equilibria x* = ±(N - 1)·tanh(x*) appears. This binary scans network
//! sizes and constant inputs and reports every distinct fixed point.

use rate_network_dynamics::{
    all_to_all_network_adjacency,
    find_fixed_points,
    mean_column_sum,
    FixedPointConfig,
    NetworkDrift,
    NewtonSolver,
};
use tracing_subscriber::EnvFilter;

fn main() -> rate_network_dynamics::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Fixed Points of All-to-All Rate Networks");
    println!("═══════════════════════════════════════════════════════════════\n");

    let solver = NewtonSolver::default();
    let inputs = [0.0, 0.5, 1.0];

    for n in 1..=6 {
        let weights = all_to_all_network_adjacency(n);
        let gain = mean_column_sum(&weights);
        let mode = if gain > 1.0 { "mean-field" } else { "grid" };

        println!("N = {} (mean column sum = {:.1}, {} starts)", n, gain, mode);

        for &input_const in &inputs {
            let config = FixedPointConfig { input_const, ..Default::default() };
            let set = find_fixed_points(&weights, &config, &solver)?;
            let drift = NetworkDrift::new(&weights, input_const)?;

            println!(
                "  c = {:.1}: {} fixed point(s), {} converged",
                input_const,
                set.len(),
                set.converged_count()
            );
            for point in set.iter() {
                let values: Vec<String> = point.state.iter().map(|v| format!("{:+.5}", v)).collect();
                println!(
                    "    [{}]  |f| = {:.2e}",
                    values.join(", "),
                    drift.residual(point.state.view())
                );
            }
        }
        println!();
    }

    Ok(())
}
