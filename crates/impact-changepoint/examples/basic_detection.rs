//! Basic E-Divisive changepoint detection example

use impact_changepoint::{
    detect_changes, EnergyDivisiveDetector, EnergyDivisiveParameters, SimpleDetector,
};
use impact_core::sequential;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== E-Divisive Changepoint Detection ===\n");

    // Example 1: mean shift
    println!("1. Mean shift at index 50");
    let data1: Vec<f64> = (0..100)
        .map(|i| if i < 50 { (i % 3) as f64 } else { 6.0 + (i % 3) as f64 })
        .collect();
    let boundaries = detect_changes(&data1, 0.05, 199, 10)?;
    println!("  Boundaries: {boundaries:?}");

    // Example 2: variance change with the same mean
    println!("\n2. Variance change at index 60");
    let data2: Vec<f64> = (0..120)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            if i < 60 {
                0.1 * sign
            } else {
                3.0 * sign
            }
        })
        .collect();

    let params = EnergyDivisiveParameters::new(0.05, 199, 10).with_seed(42);
    let detector = EnergyDivisiveDetector::new(params)?.with_engine(sequential());
    let result = detector.detect_simple(&data2)?;

    println!("  {result}");
    for cp in result.changepoints() {
        println!(
            "    Changepoint at index {}, energy {:.3}, p-value {:.3}",
            cp.index,
            cp.energy,
            cp.p_value.unwrap_or(1.0)
        );
    }
    println!("  Stopped because: {:?}", result.termination());

    Ok(())
}
