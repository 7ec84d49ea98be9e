//! Sample command - show the deterministic sampling value for a coordinate.

use hexlayer::config::ConfigFile;
use hexlayer::geo::{coordinate_key, pseudo_random_unit, stable_hash};

use crate::error::CliError;

/// Run the sample command.
pub fn run(lat: f64, lon: f64, threshold: Option<f64>, config: &ConfigFile) -> Result<(), CliError> {
    let threshold = threshold.unwrap_or(config.visibility.threshold);
    let unit = pseudo_random_unit(lat, lon);

    println!("Key:       {}", coordinate_key(lat, lon));
    println!("Hash:      {}", stable_hash(lat, lon));
    println!("Unit:      {:.2}", unit);
    println!(
        "Sampled:   {} (threshold {})",
        if unit < threshold { "visible" } else { "hidden" },
        threshold
    );
    Ok(())
}
