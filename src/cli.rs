//! Command-line interface parsing and validation

use crate::constants::MAX_PARTICLE_CAP;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A portfolio you can browse from the terminal", long_about = None)]
pub struct Cli {
    /// Portfolio content JSON (defaults to the built-in portfolio)
    #[arg(short = 'c', long, value_name = "PATH")]
    pub content: Option<String>,

    /// Enable logging to specified file
    #[arg(short = 'l', long, value_name = "PATH")]
    pub log_file: Option<String>,

    /// Maximum number of live smoke particles (0-500, 0 disables the effect)
    #[arg(short = 'p', long, value_name = "COUNT")]
    pub max_particles: Option<usize>,

    /// Skip the splash screen
    #[arg(long)]
    pub no_splash: bool,

    /// CV file offered by the download button
    #[arg(long, value_name = "PATH")]
    pub cv: Option<String>,
}

impl Cli {
    /// Validate CLI arguments
    pub fn validate(&self) -> Result<(), String> {
        if let Some(count) = self.max_particles {
            if count > MAX_PARTICLE_CAP {
                return Err(format!(
                    "Particle cap too large (maximum {})",
                    MAX_PARTICLE_CAP
                ));
            }
        }
        Ok(())
    }
}
