use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Create config.toml file if not exists or is broken.
    #[arg(long)]
    pub create_config: bool,
    /// Seed addresses to add to the cluster on top of the configured ones.
    #[arg(long)]
    pub seed: Vec<String>
}
