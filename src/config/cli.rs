use crate::utils::logger::LogFormat;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "campus-registry")]
#[command(about = "Interactive registry for students, instructors, departments and courses")]
pub struct CliConfig {
    /// Optional TOML file with seed courses, departments and admission rules
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    /// Skip the welcome banner
    #[arg(long)]
    pub no_banner: bool,
}
