use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "skilleval",
    version,
    about = "Grade local models on summarization, extraction and reasoning with a remote judge model",
    after_help = "Configuration is read from the YAML file named by SKILLEVAL_CONFIG; built-in defaults apply when it is unset."
)]
pub struct Cli {
    /// Generate skill tests with the remote model instead of using the built-in set
    #[arg(long)]
    pub dynamic: bool,
}
