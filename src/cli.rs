use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "breedlist", version, about = "Browse a paginated dog breed list")]
pub struct Cli {
    /// Breed endpoint, queried as `<URL>?page=N`
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Config file (defaults to <config dir>/breedlist/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a display page to stdout instead of starting the TUI
    #[arg(long)]
    pub print: bool,

    /// Display page to print
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["breedlist"]).unwrap();
        assert!(!cli.print);
        assert_eq!(cli.page, 1);
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn print_mode_with_page() {
        let cli = Cli::try_parse_from([
            "breedlist",
            "--print",
            "--page",
            "3",
            "--base-url",
            "http://localhost:9000/breeds",
        ])
        .unwrap();
        assert!(cli.print);
        assert_eq!(cli.page, 3);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000/breeds"));
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(Cli::try_parse_from(["breedlist", "--print", "--page", "0"]).is_err());
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
