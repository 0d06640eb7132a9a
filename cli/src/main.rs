use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use foxhist_core::config::{DEFAULT_LIMIT, DEFAULT_PROFILE_PATHS};
use foxhist_core::{HistoryEngine, HistoryRow, Order, ProfileLocator, ProfileSelection, SearchConfig};
use tracing::debug;

#[derive(Parser)]
#[command(name = "foxhist")]
#[command(about = "Search Firefox browsing history")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search history URLs and titles
    Search {
        /// Search terms, all of which must match
        terms: Vec<String>,
        /// Aggregate results by hostname ("true" to enable)
        #[arg(long, default_value = "false")]
        aggregate: String,
        /// Ranking: frecency, visit, recent (anything else sorts by url)
        #[arg(long, default_value = "frecency")]
        order: String,
        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
        limit: i64,
        #[command(flatten)]
        profile: ProfileArgs,
        /// Output results as JSON
        #[arg(long, conflicts_with = "plain")]
        json: bool,
        /// Output urls only, one per line (for piping to fzf, etc.)
        #[arg(long)]
        plain: bool,
    },
    /// Print the path of the history database
    Locate {
        #[command(flatten)]
        profile: ProfileArgs,
    },
}

#[derive(Args)]
struct ProfileArgs {
    /// Comma-separated Firefox directories, relative to the home directory
    #[arg(long, default_value = DEFAULT_PROFILE_PATHS)]
    profile_paths: String,
    /// Home directory to search from
    #[arg(long)]
    home: Option<String>,
    /// Use the profile Firefox marks as default instead of [Profile0]
    #[arg(long)]
    default_profile: bool,
}

impl ProfileArgs {
    fn locator(&self) -> Result<ProfileLocator> {
        let span = tracing::info_span!("locator");
        let locator = match &self.home {
            Some(home) => {
                let home = PathBuf::from(shellexpand::tilde(home).into_owned());
                ProfileLocator::new(home, span)
            }
            None => ProfileLocator::from_home_dir(span).context("Failed to resolve home directory")?,
        };

        let selection = if self.default_profile {
            ProfileSelection::Default
        } else {
            ProfileSelection::First
        };
        Ok(locator.with_selection(selection))
    }
}

fn print_rows(rows: &[HistoryRow], json: bool, plain: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    if rows.is_empty() && !plain {
        println!("No results found");
        return Ok(());
    }

    for row in rows {
        let url = row.url.as_deref().unwrap_or_default();
        if plain {
            println!("{}", url);
        } else {
            match row.title.as_deref() {
                Some(title) if !title.is_empty() => println!("{}\n    {}", title, url),
                _ => println!("{}", url),
            }
        }
    }

    Ok(())
}

fn cmd_search(
    terms: &[String],
    aggregate: &str,
    order: &str,
    limit: i64,
    profile: &ProfileArgs,
    json: bool,
    plain: bool,
) -> Result<()> {
    let config = SearchConfig {
        aggregate: SearchConfig::aggregate_flag(aggregate),
        order: Order::from_config(order),
        limit,
        profile_paths: profile.profile_paths.clone(),
    };
    debug!("Search config: {:?}", config);

    let mut engine = HistoryEngine::new(config, profile.locator()?, tracing::info_span!("engine"));
    engine
        .establish_connection()
        .context("Failed to open Firefox history")?;

    let query = terms.join(" ");
    let rows = engine.search(&query);
    engine.close()?;

    match rows {
        Some(rows) => print_rows(&rows, json, plain),
        None => anyhow::bail!("Search failed, see log for details"),
    }
}

fn cmd_locate(profile: &ProfileArgs) -> Result<()> {
    let located = profile.locator()?.locate(&profile.profile_paths)?;
    match located {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => anyhow::bail!("Firefox places.sqlite not found"),
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so results can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("foxhist=info".parse()?)
                .add_directive("foxhist_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search { terms, aggregate, order, limit, profile, json, plain } => {
            cmd_search(&terms, &aggregate, &order, limit, &profile, json, plain)?;
        }
        Commands::Locate { profile } => {
            cmd_locate(&profile)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["foxhist", "search", "mozilla", "firefox"]).unwrap();
        match cli.command {
            Commands::Search { terms, aggregate, order, limit, profile, json, plain } => {
                assert_eq!(terms, vec!["mozilla", "firefox"]);
                assert_eq!(aggregate, "false");
                assert_eq!(order, "frecency");
                assert_eq!(limit, DEFAULT_LIMIT);
                assert_eq!(profile.profile_paths, DEFAULT_PROFILE_PATHS);
                assert!(!profile.default_profile);
                assert!(!json && !plain);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_locator_uses_home_override() {
        let home = tempfile::TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "foxhist",
            "locate",
            "--home",
            home.path().to_str().unwrap(),
            "--default-profile",
        ])
        .unwrap();
        let Commands::Locate { profile } = cli.command else {
            panic!("expected locate");
        };
        let locator = profile.locator().unwrap();
        assert_eq!(locator.home(), home.path());
        assert!(cmd_locate(&profile).is_err());
    }
}
