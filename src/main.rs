use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tidywin::backup;
use tidywin::cli::{Cli, Command};
use tidywin::config::Config;
use tidywin::engine::{CleanupRequest, DisposalStrategy, Engine};
use tidywin::output;
use tidywin::report::ConsoleSink;
use tidywin::utils;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref());

    match cli.command {
        Command::Scan => scan(&config),
        Command::Clean {
            confirm,
            secure,
            backup,
            excludes,
            path,
        } => {
            if !confirm {
                output::print_no_confirm_warning();
                scan(&config);
            } else {
                clean(&config, secure, backup, excludes, path)?;
            }
        }
    }

    Ok(())
}

fn scan(config: &Config) {
    output::print_banner();
    output::print_scan_header();

    let mut total = 0u64;
    for target in config.enabled_directories() {
        let path = utils::normalize_path(&target.path);
        let size = if path.exists() {
            utils::entry_size(&path)
        } else {
            0
        };
        total += size;
        output::print_target_row(
            &target.description,
            &path.display().to_string(),
            &utils::format_size(size),
        );
    }

    output::print_separator();
    output::print_grand_total(&utils::format_size(total));
}

fn clean(
    config: &Config,
    secure: bool,
    backup_flag: bool,
    excludes: Vec<String>,
    path: Option<String>,
) -> Result<()> {
    let secure = secure || config.secure_delete;
    let backup_dir = if backup_flag || config.backup {
        Some(backup::setup_backup_directory()?)
    } else {
        None
    };
    let strategy = DisposalStrategy::from_flags(secure, backup_dir);

    let mut exclusions = config.exclusions.clone();
    exclusions.extend(excludes);

    let roots: Vec<String> = match path {
        Some(p) => vec![p],
        None => config
            .enabled_directories()
            .map(|d| d.path.clone())
            .collect(),
    };

    if roots.is_empty() {
        output::print_info("nothing to clean: no directories enabled in the config");
        return Ok(());
    }

    let mut sink = ConsoleSink;
    for root in roots {
        let request = CleanupRequest::new(&root, &exclusions, strategy.clone());
        Engine::new(Some(&mut sink)).run(&request);
    }

    output::print_clean_complete();
    Ok(())
}
