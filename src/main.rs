use std::io::IsTerminal;
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use miette::{IntoDiagnostic, Result};

use churnscope_core::ChurnConfig;
use churnscope_pulse::git::GitCli;
use churnscope_pulse::log::parse_raw_log;
use churnscope_pulse::report::{rank, render};
use churnscope_pulse::targets::build_targets;
use churnscope_pulse::thrash::replay_target;

#[derive(Parser)]
#[command(
    name = "churnscope",
    version,
    about = "Mine git history for refactoring candidates",
    long_about = "Churnscope mines a repository's commit history over a time window and ranks\n\
                   files (and groups of files that change together) by a churn-instability\n\
                   score: logarithmic edit churn multiplied by the number of lines seen\n\
                   thrashing between added and removed across distinct commits.\n\n\
                   Examples:\n  \
                     churnscope                             Last week of history, top 10 targets\n  \
                     churnscope --after '3 months ago'      Wider window\n  \
                     churnscope --targets 25 --reasons 5    More of everything\n  \
                     churnscope --detail                    Singleton reasons and member commits"
)]
struct Cli {
    /// Repository path (default: current directory)
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Inspect commits after this time (any expression git understands)
    #[arg(long)]
    after: Option<String>,

    /// Inspect commits before this time (default: now)
    #[arg(long)]
    before: Option<String>,

    /// Show top K targets
    #[arg(long, short = 't')]
    targets: Option<usize>,

    /// Show top K reasons per target
    #[arg(long, short = 'r')]
    reasons: Option<usize>,

    /// Show single-count reasons and per-commit detail lines
    #[arg(long)]
    detail: bool,

    /// Path to configuration file (default: .churnscope.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose progress output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ChurnConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = std::path::Path::new(".churnscope.toml");
            if default_path.exists() {
                ChurnConfig::from_file(default_path).into_diagnostic()?
            } else {
                ChurnConfig::default()
            }
        }
    };

    // CLI flags win over the config file
    if let Some(after) = cli.after {
        config.window.after = after;
    }
    if let Some(before) = cli.before {
        config.window.before = Some(before);
    }
    if let Some(targets) = cli.targets {
        config.report.top_targets = targets;
    }
    if let Some(reasons) = cli.reasons {
        config.report.top_reasons = reasons;
    }
    config.report.detail |= cli.detail;

    // Hint: not a git repository
    if !cli.path.join(".git").exists() && git2::Repository::discover(&cli.path).is_err() {
        miette::bail!(miette::miette!(
            help = "Run churnscope from inside a git repository, or point --path at one",
            "Not a git repository: {}",
            cli.path.display()
        ));
    }

    let before = config
        .window
        .before
        .clone()
        .unwrap_or_else(|| Utc::now().to_rfc3339());

    eprintln!(
        "Mining git history at {} (after {}, before {})...",
        cli.path.display(),
        config.window.after,
        before,
    );

    let git = GitCli::new(&cli.path);
    let raw = git.raw_log(&config.window.after, &before).into_diagnostic()?;
    let commits = parse_raw_log(&raw);
    eprintln!("Parsed {} commits.", commits.len());

    let mut targets = build_targets(&commits, &config.analysis.extensions);
    if cli.verbose {
        eprintln!(
            "Built {} targets from extensions {:?}.",
            targets.len(),
            config.analysis.extensions,
        );
    }

    let is_tty = std::io::stderr().is_terminal();
    let bar = if is_tty {
        let pb = indicatif::ProgressBar::new(targets.len() as u64);
        pb.set_style(
            indicatif::ProgressStyle::with_template(
                "{bar:30.cyan} {pos}/{len} targets ({elapsed})",
            )
            .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    for target in targets.values_mut() {
        replay_target(target, &commits, &git);
        if let Some(ref pb) = bar {
            pb.inc(1);
        }
    }
    if let Some(pb) = bar {
        pb.finish_and_clear();
    }

    let ranked = rank(targets.into_values().collect());
    print!("{}", render(&ranked, &commits, &config.report));

    Ok(())
}
