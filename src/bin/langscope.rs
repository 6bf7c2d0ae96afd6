//! Command-line front end for the catalog engine.
//!
//! Usage:
//!   langscope find "Pay" --context components/com_axs/views/cart.php
//!   langscope lookup AXS_PAY --scope administrator
//!   langscope create AXS_CANCEL "Cancel" --target language/overrides/en-GB.override.ini
//!   langscope rewrite "JText::_('AXS_PAY')"
//!   langscope transform quote-swap "'Pay'"
//!
//! Every command builds the index from the workspace layout (or the `--root`
//! paths) before running. Results go to stdout; logs go to stderr.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use langscope::catalog::{Scope, ScopeContext, SubsetId};
use langscope::telemetry::{self, LogFormat};
use langscope::{
    CatalogConfig, bracket_wrap, context_for, create_variable, find_candidates,
    find_workspace_root, quote_swap, replacement_for, rewrite_accessor, unquote,
};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "langscope")]
#[command(about = "Forward and reverse lookups over INI localization catalogs")]
struct Cli {
    /// Workspace root; defaults to LANGSCOPE_ROOT or the nearest parent holding language/.
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,
    /// Scan root (repeatable); replaces the default language directories.
    #[arg(long = "root", global = true)]
    roots: Vec<PathBuf>,
    /// tracing filter directive; defaults to LANGSCOPE_LOG or "warn".
    #[arg(long, global = true)]
    log_filter: Option<String>,
    /// Log output format.
    #[arg(long, global = true, default_value = "compact")]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List keys whose value is exactly TEXT.
    Find {
        text: String,
        /// File being edited; scope and subset are derived from its path.
        #[arg(long, conflicts_with_all = ["scope", "subset"])]
        context: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ScopeArg::Site)]
        scope: ScopeArg,
        #[arg(long)]
        subset: Option<String>,
    },
    /// Print the value of KEY.
    Lookup {
        key: String,
        #[arg(long, value_enum, default_value_t = ScopeArg::Site)]
        scope: ScopeArg,
    },
    /// Append KEY = "VALUE" to an existing catalog file.
    Create {
        key: String,
        value: String,
        #[arg(long)]
        target: PathBuf,
    },
    /// Print the canonical accessor call replacing TEXT with KEY.
    Replace { key: String, text: String },
    /// Rewrite a legacy accessor call into the canonical form.
    Rewrite {
        text: String,
        #[arg(long, value_enum, default_value_t = ScopeArg::Site)]
        scope: ScopeArg,
    },
    /// Apply a pure text transform.
    Transform {
        #[arg(value_enum)]
        op: TransformOp,
        text: String,
    },
    /// Print per-scope index counts and walk warnings.
    Stats,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScopeArg {
    Site,
    Administrator,
}

impl From<ScopeArg> for Scope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::Site => Scope::Site,
            ScopeArg::Administrator => Scope::Administrator,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TransformOp {
    QuoteSwap,
    Wrap,
    Unquote,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let filter = cli
        .log_filter
        .clone()
        .unwrap_or_else(telemetry::filter_from_env);
    telemetry::initialise(&filter, cli.log_format).context("initialising logging")?;

    let config = || load_config(cli.workspace.as_deref(), &cli.roots);

    match cli.command {
        Command::Find {
            text,
            context,
            scope,
            subset,
        } => {
            let config = config()?;
            let (repo, _) = config.build_repository();
            let query = match context {
                Some(path) => context_for(&repo, &config.workspace_root.join(path)),
                None => ScopeContext::new(scope.into(), subset.map(SubsetId::new)),
            };
            let candidates = find_candidates(&repo, unquote(&text), &query);
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        }
        Command::Lookup { key, scope } => {
            let (repo, _) = config()?.build_repository();
            match repo.lookup_by_key(&key, scope.into()) {
                Some(value) => println!("{value}"),
                None => bail!("no value for '{key}' in {} scope", Scope::from(scope)),
            }
        }
        Command::Create { key, value, target } => {
            let config = config()?;
            let (repo, _) = config.build_repository();
            let target = config.workspace_root.join(target);
            create_variable(&repo, &key, &value, &target)
                .with_context(|| format!("creating {key} in {}", target.display()))?;
            println!("{key} = \"{value}\"");
        }
        Command::Replace { key, text } => {
            let accessor = config()?.accessor;
            println!("{}", replacement_for(&key, unquote(&text), &accessor));
        }
        Command::Rewrite { text, scope } => {
            let config = config()?;
            let (repo, _) = config.build_repository();
            let rewritten = rewrite_accessor(&text, scope.into(), &repo, &config.accessor)?;
            println!("{rewritten}");
        }
        Command::Transform { op, text } => println!("{}", apply_transform(op, &text)),
        Command::Stats => {
            let config = config()?;
            let (repo, report) = config.build_repository();
            let index = repo.read();
            let summary = json!({
                "workspace_root": config.workspace_root,
                "roots": config.roots,
                "files": index.sources().count(),
                "site": index.stats(Scope::Site),
                "administrator": index.stats(Scope::Administrator),
                "warnings": report.warnings(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn load_config(workspace: Option<&Path>, roots: &[PathBuf]) -> Result<CatalogConfig> {
    let workspace_root = match workspace {
        Some(path) => path.to_path_buf(),
        None if !roots.is_empty() => {
            std::env::current_dir().context("reading current directory")?
        }
        None => find_workspace_root().context("locating workspace root")?,
    };
    let config = CatalogConfig::from_env(&workspace_root);
    Ok(if roots.is_empty() {
        config
    } else {
        config.with_roots(roots)
    })
}

fn apply_transform(op: TransformOp, text: &str) -> String {
    match op {
        TransformOp::QuoteSwap => quote_swap(text),
        TransformOp::Wrap => bracket_wrap(text),
        TransformOp::Unquote => unquote(text).to_string(),
    }
}
