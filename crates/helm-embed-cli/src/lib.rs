mod error;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use helm_embed::logging::{LogFormat, parse_color_choice};
use helm_embed::{ChartSource, EnvSettings, HelmCli, collect_chart_files, fetch_chart_values, load_chart};
use serde_json::{Value, json};
use termcolor::ColorChoice;
use vfs::VfsPath;

use crate::error::CliResult;

pub use error::CliError;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "helm-embed",
    version,
    about = "Load bundled Helm charts and inspect installed releases"
)]
pub struct Cli {
    #[command(flatten)]
    pub logging: LoggingArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct LoggingArgs {
    /// Log level (`RUST_LOG` takes precedence)
    #[arg(long, global = true, env = "HELM_EMBED_LOG_LEVEL")]
    pub log_level: Option<tracing::Level>,

    /// Log format: json, pretty or pretty-compact
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// When to colorize logs: auto, always or never
    #[arg(long, global = true, default_value = "auto", value_parser = parse_color_choice)]
    pub color: ColorChoice,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the files collected for a chart
    Files(ChartArgs),

    /// Load a chart and print a summary
    Load(ChartArgs),

    /// Print the values an installed release was configured with
    Values(ValuesArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Files(_) => "files",
            Self::Load(_) => "load",
            Self::Values(_) => "values",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    /// Directory holding the chart tree
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Chart directory inside ROOT
    #[arg(long, default_value = "")]
    pub chart: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ValuesArgs {
    /// Release name
    pub release: String,

    #[arg(short, long, env = "HELM_NAMESPACE", default_value = "")]
    pub namespace: String,

    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    #[arg(long, env = "HELM_KUBECONTEXT")]
    pub kube_context: Option<String>,

    /// Path to the helm binary
    #[arg(long, env = "HELM_BIN")]
    pub helm_bin: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub compact: bool,
}

impl ValuesArgs {
    #[must_use]
    pub fn settings(&self) -> EnvSettings {
        let mut settings = EnvSettings::from_env();
        if !self.namespace.is_empty() {
            settings = settings.with_namespace(self.namespace.clone());
        }
        if let Some(path) = &self.kubeconfig {
            settings = settings.with_kube_config(path.clone());
        }
        if let Some(context) = &self.kube_context {
            settings = settings.with_kube_context(context.clone());
        }
        if let Some(binary) = &self.helm_bin {
            settings = settings.with_helm_binary(binary.clone());
        }
        settings
    }
}

fn vfs_root_from_local_path(path: &Path) -> CliResult<VfsPath> {
    if !path.is_dir() {
        return Err(CliError::InvalidRoot(path.to_path_buf()));
    }
    Ok(VfsPath::new(vfs::PhysicalFS::new(path)))
}

/// Name and size of every file collected for the chart.
///
/// # Errors
///
/// Returns an error if the chart files cannot be collected.
pub fn chart_files_json<S>(source: &S, chart_dir: &str) -> CliResult<Value>
where
    S: ChartSource + ?Sized,
{
    let files = collect_chart_files(source, chart_dir)?;
    Ok(Value::Array(
        files
            .iter()
            .map(|f| json!({ "name": f.name, "size": f.data.len() }))
            .collect(),
    ))
}

/// Metadata, top-level value keys and file names of the loaded chart.
///
/// # Errors
///
/// Returns an error if the chart cannot be collected or parsed.
pub fn chart_summary_json<S>(source: &S, chart_dir: &str) -> CliResult<Value>
where
    S: ChartSource + ?Sized,
{
    let chart = load_chart(source, chart_dir)?;
    let value_keys: Vec<&str> = chart.values.keys().filter_map(|k| k.as_str()).collect();
    let templates: Vec<&str> = chart.templates.iter().map(|t| t.name.as_str()).collect();
    let files: Vec<&str> = chart.files.iter().map(|f| f.name.as_str()).collect();
    Ok(json!({
        "metadata": chart.metadata,
        "values": value_keys,
        "templates": templates,
        "files": files,
    }))
}

fn write_output(value: &Value, args: &OutputArgs) -> CliResult<()> {
    let mut json = if args.compact {
        serde_json::to_vec(value)?
    } else {
        serde_json::to_vec_pretty(value)?
    };
    json.push(b'\n');

    if let Some(path) = &args.output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CliError::CreateOutputDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(path, json).map_err(|e| CliError::WriteOutput {
            path: path.clone(),
            source: e,
        })?;
    } else {
        use std::io::Write;
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(&json) {
            // When piping to `head`, stdout may be closed early; treat as success.
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
    }
    Ok(())
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the chart cannot be collected or loaded, the release
/// cannot be queried, or output cannot be written.
pub fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Files(args) => {
            let root = vfs_root_from_local_path(&args.root)?;
            let value = chart_files_json(&root, &args.chart)?;
            write_output(&value, &args.output)
        }
        Command::Load(args) => {
            let root = vfs_root_from_local_path(&args.root)?;
            let value = chart_summary_json(&root, &args.chart)?;
            write_output(&value, &args.output)
        }
        Command::Values(args) => {
            let settings = args.settings();
            let values = fetch_chart_values(&args.namespace, &args.release, &settings, &HelmCli::new())?;
            write_output(&Value::Object(values), &args.output)
        }
    }
}
