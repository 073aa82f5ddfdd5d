//! Helmdrive CLI - reconcile helm releases by driving the helm CLI

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use helmdrive_core::{ChartSource, HelmConfig};

mod commands;
mod error;
mod exit_codes;

use error::CliError;

#[derive(Parser)]
#[command(name = "helmdrive")]
#[command(version)]
#[command(about = "Reconcile helm releases by driving the helm CLI", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pass --debug to helm and enable verbose output
    #[arg(long, global = true)]
    debug: bool,

    /// Helm config home (--home), overriding $HELM_HOME
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Tiller address (--host), overriding $HELM_HOST
    #[arg(long, global = true)]
    host: Option<String>,

    /// Kube context to use
    #[arg(long, global = true)]
    kube_context: Option<String>,

    /// Absolute path to the kubeconfig file
    #[arg(long, global = true)]
    kubeconfig: Option<PathBuf>,

    /// Seconds helm waits to establish a tiller connection
    #[arg(long, global = true)]
    tiller_connection_timeout: Option<u64>,

    /// Namespace tiller runs in
    #[arg(long, global = true)]
    tiller_namespace: Option<String>,

    /// Seconds to wait for any individual Kubernetes operation
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// How charts referenced by releases are looked up
    #[arg(long, global = true, value_enum, default_value = "repository")]
    chart_source_type: ChartSourceKind,

    /// Repository URL or chart directory, per --chart-source-type
    #[arg(long, global = true)]
    chart_source: Option<String>,

    /// Helm binary to invoke instead of `helm` from PATH
    #[arg(long, global = true)]
    helm_bin: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartSourceKind {
    Repository,
    Filesystem,
}

#[derive(Subcommand)]
enum Commands {
    /// Install or upgrade a release and wait for it to reach DEPLOYED
    Apply {
        /// Release name
        name: String,

        /// Chart to deploy
        #[arg(long)]
        chart: String,

        /// Chart version pin
        #[arg(long)]
        chart_version: String,

        /// Target namespace
        #[arg(short, long, default_value = "default")]
        namespace: String,

        /// Override payload file ("-" reads standard input)
        #[arg(short = 'f', long = "values")]
        values: Option<PathBuf>,
    },

    /// Show the observed state of a release
    Status {
        /// Release name
        name: String,

        /// Emit JSON instead of the human-readable view
        #[arg(long)]
        json: bool,
    },

    /// Delete a release with purge semantics
    Delete {
        /// Release name
        name: String,

        /// Chart the release deploys
        #[arg(long)]
        chart: String,

        /// Chart version pin
        #[arg(long)]
        chart_version: String,

        /// Target namespace
        #[arg(short, long, default_value = "default")]
        namespace: String,
    },

    /// Canonicalize an override payload to minified JSON
    Normalize {
        /// Payload file (standard input when omitted)
        file: Option<PathBuf>,

        /// On invalid input, echo it back unchanged instead of failing
        #[arg(long)]
        lenient: bool,
    },
}

fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        command,
        debug,
        home,
        host,
        kube_context,
        kubeconfig,
        tiller_connection_timeout,
        tiller_namespace,
        timeout,
        chart_source_type,
        chart_source,
        helm_bin,
    } = cli;

    // Built lazily: normalize never talks to helm and needs no chart source.
    let config = move || -> Result<HelmConfig, CliError> {
        let location = chart_source
            .ok_or_else(|| CliError::validation("chart source is not set (--chart-source)"))?;
        let chart_source = match chart_source_type {
            ChartSourceKind::Repository => ChartSource::Repository { url: location },
            ChartSourceKind::Filesystem => ChartSource::Filesystem {
                root: PathBuf::from(location),
            },
        };
        Ok(HelmConfig {
            debug,
            home,
            host,
            kube_context,
            kubeconfig,
            tiller_connection_timeout,
            tiller_namespace,
            timeout,
            chart_source,
            helm_bin,
        })
    };

    match command {
        Commands::Apply {
            name,
            chart,
            chart_version,
            namespace,
            values,
        } => commands::apply::run(
            config()?,
            &name,
            &chart,
            &chart_version,
            &namespace,
            values.as_deref(),
        ),

        Commands::Status { name, json } => commands::status::run(config()?, &name, json),

        Commands::Delete {
            name,
            chart,
            chart_version,
            namespace,
        } => commands::delete::run(config()?, &name, &chart, &chart_version, &namespace),

        Commands::Normalize { file, lenient } => {
            commands::normalize::run(file.as_deref(), lenient)
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
