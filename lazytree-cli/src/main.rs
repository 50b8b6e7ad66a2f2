mod demo;
mod paths;
mod render;

use std::fs;
use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use log::LevelFilter;
use simplelog::Config;
use simplelog::WriteLogger;

use demo::LoadMoreArgs;

#[derive(Parser, Debug)]
#[command(name = "lazytree")]
#[command(about = "Lazily loaded, paginated tree demos", long_about = None)]
#[command(version)]
struct Args {
    /// Path to log file (defaults to latest.log in the platform cache directory)
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "debug", global = true)]
    log_level: LevelFilter,

    /// Maximum rows printed per tree
    #[arg(long, value_name = "ROWS", default_value_t = 40, global = true)]
    max_rows: usize,

    #[command(subcommand)]
    demo: Demo,
}

#[derive(Subcommand, Debug)]
enum Demo {
    /// A tree whose children are all known up front
    Sync,

    /// Children fetched from a fixed template when a node is expanded
    Async {
        /// Delay before children arrive, in milliseconds
        #[arg(long, default_value_t = 1000)]
        latency_ms: u64,
    },

    /// Large child lists loaded a page at a time through a load-more entry
    LoadMore(LoadMoreArgs),
}

fn default_log_path() -> PathBuf {
    let Some(path) = paths::log_file() else {
        return PathBuf::from("lazytree.log");
    };
    if let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_ok()
    {
        paths::rotate_logs(dir);
    }
    path
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    let log_file = File::create(&log_path).expect("Failed to create log file");
    WriteLogger::init(args.log_level, Config::default(), log_file)
        .expect("Failed to initialize logger");
    log::info!("lazytree {:?}, logging to {}", args.demo, log_path.display());

    let result = match &args.demo {
        Demo::Sync => demo::sync(args.max_rows).await,
        Demo::Async { latency_ms } => demo::async_children(*latency_ms, args.max_rows).await,
        Demo::LoadMore(load_more) => demo::load_more(load_more, args.max_rows).await,
    };

    if let Err(e) = result {
        log::error!("demo failed: {e}");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
