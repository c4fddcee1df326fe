//! 命令行入口：`convert` 生成模板，`assets` 仅迁移资源

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

use templater::config::{find_config_file, load_dotenv, Settings};
use templater::env::{generate_env_docs, EnvConfig};
use templater::{
    ensure_directory, is_remote_reference, print_error_message, print_info_message, scan_pages,
    Page, PageConverter, Session, TemplaterError, TemplaterResult,
};

/// Turn standalone HTML pages into block-based templates
#[derive(Parser, Debug)]
#[command(name = "templater", version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Log every resolved reference and written file
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Network timeout in seconds (0 disables it)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// User-Agent header sent with remote requests
    #[arg(long, global = true, value_name = "UA")]
    user_agent: Option<String>,

    /// Configuration file to load instead of the default locations
    #[arg(short = 'C', long, global = true, value_name = "FILE")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a master page into base.html and other pages into leaf templates
    Convert(ConvertArgs),

    /// Relocate page assets into the static folder without touching the markup otherwise
    Assets(AssetsArgs),

    /// List the environment variables that are read
    Env,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Page the base template is built from (path or URL)
    #[arg(short, long, value_name = "PAGE")]
    master: String,

    /// Id of the element holding the page content
    #[arg(short, long, value_name = "ID")]
    block: String,

    /// Output directory [default: templates]
    #[arg(short, long, value_name = "DIR")]
    output: Option<String>,

    /// Static folder inside the output directory [default: static]
    #[arg(short = 's', long = "static", value_name = "NAME")]
    static_folder: Option<String>,

    /// Download remote assets too
    #[arg(short = 'D', long)]
    download_remote: bool,

    /// Pages converted into leaf templates
    #[arg(value_name = "PAGES")]
    pages: Vec<String>,
}

#[derive(Args, Debug)]
struct AssetsArgs {
    /// Output directory; rewritten pages go to stdout when omitted
    #[arg(short, long, value_name = "DIR")]
    output: Option<String>,

    /// Static folder [default: static]
    #[arg(short = 's', long = "static", value_name = "NAME")]
    static_folder: Option<String>,

    /// Download remote assets too
    #[arg(short = 'D', long)]
    download_remote: bool,

    /// Copy local assets into the static folder
    #[arg(short, long)]
    copy: bool,

    /// Pages to process
    #[arg(value_name = "PAGES", required = true)]
    pages: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    load_dotenv();
    let env = match EnvConfig::from_env() {
        Ok(env) => env,
        Err(e) => {
            print_error_message(&format!("Error: {}", e));
            process::exit(1);
        }
    };

    init_tracing(&cli, &env);

    match run(cli, &env) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error_message(&format!("Error: {}", e));
            process::exit(1);
        }
    }
}

fn init_tracing(cli: &Cli, env: &EnvConfig) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        env.log_level.parse().unwrap_or(Level::INFO)
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(!env.no_color)
        .with_target(false)
        .init();
}

/// Returns `Ok(false)` when some page failed but the run itself completed
fn run(cli: Cli, env: &EnvConfig) -> TemplaterResult<bool> {
    let Cli {
        timeout,
        user_agent,
        config,
        command,
        ..
    } = cli;

    match command {
        Commands::Env => {
            print_info_message(&generate_env_docs());
            Ok(true)
        }
        Commands::Convert(args) => {
            let layer = Settings {
                output_dir: args.output.clone(),
                static_folder: args.static_folder.clone(),
                download_remote: args.download_remote.then_some(true),
                timeout,
                user_agent,
                ..Settings::default()
            };
            let settings = load_settings(config.as_deref(), env, &layer)?;
            run_convert(args, settings)
        }
        Commands::Assets(args) => {
            let layer = Settings {
                static_folder: args.static_folder.clone(),
                download_remote: args.download_remote.then_some(true),
                copy_assets: args.copy.then_some(true),
                timeout,
                user_agent,
                ..Settings::default()
            };
            let settings = load_settings(config.as_deref(), env, &layer)?;
            run_assets(args, settings)
        }
    }
}

/// 配置文件 → 环境变量 → 命令行
fn load_settings(config: Option<&str>, env: &EnvConfig, cli: &Settings) -> TemplaterResult<Settings> {
    let explicit = config.or(env.config_path.as_deref());
    let config_file = find_config_file(explicit)?;
    Settings::load(config_file.as_deref(), env, cli)
}

fn run_convert(args: ConvertArgs, settings: Settings) -> TemplaterResult<bool> {
    // 模板引用的资源必须存在于静态目录中
    let mut options = settings.options(true);
    options.copy_assets = true;

    let output_dir = PathBuf::from(settings.output_dir_or_default());
    let static_dir = output_dir.join(settings.static_folder_or_default());
    ensure_directory(&output_dir)?;
    ensure_directory(&static_dir)?;

    if !is_remote_reference(&args.master) && !Path::new(&args.master).is_file() {
        return Err(TemplaterError::NotFound(args.master));
    }

    let session = Session::new(&options)?;
    let converter = PageConverter::new(&session, &static_dir, &options);

    converter.write_base_template(&args.master, &args.block, &output_dir)?;

    let mut success = true;
    for page in scan_pages(&args.pages) {
        if let Err(e) = converter.write_leaf_template(&page, &args.block, &output_dir) {
            print_error_message(&format!("{}: {}", page, e));
            success = false;
        }
    }

    Ok(success)
}

fn run_assets(args: AssetsArgs, settings: Settings) -> TemplaterResult<bool> {
    let options = settings.options(false);

    let output_dir = args.output.map(PathBuf::from);
    let static_dir = match &output_dir {
        Some(dir) => dir.join(settings.static_folder_or_default()),
        None => PathBuf::from(settings.static_folder_or_default()),
    };
    if let Some(dir) = &output_dir {
        ensure_directory(dir)?;
    }

    let pages = scan_pages(&args.pages);
    if pages.is_empty() {
        print_error_message("Error: no HTML pages to process");
        return Ok(false);
    }

    let session = Session::new(&options)?;
    let converter = PageConverter::new(&session, &static_dir, &options);

    let mut success = true;
    for page in pages {
        let result = match &output_dir {
            Some(dir) => converter.write_rewritten_page(&page, dir).map(|_| ()),
            None => Page::load(&session, &page)
                .and_then(|loaded| converter.rewrite_page(&loaded))
                .map(|text| print_info_message(&text)),
        };

        if let Err(e) = result {
            print_error_message(&format!("{}: {}", page, e));
            success = false;
        }
    }

    Ok(success)
}
