use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use numbers::games::{SELECTION_SIZE, generate_all};
use numbers::utils::{parse_numbers, parse_target};
use numbers::{Game, PoolConfig, PrintStyle, TargetRange, WorkerPool};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// How each solution line is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    /// Postfix tokens, e.g. `2 1 +`
    Rpn,
    /// Infix with only the parentheses precedence requires
    Expr,
    /// Infix with every compound operand parenthesized
    Paren,
}

impl StyleArg {
    pub fn to_print_style(self) -> PrintStyle {
        match self {
            StyleArg::Rpn => PrintStyle::Rpn,
            StyleArg::Expr => PrintStyle::Expr,
            StyleArg::Paren => PrintStyle::Paren,
        }
    }
}

/// Numbers - Enumerate every solution of a numbers game
#[derive(Parser, Debug)]
#[command(name = "numbers")]
#[command(about = "Enumerate every way to reach a target with + - * / over a set of positive integers")]
#[command(version)]
pub struct CliArgs {
    /// Target value `N` or inclusive range `START-END`
    pub target: String,

    /// Numbers to combine, each used at most once
    pub numbers: Vec<String>,

    /// Output style for solutions
    #[arg(short, long, value_enum, default_value = "expr")]
    pub style: StyleArg,

    /// Number of worker threads (default: available parallelism)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Search every standard six-card selection instead of the given numbers
    #[arg(short, long)]
    pub generate: bool,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// What to run once arguments have been validated
#[derive(Debug, PartialEq)]
pub enum Mode {
    Solve(Game),
    Generate,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub target: TargetRange,
    pub mode: Mode,
    pub pool: PoolConfig,
    pub log_level: LogLevel,
}

/// Validate parsed arguments and turn them into a configuration
pub fn build_config(args: CliArgs) -> Result<CliConfig> {
    let target = parse_target(&args.target).context("Invalid target")?;

    let mode = if args.generate {
        if !args.numbers.is_empty() {
            bail!("Numbers cannot be given together with --generate");
        }
        Mode::Generate
    } else {
        if args.numbers.is_empty() {
            bail!("At least one number is required unless --generate is set");
        }
        let numbers = parse_numbers(&args.numbers).context("Invalid number")?;
        Mode::Solve(Game::new(numbers, target).context("Invalid game")?)
    };

    let capacity = match &mode {
        Mode::Solve(game) => game.len(),
        Mode::Generate => SELECTION_SIZE,
    };
    let pool = PoolConfig::default()
        .with_threads_option(args.threads)
        .with_capacity(capacity)
        .with_style(args.style.to_print_style());

    Ok(CliConfig {
        target,
        mode,
        pool,
        log_level: args.log_level,
    })
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    build_config(CliArgs::parse())
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    init_logging(&config.log_level)?;

    let pool = WorkerPool::new(config.pool).context("Failed to start worker pool")?;

    match config.mode {
        Mode::Solve(game) => {
            info!("Searching {:?} for {}", game.numbers(), config.target);
            let found = pool.solve(game)?;
            if found == 0 {
                warn!("No solutions found");
            }
        }
        Mode::Generate => {
            let count = generate_all(&pool, config.target)?;
            info!("Generated {} selections", count);
        }
    }

    pool.shutdown();
    Ok(())
}
