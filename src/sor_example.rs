use crate::build_info;
use crate::error::*;
use crate::grid::*;
use crate::init::*;
use crate::solver::*;
use clap::Parser;

/// gridsor relaxation executable
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Interior side length, the grid gets a ghost ring on top.
    #[arg(short, long, default_value = "64")]
    pub interior: usize,

    /// How a sweep is split between workers.
    #[arg(short, long, value_enum, default_value_t = Strategy::Sequential)]
    pub strategy: Strategy,

    /// Relaxation factor.
    #[arg(short, long, default_value = "1.58")]
    pub omega: f64,

    /// Convergence threshold on the mean change per cell.
    #[arg(long, default_value = "0.00001")]
    pub tolerance: f64,

    /// The number of threads to use.
    #[arg(short, long, default_value = "4")]
    pub threads: usize,

    /// Tile side for the blocked strategies.
    #[arg(short, long, default_value = "8")]
    pub block_size: usize,

    /// Initial grid contents.
    #[arg(long, value_enum, default_value_t = ClapInitType::Rand)]
    pub init: ClapInitType,

    /// Fill value for uniform, upper end of the range for rand.
    #[arg(long, default_value = "10.0")]
    pub dial: f64,

    /// Seed for rand, defaults to the grid row length.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Chunk size to use for parallel initialization.
    #[arg(short, long, default_value = "1000")]
    pub chunk_size: usize,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl Args {
    pub fn cli_setup(name: &str) -> Self {
        let args = Args::parse();

        if args.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        env_logger::init();
        log::info!("{}: {:?}", name, args);

        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .thread_name(|i| format!("rayon_thread_{}", i))
            .build_global()
        {
            log::warn!("global thread pool already set up: {}", e);
        }

        args
    }

    pub fn row_len(&self) -> usize {
        self.interior.saturating_add(2)
    }

    pub fn init_type(&self) -> InitType {
        let seed = self.seed.unwrap_or(self.row_len() as u64);
        self.init.to_init_type(self.dial, seed)
    }

    pub fn solver_parameters(&self) -> SorParameters {
        let value_range = match self.init_type() {
            InitType::Zero => (0.0, 0.0),
            InitType::Uniform { value } => (value.min(0.0), value.max(0.0)),
            InitType::Incrementing => {
                let row_len = self.row_len() as f64;
                (0.0, row_len * row_len - 1.0)
            }
            InitType::Rand { min, max, .. } => (min, max),
        };
        SorParameters {
            omega: self.omega,
            tolerance: self.tolerance,
            threads: self.threads,
            block_size: self.block_size,
            value_range,
        }
    }

    /// Allocate and fill the grid described by the arguments.
    pub fn grid(&self) -> Result<Grid> {
        let mut grid = Grid::with_interior(self.interior)?;
        generate(&mut grid, self.init_type(), self.chunk_size);
        Ok(grid)
    }
}
