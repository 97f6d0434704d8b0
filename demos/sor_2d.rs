use gridsor::sor_example::*;
use gridsor::solver::*;
use std::time::Instant;

fn main() {
    let args = Args::cli_setup("sor_2d");

    let mut grid = match args.grid() {
        Ok(grid) => grid,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let params = args.solver_parameters();

    let start = Instant::now();
    let report = match solve(args.strategy, &mut grid, &params) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    let (min, max) = grid.min_max();
    log::info!("final cell range [{}, {}]", min, max);

    println!(
        "{:?}, {}, {}, {:?}, {:.6}",
        args.strategy,
        grid.interior_len(),
        report.iterations,
        report.termination,
        elapsed.as_secs_f64()
    );
}
