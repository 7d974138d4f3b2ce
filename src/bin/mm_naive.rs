use std::process::ExitCode;

use matmul_bench::Algorithm;

fn main() -> ExitCode {
    matmul_bench::cli::bench_main(Algorithm::Naive)
}
