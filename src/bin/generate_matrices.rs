use std::process::ExitCode;

fn main() -> ExitCode {
    matmul_bench::cli::generate_main()
}
