//! Binary entrypoint for typicon-cli (made by FontLab https://www.fontlab.com/)

fn main() {
    if let Err(err) = typicon_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
