use automate::app::cli;

fn main() {
    env_logger::init();
    cli::run();
}
