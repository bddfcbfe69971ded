use env_logger::Env;
use log::error;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = randq::cmd::run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
