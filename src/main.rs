use sunspec_decode::prelude::*;

fn main() {
    let options = Options::new();

    if let Err(err) = sunspec_decode::app(options) {
        error!("{:#}", err);
        std::process::exit(255);
    }
}
