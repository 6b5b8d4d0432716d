use std::env;
use std::process;
use std::time::Duration;

pub fn main() {
    env_logger::init();

    let host = match env::args().nth(1) {
        Some(host) => host,
        None => {
            eprintln!("usage: ping <host>");
            process::exit(2);
        }
    };

    match hostsdiag::probe(&host, Duration::from_secs(3)) {
        Some(latency) => println!("{}: {} ms", host, latency.as_millis()),
        None => {
            println!("{}: unreachable", host);
            process::exit(1);
        }
    }
}
