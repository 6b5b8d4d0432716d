use std::env;
use std::process;
use std::time::Duration;

pub fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let (domain, server) = match (args.next(), args.next()) {
        (Some(domain), Some(server)) => (domain, server),
        _ => {
            eprintln!("usage: lookup <domain> <dns-server>");
            process::exit(2);
        }
    };

    let addresses = hostsdiag::lookup(&domain, &server, Duration::from_secs(3));
    if addresses.is_empty() {
        println!("no addresses for {}", domain);
        process::exit(1);
    }
    for address in addresses {
        println!("{}", address);
    }
}
