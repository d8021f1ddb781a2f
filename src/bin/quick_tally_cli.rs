use quick_tally::{cli::run_cli, controller::Variant, init};

fn print_usage() {
    eprintln!("Usage: quick_tally_cli [invoice|sum]");
}

fn main() {
    init();

    let mut args = std::env::args().skip(1);
    let variant = match args.next().as_deref() {
        None => None,
        Some("-h") | Some("--help") => {
            print_usage();
            return;
        }
        Some(raw) => match raw.parse::<Variant>() {
            Ok(variant) => Some(variant),
            Err(err) => {
                eprintln!("Error: {err}");
                print_usage();
                std::process::exit(2);
            }
        },
    };

    if let Err(err) = run_cli(variant) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
