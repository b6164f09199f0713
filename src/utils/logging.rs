use tracing_subscriber::{EnvFilter, fmt};

/// Initialize diagnostic logging on stderr.
///
/// Default level is WARN, so normal output stays clean.
/// - `-v` => INFO
/// - `-vv` => DEBUG
/// - `-vvv` => TRACE
/// - `-q` => ERROR
///
/// `RUST_LOG` overrides everything (e.g. `RUST_LOG=rworkoutlog=debug`).
pub fn init_logging(verbose: u8, quiet: u8) {
    let net = i16::from(verbose) - i16::from(quiet);
    let level = match net {
        i16::MIN..=-1 => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,rworkoutlog={level}")));

    let show_src = matches!(level, "debug" | "trace");

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .try_init();
}
