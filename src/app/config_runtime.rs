//! Log level resolution.

use crate::app_config::FileConfig;
use crate::cli::Args;

/// Default log level and whether it must override `RUST_LOG`.
///
/// Priority: `-q`/`-v` on the command line, then `RUST_LOG`, then the
/// config file's `verbosity`, then `info`.
pub(crate) fn resolve_log_level(args: &Args, file_config: &FileConfig) -> (&'static str, bool) {
    if args.quiet {
        return ("error", true);
    }
    match args.verbose {
        0 => {}
        1 => return ("debug", true),
        _ => return ("trace", true),
    }
    let level = file_config
        .verbosity
        .map_or("info", |verbosity| verbosity.log_level());
    (level, false)
}
