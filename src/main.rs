use clap::Parser;
use miette::Result;
use rjq::cli::commands::{completions, init, part, quote, settings};
use rjq::cli::{Cli, Commands};
use rjq::entities::PartKind;
use rjq::logging::{init_logging, LogConfig};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    init_logging(&LogConfig::from_verbosity(global.verbose, global.quiet));

    match cli.command {
        Commands::Init(args) => init::run(args),
        Commands::Sphere(cmd) => part::run(cmd, PartKind::Sphere, &global),
        Commands::Flange(cmd) => part::run(cmd, PartKind::Flange, &global),
        Commands::Quote(cmd) => quote::run(cmd, &global),
        Commands::Settings(cmd) => settings::run(cmd, &global),
        Commands::Completions(args) => completions::run(args),
    }
}
