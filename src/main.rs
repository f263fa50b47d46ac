use log::info;
use scene_viewer::{create_clap_command, handle_clap_matches, Viewer, ViewerError};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> Result<(), ViewerError> {
    let matches = create_clap_command().get_matches();
    let config = handle_clap_matches(&matches)?;

    // stderr, so log lines don't interleave with what is typed into the form console
    TermLogger::init(
        config.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    info!(
        "Starting {}x{} viewer with {}..={} objects",
        config.width, config.height, config.populate.min_objects, config.populate.max_objects
    );

    Viewer::new(config)?.run()
}
