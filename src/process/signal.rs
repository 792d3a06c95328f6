use tracing::debug;

pub fn install_interrupt_handler(quiet: bool) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        debug!("interrupt received");
        if !quiet {
            eprintln!("\nUse '\\quit' to exit the shell");
        }
    })
}
