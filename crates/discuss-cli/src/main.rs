//! discuss - threaded comments from the command line
//!
//! Drives the comment API against a local file-backed store.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create .discuss/ with a default config
//! discuss init
//!
//! # Comment on a node, then reply
//! discuss add --node abc12 --user alice --content "Looks good"
//! discuss add --node abc12 --user bob --reply-to <comment-id> --content "Agreed"
//!
//! # Read the thread
//! discuss list --node abc12 --user bob
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
