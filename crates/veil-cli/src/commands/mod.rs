mod init;
mod misc;
mod values;

pub use init::handle_init;
pub use misc::{handle_completions, handle_keygen};
pub use values::{handle_get, handle_inspect, handle_list, handle_set};
