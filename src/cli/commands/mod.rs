mod history;
mod init;
mod lookup;

pub use history::cmd_history;
pub use init::cmd_init;
pub use lookup::cmd_lookup;
