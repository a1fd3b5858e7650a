//! Session state, profile files and export documents.

pub mod export;
pub mod profile_io;
pub mod session;

pub use export::{default_export_name, read_export, write_export, ExportDocument};
pub use profile_io::{load_profile, parse_room_list, read_profile, save_profile, LoadedProfile};
pub use session::Session;
