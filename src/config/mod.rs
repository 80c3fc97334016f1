pub mod settings;
pub mod utils;

pub use settings::{Settings, ThemeMode};
pub use utils::get_data_dir;
pub use utils::get_database_path;
