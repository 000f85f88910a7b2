pub mod speclib;
pub mod windows;

pub use windows::{
    read_window_table,
    read_window_table_path,
};
