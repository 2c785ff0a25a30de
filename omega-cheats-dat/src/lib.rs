pub mod dat;
pub mod error;
pub mod index;

pub use dat::{DatFile, DatRom, parse_dat, parse_dat_file};
pub use error::DatError;
pub use index::{DAT_NAME_DELIMITERS, SerialIndex, short_name};
