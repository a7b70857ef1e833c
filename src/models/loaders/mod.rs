pub mod tsv_loader;

pub use tsv_loader::{
    decode_text, load_papers, load_tsv_file, load_user_table, parse_tsv, TextEncoding, TsvRow,
    TsvTable,
};
