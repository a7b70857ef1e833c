pub mod loaders;
pub mod paper;
pub mod user;

pub use loaders::{load_papers, load_user_table, TextEncoding};
pub use paper::{Author, PageRange, Paper, PdfInfo, AUTHOR_COLUMN};
pub use user::{User, UserTable};
